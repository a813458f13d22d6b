//! Derive macros shared by the public types.
//!
//! `Display` comes from `derive_more` so error messages and tokens can be
//! declared next to their variants.

pub use derive_more::Display;
