//! Format-pattern specifiers and the tokenizer that finds them.
//!
//! Patterns use the familiar `yyyy-MM-dd HH:mm:ss` vocabulary. A run of one
//! symbol character is matched against every specifier starting with that
//! character; anything unmatched, or preceded by [`ESCAPE_CHAR`], is literal.

use crate::consts::ESCAPE_CHAR;
use crate::prelude::*;
use crate::types::Field;
use serde::{Deserialize, Serialize};

/// Every recognized specifier, plus `Literal` for passthrough text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecifierKind {
    /// `s`
    Second,
    /// `ss`
    SecondPadded,
    /// `m`
    Minute,
    /// `mm`
    MinutePadded,
    /// `h`
    Hour12,
    /// `hh`
    Hour12Padded,
    /// `H`
    Hour24,
    /// `HH`
    Hour24Padded,
    /// `t`
    AmPmChar,
    /// `tt`
    AmPmFull,
    /// `d`
    Day,
    /// `dd`
    DayPadded,
    /// `ddd`
    DayNameAbbreviated,
    /// `dddd`
    DayNameFull,
    /// `M`
    Month,
    /// `MM`
    MonthPadded,
    /// `MMM`
    MonthNameAbbreviated,
    /// `MMMM`
    MonthNameFull,
    /// `y`
    Year2Digit,
    /// `yy`
    Year2DigitPadded,
    /// `yyy`
    Year3Plus,
    /// `yyyy`
    Year4,
    /// `g`
    EraName,
    /// `/`
    DateSeparator,
    /// `:`
    TimeSeparator,
    Literal,
}

impl SpecifierKind {
    /// The component a specifier reads and edits, if any
    pub const fn field(self) -> Option<Field> {
        match self {
            Self::Second | Self::SecondPadded => Some(Field::Second),
            Self::Minute | Self::MinutePadded => Some(Field::Minute),
            Self::Hour12
            | Self::Hour12Padded
            | Self::Hour24
            | Self::Hour24Padded
            | Self::AmPmChar
            | Self::AmPmFull => Some(Field::Hour),
            Self::Day | Self::DayPadded | Self::DayNameAbbreviated | Self::DayNameFull => {
                Some(Field::Day)
            }
            Self::Month
            | Self::MonthPadded
            | Self::MonthNameAbbreviated
            | Self::MonthNameFull => Some(Field::Month),
            Self::Year2Digit | Self::Year2DigitPadded | Self::Year3Plus | Self::Year4 => {
                Some(Field::Year)
            }
            Self::EraName | Self::DateSeparator | Self::TimeSeparator | Self::Literal => None,
        }
    }
}

/// How a specifier is rendered and whether the user can edit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum ValueClass {
    /// Typed integer
    Numeral,
    /// Choice among a few locale strings (AM/PM)
    EnumeratedItems,
    /// Separator or era text
    StaticText,
    /// Locale name chosen by the date (weekday and month names)
    StaticEnumeratedItems,
    /// Passthrough pattern text
    LiteralText,
}

impl ValueClass {
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Numeral | Self::EnumeratedItems)
    }
}

/// Immutable description of one specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{symbol}")]
pub struct SpecifierDescriptor {
    pub kind: SpecifierKind,
    pub value_class: ValueClass,
    /// Pattern text that selects this specifier, empty for literals
    pub symbol: &'static str,
    /// Digits a user may type, 0 when the value is not typed
    pub max_length: u8,
    /// Also matches runs longer than `symbol`
    pub matches_longer_runs: bool,
}

impl SpecifierDescriptor {
    const fn new(
        kind: SpecifierKind,
        value_class: ValueClass,
        symbol: &'static str,
        max_length: u8,
        matches_longer_runs: bool,
    ) -> Self {
        Self {
            kind,
            value_class,
            symbol,
            max_length,
            matches_longer_runs,
        }
    }

    #[inline]
    pub const fn is_editable(&self) -> bool {
        self.value_class.is_editable()
    }

    #[inline]
    pub const fn is_static(&self) -> bool {
        matches!(self.value_class, ValueClass::StaticText)
    }

    /// Number of symbol characters (all symbols are ASCII)
    #[inline]
    const fn symbol_len(&self) -> usize {
        self.symbol.len()
    }
}

use SpecifierKind as K;
use ValueClass as V;

/// Descriptor shared by every literal token
pub const LITERAL: SpecifierDescriptor =
    SpecifierDescriptor::new(K::Literal, V::LiteralText, "", 0, false);

const SECONDS: &[SpecifierDescriptor] = &[
    SpecifierDescriptor::new(K::Second, V::Numeral, "s", 2, false),
    SpecifierDescriptor::new(K::SecondPadded, V::Numeral, "ss", 2, true),
];
const MINUTES: &[SpecifierDescriptor] = &[
    SpecifierDescriptor::new(K::Minute, V::Numeral, "m", 2, false),
    SpecifierDescriptor::new(K::MinutePadded, V::Numeral, "mm", 2, true),
];
const HOURS_12: &[SpecifierDescriptor] = &[
    SpecifierDescriptor::new(K::Hour12, V::Numeral, "h", 2, false),
    SpecifierDescriptor::new(K::Hour12Padded, V::Numeral, "hh", 2, true),
];
const HOURS_24: &[SpecifierDescriptor] = &[
    SpecifierDescriptor::new(K::Hour24, V::Numeral, "H", 2, false),
    SpecifierDescriptor::new(K::Hour24Padded, V::Numeral, "HH", 2, true),
];
const AM_PM: &[SpecifierDescriptor] = &[
    SpecifierDescriptor::new(K::AmPmChar, V::EnumeratedItems, "t", 1, false),
    SpecifierDescriptor::new(K::AmPmFull, V::EnumeratedItems, "tt", 2, true),
];
const DAYS: &[SpecifierDescriptor] = &[
    SpecifierDescriptor::new(K::Day, V::Numeral, "d", 2, false),
    SpecifierDescriptor::new(K::DayPadded, V::Numeral, "dd", 2, false),
    SpecifierDescriptor::new(K::DayNameAbbreviated, V::StaticEnumeratedItems, "ddd", 0, false),
    SpecifierDescriptor::new(K::DayNameFull, V::StaticEnumeratedItems, "dddd", 0, true),
];
const MONTHS: &[SpecifierDescriptor] = &[
    SpecifierDescriptor::new(K::Month, V::Numeral, "M", 2, false),
    SpecifierDescriptor::new(K::MonthPadded, V::Numeral, "MM", 2, false),
    SpecifierDescriptor::new(K::MonthNameAbbreviated, V::StaticEnumeratedItems, "MMM", 0, false),
    SpecifierDescriptor::new(K::MonthNameFull, V::StaticEnumeratedItems, "MMMM", 0, true),
];
const YEARS: &[SpecifierDescriptor] = &[
    SpecifierDescriptor::new(K::Year2Digit, V::Numeral, "y", 2, false),
    SpecifierDescriptor::new(K::Year2DigitPadded, V::Numeral, "yy", 2, false),
    SpecifierDescriptor::new(K::Year3Plus, V::Numeral, "yyy", 4, false),
    SpecifierDescriptor::new(K::Year4, V::Numeral, "yyyy", 4, true),
];
const ERAS: &[SpecifierDescriptor] = &[SpecifierDescriptor::new(
    K::EraName,
    V::StaticText,
    "g",
    0,
    true,
)];
const DATE_SEPARATORS: &[SpecifierDescriptor] = &[SpecifierDescriptor::new(
    K::DateSeparator,
    V::StaticText,
    "/",
    0,
    false,
)];
const TIME_SEPARATORS: &[SpecifierDescriptor] = &[SpecifierDescriptor::new(
    K::TimeSeparator,
    V::StaticText,
    ":",
    0,
    false,
)];

/// The catalog, grouped by leading symbol character
static CATALOG: [(char, &[SpecifierDescriptor]); 11] = [
    ('s', SECONDS),
    ('m', MINUTES),
    ('h', HOURS_12),
    ('H', HOURS_24),
    ('t', AM_PM),
    ('d', DAYS),
    ('M', MONTHS),
    ('y', YEARS),
    ('g', ERAS),
    ('/', DATE_SEPARATORS),
    (':', TIME_SEPARATORS),
];

/// Descriptors whose symbol starts with `symbol`, empty if there are none
pub fn candidates(symbol: char) -> &'static [SpecifierDescriptor] {
    match CATALOG.iter().find(|(leading, _)| *leading == symbol) {
        Some((_, group)) => *group,
        None => &[],
    }
}

/// Every descriptor in the catalog, in group order
pub fn catalog() -> impl Iterator<Item = &'static SpecifierDescriptor> {
    CATALOG.iter().flat_map(|(_, group)| group.iter())
}

/// Looks up the descriptor of a kind; `Literal` yields [`LITERAL`]
pub fn descriptor(kind: SpecifierKind) -> &'static SpecifierDescriptor {
    catalog().find(|d| d.kind == kind).unwrap_or(&LITERAL)
}

/// A specifier found in a pattern, with the pattern text it consumed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{text}")]
pub struct Token {
    pub descriptor: SpecifierDescriptor,
    pub text: String,
}

impl Token {
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            descriptor: LITERAL,
            text: text.into(),
        }
    }

    #[inline]
    pub const fn kind(&self) -> SpecifierKind {
        self.descriptor.kind
    }

    #[inline]
    pub const fn is_literal(&self) -> bool {
        matches!(self.descriptor.kind, SpecifierKind::Literal)
    }
}

/// Finds the best descriptor for the run of `symbol` starting at `start`.
///
/// Returns the winning descriptor with the repeat count it was recorded at,
/// and the full run length.
fn match_run(
    chars: &[char],
    start: usize,
    group: &'static [SpecifierDescriptor],
) -> (Option<(SpecifierDescriptor, usize)>, usize) {
    let symbol = chars[start];
    let mut matched = None;
    let mut repeat = 0;
    loop {
        repeat += 1;
        for candidate in group {
            let len = candidate.symbol_len();
            if len == repeat || (len < repeat && candidate.matches_longer_runs) {
                matched = Some((*candidate, repeat));
            }
        }
        if chars.get(start + repeat) != Some(&symbol) {
            break;
        }
    }
    (matched, repeat)
}

/// Splits a pattern into specifier and literal tokens.
///
/// An escape followed by any character makes that character literal; a
/// trailing lone escape is dropped.
pub fn tokenize(pattern: &str) -> Vec<Token> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut index = 0;

    while index < chars.len() {
        let symbol = chars[index];
        if symbol == ESCAPE_CHAR {
            if let Some(&escaped) = chars.get(index + 1) {
                literal.push(escaped);
            }
            index += 2;
            continue;
        }

        let group = candidates(symbol);
        let (matched, run) = if group.is_empty() {
            (None, 1)
        } else {
            match_run(&chars, index, group)
        };

        match matched {
            Some((descriptor, consumed)) => {
                if !literal.is_empty() {
                    tokens.push(Token::literal(std::mem::take(&mut literal)));
                }
                tokens.push(Token {
                    descriptor,
                    text: chars[index..index + consumed].iter().collect(),
                });
                index += consumed;
            }
            None => {
                literal.extend(&chars[index..index + run]);
                index += run;
            }
        }
    }

    if !literal.is_empty() {
        tokens.push(Token::literal(literal));
    }

    trace!("tokenized {pattern:?} into {} tokens", tokens.len());
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(pattern: &str) -> Vec<SpecifierKind> {
        tokenize(pattern).iter().map(Token::kind).collect()
    }

    #[test]
    fn test_tokenize_iso_date() {
        let tokens = tokenize("yyyy-MM-dd");
        assert_eq!(
            kinds("yyyy-MM-dd"),
            [K::Year4, K::Literal, K::MonthPadded, K::Literal, K::DayPadded]
        );
        assert_eq!(tokens[1].text, "-");
        assert_eq!(tokens[3].text, "-");
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_tokenize_escape_then_shorter_run() {
        let tokens = tokenize("\\yyyy");
        assert_eq!(tokens, [Token::literal("y"), Token {
            descriptor: *descriptor(K::Year3Plus),
            text: "yyy".to_owned(),
        }]);
    }

    #[test]
    fn test_tokenize_trailing_escape_dropped() {
        assert_eq!(tokenize("HH\\"), [Token {
            descriptor: *descriptor(K::Hour24Padded),
            text: "HH".to_owned(),
        }]);
        assert!(tokenize("\\").is_empty());
    }

    #[test]
    fn test_tokenize_escaped_text_joins_literal_run() {
        let tokens = tokenize("HH\\h mm");
        assert_eq!(kinds("HH\\h mm"), [K::Hour24Padded, K::Literal, K::MinutePadded]);
        assert_eq!(tokens[1].text, "h ");
    }

    #[test]
    fn test_tokenize_flagged_descriptor_absorbs_long_run() {
        let tokens = tokenize("yyyyy");
        assert_eq!(kinds("yyyyy"), [K::Year4]);
        assert_eq!(tokens[0].text, "yyyyy");
        assert_eq!(kinds("ddddddd"), [K::DayNameFull]);
        assert_eq!(kinds("sss"), [K::SecondPadded]);
        assert_eq!(kinds("hhh"), [K::Hour12Padded]);
        assert_eq!(kinds("ttt"), [K::AmPmFull]);
        assert_eq!(kinds("gg"), [K::EraName]);
    }

    #[test]
    fn test_tokenize_unflagged_descriptor_leaves_rest() {
        assert_eq!(kinds("//"), [K::DateSeparator, K::DateSeparator]);
        assert_eq!(kinds("::"), [K::TimeSeparator, K::TimeSeparator]);
    }

    #[test]
    fn test_tokenize_single_symbols() {
        struct TestCase {
            pattern: &'static str,
            kind: SpecifierKind,
        }

        let cases = [
            TestCase { pattern: "s", kind: K::Second },
            TestCase { pattern: "m", kind: K::Minute },
            TestCase { pattern: "h", kind: K::Hour12 },
            TestCase { pattern: "H", kind: K::Hour24 },
            TestCase { pattern: "t", kind: K::AmPmChar },
            TestCase { pattern: "d", kind: K::Day },
            TestCase { pattern: "ddd", kind: K::DayNameAbbreviated },
            TestCase { pattern: "M", kind: K::Month },
            TestCase { pattern: "MMM", kind: K::MonthNameAbbreviated },
            TestCase { pattern: "MMMM", kind: K::MonthNameFull },
            TestCase { pattern: "y", kind: K::Year2Digit },
            TestCase { pattern: "yy", kind: K::Year2DigitPadded },
            TestCase { pattern: "yyy", kind: K::Year3Plus },
            TestCase { pattern: "g", kind: K::EraName },
            TestCase { pattern: "/", kind: K::DateSeparator },
            TestCase { pattern: ":", kind: K::TimeSeparator },
        ];

        for case in &cases {
            assert_eq!(kinds(case.pattern), [case.kind], "pattern {:?}", case.pattern);
        }
    }

    #[test]
    fn test_tokenize_unknown_characters_are_literal() {
        let tokens = tokenize("xyz");
        assert_eq!(kinds("xyz"), [K::Literal, K::Year2Digit, K::Literal]);
        assert_eq!(tokens[0].text, "x");
        assert_eq!(tokens[2].text, "z");

        let tokens = tokenize("at HH");
        assert_eq!(tokens[0].text, "a");
        assert_eq!(tokens[1].kind(), K::AmPmChar);
        assert_eq!(tokens[2].text, " ");
    }

    #[test]
    fn test_tokenize_full_pattern() {
        assert_eq!(
            kinds("dddd, dd MMMM yyyy h:mm tt"),
            [
                K::DayNameFull,
                K::Literal,
                K::DayPadded,
                K::Literal,
                K::MonthNameFull,
                K::Literal,
                K::Year4,
                K::Literal,
                K::Hour12,
                K::TimeSeparator,
                K::MinutePadded,
                K::Literal,
                K::AmPmFull,
            ]
        );
    }

    #[test]
    fn test_tokenize_non_ascii_literal() {
        let tokens = tokenize("dddd، dd");
        assert_eq!(kinds("dddd، dd"), [K::DayNameFull, K::Literal, K::DayPadded]);
        assert_eq!(tokens[1].text, "، ");
    }

    #[test]
    fn test_candidates() {
        assert_eq!(candidates('y').len(), 4);
        assert_eq!(candidates('s').len(), 2);
        assert!(candidates('x').is_empty());
        assert!(candidates(ESCAPE_CHAR).is_empty());
    }

    #[test]
    fn test_catalog_symbols_start_with_group_char() {
        for (leading, group) in &CATALOG {
            for spec in *group {
                assert!(spec.symbol.starts_with(*leading), "{spec}");
            }
        }
        assert_eq!(catalog().count(), 25);
    }

    #[test]
    fn test_editability() {
        assert!(descriptor(K::Year4).is_editable());
        assert!(descriptor(K::AmPmFull).is_editable());
        assert!(!descriptor(K::MonthNameFull).is_editable());
        assert!(!descriptor(K::DateSeparator).is_editable());
        assert!(!LITERAL.is_editable());
        assert!(descriptor(K::EraName).is_static());
        assert!(!descriptor(K::Day).is_static());
    }

    #[test]
    fn test_kind_fields() {
        assert_eq!(K::Hour12Padded.field(), Some(Field::Hour));
        assert_eq!(K::Hour24.field(), Some(Field::Hour));
        assert_eq!(K::AmPmChar.field(), Some(Field::Hour));
        assert_eq!(K::MonthNameAbbreviated.field(), Some(Field::Month));
        assert_eq!(K::Year3Plus.field(), Some(Field::Year));
        assert_eq!(K::EraName.field(), None);
        assert_eq!(K::Literal.field(), None);
    }

    #[test]
    fn test_descriptor_lookup() {
        let spec = descriptor(K::Year4);
        assert_eq!(spec.symbol, "yyyy");
        assert_eq!(spec.max_length, 4);
        assert!(spec.matches_longer_runs);
        assert_eq!(descriptor(K::Literal), &LITERAL);
    }
}
