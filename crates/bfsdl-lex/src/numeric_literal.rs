//! Numeric literals and their incremental parser.
//!
//! The literal grammar, after the opening `#` has been seen by the
//! tokenizer:
//!
//! ```text
//! NumLit   := [ base_tag ] [ sign ] digits [ '.' digits ]
//! base_tag := 'b' | 'o' | 'd' | 'x'     (default 'd')
//! sign     := '+' | '-'                 (default '+')
//! digits   := digits valid in the chosen base
//! ```
//!
//! Symbols arrive pre-classified but split along category boundaries (the
//! tag of `#x2F` comes glued to the letters `F` but not to the digit `2`),
//! so the parser consumes them character by character. A symbol outside the
//! literal alphabet terminates the literal; the terminating symbol itself is
//! not consumed and must be re-dispatched by the caller.

use std::fmt;

use crate::category;

/// Outcome of the parse so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseResult {
    /// More symbols may extend the literal.
    NotComplete,
    /// A well-formed literal ended; the last symbol fed was not consumed.
    Complete,
    /// The symbol stream cannot form a literal.
    Error,
}

/// A parsed fixed-point literal.
///
/// Digits are kept textually; numeric access goes through the checked
/// accessors, which refuse values that do not fit the requested width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumericLiteral {
    base: u32,
    negative: bool,
    integer_digits: String,
    fractional_digits: Option<String>,
}

impl NumericLiteral {
    /// The radix, one of 2, 8, 10, 16.
    pub fn base(&self) -> u32 {
        self.base
    }

    /// True for `-` signed literals.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// True if a fractional part was given.
    pub fn has_fraction(&self) -> bool {
        self.fractional_digits.is_some()
    }

    /// The value as an unsigned integer fitting in `width_bits`, or None on
    /// overflow, a negative sign, or a fractional part.
    pub fn as_unsigned(&self, width_bits: u32) -> Option<u64> {
        if self.fractional_digits.is_some() || self.negative {
            return None;
        }
        let value = self.magnitude()?;
        fits_unsigned(value, width_bits).then_some(value)
    }

    /// The value as a signed integer fitting in `width_bits`, or None on
    /// overflow or a fractional part.
    pub fn as_signed(&self, width_bits: u32) -> Option<i64> {
        if self.fractional_digits.is_some() || width_bits == 0 {
            return None;
        }
        let magnitude = self.magnitude()?;
        if self.negative {
            let limit = if width_bits >= 64 {
                1u64 << 63
            } else {
                1u64 << (width_bits - 1)
            };
            (magnitude <= limit).then(|| 0i64.wrapping_sub_unsigned(magnitude))
        } else {
            let limit = if width_bits >= 64 {
                i64::MAX as u64
            } else {
                (1u64 << (width_bits - 1)) - 1
            };
            (magnitude <= limit).then_some(magnitude as i64)
        }
    }

    fn magnitude(&self) -> Option<u64> {
        let mut acc: u64 = 0;
        for ch in self.integer_digits.chars() {
            let digit = ch.to_digit(self.base)? as u64;
            acc = acc.checked_mul(self.base as u64)?.checked_add(digit)?;
        }
        Some(acc)
    }
}

fn fits_unsigned(value: u64, width_bits: u32) -> bool {
    width_bits >= 64 || value < (1u64 << width_bits)
}

impl fmt::Display for NumericLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.base {
            2 => 'b',
            8 => 'o',
            16 => 'x',
            _ => 'd',
        };
        write!(f, "#{}", tag)?;
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}", self.integer_digits)?;
        if let Some(fraction) = &self.fractional_digits {
            write!(f, ".{}", fraction)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LexState {
    Start,
    AfterTag,
    AfterSign,
    IntegerDigits,
    AfterPeriod,
    FractionDigits,
    Failed,
}

/// Incremental parser re-entered once per mapped symbol.
pub struct NumericLiteralParser {
    state: LexState,
    result: ParseResult,
    base: u32,
    negative: bool,
    integer_digits: String,
    fractional_digits: String,
    has_fraction: bool,
}

impl Default for NumericLiteralParser {
    fn default() -> Self {
        Self::new()
    }
}

impl NumericLiteralParser {
    /// Creates a parser ready for the symbol after `#`.
    pub fn new() -> Self {
        Self {
            state: LexState::Start,
            result: ParseResult::NotComplete,
            base: 10,
            negative: false,
            integer_digits: String::new(),
            fractional_digits: String::new(),
            has_fraction: false,
        }
    }

    /// Restores the initial state.
    pub fn reset(&mut self) {
        self.state = LexState::Start;
        self.result = ParseResult::NotComplete;
        self.base = 10;
        self.negative = false;
        self.integer_digits.clear();
        self.fractional_digits.clear();
        self.has_fraction = false;
    }

    /// Outcome after the most recent symbol.
    pub fn parse_result(&self) -> ParseResult {
        self.result
    }

    /// The finished literal, available once the result is
    /// [`ParseResult::Complete`].
    pub fn parsed_object(&self) -> Option<NumericLiteral> {
        if self.result != ParseResult::Complete {
            return None;
        }
        Some(NumericLiteral {
            base: self.base,
            negative: self.negative,
            integer_digits: self.integer_digits.clone(),
            fractional_digits: self.has_fraction.then(|| self.fractional_digits.clone()),
        })
    }

    /// Feeds one mapped symbol.
    pub fn parse_mapped_symbol(&mut self, category: i32, text: &str) {
        if self.result == ParseResult::Error {
            return;
        }
        match category {
            category::DECIMAL_DIGITS
            | category::LETTERS
            | category::OPERATORS
            | category::PERIOD => {
                for ch in text.chars() {
                    if !self.accept_char(ch) {
                        self.state = LexState::Failed;
                        self.result = ParseResult::Error;
                        return;
                    }
                }
                self.result = ParseResult::NotComplete;
            }
            _ => {
                // Any other symbol ends the literal without being consumed.
                self.result = if self.is_well_formed() {
                    ParseResult::Complete
                } else {
                    ParseResult::Error
                };
            }
        }
    }

    fn accept_char(&mut self, ch: char) -> bool {
        match self.state {
            LexState::Start => match ch {
                'b' => self.set_base(2),
                'o' => self.set_base(8),
                'd' => self.set_base(10),
                'x' => self.set_base(16),
                '+' => self.set_sign(false),
                '-' => self.set_sign(true),
                _ => self.accept_integer_digit(ch),
            },
            LexState::AfterTag => match ch {
                '+' => self.set_sign(false),
                '-' => self.set_sign(true),
                _ => self.accept_integer_digit(ch),
            },
            LexState::AfterSign => self.accept_integer_digit(ch),
            LexState::IntegerDigits => {
                if ch == '.' {
                    self.state = LexState::AfterPeriod;
                    self.has_fraction = true;
                    true
                } else {
                    self.accept_integer_digit(ch)
                }
            }
            LexState::AfterPeriod | LexState::FractionDigits => {
                if ch.is_digit(self.base) {
                    self.fractional_digits.push(ch);
                    self.state = LexState::FractionDigits;
                    true
                } else {
                    false
                }
            }
            LexState::Failed => false,
        }
    }

    fn set_base(&mut self, base: u32) -> bool {
        self.base = base;
        self.state = LexState::AfterTag;
        true
    }

    fn set_sign(&mut self, negative: bool) -> bool {
        self.negative = negative;
        self.state = LexState::AfterSign;
        true
    }

    fn accept_integer_digit(&mut self, ch: char) -> bool {
        if ch.is_digit(self.base) {
            self.integer_digits.push(ch);
            self.state = LexState::IntegerDigits;
            true
        } else {
            false
        }
    }

    fn is_well_formed(&self) -> bool {
        matches!(
            self.state,
            LexState::IntegerDigits | LexState::FractionDigits
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Feeds the text of `#<input>` one category-correct symbol at a time,
    // then a terminating control symbol.
    fn parse(input: &str) -> (ParseResult, Option<NumericLiteral>) {
        let mut parser = NumericLiteralParser::new();
        for ch in input.chars() {
            let cat = match ch {
                '0'..='9' => category::DECIMAL_DIGITS,
                '+' | '-' => category::OPERATORS,
                '.' => category::PERIOD,
                _ => category::LETTERS,
            };
            parser.parse_mapped_symbol(cat, &ch.to_string());
            if parser.parse_result() == ParseResult::Error {
                return (ParseResult::Error, None);
            }
        }
        parser.parse_mapped_symbol(category::CONTROL, ":");
        (parser.parse_result(), parser.parsed_object())
    }

    #[test]
    fn test_decimal_default_base() {
        let (result, literal) = parse("42");
        assert_eq!(result, ParseResult::Complete);
        let literal = literal.expect("literal parsed");
        assert_eq!(literal.base(), 10);
        assert_eq!(literal.as_unsigned(32), Some(42));
    }

    #[test]
    fn test_base_tags() {
        assert_eq!(parse("b101").1.and_then(|l| l.as_unsigned(8)), Some(5));
        assert_eq!(parse("o17").1.and_then(|l| l.as_unsigned(8)), Some(15));
        assert_eq!(parse("d19").1.and_then(|l| l.as_unsigned(8)), Some(19));
        assert_eq!(parse("xFF").1.and_then(|l| l.as_unsigned(8)), Some(255));
    }

    #[test]
    fn test_hex_digits_straddle_letter_and_digit_symbols() {
        // 'x' and 'b' arrive in one Letters symbol, '2' as a digit symbol,
        // 'F' as another Letters symbol.
        let mut parser = NumericLiteralParser::new();
        parser.parse_mapped_symbol(category::LETTERS, "xb");
        parser.parse_mapped_symbol(category::DECIMAL_DIGITS, "2");
        parser.parse_mapped_symbol(category::LETTERS, "F");
        parser.parse_mapped_symbol(category::CONTROL, ":");
        assert_eq!(parser.parse_result(), ParseResult::Complete);
        let literal = parser.parsed_object().expect("literal parsed");
        assert_eq!(literal.as_unsigned(16), Some(0xB2F));
    }

    #[test]
    fn test_signs() {
        let (_, literal) = parse("-5");
        let literal = literal.expect("literal parsed");
        assert!(literal.is_negative());
        assert_eq!(literal.as_unsigned(8), None);
        assert_eq!(literal.as_signed(8), Some(-5));
        assert_eq!(parse("+5").1.and_then(|l| l.as_signed(8)), Some(5));
        assert_eq!(parse("x-A").1.and_then(|l| l.as_signed(8)), Some(-10));
    }

    #[test]
    fn test_fractional_part() {
        let (result, literal) = parse("3.14");
        assert_eq!(result, ParseResult::Complete);
        let literal = literal.expect("literal parsed");
        assert!(literal.has_fraction());
        assert_eq!(literal.as_unsigned(32), None);
        assert_eq!(literal.as_signed(32), None);
    }

    #[test]
    fn test_malformed_literals() {
        assert_eq!(parse("").0, ParseResult::Error);
        assert_eq!(parse("d").0, ParseResult::Error);
        assert_eq!(parse("-").0, ParseResult::Error);
        assert_eq!(parse("3.").0, ParseResult::Error);
        assert_eq!(parse("3.5.2").0, ParseResult::Error);
        assert_eq!(parse("dX").0, ParseResult::Error);
        assert_eq!(parse("b2").0, ParseResult::Error);
        assert_eq!(parse("xg").0, ParseResult::Error);
    }

    #[test]
    fn test_width_limits() {
        let literal = parse("256").1.expect("literal parsed");
        assert_eq!(literal.as_unsigned(8), None);
        assert_eq!(literal.as_unsigned(9), Some(256));
        let literal = parse("128").1.expect("literal parsed");
        assert_eq!(literal.as_signed(8), None);
        assert_eq!(literal.as_signed(9), Some(128));
        let literal = parse("-128").1.expect("literal parsed");
        assert_eq!(literal.as_signed(8), Some(-128));
    }

    #[test]
    fn test_overflow_returns_none() {
        let literal = parse("x10000000000000000").1.expect("literal parsed");
        assert_eq!(literal.as_unsigned(64), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(parse("42").1.expect("parsed").to_string(), "#d42");
        assert_eq!(parse("x-A").1.expect("parsed").to_string(), "#x-A");
        assert_eq!(parse("3.14").1.expect("parsed").to_string(), "#d3.14");
    }

    #[test]
    fn test_reset_reuses_parser() {
        let mut parser = NumericLiteralParser::new();
        parser.parse_mapped_symbol(category::LETTERS, "q");
        assert_eq!(parser.parse_result(), ParseResult::Error);
        parser.reset();
        parser.parse_mapped_symbol(category::DECIMAL_DIGITS, "7");
        parser.parse_mapped_symbol(category::WHITESPACE, " ");
        assert_eq!(parser.parse_result(), ParseResult::Complete);
    }
}
