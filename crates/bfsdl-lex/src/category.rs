//! Symbol category ids used by the tokenizer.
//!
//! The ids are small integers chosen by the tokenizer; the symbolizer only
//! passes them through.

/// `[` `]` `;` `:` `=`
pub const CONTROL: i32 = 0;
/// `0`-`9`
pub const DECIMAL_DIGITS: i32 = 1;
/// `#`
pub const HASH: i32 = 2;
/// `A`-`Z`, `a`-`z`, `_`
pub const LETTERS: i32 = 3;
/// `+` `-`
pub const OPERATORS: i32 = 4;
/// `.`
pub const PERIOD: i32 = 5;
/// `~`
pub const TILDE: i32 = 6;
/// Space, tab, CR, LF
pub const WHITESPACE: i32 = 7;
/// `"`
pub const QUOTE: i32 = 8;
