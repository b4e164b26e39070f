//! bfsdl-lex - Streaming lexical analysis for BFSDL specifications.
//!
//! Two stages turn a chunked byte stream into tokens:
//!
//! ```text
//! bytes ──▶ [Symbolizer] ──▶ category runs ──▶ [Tokenizer] ──▶ tokens
//! ```
//!
//! The [`Symbolizer`] decodes bytes into code points through an injected
//! converter, classifies them against registered symbol categories, and
//! coalesces adjacent same-category code points into symbol strings. The
//! [`Tokenizer`] observes those symbols and promotes them to tokens
//! (control characters, numeric literals, string literals, words) through a
//! small state machine, handing each token to a [`TokenObserver`].
//!
//! Both stages are pull-from-above: the caller feeds chunks and both
//! stages are re-entered by callback. A chunk may end in the middle of a
//! multi-byte character; `parse` then reports fewer bytes consumed than
//! offered and the caller refills.

pub mod category;
pub mod numeric_literal;
pub mod symbolizer;
pub mod token;
pub mod tokenizer;

pub use numeric_literal::{NumericLiteral, NumericLiteralParser, ParseResult};
pub use symbolizer::{
    ArraySymbolCategory, RangeSymbolCategory, StringSymbolCategory, SymbolCategory, SymbolObserver,
    Symbolizer,
};
pub use token::{StringLiteral, Token, TokenObserver};
pub use tokenizer::{LexError, Tokenizer};
