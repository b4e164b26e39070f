//! bfsdl-par - Interpretation of BFSDL token streams.
//!
//! This crate sits on top of `bfsdl-lex` and turns the token stream of a
//! specification into a structured model:
//!
//! ```text
//! bytes ──▶ tokenizer ──▶ [Interpreter] ──▶ object tree
//!              ▲
//!              └── [parse_stream] pumps chunks and formats diagnostics
//! ```
//!
//! - [`objects`]: the object tree (properties and typed field descriptors)
//!   plus the numeric and string field builders.
//! - [`interpreter`]: the token observer enforcing the header grammar and
//!   writing properties into the tree.
//! - [`parse_position`]: line/column tracking with a printable context
//!   window for error messages.
//! - [`stream`]: the driver that reads a byte source chunk by chunk, honors
//!   the lexer's "needs more data" remainder, and emits the formatted parse
//!   diagnostic on failure.

pub mod interpreter;
pub mod objects;
pub mod parse_position;
pub mod stream;

pub use interpreter::{Interpreter, ParserError};
pub use objects::{
    AttributeParseResult, BitBase, Endianness, Field, FieldDescriptor, LengthMode,
    NumericFieldBuilder, NumericFieldProperties, Object, ObjectRef, Property, StringFieldBuilder,
    StringFieldProperties, Tree, TreeError, MAX_NUMERIC_FIELD_BITS,
};
pub use parse_position::ParsePosition;
pub use stream::{parse_stream, StreamError};
