//! Typed field descriptors.
//!
//! A field describes one object a consumer will decode from the binary
//! stream. The original class hierarchy (numeric, bounded/fixed/prefixed
//! string) collapses into a tagged descriptor variant; downcasts are
//! pattern matches.

use std::fmt::Write as _;

use bfsdl_util::unicode::{coding_name, CodePoint, CodingId};

/// Upper bound on a numeric field's total width in bits.
pub const MAX_NUMERIC_FIELD_BITS: usize = 4096;

/// Shape of a numeric field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumericFieldProperties {
    /// Whether the value is signed.
    pub signed: bool,
    /// Integral bit count.
    pub integer_bits: usize,
    /// Fractional bit count.
    pub fractional_bits: usize,
}

/// How a string field's length is determined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthMode {
    /// Length is bounded by the surrounding container.
    Bounded,
    /// Fixed length in bits.
    Fixed(usize),
    /// Length prefix of the given width in bits precedes the data.
    PrefixedLength(usize),
}

/// Shape of a string field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StringFieldProperties {
    /// Terminator code point.
    pub term: CodePoint,
    /// Whether a missing terminator is tolerated.
    pub allow_unterminated: bool,
    /// Codec of the string data.
    pub coding: CodingId,
    /// Length determination.
    pub length: LengthMode,
}

/// The typed payload of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldDescriptor {
    /// A fixed-point numeric field.
    Numeric(NumericFieldProperties),
    /// A string field.
    String(StringFieldProperties),
}

/// A named field in declaration order within its tree node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    name: String,
    descriptor: FieldDescriptor,
}

impl Field {
    /// Creates a numeric field.
    pub fn numeric(name: impl Into<String>, props: NumericFieldProperties) -> Self {
        Self {
            name: name.into(),
            descriptor: FieldDescriptor::Numeric(props),
        }
    }

    /// Creates a string field.
    pub fn string(name: impl Into<String>, props: StringFieldProperties) -> Self {
        Self {
            name: name.into(),
            descriptor: FieldDescriptor::String(props),
        }
    }

    /// The field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The typed descriptor.
    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    /// The numeric shape, if this is a numeric field.
    pub fn as_numeric(&self) -> Option<&NumericFieldProperties> {
        match &self.descriptor {
            FieldDescriptor::Numeric(props) => Some(props),
            FieldDescriptor::String(_) => None,
        }
    }

    /// The string shape, if this is a string field.
    pub fn as_string(&self) -> Option<&StringFieldProperties> {
        match &self.descriptor {
            FieldDescriptor::String(props) => Some(props),
            FieldDescriptor::Numeric(_) => None,
        }
    }

    /// Canonical type string, deterministic from the descriptor.
    ///
    /// Numeric: `{s|u}<int_bits>[.<frac_bits>]`. String:
    /// `string:<b|f<bits>|p<bits>>[:t<term>][:tu];<coding-name>`.
    pub fn type_str(&self) -> String {
        let mut out = String::new();
        match &self.descriptor {
            FieldDescriptor::Numeric(props) => {
                let _ = write!(
                    out,
                    "{}{}",
                    if props.signed { "s" } else { "u" },
                    props.integer_bits
                );
                if props.fractional_bits != 0 {
                    let _ = write!(out, ".{}", props.fractional_bits);
                }
            }
            FieldDescriptor::String(props) => {
                out.push_str("string:");
                match props.length {
                    LengthMode::Bounded => out.push('b'),
                    LengthMode::Fixed(bits) => {
                        let _ = write!(out, "f{bits}");
                    }
                    LengthMode::PrefixedLength(bits) => {
                        let _ = write!(out, "p{bits}");
                    }
                }
                let _ = write!(out, ":t{}", props.term);
                if props.allow_unterminated {
                    out.push_str(":tu");
                }
                let _ = write!(out, ";{}", coding_name(props.coding));
            }
        }
        out
    }
}
