//! The object tree and its children.
//!
//! A tree node holds an ordered list of field descriptors and a map of
//! named properties. Properties carry parse-wide metadata (the header
//! parameters); fields describe objects in the binary stream.

mod field;
mod numeric_builder;
mod property;
mod string_builder;
mod tree;

pub use field::{
    Field, FieldDescriptor, LengthMode, NumericFieldProperties, StringFieldProperties,
    MAX_NUMERIC_FIELD_BITS,
};
pub use numeric_builder::NumericFieldBuilder;
pub use property::Property;
pub use string_builder::{AttributeParseResult, StringFieldBuilder};
pub use tree::{Object, ObjectRef, Tree, TreeError};

/// Multiplier applied to numeric-field width digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitBase {
    /// Widths are counted in bits.
    Bit,
    /// Widths are counted in bytes.
    Byte,
}

impl BitBase {
    /// The default bit base applied when the header does not set one.
    pub const DEFAULT: Self = BitBase::Byte;

    /// Width multiplier: 1 for Bit, 8 for Byte.
    pub fn multiplier(self) -> usize {
        match self {
            BitBase::Bit => 1,
            BitBase::Byte => 8,
        }
    }

    /// Numeric encoding stored in the `BitBase` property.
    pub fn value(self) -> u32 {
        self.multiplier() as u32
    }
}

/// Byte or bit order of stream data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endianness {
    /// Least-significant first.
    Little,
    /// Most-significant first.
    Big,
}

impl Endianness {
    /// The default order applied when the header does not set one.
    pub const DEFAULT: Self = Endianness::Little;

    /// Numeric encoding stored in the order properties: LE = 0, BE = 1.
    pub fn value(self) -> u32 {
        match self {
            Endianness::Little => 0,
            Endianness::Big => 1,
        }
    }
}
