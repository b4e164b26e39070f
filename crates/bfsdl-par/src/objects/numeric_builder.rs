//! Incremental builder for numeric field descriptors.
//!
//! The body grammar hands the builder two strings in order: the identifier
//! (`u8`, `s16`, ...) and the suffix (empty, or fractional width digits).
//! Widths are multiplied by the active bit base before validation.

use bfsdl_util::{internal_error, Handler};

use super::{BitBase, Field, NumericFieldProperties, MAX_NUMERIC_FIELD_BITS};

const MODULE: &str = "NumericFieldBuilder";

/// Builds a [`FieldDescriptor::Numeric`](super::FieldDescriptor) from
/// identifier fragments.
pub struct NumericFieldBuilder<'h> {
    handler: &'h Handler,
    bit_base: BitBase,
    complete: bool,
    ident_parsed: bool,
    props: NumericFieldProperties,
}

impl<'h> NumericFieldBuilder<'h> {
    /// Creates a builder with the default bit base.
    pub fn new(handler: &'h Handler) -> Self {
        Self {
            handler,
            bit_base: BitBase::DEFAULT,
            complete: false,
            ident_parsed: false,
            props: NumericFieldProperties {
                signed: false,
                integer_bits: 0,
                fractional_bits: 0,
            },
        }
    }

    /// Sets the width multiplier policy. Takes effect for subsequent
    /// identifier parsing.
    pub fn set_bit_base(&mut self, bit_base: BitBase) {
        self.bit_base = bit_base;
    }

    /// True once identifier and suffix both parsed successfully.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Parses the `[us]<digits>` identifier.
    pub fn parse_identifier(&mut self, text: &str) -> bool {
        if self.ident_parsed {
            internal_error!(self.handler, MODULE, "Identifier already parsed");
            return false;
        }

        let bytes = text.as_bytes();
        if bytes.len() < 2 {
            return false;
        }
        let signed = match bytes[0] {
            b'u' => false,
            b's' => true,
            _ => return false,
        };
        let digits = &bytes[1..];
        if !digits.iter().all(u8::is_ascii_digit) {
            return false;
        }

        let Some(integer_bits) = self.calc_bits(digits) else {
            return false;
        };
        if signed && integer_bits == 0 {
            // Signed types need at least one integral bit.
            return false;
        }

        self.props = NumericFieldProperties {
            signed,
            integer_bits,
            fractional_bits: 0,
        };
        self.ident_parsed = true;
        true
    }

    /// Parses the suffix: empty for no fraction, or fractional width
    /// digits. Completes the builder on success.
    pub fn parse_suffix(&mut self, text: &str) -> bool {
        if !self.ident_parsed {
            internal_error!(self.handler, MODULE, "Identifier not yet parsed");
            return false;
        }

        if text.is_empty() {
            self.props.fractional_bits = 0;
        } else {
            let digits = text.as_bytes();
            if !digits.iter().all(u8::is_ascii_digit) {
                return false;
            }
            let Some(fractional_bits) = self.calc_bits(digits) else {
                return false;
            };
            self.props.fractional_bits = fractional_bits;
        }

        let total = self.props.integer_bits + self.props.fractional_bits;
        self.complete = (1..=MAX_NUMERIC_FIELD_BITS).contains(&total);
        self.complete
    }

    /// Returns the finished field, once complete.
    pub fn get_field(&self, name: &str) -> Option<Field> {
        self.complete.then(|| Field::numeric(name, self.props))
    }

    /// Prepares the builder for another field.
    pub fn reset(&mut self) {
        self.ident_parsed = false;
        self.complete = false;
    }

    fn calc_bits(&self, digits: &[u8]) -> Option<usize> {
        // Digits are pre-validated as ASCII decimal.
        let text = std::str::from_utf8(digits).ok()?;
        let count: u64 = text.parse().ok()?;
        let bits = count.checked_mul(self.bit_base.multiplier() as u64)?;
        if bits > MAX_NUMERIC_FIELD_BITS as u64 {
            return None;
        }
        Some(bits as usize)
    }
}
