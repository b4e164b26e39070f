//! Incremental builder for string field descriptors.
//!
//! Accepts the identifier (`string`, `cstring`, `pstring`), then any number
//! of attributes, then `finalize` to fill defaults taken from the tree's
//! header parameters. Each attribute has a dedicated setter so the body
//! grammar can route directly; the generic `parse_*_attribute` entry points
//! dispatch by name.

use bfsdl_lex::NumericLiteral;
use bfsdl_util::unicode::{get_coding_id, is_character, CodePoint, CodingId};
use bfsdl_util::{internal_error, runtime_error, Handler};

use super::{Field, LengthMode, StringFieldProperties};

const MODULE: &str = "StringFieldBuilder";

/// Outcome of an attribute application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeParseResult {
    /// The attribute was applied.
    Success,
    /// The attribute name is not recognized.
    Unknown,
    /// The attribute is recognized but not supported.
    Unsupported,
    /// The attribute (or a conflicting one) was already set.
    Redefinition,
    /// The attribute value is invalid.
    InvalidArgument,
}

/// Builds a [`FieldDescriptor::String`](super::FieldDescriptor).
pub struct StringFieldBuilder<'h> {
    handler: &'h Handler,
    complete: bool,
    error: bool,
    ident_parsed: bool,
    coding: Option<CodingId>,
    length: Option<LengthMode>,
    term: Option<CodePoint>,
    allow_unterminated: Option<bool>,
    default_coding: Option<CodingId>,
    default_term: CodePoint,
}

impl<'h> StringFieldBuilder<'h> {
    /// Creates a builder with ASCII as the default codec and 0 as the
    /// default terminator.
    pub fn new(handler: &'h Handler) -> Self {
        Self {
            handler,
            complete: false,
            error: false,
            ident_parsed: false,
            coding: None,
            length: None,
            term: None,
            allow_unterminated: None,
            default_coding: get_coding_id("ASCII"),
            default_term: 0,
        }
    }

    /// Sets the codec applied when no `code` attribute is given.
    pub fn set_default_coding(&mut self, coding: CodingId) {
        self.default_coding = Some(coding);
    }

    /// Sets the terminator applied when no `term` attribute is given.
    pub fn set_default_term_char(&mut self, term: CodePoint) {
        self.default_term = term;
    }

    /// True once `finalize` succeeded.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Parses the type identifier.
    ///
    /// `cstring` presets a 0 terminator; `pstring` presets an 8-bit length
    /// prefix and allows a missing terminator.
    pub fn parse_identifier(&mut self, text: &str) -> bool {
        if self.ident_parsed {
            internal_error!(self.handler, MODULE, "Identifier already parsed");
            return false;
        }

        let ok = match text {
            "string" => true,
            "cstring" => self.set_term_attr(0) == AttributeParseResult::Success,
            "pstring" => {
                self.set_plen_attr(8) == AttributeParseResult::Success
                    && self.set_unterm_attr() == AttributeParseResult::Success
            }
            _ => false,
        };
        self.ident_parsed = ok;
        ok
    }

    /// Applies an attribute carrying a numeric literal value.
    pub fn parse_numeric_attribute(
        &mut self,
        name: &str,
        value: &NumericLiteral,
    ) -> AttributeParseResult {
        let result = match name {
            "term" => match value.as_unsigned(32) {
                Some(term) if is_character(term as CodePoint) => {
                    self.set_term_attr(term as CodePoint)
                }
                _ => AttributeParseResult::InvalidArgument,
            },
            "plen" => match value.as_unsigned(16) {
                Some(bits) => self.set_plen_attr(bits as usize),
                None => AttributeParseResult::InvalidArgument,
            },
            "len" => match value.as_unsigned(32) {
                Some(bits) => self.set_len_attr(bits as usize),
                None => AttributeParseResult::InvalidArgument,
            },
            _ => AttributeParseResult::Unknown,
        };

        if result != AttributeParseResult::Success {
            self.error = true;
        }
        result
    }

    /// Applies an attribute carrying a string value. The `unterm` flag
    /// arrives with an empty value.
    pub fn parse_string_attribute(&mut self, name: &str, value: &str) -> AttributeParseResult {
        let result = match name {
            "code" => self.set_code_attr(value),
            "unterm" => {
                if value.is_empty() {
                    self.set_unterm_attr()
                } else {
                    AttributeParseResult::InvalidArgument
                }
            }
            _ => AttributeParseResult::Unknown,
        };

        if result != AttributeParseResult::Success {
            self.error = true;
        }
        result
    }

    /// Sets the codec by canonical name.
    pub fn set_code_attr(&mut self, value: &str) -> AttributeParseResult {
        if self.coding.is_some() {
            return AttributeParseResult::Redefinition;
        }
        match get_coding_id(value) {
            Some(coding) => {
                self.coding = Some(coding);
                AttributeParseResult::Success
            }
            None => AttributeParseResult::InvalidArgument,
        }
    }

    /// Sets the terminator; implies bounded length.
    pub fn set_term_attr(&mut self, term: CodePoint) -> AttributeParseResult {
        if self.length.is_some() || self.term.is_some() {
            return AttributeParseResult::Redefinition;
        }
        self.term = Some(term);
        self.length = Some(LengthMode::Bounded);
        AttributeParseResult::Success
    }

    /// Allows the string to end unterminated.
    pub fn set_unterm_attr(&mut self) -> AttributeParseResult {
        if self.allow_unterminated.is_some() {
            return AttributeParseResult::Redefinition;
        }
        self.allow_unterminated = Some(true);
        AttributeParseResult::Success
    }

    /// Sets a length prefix of `bits` bits.
    pub fn set_plen_attr(&mut self, bits: usize) -> AttributeParseResult {
        if self.length.is_some() {
            return AttributeParseResult::Redefinition;
        }
        self.length = Some(LengthMode::PrefixedLength(bits));
        AttributeParseResult::Success
    }

    /// Sets a fixed length of `bits` bits.
    pub fn set_len_attr(&mut self, bits: usize) -> AttributeParseResult {
        if self.length.is_some() {
            return AttributeParseResult::Redefinition;
        }
        self.length = Some(LengthMode::Fixed(bits));
        AttributeParseResult::Success
    }

    /// Fills unset values with defaults and completes the builder.
    pub fn finalize(&mut self) -> bool {
        if !self.ident_parsed {
            internal_error!(self.handler, MODULE, "Identifier not yet parsed");
            return false;
        }
        if self.error {
            internal_error!(self.handler, MODULE, "Cannot finalize with error");
            return false;
        }

        if self.length.is_none() {
            self.length = Some(LengthMode::Bounded);
        }
        if self.term.is_none() {
            self.term = Some(self.default_term);
        }
        if self.allow_unterminated.is_none() {
            self.allow_unterminated = Some(false);
        }
        if self.coding.is_none() {
            self.coding = self.default_coding;
        }
        if self.coding.is_none() {
            runtime_error!(self.handler, MODULE, "No default coding available");
            return false;
        }

        self.complete = true;
        self.complete
    }

    /// Returns the finished field, once finalized.
    pub fn get_field(&self, name: &str) -> Option<Field> {
        if !self.complete {
            return None;
        }
        let (Some(term), Some(allow_unterminated), Some(coding), Some(length)) = (
            self.term,
            self.allow_unterminated,
            self.coding,
            self.length,
        ) else {
            return None;
        };
        Some(Field::string(
            name,
            StringFieldProperties {
                term,
                allow_unterminated,
                coding,
                length,
            },
        ))
    }

    /// Prepares the builder for another field. Defaults are kept.
    pub fn reset(&mut self) {
        self.complete = false;
        self.error = false;
        self.ident_parsed = false;
        self.coding = None;
        self.length = None;
        self.term = None;
        self.allow_unterminated = None;
    }
}
