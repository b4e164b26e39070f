//! Token interpreter for the header grammar.
//!
//! The interpreter observes tokens and drives a state machine over the
//! header stream:
//!
//! ```text
//! HeaderBegin ──":"──▶ HeaderIdentifier ──word──▶ HeaderEquals ──"="──▶ HeaderParameter
//!      ▲                   │  │                                             │
//!      └────── BFSDL_HEADER┘  └END_HEADER──▶ StatementBegin                 │
//!      └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Recognized parameters are validated against a fixed vocabulary and
//! stored as properties of the tree. Closing the header applies defaults
//! for anything not explicitly set. The first error poisons the parse; the
//! tokenizer observes this through the observer return values.

use bfsdl_lex::{NumericLiteral, StringLiteral, TokenObserver};
use bfsdl_util::state_machine::{ActionTrigger, Engine, StateMachineError, TransitionQueue};
use bfsdl_util::unicode::{is_character, is_valid_coding, CodePoint};
use bfsdl_util::{internal_error, runtime_error, Handler};
use thiserror::Error;

use crate::objects::{BitBase, Endianness, Object, Property, Tree};

const MODULE: &str = "Interpreter";

/// Width accepted for the `Version` parameter.
const VERSION_BITS: u32 = 32;

mod pstate {
    pub const HEADER_BEGIN: usize = 0;
    pub const HEADER_IDENTIFIER: usize = 1;
    pub const HEADER_EQUALS: usize = 2;
    pub const HEADER_PARAMETER: usize = 3;
    pub const STATEMENT_BEGIN: usize = 4;
    pub const COUNT: usize = 5;
}

/// Errors raised while assembling the interpreter.
#[derive(Debug, Error)]
pub enum ParserError {
    /// State machine setup failed.
    #[error(transparent)]
    StateMachine(#[from] StateMachineError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HeaderProgress {
    StreamBegin,
    StreamInProgress,
    StreamDone,
}

enum Input {
    None,
    Control(String),
    Numeric(NumericLiteral),
    Str(StringLiteral),
    Word(String),
}

struct InterpreterCtx<'t, 'h> {
    tree: &'t mut Tree,
    handler: &'h Handler,
    input: Input,
    identifier: String,
    header: HeaderProgress,
    parse_error: bool,
}

/// Formats `<prefix> <input-kind> '<text>'` on the Runtime channel and
/// poisons the parse.
fn log_error(ctx: &mut InterpreterCtx<'_, '_>, prefix: &str) {
    let what = match &ctx.input {
        Input::Control(text) => format!("control character(s) '{text}'"),
        Input::Numeric(value) => format!("numeric literal '{value}'"),
        Input::Str(value) => format!("string literal '{value}'"),
        Input::Word(text) => format!("identifier '{text}'"),
        Input::None => {
            internal_error!(ctx.handler, MODULE, "Unhandled input type");
            "input (unknown)".to_string()
        }
    };
    let prefix = if prefix.is_empty() { "Unexpected" } else { prefix };
    runtime_error!(ctx.handler, MODULE, "{prefix} {what}");
    ctx.parse_error = true;
}

fn is_control(input: &Input, expected: &str) -> bool {
    matches!(input, Input::Control(text) if text == expected)
}

fn store_u32(ctx: &mut InterpreterCtx<'_, '_>, name: &str, value: u32) -> bool {
    ctx.tree
        .add(Object::Property(Property::with_u32(name, value)))
        .is_ok()
}

fn store_string(ctx: &mut InterpreterCtx<'_, '_>, name: &str, value: &str) -> bool {
    ctx.tree
        .add(Object::Property(Property::with_string(name, value)))
        .is_ok()
}

fn set_numeric_default(ctx: &mut InterpreterCtx<'_, '_>, name: &str, value: u32) {
    if ctx.tree.find_property(name).is_none() && !store_u32(ctx, name, value) {
        runtime_error!(ctx.handler, MODULE, "Failed to set default for {name}");
        ctx.parse_error = true;
    }
}

fn set_string_default(ctx: &mut InterpreterCtx<'_, '_>, name: &str, value: &str) {
    if ctx.tree.find_property(name).is_none() && !store_string(ctx, name, value) {
        runtime_error!(ctx.handler, MODULE, "Failed to set default for {name}");
        ctx.parse_error = true;
    }
}

fn header_begin_entry(ctx: &mut InterpreterCtx<'_, '_>, _queue: &mut TransitionQueue) {
    ctx.identifier.clear();
}

fn header_begin_evaluate(ctx: &mut InterpreterCtx<'_, '_>, queue: &mut TransitionQueue) {
    if !is_control(&ctx.input, ":") {
        log_error(ctx, "Expected ':', found");
        return;
    }
    queue.transition(pstate::HEADER_IDENTIFIER);
}

fn header_identifier_evaluate(ctx: &mut InterpreterCtx<'_, '_>, queue: &mut TransitionQueue) {
    if is_control(&ctx.input, ":") {
        // Blank setting, ignore.
        return;
    }
    let Input::Word(word) = &ctx.input else {
        log_error(ctx, "Expected identifier, found");
        return;
    };
    ctx.identifier = word.clone();

    if ctx.identifier == "BFSDL_HEADER" {
        if ctx.header != HeaderProgress::StreamBegin {
            runtime_error!(ctx.handler, MODULE, "Duplicate header definition");
            ctx.parse_error = true;
            return;
        }
        ctx.header = HeaderProgress::StreamInProgress;
        queue.transition(pstate::HEADER_BEGIN);
    } else if ctx.identifier == "END_HEADER" {
        if ctx.header != HeaderProgress::StreamInProgress {
            runtime_error!(ctx.handler, MODULE, "Unexpected end of header stream");
            ctx.parse_error = true;
            return;
        }
        ctx.header = HeaderProgress::StreamDone;
        queue.transition(pstate::STATEMENT_BEGIN);
    } else if ctx.header != HeaderProgress::StreamInProgress {
        log_error(ctx, "Expected 'BFSDL_HEADER', found");
    } else {
        queue.transition(pstate::HEADER_EQUALS);
    }
}

fn header_identifier_exit(ctx: &mut InterpreterCtx<'_, '_>, _queue: &mut TransitionQueue) {
    if ctx.header == HeaderProgress::StreamDone {
        set_numeric_default(ctx, "BitBase", BitBase::DEFAULT.value());
        set_numeric_default(ctx, "DefaultByteOrder", Endianness::DEFAULT.value());
        set_numeric_default(ctx, "DefaultBitOrder", Endianness::DEFAULT.value());
        set_string_default(ctx, "DefaultStringCode", "ASCII");
        set_numeric_default(ctx, "DefaultStringTerm", 0);
        set_numeric_default(ctx, "Version", 1);
    }
}

fn header_equals_evaluate(ctx: &mut InterpreterCtx<'_, '_>, queue: &mut TransitionQueue) {
    if !is_control(&ctx.input, "=") {
        log_error(ctx, "Expected '=', found");
        return;
    }
    queue.transition(pstate::HEADER_PARAMETER);
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ErrCode {
    None,
    TypeNum,
    TypeStr,
    Invalid,
    Unsupported,
    Runtime,
    Redefinition,
    Unknown,
}

fn header_parameter_evaluate(ctx: &mut InterpreterCtx<'_, '_>, queue: &mut TransitionQueue) {
    let identifier = ctx.identifier.clone();
    let mut err = ErrCode::None;

    match identifier.as_str() {
        "Version" => match &ctx.input {
            Input::Numeric(value) => {
                let version = value.as_unsigned(VERSION_BITS);
                if ctx.tree.find_property(&identifier).is_some() {
                    err = ErrCode::Redefinition;
                } else if let Some(version) = version {
                    if !store_u32(ctx, &identifier, version as u32) {
                        err = ErrCode::Runtime;
                    }
                } else {
                    err = ErrCode::Invalid;
                }
            }
            _ => err = ErrCode::TypeNum,
        },
        "BitBase" => match &ctx.input {
            Input::Str(value) => {
                let text = value.as_utf8().map(str::to_string);
                if ctx.tree.find_property(&identifier).is_some() {
                    err = ErrCode::Redefinition;
                } else {
                    let bit_base = match text.as_deref() {
                        Some("Bit") => Some(BitBase::Bit),
                        Some("Byte") => Some(BitBase::Byte),
                        _ => None,
                    };
                    match bit_base {
                        Some(bit_base) => {
                            if !store_u32(ctx, &identifier, bit_base.value()) {
                                err = ErrCode::Runtime;
                            }
                        }
                        None => err = ErrCode::Invalid,
                    }
                }
            }
            _ => err = ErrCode::TypeStr,
        },
        "DefaultByteOrder" | "DefaultBitOrder" => match &ctx.input {
            Input::Str(value) => {
                let order = match value.as_utf8() {
                    Some("LE") => Some(Endianness::Little),
                    Some("BE") => Some(Endianness::Big),
                    _ => None,
                };
                match order {
                    // Redefinition surfaces as the tree rejecting the add.
                    Some(order) => {
                        if !store_u32(ctx, &identifier, order.value()) {
                            err = ErrCode::Runtime;
                        }
                    }
                    None => err = ErrCode::Invalid,
                }
            }
            _ => err = ErrCode::TypeStr,
        },
        "DefaultFloatFormat" => match &ctx.input {
            // TODO: floating point support
            Input::Str(_) => err = ErrCode::Unsupported,
            _ => err = ErrCode::TypeStr,
        },
        "DefaultStringCode" => match &ctx.input {
            Input::Str(value) => {
                let text = value.as_utf8().map(str::to_string);
                match text {
                    Some(text) if is_valid_coding(&text) => {
                        if !store_string(ctx, &identifier, &text) {
                            err = ErrCode::Runtime;
                        }
                    }
                    _ => err = ErrCode::Invalid,
                }
            }
            _ => err = ErrCode::TypeStr,
        },
        "DefaultStringTerm" => match &ctx.input {
            Input::Numeric(value) => match value.as_unsigned(32) {
                Some(term) if is_character(term as CodePoint) => {
                    if !store_u32(ctx, &identifier, term as u32) {
                        err = ErrCode::Runtime;
                    }
                }
                // Only valid characters are supported as terminators.
                Some(_) => err = ErrCode::Unsupported,
                None => err = ErrCode::TypeNum,
            },
            _ => err = ErrCode::TypeNum,
        },
        "CustomExtension" => match &ctx.input {
            Input::Str(_) => err = ErrCode::Unsupported,
            _ => err = ErrCode::TypeStr,
        },
        _ => err = ErrCode::Unknown,
    }

    match err {
        ErrCode::None => {
            queue.transition(pstate::HEADER_BEGIN);
        }
        ErrCode::TypeNum => log_error(
            ctx,
            &format!("{identifier} requires a Numeric Literal parameter, found"),
        ),
        ErrCode::TypeStr => log_error(
            ctx,
            &format!("{identifier} requires a String Literal parameter, found"),
        ),
        ErrCode::Invalid => log_error(ctx, &format!("Invalid value for {identifier}:")),
        ErrCode::Unsupported => log_error(ctx, &format!("Unsupported value for {identifier}:")),
        ErrCode::Runtime => log_error(ctx, &format!("Failed to set {identifier} to parameter")),
        ErrCode::Redefinition => {
            log_error(ctx, &format!("Redefinition of {identifier} to parameter"))
        }
        ErrCode::Unknown => log_error(ctx, &format!("Unknown config '{identifier}' with parameter")),
    }
}

fn statement_begin_evaluate(ctx: &mut InterpreterCtx<'_, '_>, _queue: &mut TransitionQueue) {
    // The header parse is complete; statement separators are tolerated but
    // field declarations are not parsed yet.
    if is_control(&ctx.input, ":") {
        return;
    }
    log_error(ctx, "Unsupported statement, found");
}

/// Token observer enforcing the header grammar and populating a tree.
pub struct Interpreter<'t, 'h> {
    machine: Engine<InterpreterCtx<'t, 'h>>,
    ctx: InterpreterCtx<'t, 'h>,
}

impl<'t, 'h> Interpreter<'t, 'h> {
    /// Creates an interpreter writing into `tree`.
    pub fn new(tree: &'t mut Tree, handler: &'h Handler) -> Result<Self, ParserError> {
        let mut machine = Engine::new(pstate::COUNT);
        machine.add_action(
            pstate::HEADER_BEGIN,
            ActionTrigger::Entry,
            header_begin_entry,
        )?;
        machine.add_action(
            pstate::HEADER_BEGIN,
            ActionTrigger::Evaluate,
            header_begin_evaluate,
        )?;
        machine.add_action(
            pstate::HEADER_IDENTIFIER,
            ActionTrigger::Evaluate,
            header_identifier_evaluate,
        )?;
        machine.add_action(
            pstate::HEADER_IDENTIFIER,
            ActionTrigger::Exit,
            header_identifier_exit,
        )?;
        machine.add_action(
            pstate::HEADER_EQUALS,
            ActionTrigger::Evaluate,
            header_equals_evaluate,
        )?;
        machine.add_action(
            pstate::HEADER_PARAMETER,
            ActionTrigger::Evaluate,
            header_parameter_evaluate,
        )?;
        machine.add_action(
            pstate::STATEMENT_BEGIN,
            ActionTrigger::Evaluate,
            statement_begin_evaluate,
        )?;

        let mut ctx = InterpreterCtx {
            tree,
            handler,
            input: Input::None,
            identifier: String::new(),
            header: HeaderProgress::StreamBegin,
            parse_error: false,
        };
        machine.transition(pstate::HEADER_BEGIN)?;
        machine.do_transition(&mut ctx);

        Ok(Self { machine, ctx })
    }

    /// True once any token failed to interpret; stays set for the rest of
    /// the parse.
    pub fn parse_error(&self) -> bool {
        self.ctx.parse_error
    }

    fn dispatch(&mut self, input: Input) -> bool {
        self.ctx.input = input;
        self.machine.evaluate(&mut self.ctx);
        self.ctx.input = Input::None;
        !self.ctx.parse_error
    }
}

impl TokenObserver for Interpreter<'_, '_> {
    fn on_control(&mut self, text: &str) -> bool {
        self.dispatch(Input::Control(text.to_string()))
    }

    fn on_numeric_literal(&mut self, value: &NumericLiteral) -> bool {
        self.dispatch(Input::Numeric(value.clone()))
    }

    fn on_string_literal(&mut self, value: &StringLiteral) -> bool {
        self.dispatch(Input::Str(value.clone()))
    }

    fn on_word(&mut self, text: &str) -> bool {
        self.dispatch(Input::Word(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bfsdl_lex::{category, NumericLiteralParser};
    use bfsdl_util::unicode::get_coding_id;

    fn numeric(digits: &str) -> NumericLiteral {
        let mut parser = NumericLiteralParser::new();
        for ch in digits.chars() {
            let cat = match ch {
                '0'..='9' => category::DECIMAL_DIGITS,
                '+' | '-' => category::OPERATORS,
                '.' => category::PERIOD,
                _ => category::LETTERS,
            };
            parser.parse_mapped_symbol(cat, &ch.to_string());
        }
        parser.parse_mapped_symbol(category::CONTROL, ":");
        parser.parsed_object().expect("test literal is well formed")
    }

    fn string_literal(text: &str) -> StringLiteral {
        StringLiteral::new(
            text.as_bytes().to_vec(),
            get_coding_id("ASCII").expect("ASCII registered"),
        )
    }

    #[derive(Clone, Copy)]
    enum Tok<'a> {
        C(&'a str),
        W(&'a str),
        N(&'a str),
        S(&'a str),
    }

    fn feed(tree: &mut Tree, handler: &Handler, tokens: &[Tok<'_>]) -> bool {
        let mut interpreter = Interpreter::new(tree, handler).expect("interpreter builds");
        for token in tokens {
            let ok = match token {
                Tok::C(text) => interpreter.on_control(text),
                Tok::W(text) => interpreter.on_word(text),
                Tok::N(digits) => interpreter.on_numeric_literal(&numeric(digits)),
                Tok::S(text) => interpreter.on_string_literal(&string_literal(text)),
            };
            if !ok {
                return false;
            }
        }
        true
    }

    fn header(settings: &[Tok<'_>]) -> (Tree, Handler, bool) {
        let mut tree = Tree::new();
        let handler = Handler::new();
        let mut tokens = vec![Tok::C(":"), Tok::W("BFSDL_HEADER"), Tok::C(":")];
        tokens.extend(settings.iter().copied());
        tokens.extend([Tok::C(":"), Tok::W("END_HEADER"), Tok::C(":")]);
        let ok = feed(&mut tree, &handler, &tokens);
        (tree, handler, ok)
    }

    fn prop_u64(tree: &Tree, name: &str) -> Option<u64> {
        tree.find_property(name).and_then(Property::as_u64)
    }

    #[test]
    fn test_minimal_header_applies_defaults() {
        let (tree, _, ok) = header(&[]);
        assert!(ok);
        assert_eq!(prop_u64(&tree, "Version"), Some(1));
        assert_eq!(prop_u64(&tree, "BitBase"), Some(8));
        assert_eq!(prop_u64(&tree, "DefaultByteOrder"), Some(0));
        assert_eq!(prop_u64(&tree, "DefaultBitOrder"), Some(0));
        assert_eq!(prop_u64(&tree, "DefaultStringTerm"), Some(0));
        assert_eq!(tree.get_string_property("DefaultStringCode"), Some("ASCII"));
        assert_eq!(tree.property_count(), 6);
    }

    #[test]
    fn test_explicit_values_survive_defaults() {
        let (tree, _, ok) = header(&[
            Tok::W("Version"),
            Tok::C("="),
            Tok::N("3"),
            Tok::C(":"),
            Tok::C(":"),
            Tok::W("BitBase"),
            Tok::C("="),
            Tok::S("Bit"),
            Tok::C(":"),
        ]);
        assert!(ok);
        assert_eq!(prop_u64(&tree, "Version"), Some(3));
        assert_eq!(prop_u64(&tree, "BitBase"), Some(1));
    }

    #[test]
    fn test_byte_order_values() {
        let (tree, _, ok) = header(&[
            Tok::W("DefaultByteOrder"),
            Tok::C("="),
            Tok::S("BE"),
            Tok::C(":"),
        ]);
        assert!(ok);
        assert_eq!(prop_u64(&tree, "DefaultByteOrder"), Some(1));
    }

    #[test]
    fn test_unknown_parameter_fails() {
        let (_, handler, ok) = header(&[
            Tok::W("Frobnicate"),
            Tok::C("="),
            Tok::N("1"),
            Tok::C(":"),
        ]);
        assert!(!ok);
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.message.contains("Unknown config 'Frobnicate'")));
    }

    #[test]
    fn test_redefinition_fails_but_keeps_first_value() {
        let mut tree = Tree::new();
        let handler = Handler::new();
        let ok = feed(
            &mut tree,
            &handler,
            &[
                Tok::C(":"),
                Tok::W("BFSDL_HEADER"),
                Tok::C(":"),
                Tok::W("Version"),
                Tok::C("="),
                Tok::N("1"),
                Tok::C(":"),
                Tok::C(":"),
                Tok::W("Version"),
                Tok::C("="),
                Tok::N("2"),
            ],
        );
        assert!(!ok);
        assert_eq!(prop_u64(&tree, "Version"), Some(1));
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.message.contains("Redefinition of Version")));
    }

    #[test]
    fn test_parameter_before_header_fails() {
        let mut tree = Tree::new();
        let handler = Handler::new();
        let ok = feed(&mut tree, &handler, &[Tok::C(":"), Tok::W("Version")]);
        assert!(!ok);
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.message.contains("Expected 'BFSDL_HEADER', found identifier 'Version'")));
    }

    #[test]
    fn test_duplicate_header_fails() {
        let mut tree = Tree::new();
        let handler = Handler::new();
        let ok = feed(
            &mut tree,
            &handler,
            &[
                Tok::C(":"),
                Tok::W("BFSDL_HEADER"),
                Tok::C(":"),
                Tok::C(":"),
                Tok::W("BFSDL_HEADER"),
            ],
        );
        assert!(!ok);
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.message.contains("Duplicate header definition")));
    }

    #[test]
    fn test_end_without_header_fails() {
        let mut tree = Tree::new();
        let handler = Handler::new();
        let ok = feed(&mut tree, &handler, &[Tok::C(":"), Tok::W("END_HEADER")]);
        assert!(!ok);
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.message.contains("Unexpected end of header stream")));
    }

    #[test]
    fn test_wrong_value_kind_fails() {
        let (_, handler, ok) = header(&[Tok::W("Version"), Tok::C("="), Tok::S("three"), Tok::C(":")]);
        assert!(!ok);
        assert!(handler.diagnostics().iter().any(|d| d
            .message
            .contains("Version requires a Numeric Literal parameter, found")));

        let (_, handler, ok) = header(&[Tok::W("BitBase"), Tok::C("="), Tok::N("8"), Tok::C(":")]);
        assert!(!ok);
        assert!(handler.diagnostics().iter().any(|d| d
            .message
            .contains("BitBase requires a String Literal parameter, found")));
    }

    #[test]
    fn test_invalid_values_fail() {
        let (_, handler, ok) = header(&[Tok::W("BitBase"), Tok::C("="), Tok::S("Nibble"), Tok::C(":")]);
        assert!(!ok);
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.message.contains("Invalid value for BitBase:")));

        let (_, _, ok) = header(&[
            Tok::W("DefaultByteOrder"),
            Tok::C("="),
            Tok::S("ME"),
            Tok::C(":"),
        ]);
        assert!(!ok);

        let (_, _, ok) = header(&[
            Tok::W("DefaultStringCode"),
            Tok::C("="),
            Tok::S("KLINGON"),
            Tok::C(":"),
        ]);
        assert!(!ok);
    }

    #[test]
    fn test_version_overflow_is_invalid() {
        let (_, handler, ok) = header(&[
            Tok::W("Version"),
            Tok::C("="),
            Tok::N("4294967296"),
            Tok::C(":"),
        ]);
        assert!(!ok);
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.message.contains("Invalid value for Version:")));
    }

    #[test]
    fn test_unsupported_parameters() {
        let (_, handler, ok) = header(&[
            Tok::W("DefaultFloatFormat"),
            Tok::C("="),
            Tok::S("IEEE754"),
            Tok::C(":"),
        ]);
        assert!(!ok);
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.message.contains("Unsupported value for DefaultFloatFormat:")));

        let (_, _, ok) = header(&[
            Tok::W("CustomExtension"),
            Tok::C("="),
            Tok::S("x"),
            Tok::C(":"),
        ]);
        assert!(!ok);
    }

    #[test]
    fn test_string_term_rejects_surrogates() {
        let (_, handler, ok) = header(&[
            Tok::W("DefaultStringTerm"),
            Tok::C("="),
            Tok::N("55296"),
            Tok::C(":"),
        ]);
        assert!(!ok);
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.message.contains("Unsupported value for DefaultStringTerm:")));
    }

    #[test]
    fn test_statement_separators_after_header_are_accepted() {
        let mut tree = Tree::new();
        let handler = Handler::new();
        let ok = feed(
            &mut tree,
            &handler,
            &[
                Tok::C(":"),
                Tok::W("BFSDL_HEADER"),
                Tok::C(":"),
                Tok::C(":"),
                Tok::W("END_HEADER"),
                Tok::C(":"),
                Tok::C(":"),
            ],
        );
        assert!(ok);
    }

    #[test]
    fn test_body_content_is_unsupported() {
        let mut tree = Tree::new();
        let handler = Handler::new();
        let ok = feed(
            &mut tree,
            &handler,
            &[
                Tok::C(":"),
                Tok::W("BFSDL_HEADER"),
                Tok::C(":"),
                Tok::C(":"),
                Tok::W("END_HEADER"),
                Tok::C(":"),
                Tok::W("u8"),
            ],
        );
        assert!(!ok);
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.message.contains("Unsupported statement, found identifier 'u8'")));
    }

    #[test]
    fn test_poisoned_interpreter_stays_poisoned() {
        let mut tree = Tree::new();
        let handler = Handler::new();
        let mut interpreter = Interpreter::new(&mut tree, &handler).expect("interpreter builds");
        assert!(!interpreter.on_word("nope"));
        assert!(interpreter.parse_error());
        // Even a token the grammar would otherwise accept fails now.
        assert!(!interpreter.on_control(":"));
    }
}
