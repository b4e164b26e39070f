//! Tokenizer: promotes symbol runs into tokens via a state machine.
//!
//! The tokenizer registers the fixed category table with its symbolizer and
//! observes the resulting runs. A small state machine routes them:
//!
//! - `MainSequence` emits control tokens, ignores whitespace, and branches
//!   into the literal/word states.
//! - `NumericLiteral` forwards symbols to the numeric-literal parser.
//! - `Word` accumulates letter and digit runs.
//! - `StringLiteral` accumulates everything up to the closing quote.
//!
//! A symbol that terminates a literal or word is replayed through
//! `MainSequence` after the token is emitted, so nothing is lost at token
//! boundaries. Tokens are queued by the state actions and drained to the
//! observer once evaluation settles; observers therefore never run inside a
//! state action.

use bfsdl_util::state_machine::{ActionTrigger, Engine, StateMachineError, TransitionQueue};
use bfsdl_util::unicode::{get_coding_id, AsciiConverter, CodingId};
use bfsdl_util::{runtime_error, Handler};
use thiserror::Error;

use crate::category;
use crate::numeric_literal::{NumericLiteralParser, ParseResult};
use crate::symbolizer::{
    ArraySymbolCategory, RangeSymbolCategory, StringSymbolCategory, SymbolObserver, Symbolizer,
};
use crate::token::{StringLiteral, Token, TokenObserver};

const MODULE: &str = "Tokenizer";

static CAT_CONTROL: StringSymbolCategory =
    StringSymbolCategory::new(category::CONTROL, "[];:=", false);
static CAT_DECIMAL_DIGITS: RangeSymbolCategory =
    RangeSymbolCategory::new(category::DECIMAL_DIGITS, '0' as u32, '9' as u32, true);
static CAT_HASH: RangeSymbolCategory =
    RangeSymbolCategory::single(category::HASH, '#' as u32, false);
static CAT_LETTERS_UPPER: RangeSymbolCategory =
    RangeSymbolCategory::new(category::LETTERS, 'A' as u32, 'Z' as u32, true);
static CAT_LETTERS_LOWER: RangeSymbolCategory =
    RangeSymbolCategory::new(category::LETTERS, 'a' as u32, 'z' as u32, true);
static CAT_LETTERS_JOIN: ArraySymbolCategory =
    ArraySymbolCategory::new(category::LETTERS, &['_' as u32], true);
static CAT_OPERATORS: StringSymbolCategory =
    StringSymbolCategory::new(category::OPERATORS, "+-", false);
static CAT_PERIOD: RangeSymbolCategory =
    RangeSymbolCategory::single(category::PERIOD, '.' as u32, false);
static CAT_TILDE: StringSymbolCategory = StringSymbolCategory::new(category::TILDE, "~", false);
static CAT_WHITESPACE: StringSymbolCategory =
    StringSymbolCategory::new(category::WHITESPACE, " \t\n\r", true);
static CAT_QUOTE: RangeSymbolCategory =
    RangeSymbolCategory::single(category::QUOTE, '"' as u32, false);

mod state {
    pub const MAIN_SEQUENCE: usize = 0;
    pub const NUMERIC_LITERAL: usize = 1;
    pub const WORD: usize = 2;
    pub const STRING_LITERAL: usize = 3;
    pub const COUNT: usize = 4;
}

/// Errors raised while assembling the tokenizer.
#[derive(Debug, Error)]
pub enum LexError {
    /// The default codec is missing from the registry.
    #[error("default coding is not registered")]
    UnknownCoding,
    /// State machine setup failed.
    #[error(transparent)]
    StateMachine(#[from] StateMachineError),
}

struct TokenizerCtx<'h> {
    handler: &'h Handler,
    category: i32,
    symbol: String,
    tokens: Vec<Token>,
    replay: bool,
    keep_parsing: bool,
    parse_error: bool,
    literal_coding: CodingId,
    numeric: NumericLiteralParser,
    word: String,
    string_bytes: Vec<u8>,
}

fn main_sequence_evaluate(ctx: &mut TokenizerCtx<'_>, queue: &mut TransitionQueue) {
    match ctx.category {
        category::CONTROL => ctx.tokens.push(Token::Control(ctx.symbol.clone())),
        category::HASH => queue.transition(state::NUMERIC_LITERAL),
        category::LETTERS => queue.transition(state::WORD),
        category::QUOTE => queue.transition(state::STRING_LITERAL),
        category::WHITESPACE => {}
        _ => {
            runtime_error!(
                ctx.handler,
                MODULE,
                "Unexpected symbol(s) at beginning of statement"
            );
            ctx.parse_error = true;
            ctx.keep_parsing = false;
        }
    }
}

fn numeric_literal_entry(ctx: &mut TokenizerCtx<'_>, _queue: &mut TransitionQueue) {
    ctx.numeric.reset();
}

fn numeric_literal_evaluate(ctx: &mut TokenizerCtx<'_>, queue: &mut TransitionQueue) {
    ctx.numeric.parse_mapped_symbol(ctx.category, &ctx.symbol);
    match ctx.numeric.parse_result() {
        ParseResult::NotComplete => {}
        ParseResult::Complete => match ctx.numeric.parsed_object() {
            Some(value) => {
                ctx.tokens.push(Token::NumericLiteral(value));
                queue.transition(state::MAIN_SEQUENCE);
                // The terminating symbol still belongs to the main sequence.
                ctx.replay = true;
            }
            None => {
                runtime_error!(ctx.handler, MODULE, "Numeric literal lost at completion");
                ctx.parse_error = true;
                ctx.keep_parsing = false;
            }
        },
        ParseResult::Error => {
            runtime_error!(ctx.handler, MODULE, "Malformed numeric literal");
            ctx.parse_error = true;
            ctx.keep_parsing = false;
        }
    }
}

fn word_entry(ctx: &mut TokenizerCtx<'_>, _queue: &mut TransitionQueue) {
    ctx.word.clear();
    ctx.word.push_str(&ctx.symbol);
}

fn word_evaluate(ctx: &mut TokenizerCtx<'_>, queue: &mut TransitionQueue) {
    match ctx.category {
        category::LETTERS | category::DECIMAL_DIGITS => ctx.word.push_str(&ctx.symbol),
        _ => {
            ctx.tokens.push(Token::Word(std::mem::take(&mut ctx.word)));
            queue.transition(state::MAIN_SEQUENCE);
            ctx.replay = true;
        }
    }
}

fn string_literal_entry(ctx: &mut TokenizerCtx<'_>, _queue: &mut TransitionQueue) {
    ctx.string_bytes.clear();
}

fn string_literal_evaluate(ctx: &mut TokenizerCtx<'_>, queue: &mut TransitionQueue) {
    if ctx.category == category::QUOTE {
        let value = StringLiteral::new(std::mem::take(&mut ctx.string_bytes), ctx.literal_coding);
        ctx.tokens.push(Token::StringLiteral(value));
        queue.transition(state::MAIN_SEQUENCE);
    } else {
        ctx.string_bytes.extend_from_slice(ctx.symbol.as_bytes());
    }
}

/// Symbolizer observer that emits tokens to a [`TokenObserver`].
pub struct Tokenizer<'h> {
    machine: Engine<TokenizerCtx<'h>>,
    ctx: TokenizerCtx<'h>,
    symbolizer: Symbolizer<'static>,
}

impl<'h> Tokenizer<'h> {
    /// Builds a tokenizer reporting through `handler`, reading ASCII.
    pub fn new(handler: &'h Handler) -> Result<Self, LexError> {
        let literal_coding = get_coding_id("ASCII").ok_or(LexError::UnknownCoding)?;

        let mut symbolizer = Symbolizer::new(Box::new(AsciiConverter::new()));
        symbolizer.add_category(&CAT_CONTROL);
        symbolizer.add_category(&CAT_DECIMAL_DIGITS);
        symbolizer.add_category(&CAT_HASH);
        symbolizer.add_category(&CAT_LETTERS_UPPER);
        symbolizer.add_category(&CAT_LETTERS_LOWER);
        symbolizer.add_category(&CAT_LETTERS_JOIN);
        symbolizer.add_category(&CAT_OPERATORS);
        symbolizer.add_category(&CAT_PERIOD);
        symbolizer.add_category(&CAT_TILDE);
        symbolizer.add_category(&CAT_WHITESPACE);
        symbolizer.add_category(&CAT_QUOTE);

        let mut machine = Engine::new(state::COUNT);
        machine.add_action(
            state::MAIN_SEQUENCE,
            ActionTrigger::Evaluate,
            main_sequence_evaluate,
        )?;
        machine.add_action(
            state::NUMERIC_LITERAL,
            ActionTrigger::Entry,
            numeric_literal_entry,
        )?;
        machine.add_action(
            state::NUMERIC_LITERAL,
            ActionTrigger::Evaluate,
            numeric_literal_evaluate,
        )?;
        machine.add_action(state::WORD, ActionTrigger::Entry, word_entry)?;
        machine.add_action(state::WORD, ActionTrigger::Evaluate, word_evaluate)?;
        machine.add_action(
            state::STRING_LITERAL,
            ActionTrigger::Entry,
            string_literal_entry,
        )?;
        machine.add_action(
            state::STRING_LITERAL,
            ActionTrigger::Evaluate,
            string_literal_evaluate,
        )?;

        let mut ctx = TokenizerCtx {
            handler,
            category: -1,
            symbol: String::new(),
            tokens: Vec::new(),
            replay: false,
            keep_parsing: true,
            parse_error: false,
            literal_coding,
            numeric: NumericLiteralParser::new(),
            word: String::new(),
            string_bytes: Vec::new(),
        };
        machine.transition(state::MAIN_SEQUENCE)?;
        machine.do_transition(&mut ctx);

        Ok(Self {
            machine,
            ctx,
            symbolizer,
        })
    }

    /// Feeds a chunk of bytes, delivering tokens to `observer`.
    ///
    /// Returns `(ok, bytes_consumed)` with the symbolizer's remainder
    /// semantics: fewer bytes consumed than offered (without error) means
    /// the chunk tail must be refilled before retrying.
    pub fn parse(&mut self, data: &[u8], observer: &mut dyn TokenObserver) -> (bool, usize) {
        if self.ctx.parse_error {
            runtime_error!(self.ctx.handler, MODULE, "Cannot parse after an error");
            return (false, 0);
        }
        let mut sink = SymbolSink {
            machine: &mut self.machine,
            ctx: &mut self.ctx,
            observer,
        };
        let (ok, consumed) = self.symbolizer.parse(data, &mut sink);
        if !ok {
            self.ctx.parse_error = true;
        }
        (ok && !self.ctx.parse_error, consumed)
    }

    /// Flushes the symbolizer and checks that the token stream ended at a
    /// token boundary.
    pub fn end_parsing(&mut self, observer: &mut dyn TokenObserver) -> bool {
        if self.ctx.parse_error {
            return false;
        }
        let flushed = {
            let mut sink = SymbolSink {
                machine: &mut self.machine,
                ctx: &mut self.ctx,
                observer,
            };
            self.symbolizer.end_parse(&mut sink)
        };
        if !flushed || self.ctx.parse_error {
            self.ctx.parse_error = true;
            return false;
        }
        if self.machine.current_state() != state::MAIN_SEQUENCE {
            runtime_error!(self.ctx.handler, MODULE, "Unparsed content in stream");
            self.ctx.parse_error = true;
            return false;
        }
        true
    }
}

struct SymbolSink<'a, 'h> {
    machine: &'a mut Engine<TokenizerCtx<'h>>,
    ctx: &'a mut TokenizerCtx<'h>,
    observer: &'a mut dyn TokenObserver,
}

impl SymbolObserver for SymbolSink<'_, '_> {
    fn on_mapped_symbol(&mut self, category: i32, text: &[u8]) -> bool {
        let Ok(symbol) = std::str::from_utf8(text) else {
            runtime_error!(self.ctx.handler, MODULE, "Undecodable symbol text");
            self.ctx.parse_error = true;
            return false;
        };
        self.ctx.category = category;
        self.ctx.symbol.clear();
        self.ctx.symbol.push_str(symbol);

        self.machine.evaluate(&mut *self.ctx);
        while self.ctx.replay && !self.ctx.parse_error {
            self.ctx.replay = false;
            self.machine.evaluate(&mut *self.ctx);
        }

        let tokens = std::mem::take(&mut self.ctx.tokens);
        for token in tokens {
            let ok = match &token {
                Token::Control(text) => self.observer.on_control(text),
                Token::NumericLiteral(value) => self.observer.on_numeric_literal(value),
                Token::StringLiteral(value) => self.observer.on_string_literal(value),
                Token::Word(text) => self.observer.on_word(text),
            };
            if !ok {
                self.ctx.parse_error = true;
                return false;
            }
        }
        self.ctx.keep_parsing && !self.ctx.parse_error
    }

    fn on_unmapped_symbol(&mut self, _text: &[u8]) -> bool {
        runtime_error!(self.ctx.handler, MODULE, "Unexpected symbol");
        self.ctx.parse_error = true;
        false
    }
}
