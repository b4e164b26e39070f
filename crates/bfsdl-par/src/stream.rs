//! Stream driver: pumps a byte source through the parser stack.
//!
//! The driver owns the only active stack in the pipeline. It reads chunks,
//! feeds them to the tokenizer, shifts any unread remainder to the buffer
//! front before refilling, and keeps the position tracker in step with what
//! was actually consumed. On the first parse error it formats the
//! diagnostic:
//!
//! ```text
//! Parse Error: <name>@<line>:<col>
//! [...]<printable context>
//!    <spaces>^
//! ```
//!
//! where `...` (and the matching three-space caret indent) appear only when
//! context was discarded from the line start.

use std::io::{ErrorKind, Read};

use bfsdl_lex::{LexError, Tokenizer};
use bfsdl_util::{runtime_error, Handler};
use thiserror::Error;

use crate::interpreter::{Interpreter, ParserError};
use crate::objects::Tree;
use crate::parse_position::ParsePosition;

const MODULE: &str = "StreamParser";

const PRETEXT_LEN: usize = 10;
const POSTTEXT_LEN: usize = 6;

/// Errors surfaced by [`parse_stream`].
#[derive(Debug, Error)]
pub enum StreamError {
    /// The interpreter could not be assembled.
    #[error("failed to initialize interpreter")]
    Interpreter(#[from] ParserError),
    /// The tokenizer could not be assembled.
    #[error("failed to initialize tokenizer")]
    Tokenizer(#[from] LexError),
    /// The input failed to parse; a diagnostic was emitted.
    #[error("parse error in input stream")]
    Parse,
    /// The byte source failed.
    #[error("stream read error")]
    Read(#[source] std::io::Error),
}

/// Builds a parser stack and feeds `input` into it in `chunk_size` chunks.
///
/// The tree may carry a `Filename` string property naming the stream for
/// diagnostics. On success the tree holds the parsed model; on failure it
/// should be discarded by the caller.
pub fn parse_stream(
    tree: &mut Tree,
    input: &mut dyn Read,
    chunk_size: usize,
    handler: &Handler,
) -> Result<(), StreamError> {
    let name = tree.get_string_property("Filename").unwrap_or("").to_string();
    let mut position = ParsePosition::new(name, PRETEXT_LEN, POSTTEXT_LEN);

    let mut interpreter = Interpreter::new(tree, handler)?;
    let mut tokenizer = Tokenizer::new(handler)?;

    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut data_start = 0usize;

    loop {
        let read = loop {
            match input.read(&mut buf[data_start..]) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    runtime_error!(handler, MODULE, "Stream read error");
                    return Err(StreamError::Read(e));
                }
            }
        };
        if read == 0 {
            break;
        }

        let available = data_start + read;
        data_start = 0;
        let mut i = 0;
        while i < available {
            let (ok, consumed) = tokenizer.parse(&buf[i..available], &mut interpreter);
            position.process_new(&buf[i..i + consumed]);
            if !ok {
                position.process_remainder(&buf[i + consumed..available]);
                emit_parse_diagnostic(handler, &position);
                return Err(StreamError::Parse);
            }
            if consumed == 0 {
                // Needs more data; move the tail to the front and refill.
                buf.copy_within(i..available, 0);
                data_start = available - i;
                break;
            }
            i += consumed;
        }
    }

    if data_start > 0 {
        // EOF inside an undecodable tail.
        position.process_remainder(&buf[..data_start]);
        emit_parse_diagnostic(handler, &position);
        return Err(StreamError::Parse);
    }

    if !tokenizer.end_parsing(&mut interpreter) {
        emit_parse_diagnostic(handler, &position);
        return Err(StreamError::Parse);
    }

    Ok(())
}

fn emit_parse_diagnostic(handler: &Handler, position: &ParsePosition) {
    let mut msg = format!(
        "Parse Error: {}@{}:{}\n",
        position.name(),
        position.current_line(),
        position.current_column()
    );
    let offset_context = position.context_begin_column() != 0;
    if offset_context {
        msg.push_str("...");
    }
    msg.push_str(&position.printable_context());
    msg.push('\n');
    if offset_context {
        msg.push_str("   ");
    }
    if position.context_position_offset() > 0 {
        msg.push_str(&" ".repeat(position.context_position_offset() - 1));
        msg.push('^');
    }
    msg.push('\n');
    runtime_error!(handler, MODULE, "{msg}");
}
