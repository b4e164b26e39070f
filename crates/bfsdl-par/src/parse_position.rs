//! Positional bookkeeping for human-readable parse errors.
//!
//! The stream parser itself does not care about newlines, but humans want
//! to know where parsing stopped. This tracker counts lines, keeps a small
//! window of recently accepted bytes (the pretext) and a copy of the bytes
//! the parser rejected (the posttext), and renders both printably.
//!
//! The first CR or LF seen becomes the canonical line terminator for the
//! whole parse; the other byte of a CRLF pair is then ignored for counting.

use bfsdl_util::ByteWindow;

/// Tracks line/column and printable context around the last parsed byte.
pub struct ParsePosition {
    name: String,
    newline_char: u8,
    current_line: usize,
    context_window: ByteWindow,
    posttext: Vec<u8>,
    posttext_capacity: usize,
}

impl ParsePosition {
    /// Creates a tracker named `name` (e.g. the file name) keeping up to
    /// `pretext_len` bytes of history and `posttext_len` rejected bytes.
    pub fn new(name: impl Into<String>, pretext_len: usize, posttext_len: usize) -> Self {
        Self {
            name: name.into(),
            newline_char: 0,
            current_line: 1,
            context_window: ByteWindow::new(pretext_len),
            posttext: Vec::with_capacity(posttext_len),
            posttext_capacity: posttext_len,
        }
    }

    /// The context name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current line number, 1-based.
    pub fn current_line(&self) -> usize {
        self.current_line
    }

    /// The column of the byte after the last accepted byte on the current
    /// line, 1-based.
    pub fn current_column(&self) -> usize {
        self.context_window.end_counter().wrapping_add(1)
    }

    /// The column at which the stored context begins. Nonzero means history
    /// was discarded and diagnostics should prefix the context with `...`.
    pub fn context_begin_column(&self) -> usize {
        self.context_window.begin_counter()
    }

    /// Offset of the current position within the stored context.
    pub fn context_position_offset(&self) -> usize {
        self.context_window.size()
    }

    /// Accounts for bytes the parser accepted.
    pub fn process_new(&mut self, data: &[u8]) {
        // Rejected bytes from an earlier round are stale now.
        self.posttext.clear();

        for &byte in data {
            match byte {
                0x0a | 0x0d => {
                    if self.newline_char == 0 {
                        self.newline_char = byte;
                    }
                    if byte == self.newline_char {
                        self.context_window.reset();
                        self.current_line += 1;
                    }
                    // Newline bytes never enter the window.
                }
                _ => self.context_window.push(&[byte]),
            }
        }
    }

    /// Stores bytes the parser rejected, up to the posttext capacity.
    pub fn process_remainder(&mut self, data: &[u8]) {
        let keep = data.len().min(self.posttext_capacity);
        self.posttext.clear();
        self.posttext.extend_from_slice(&data[..keep]);
    }

    /// Renders the pretext window followed by the posttext, stopping at the
    /// first newline in the posttext. Bytes outside `0x20..=0x7e` are
    /// escaped as `\xNN`.
    pub fn printable_context(&self) -> String {
        let mut out = String::new();
        for i in 0..self.context_window.size() {
            push_printable(&mut out, self.context_window.get(i));
        }
        for &byte in &self.posttext {
            if byte == 0x0d || byte == 0x0a {
                break;
            }
            push_printable(&mut out, byte);
        }
        out
    }
}

fn push_printable(out: &mut String, byte: u8) {
    if (0x20..=0x7e).contains(&byte) {
        out.push(byte as char);
    } else {
        out.push_str(&format!("\\x{byte:02x}"));
    }
}
