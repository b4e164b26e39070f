//! Chunked symbolizer: bytes → code points → category runs.
//!
//! Categories are predicates over code points plus a small id and a
//! concatenation policy. Multiple categories may contain the same code
//! point; the first registered one wins. The symbolizer does not own its
//! categories, it borrows them for its lifetime.

use bfsdl_util::unicode::{CodePoint, Converter, Decoded};

/// A predicate over code points with an id and a concatenation policy.
pub trait SymbolCategory {
    /// The category id reported with matching symbols.
    fn category(&self) -> i32;
    /// Membership test.
    fn contains(&self, code_point: CodePoint) -> bool;
    /// Whether adjacent code points of this category coalesce into one
    /// reported symbol.
    fn should_concatenate(&self) -> bool;
}

/// Category matching an inclusive range of code points.
pub struct RangeSymbolCategory {
    category: i32,
    start: CodePoint,
    end: CodePoint,
    concatenate: bool,
}

impl RangeSymbolCategory {
    /// Category over `start..=end`.
    pub const fn new(category: i32, start: CodePoint, end: CodePoint, concatenate: bool) -> Self {
        Self {
            category,
            start,
            end,
            concatenate,
        }
    }

    /// Category over a single code point.
    pub const fn single(category: i32, code_point: CodePoint, concatenate: bool) -> Self {
        Self::new(category, code_point, code_point, concatenate)
    }
}

impl SymbolCategory for RangeSymbolCategory {
    fn category(&self) -> i32 {
        self.category
    }

    fn contains(&self, code_point: CodePoint) -> bool {
        self.start <= code_point && code_point <= self.end
    }

    fn should_concatenate(&self) -> bool {
        self.concatenate
    }
}

/// Category matching an explicit list of code points.
pub struct ArraySymbolCategory {
    category: i32,
    code_points: &'static [CodePoint],
    concatenate: bool,
}

impl ArraySymbolCategory {
    /// Category over the listed code points.
    pub const fn new(category: i32, code_points: &'static [CodePoint], concatenate: bool) -> Self {
        Self {
            category,
            code_points,
            concatenate,
        }
    }
}

impl SymbolCategory for ArraySymbolCategory {
    fn category(&self) -> i32 {
        self.category
    }

    fn contains(&self, code_point: CodePoint) -> bool {
        self.code_points.contains(&code_point)
    }

    fn should_concatenate(&self) -> bool {
        self.concatenate
    }
}

/// Category matching the characters of an ASCII string.
pub struct StringSymbolCategory {
    category: i32,
    chars: &'static str,
    concatenate: bool,
}

impl StringSymbolCategory {
    /// Category over the characters of `chars`.
    pub const fn new(category: i32, chars: &'static str, concatenate: bool) -> Self {
        Self {
            category,
            chars,
            concatenate,
        }
    }
}

impl SymbolCategory for StringSymbolCategory {
    fn category(&self) -> i32 {
        self.category
    }

    fn contains(&self, code_point: CodePoint) -> bool {
        self.chars.chars().any(|c| c as CodePoint == code_point)
    }

    fn should_concatenate(&self) -> bool {
        self.concatenate
    }
}

/// Receives classified symbols from the symbolizer.
///
/// Symbol text is the run of encoded bytes that mapped to the category;
/// observers must not retain the slices beyond the callback. Returning
/// false halts the parse.
pub trait SymbolObserver {
    /// A symbol belonging to a registered category.
    fn on_mapped_symbol(&mut self, category: i32, text: &[u8]) -> bool;
    /// Bytes whose code point belongs to no registered category, or that
    /// could not be decoded at all.
    fn on_unmapped_symbol(&mut self, text: &[u8]) -> bool;
}

struct PendingRun {
    category: i32,
    concatenate: bool,
    bytes: Vec<u8>,
}

/// Classifies a chunked byte stream into category runs.
///
/// Bytes count as consumed once their code point has been classified into
/// the current run; runs persist across [`parse`](Symbolizer::parse) calls
/// and are flushed on category change or by
/// [`end_parse`](Symbolizer::end_parse). Concatenating all reported symbols
/// therefore reproduces exactly the consumed input.
pub struct Symbolizer<'c> {
    converter: Box<dyn Converter>,
    categories: Vec<&'c dyn SymbolCategory>,
    pending: Option<PendingRun>,
}

impl<'c> Symbolizer<'c> {
    /// Creates a symbolizer decoding through `converter`.
    pub fn new(converter: Box<dyn Converter>) -> Self {
        Self {
            converter,
            categories: Vec::new(),
            pending: None,
        }
    }

    /// Registers a category. Registration order decides ties: the first
    /// category containing a code point wins.
    pub fn add_category(&mut self, category: &'c dyn SymbolCategory) {
        self.categories.push(category);
    }

    /// Feeds a chunk, reporting symbols to `observer`.
    ///
    /// Returns `(ok, bytes_consumed)`. `bytes_consumed < data.len()` with
    /// `ok` means the chunk ended inside a multi-byte character: shift the
    /// remainder to the chunk head and refill. On failure the unconsumed
    /// tail starts at the offending input.
    pub fn parse(&mut self, data: &[u8], observer: &mut dyn SymbolObserver) -> (bool, usize) {
        let mut pos = 0;
        while pos < data.len() {
            let (code_point, len) = match self.converter.decode(&data[pos..]) {
                Decoded::Symbol { code_point, len } => (code_point, len),
                Decoded::Incomplete => return (true, pos),
                Decoded::Invalid { len } => {
                    if !self.flush(observer) {
                        return (false, pos);
                    }
                    observer.on_unmapped_symbol(&data[pos..pos + len]);
                    return (false, pos);
                }
            };

            let Some(category) = self.categories.iter().find(|c| c.contains(code_point)) else {
                if !self.flush(observer) {
                    return (false, pos);
                }
                observer.on_unmapped_symbol(&data[pos..pos + len]);
                return (false, pos);
            };
            let id = category.category();
            let concatenate = category.should_concatenate();

            let extends_run = self
                .pending
                .as_ref()
                .is_some_and(|run| run.category == id && run.concatenate && concatenate);
            if !extends_run && self.pending.is_some() && !self.flush(observer) {
                return (false, pos);
            }

            match &mut self.pending {
                Some(run) => run.bytes.extend_from_slice(&data[pos..pos + len]),
                None => {
                    self.pending = Some(PendingRun {
                        category: id,
                        concatenate,
                        bytes: data[pos..pos + len].to_vec(),
                    })
                }
            }
            pos += len;

            if !concatenate && !self.flush(observer) {
                return (false, pos);
            }
        }
        (true, pos)
    }

    /// Flushes any pending coalesced symbol at end of stream.
    pub fn end_parse(&mut self, observer: &mut dyn SymbolObserver) -> bool {
        self.flush(observer)
    }

    fn flush(&mut self, observer: &mut dyn SymbolObserver) -> bool {
        match self.pending.take() {
            Some(run) => observer.on_mapped_symbol(run.category, &run.bytes),
            None => true,
        }
    }
}
