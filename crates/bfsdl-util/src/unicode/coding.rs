//! Registry of supported codecs.
//!
//! Canonical names resolve case-sensitively to opaque [`CodingId`]s; the id
//! is what field descriptors and properties carry around.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use super::{AsciiConverter, Converter, Utf8Converter};

/// Codec families with a shipped converter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodingFamily {
    /// 7-bit ASCII.
    Ascii,
    /// UTF-8.
    Utf8,
}

/// Opaque identifier of a registered codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CodingId(u32);

struct CodingEntry {
    name: &'static str,
    family: CodingFamily,
}

static CODINGS: &[CodingEntry] = &[
    CodingEntry {
        name: "ASCII",
        family: CodingFamily::Ascii,
    },
    CodingEntry {
        name: "UTF8",
        family: CodingFamily::Utf8,
    },
];

fn coding_index() -> &'static FxHashMap<&'static str, u32> {
    static INDEX: OnceLock<FxHashMap<&'static str, u32>> = OnceLock::new();
    INDEX.get_or_init(|| {
        CODINGS
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.name, i as u32))
            .collect()
    })
}

/// Resolves a canonical codec name (case-sensitive) to its id.
pub fn get_coding_id(name: &str) -> Option<CodingId> {
    coding_index().get(name).map(|&index| CodingId(index))
}

/// Returns true if `name` resolves to a registered codec.
pub fn is_valid_coding(name: &str) -> bool {
    get_coding_id(name).is_some()
}

/// Returns the canonical name of a registered codec id.
pub fn coding_name(id: CodingId) -> &'static str {
    CODINGS.get(id.0 as usize).map_or("", |entry| entry.name)
}

/// Instantiates the converter for a registered codec id.
pub fn get_codec(id: CodingId) -> Option<Box<dyn Converter>> {
    match CODINGS.get(id.0 as usize)?.family {
        CodingFamily::Ascii => Some(Box::new(AsciiConverter::new())),
        CodingFamily::Utf8 => Some(Box::new(Utf8Converter::new())),
    }
}
