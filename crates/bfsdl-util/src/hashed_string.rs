//! Strings carrying a precomputed non-cryptographic hash.
//!
//! Dictionary keys in the object tree are compared hash-first, falling back
//! to a byte compare only on hash collision. The resulting order is a
//! strict-weak total order, which is all an ordered map needs.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Hash value type used throughout the parser.
pub type HashType = u32;

const FNV_PRIME: HashType = 0x0100_0193;
const FNV_OFFSET_BIAS: HashType = 0x811c_9dc5;

/// FNV-style multiply/xor hash over a byte slice.
///
/// Chosen for a balance of speed, simplicity, and a low occurrence of
/// collisions on short identifier-like keys.
pub fn fast_hash(data: &[u8]) -> HashType {
    let mut hash = FNV_OFFSET_BIAS;
    for &byte in data {
        hash = hash.wrapping_mul(FNV_PRIME);
        hash ^= byte as HashType;
    }
    hash
}

/// A string bundled with its [`fast_hash`] value.
///
/// Equality requires hash equality and byte equality. Ordering is primary
/// by hash (unsigned), secondary by lexicographic byte compare.
///
/// # Example
///
/// ```
/// use bfsdl_util::HashedString;
///
/// let a = HashedString::new("Version");
/// let b = HashedString::new("Version");
/// assert_eq!(a, b);
/// assert_ne!(a, HashedString::new("BitBase"));
/// ```
#[derive(Clone, Debug)]
pub struct HashedString {
    text: String,
    hash: HashType,
}

impl HashedString {
    /// Wraps `text`, computing its hash.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let hash = fast_hash(text.as_bytes());
        Self { text, hash }
    }

    /// The precomputed hash.
    pub fn hash_value(&self) -> HashType {
        self.hash
    }

    /// The underlying string.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl PartialEq for HashedString {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.text == other.text
    }
}

impl Eq for HashedString {}

impl PartialOrd for HashedString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HashedString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hash
            .cmp(&other.hash)
            .then_with(|| self.text.as_bytes().cmp(other.text.as_bytes()))
    }
}

impl Hash for HashedString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash);
    }
}

impl fmt::Display for HashedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_fast_hash_empty() {
        assert_eq!(fast_hash(b""), FNV_OFFSET_BIAS);
    }

    #[test]
    fn test_fast_hash_differs() {
        assert_ne!(fast_hash(b"Version"), fast_hash(b"BitBase"));
    }

    #[test]
    fn test_equality() {
        assert_eq!(HashedString::new("abc"), HashedString::new("abc"));
        assert_ne!(HashedString::new("abc"), HashedString::new("abd"));
    }

    #[test]
    fn test_order_is_hash_first() {
        let a = HashedString::new("a");
        let b = HashedString::new("b");
        let expected = a.hash_value().cmp(&b.hash_value());
        assert_eq!(a.cmp(&b), expected);
    }

    #[quickcheck]
    fn prop_equality_mirrors_string_equality(a: String, b: String) -> bool {
        (HashedString::new(a.clone()) == HashedString::new(b.clone())) == (a == b)
    }

    #[quickcheck]
    fn prop_order_is_total_and_antisymmetric(a: String, b: String) -> bool {
        let ha = HashedString::new(a);
        let hb = HashedString::new(b);
        match ha.cmp(&hb) {
            Ordering::Equal => ha == hb && hb.cmp(&ha) == Ordering::Equal,
            Ordering::Less => hb.cmp(&ha) == Ordering::Greater,
            Ordering::Greater => hb.cmp(&ha) == Ordering::Less,
        }
    }

    #[quickcheck]
    fn prop_order_is_transitive(a: String, b: String, c: String) -> bool {
        let mut items = [
            HashedString::new(a),
            HashedString::new(b),
            HashedString::new(c),
        ];
        items.sort();
        items[0] <= items[1] && items[1] <= items[2] && items[0] <= items[2]
    }
}
