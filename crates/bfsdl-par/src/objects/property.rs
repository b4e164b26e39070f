//! Named metadata values attached to a tree node.
//!
//! The interpretation of a property is tied to its name, so names must be
//! canonical. The value is a raw byte payload; numeric payloads are stored
//! little-endian and textual payloads are stored without a trailing NUL, so
//! readers must not assume one.

/// A `(name, raw_bytes)` pair with typed accessors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    name: String,
    data: Vec<u8>,
}

impl Property {
    /// Creates a property with an empty payload.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Vec::new(),
        }
    }

    /// Creates a property holding a 32-bit little-endian value.
    pub fn with_u32(name: impl Into<String>, value: u32) -> Self {
        let mut property = Self::new(name);
        property.set_u32(value);
        property
    }

    /// Creates a property holding text.
    pub fn with_string(name: impl Into<String>, value: &str) -> Self {
        let mut property = Self::new(name);
        property.set_string(value);
        property
    }

    /// The property name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Replaces the payload with raw bytes.
    pub fn set_data(&mut self, data: &[u8]) {
        self.data.clear();
        self.data.extend_from_slice(data);
    }

    /// Stores text, without a trailing NUL.
    pub fn set_string(&mut self, value: &str) {
        self.set_data(value.as_bytes());
    }

    /// Stores a 32-bit little-endian value.
    pub fn set_u32(&mut self, value: u32) {
        self.set_data(&value.to_le_bytes());
    }

    /// Reads the payload as a little-endian unsigned integer of 1, 2, 4 or
    /// 8 bytes.
    pub fn as_u64(&self) -> Option<u64> {
        match self.data.len() {
            1 => Some(self.data[0] as u64),
            2 => {
                let mut bytes = [0u8; 2];
                bytes.copy_from_slice(&self.data);
                Some(u16::from_le_bytes(bytes) as u64)
            }
            4 => {
                let mut bytes = [0u8; 4];
                bytes.copy_from_slice(&self.data);
                Some(u32::from_le_bytes(bytes) as u64)
            }
            8 => {
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(&self.data);
                Some(u64::from_le_bytes(bytes))
            }
            _ => None,
        }
    }

    /// Reads the payload as a boolean (any nonzero integer is true).
    pub fn as_bool(&self) -> Option<bool> {
        self.as_u64().map(|value| value != 0)
    }

    /// Reads the payload as UTF-8 text.
    pub fn as_string_utf8(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_round_trip() {
        let property = Property::with_u32("Version", 3);
        assert_eq!(property.as_u64(), Some(3));
        assert_eq!(property.as_bool(), Some(true));
        assert_eq!(property.data().len(), 4);
    }

    #[test]
    fn test_string_round_trip() {
        let property = Property::with_string("DefaultStringCode", "ASCII");
        assert_eq!(property.as_string_utf8(), Some("ASCII"));
        // No trailing NUL is stored.
        assert_eq!(property.data(), b"ASCII");
    }

    #[test]
    fn test_as_u64_rejects_odd_sizes() {
        let mut property = Property::new("x");
        property.set_data(&[1, 2, 3]);
        assert_eq!(property.as_u64(), None);
        assert_eq!(property.as_bool(), None);
    }

    #[test]
    fn test_zero_is_false() {
        let property = Property::with_u32("flag", 0);
        assert_eq!(property.as_bool(), Some(false));
    }

    #[test]
    fn test_little_endian_layout() {
        let property = Property::with_u32("x", 0x0102_0304);
        assert_eq!(property.data(), &[0x04, 0x03, 0x02, 0x01]);
    }
}
