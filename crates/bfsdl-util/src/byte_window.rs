//! Fixed-capacity window over the most recent bytes of a stream.
//!
//! The window keeps two monotonically increasing counters, `begin` and
//! `end`. Both are allowed to wrap on integer overflow; only their
//! difference is meaningful, and it never exceeds the capacity. This makes
//! the counters usable as "how far into the current line are we" style
//! bookkeeping without ever reading them as absolute positions.

/// A ring of the last `capacity` bytes pushed into it.
///
/// # Example
///
/// ```
/// use bfsdl_util::ByteWindow;
///
/// let mut window = ByteWindow::new(4);
/// window.push(b"abcdef");
/// assert_eq!(window.size(), 4);
/// assert_eq!(window.get(0), b'c');
/// assert_eq!(window.get(3), b'f');
/// ```
pub struct ByteWindow {
    buf: Vec<u8>,
    begin: usize,
    end: usize,
    head: usize,
}

impl ByteWindow {
    /// Creates a window holding at most `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity],
            begin: 0,
            end: 0,
            head: 0,
        }
    }

    /// Resets the window to its initial state without clearing the buffer
    /// memory.
    pub fn reset(&mut self) {
        self.begin = 0;
        self.end = 0;
        self.head = 0;
    }

    /// Returns the fixed capacity chosen at construction.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Counter advanced for every byte the head of the window moves.
    ///
    /// Wraps on integer overflow; only the difference to [`end_counter`]
    /// is meaningful.
    ///
    /// [`end_counter`]: ByteWindow::end_counter
    pub fn begin_counter(&self) -> usize {
        self.begin
    }

    /// Counter advanced for every byte the tail of the window moves.
    pub fn end_counter(&self) -> usize {
        self.end
    }

    /// Number of bytes currently held, `end - begin`.
    pub fn size(&self) -> usize {
        self.end.wrapping_sub(self.begin)
    }

    /// Returns the byte at logical offset `index` from the head, or 0 when
    /// out of bounds.
    pub fn get(&self, index: usize) -> u8 {
        if index >= self.size() {
            return 0;
        }
        self.buf[self.wrap(self.head, index)]
    }

    /// Read-only view of the underlying storage (unordered).
    pub fn raw_buffer(&self) -> &[u8] {
        &self.buf
    }

    /// Pushes bytes into the window, discarding from the head whatever does
    /// not fit.
    pub fn push(&mut self, data: &[u8]) {
        if data.is_empty() {
            return;
        }

        let capacity = self.buf.len();
        let mut left = data.len();
        let mut idx = 0;
        if left > capacity {
            // Too much data for the buffer: skip straight to the end and
            // cycle out the existing window.
            idx = left - capacity;
            self.end = self.end.wrapping_add(idx);
            self.begin = self.end;
            self.head = 0;
            left = capacity;
        }

        // Fill whatever free space remains at the tail.
        let mut tail = self.wrap(self.head, self.size());
        if left > 0 {
            let to_copy = left.min(capacity - self.size());
            if to_copy > 0 {
                self.copy_circ(tail, &data[idx..idx + to_copy]);
                tail = self.wrap(tail, to_copy);
                self.end = self.end.wrapping_add(to_copy);
                idx += to_copy;
                left -= to_copy;
            }
        }

        // Copy the rest, moving head and tail together.
        if left > 0 {
            self.copy_circ(tail, &data[idx..idx + left]);
            self.begin = self.begin.wrapping_add(left);
            self.end = self.end.wrapping_add(left);
            self.head = self.wrap(self.head, left);
        }
    }

    /// Copies `data` into the circular buffer starting at `at`, wrapping at
    /// the end. Does not touch head or the counters.
    fn copy_circ(&mut self, at: usize, data: &[u8]) {
        let capacity = self.buf.len();
        if at >= capacity || data.is_empty() {
            return;
        }

        let first = data.len().min(capacity - at);
        self.buf[at..at + first].copy_from_slice(&data[..first]);
        if first < data.len() {
            let rest = data.len() - first;
            self.buf[..rest].copy_from_slice(&data[first..]);
        }
    }

    /// Returns `index` advanced by `count`, wrapping at the buffer end.
    fn wrap(&self, index: usize, count: usize) -> usize {
        let capacity = self.buf.len();
        if count == 0 || capacity == 0 {
            return index;
        }
        let mut idx = index + count;
        while idx >= capacity {
            idx -= capacity;
        }
        idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_empty_window() {
        let window = ByteWindow::new(8);
        assert_eq!(window.size(), 0);
        assert_eq!(window.begin_counter(), 0);
        assert_eq!(window.end_counter(), 0);
        assert_eq!(window.get(0), 0);
    }

    #[test]
    fn test_push_nothing_moves_nothing() {
        let mut window = ByteWindow::new(8);
        window.push(&[]);
        assert_eq!(window.begin_counter(), 0);
        assert_eq!(window.end_counter(), 0);
    }

    #[test]
    fn test_push_exactly_capacity() {
        let mut window = ByteWindow::new(4);
        window.push(b"abcd");
        assert_eq!(window.begin_counter(), 0);
        assert_eq!(window.end_counter(), 4);
        assert_eq!(window.size(), 4);
        for (i, b) in b"abcd".iter().enumerate() {
            assert_eq!(window.get(i), *b);
        }
    }

    #[test]
    fn test_push_overflows_capacity() {
        let mut window = ByteWindow::new(4);
        window.push(b"abcdef");
        assert_eq!(window.size(), 4);
        assert_eq!(window.begin_counter(), 2);
        assert_eq!(window.end_counter(), 6);
        for (i, b) in b"cdef".iter().enumerate() {
            assert_eq!(window.get(i), *b);
        }
    }

    #[test]
    fn test_incremental_pushes_slide() {
        let mut window = ByteWindow::new(3);
        window.push(b"ab");
        window.push(b"cd");
        assert_eq!(window.size(), 3);
        assert_eq!(window.begin_counter(), 1);
        assert_eq!(window.end_counter(), 4);
        assert_eq!(window.get(0), b'b');
        assert_eq!(window.get(1), b'c');
        assert_eq!(window.get(2), b'd');
    }

    #[test]
    fn test_reset_clears_counters() {
        let mut window = ByteWindow::new(3);
        window.push(b"abcdef");
        window.reset();
        assert_eq!(window.size(), 0);
        assert_eq!(window.begin_counter(), 0);
        assert_eq!(window.end_counter(), 0);
    }

    #[test]
    fn test_zero_capacity() {
        let mut window = ByteWindow::new(0);
        window.push(b"abc");
        assert_eq!(window.size(), 0);
        assert_eq!(window.get(0), 0);
    }

    #[test]
    fn test_out_of_bounds_read_is_zero() {
        let mut window = ByteWindow::new(4);
        window.push(b"ab");
        assert_eq!(window.get(2), 0);
        assert_eq!(window.get(100), 0);
    }

    fn fill(capacity: usize, pushes: &[Vec<u8>]) -> (ByteWindow, Vec<u8>) {
        let mut window = ByteWindow::new(capacity);
        let mut all = Vec::new();
        for chunk in pushes {
            window.push(chunk);
            all.extend_from_slice(chunk);
        }
        (window, all)
    }

    #[quickcheck]
    fn prop_window_length_law(capacity: u8, pushes: Vec<Vec<u8>>) -> bool {
        let capacity = (capacity % 32) as usize;
        let (window, all) = fill(capacity, &pushes);
        let expected = all.len().min(capacity);
        window.size() == expected
            && window.end_counter().wrapping_sub(window.begin_counter()) == expected
    }

    #[quickcheck]
    fn prop_window_content_law(capacity: u8, pushes: Vec<Vec<u8>>) -> bool {
        let capacity = (capacity % 32) as usize;
        let (window, all) = fill(capacity, &pushes);
        let size = window.size();
        (0..size).all(|i| window.get(i) == all[all.len() - size + i])
    }
}
