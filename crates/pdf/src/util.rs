//! Generic utilities

use std::io::{self, Write};

/// Source: <https://stackoverflow.com/questions/42187591/>
pub struct ByteCounter<W> {
    inner: W,
    count: usize,
    last: Option<u8>,
}

impl<W> ByteCounter<W>
where
    W: Write,
{
    /// Create a new byte counter
    pub fn new(inner: W) -> Self {
        ByteCounter {
            inner,
            count: 0,
            last: None,
        }
    }

    /// Return the inner writer
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Get the number of bytes written
    pub fn bytes_written(&self) -> usize {
        self.count
    }

    /// Whether the last byte that was written is a line feed
    pub fn at_line_start(&self) -> bool {
        matches!(self.last, None | Some(b'\n'))
    }
}

impl<W> Write for ByteCounter<W>
where
    W: Write,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let res = self.inner.write(buf);
        if let Ok(size) = res {
            self.count += size;
            if size > 0 {
                self.last = Some(buf[size - 1]);
            }
        }
        res
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

pub(crate) struct NextId {
    obj_id: u64,
}

impl NextId {
    pub(crate) fn new(start: u64) -> Self {
        Self { obj_id: start }
    }

    pub(crate) fn next(&mut self) -> u64 {
        let next = self.obj_id;
        self.obj_id += 1;
        next
    }
}

/// Truncate a string to at most `max` characters
pub fn clip(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{clip, ByteCounter, NextId};

    #[test]
    fn byte_counter() {
        let mut counter = ByteCounter::new(Vec::new());
        assert!(counter.at_line_start());
        write!(counter, "1 0 obj").unwrap();
        assert_eq!(counter.bytes_written(), 7);
        assert!(!counter.at_line_start());
        writeln!(counter).unwrap();
        assert!(counter.at_line_start());
        assert_eq!(counter.into_inner(), b"1 0 obj\n");
    }

    #[test]
    fn next_id() {
        let mut id_gen = NextId::new(1);
        assert_eq!(id_gen.next(), 1);
        assert_eq!(id_gen.next(), 2);
    }

    #[test]
    fn clip_chars() {
        assert_eq!(clip("Monday", 17), "Monday");
        assert_eq!(clip("Entrepreneurship!!", 17), "Entrepreneurship!");
        assert_eq!(clip("äöü", 2), "äö");
        assert_eq!(clip("", 0), "");
    }
}
