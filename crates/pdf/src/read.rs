//! Structural reader for the files written by [`crate::page`]
//!
//! This is not a general PDF parser. It reads back the classic xref table,
//! the trailer and the single content stream, and checks that the offsets
//! and lengths that were written are consistent.

use std::{ops::Range, str};

use thiserror::Error;

use crate::write::XrefEntry;

/// Failed to read a file
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReadError {
    /// A keyword that must be present was not found
    #[error("Missing `{0}` keyword")]
    MissingKeyword(&'static str),
    /// Some part of the file could not be parsed
    #[error("Malformed {what} at byte {at}")]
    Malformed {
        /// The structure that was being parsed
        what: &'static str,
        /// The byte offset
        at: usize,
    },
    /// An xref entry does not point at the matching `obj` keyword
    #[error("Object {id} is not at offset {offset}")]
    OffsetMismatch {
        /// The object number
        id: u64,
        /// The offset in the xref table
        offset: usize,
    },
    /// The `Length` of a stream does not match its data
    #[error("Stream declares {declared} bytes, but `endstream` does not follow them")]
    LengthMismatch {
        /// The value of `/Length`
        declared: usize,
    },
    /// The trailer `Size` does not match the table
    #[error("Trailer declares {declared} entries, the table has {actual}")]
    SizeMismatch {
        /// The value of `/Size`
        declared: usize,
        /// The number of entries in the table
        actual: usize,
    },
    /// `%%EOF` is missing or not at the end
    #[error("`%%EOF` must appear once, at the end of the file")]
    Eof,
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|substr| substr == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .rposition(|substr| substr == needle)
}

fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack
        .windows(needle.len())
        .filter(|substr| *substr == needle)
        .count()
}

/// Cursor over a single-line ASCII token stream
struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a [u8], pos: usize) -> Self {
        Self { input, pos }
    }

    fn rest(&self) -> &'a [u8] {
        self.input.get(self.pos..).unwrap_or_default()
    }

    fn skip_ws(&mut self) {
        while let Some(b' ' | b'\n' | b'\r') = self.rest().first() {
            self.pos += 1;
        }
    }

    fn keyword(&mut self, kw: &'static str) -> Result<(), ReadError> {
        self.skip_ws();
        if self.rest().starts_with(kw.as_bytes()) {
            self.pos += kw.len();
            Ok(())
        } else {
            Err(ReadError::MissingKeyword(kw))
        }
    }

    fn number(&mut self, what: &'static str) -> Result<usize, ReadError> {
        self.skip_ws();
        let len = self
            .rest()
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        let at = self.pos;
        let digits = &self.rest()[..len];
        self.pos += len;
        str::from_utf8(digits)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or(ReadError::Malformed { what, at })
    }
}

/// The cross-reference table and trailer of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xref {
    /// Byte offset of the `xref` keyword
    pub startxref: usize,
    /// All entries, index = object number
    pub entries: Vec<XrefEntry>,
    /// The trailer `/Size`
    pub size: usize,
    /// The object number of the trailer `/Root`
    pub root: u64,
}

impl Xref {
    /// Read the xref table that the last `startxref` points to
    pub fn parse(bytes: &[u8]) -> Result<Self, ReadError> {
        let sx = rfind(bytes, b"startxref").ok_or(ReadError::MissingKeyword("startxref"))?;
        let mut cursor = Cursor::new(bytes, sx + "startxref".len());
        let startxref = cursor.number("startxref offset")?;

        let mut cursor = Cursor::new(bytes, startxref);
        cursor.keyword("xref")?;

        let mut entries: Vec<XrefEntry> = Vec::new();
        loop {
            cursor.skip_ws();
            if cursor.rest().starts_with(b"trailer") {
                break;
            }
            let first = cursor.number("xref subsection")?;
            let len = cursor.number("xref subsection")?;
            if first != entries.len() {
                return Err(ReadError::Malformed {
                    what: "xref subsection",
                    at: cursor.pos,
                });
            }
            cursor.skip_ws();
            for _ in 0..len {
                entries.push(Self::entry(&mut cursor)?);
            }
        }

        cursor.keyword("trailer")?;
        let trailer_start = cursor.pos;
        let trailer_end = rfind(bytes, b"startxref").unwrap_or(bytes.len());
        let trailer = bytes
            .get(trailer_start..trailer_end)
            .ok_or(ReadError::Malformed {
                what: "trailer",
                at: trailer_start,
            })?;

        let size = Self::trailer_key(trailer, trailer_start, b"/Size")?;
        let root = Self::trailer_key(trailer, trailer_start, b"/Root")? as u64;

        Ok(Self {
            startxref,
            entries,
            size,
            root,
        })
    }

    fn entry(cursor: &mut Cursor) -> Result<XrefEntry, ReadError> {
        let at = cursor.pos;
        let malformed = ReadError::Malformed {
            what: "xref entry",
            at,
        };
        let line = cursor.rest().get(..20).ok_or_else(|| malformed.clone())?;
        let (offset, gen, mark, eol) = (&line[0..10], &line[11..16], line[17], &line[18..20]);
        if line[10] != b' ' || line[16] != b' ' || !matches!(eol, b" \n" | b"\r\n" | b" \r") {
            return Err(malformed);
        }
        let offset = str::from_utf8(offset)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| malformed.clone())?;
        let gen = str::from_utf8(gen)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| malformed.clone())?;
        let free = match mark {
            b'f' => true,
            b'n' => false,
            _ => return Err(malformed),
        };
        cursor.pos += 20;
        Ok(XrefEntry { offset, gen, free })
    }

    fn trailer_key(trailer: &[u8], base: usize, key: &'static [u8]) -> Result<usize, ReadError> {
        let at = find(trailer, key).ok_or(ReadError::Malformed {
            what: "trailer",
            at: base,
        })?;
        Cursor::new(trailer, at + key.len()).number("trailer")
    }

    /// Iterate over the objects that are in use
    pub fn objects(&self) -> impl Iterator<Item = (u64, &XrefEntry)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.free)
            .map(|(id, entry)| (id as u64, entry))
    }

    /// Check that every offset, the trailer size and the end marker are correct
    pub fn verify(&self, bytes: &[u8]) -> Result<(), ReadError> {
        if self.size != self.entries.len() {
            return Err(ReadError::SizeMismatch {
                declared: self.size,
                actual: self.entries.len(),
            });
        }
        for (id, entry) in self.objects() {
            let needle = format!("{} {} obj", id, entry.gen);
            let at_offset = bytes.get(entry.offset..).unwrap_or_default();
            if !at_offset.starts_with(needle.as_bytes()) {
                return Err(ReadError::OffsetMismatch {
                    id,
                    offset: entry.offset,
                });
            }
        }
        let ends = bytes.ends_with(b"%%EOF\n") || bytes.ends_with(b"%%EOF");
        if !ends || count(bytes, b"%%EOF") != 1 {
            return Err(ReadError::Eof);
        }
        Ok(())
    }
}

/// Find the data of the first stream, checked against its `/Length`
pub fn content_stream(bytes: &[u8]) -> Result<&[u8], ReadError> {
    content_stream_range(bytes).map(|range| &bytes[range])
}

fn content_stream_range(bytes: &[u8]) -> Result<Range<usize>, ReadError> {
    let kw = find(bytes, b"stream\n").ok_or(ReadError::MissingKeyword("stream"))?;
    let dict = rfind(&bytes[..kw], b"/Length").ok_or(ReadError::Malformed {
        what: "stream dict",
        at: kw,
    })?;
    let declared = Cursor::new(bytes, dict + "/Length".len()).number("stream length")?;
    let start = kw + "stream\n".len();
    let end = start
        .checked_add(declared)
        .ok_or(ReadError::LengthMismatch { declared })?;
    match bytes.get(end..) {
        Some(rest) if rest.starts_with(b"\nendstream") => Ok(start..end),
        _ => Err(ReadError::LengthMismatch { declared }),
    }
}
