//! Methods to produce a binary file

use std::io::{self, Write};

use crate::{common::ObjRef, util::ByteCounter};

/// The file header, including the comment with four high bytes that
/// marks the file as binary
pub const HEADER: &[u8] = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n";

/// API to serialize a dict
#[must_use]
pub struct PdfDict<'a, 'b> {
    first: bool,
    f: &'b mut Formatter<'a>,
}

impl PdfDict<'_, '_> {
    fn check_first(&mut self) -> io::Result<()> {
        if self.first {
            self.f.space()?;
            write!(self.f.inner, "<<")?;
            self.first = false;
        }
        Ok(())
    }

    /// Write a field
    pub fn field(&mut self, name: &str, value: &dyn Serialize) -> io::Result<&mut Self> {
        self.check_first()?;
        write!(self.f.inner, " ")?;
        self.f.needs_space = write_name(name, &mut self.f.inner)?;
        value.write(self.f)?;
        Ok(self)
    }

    /// Write a slice-valued field
    pub fn arr_field<X: Serialize>(&mut self, name: &str, array: &[X]) -> io::Result<&mut Self> {
        self.check_first()?;
        write!(self.f.inner, " ")?;
        self.f.needs_space = write_name(name, &mut self.f.inner)?;
        self.f.pdf_arr().entries(array)?.finish()?;
        Ok(self)
    }

    /// Close the dict
    pub fn finish(&mut self) -> io::Result<()> {
        if self.first {
            self.f.space()?;
            write!(self.f.inner, "<< >>")?;
        } else {
            write!(self.f.inner, " >>")?;
        }
        self.f.needs_space = true;
        Ok(())
    }
}

/// API to serialize an array
#[must_use]
pub struct PdfArr<'a, 'b> {
    first: bool,
    f: &'b mut Formatter<'a>,
}

impl PdfArr<'_, '_> {
    fn check_first(&mut self) -> io::Result<()> {
        if self.first {
            self.f.space()?;
            write!(self.f.inner, "[")?;
            self.first = false;
            self.f.needs_space = false;
        }
        Ok(())
    }

    /// Write the next entry
    pub fn entry<S: Serialize>(&mut self, value: &S) -> io::Result<&mut Self> {
        self.check_first()?;
        value.write(self.f)?;
        Ok(self)
    }

    /// Write entries from an iterator
    pub fn entries<X: Serialize>(
        &mut self,
        i: impl IntoIterator<Item = X>,
    ) -> io::Result<&mut Self> {
        for entry in i.into_iter() {
            self.entry(&entry)?;
        }
        Ok(self)
    }

    /// Close the array
    pub fn finish(&mut self) -> io::Result<()> {
        if self.first {
            self.f.space()?;
            write!(self.f.inner, "[]")?;
        } else {
            write!(self.f.inner, "]")?;
        }
        self.f.needs_space = true;
        Ok(())
    }
}

/// An entry of the cross-reference table
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct XrefEntry {
    /// Byte offset of the object (or next free object number)
    pub offset: usize,
    /// Generation number
    pub gen: u16,
    /// Whether this entry is on the free list
    pub free: bool,
}

impl XrefEntry {
    /// The head of the free list, entry 0
    pub const FREE_HEAD: Self = Self {
        offset: 0,
        gen: 65535,
        free: true,
    };
}

/// Formatter for a PDF document
pub struct Formatter<'a> {
    pub(crate) inner: ByteCounter<&'a mut dyn Write>,
    needs_space: bool,
    pub(crate) xref: Vec<Option<XrefEntry>>,
}

impl<'a> Formatter<'a> {
    /// Create a new formatter
    pub fn new(w: &'a mut dyn Write) -> Self {
        Self {
            inner: ByteCounter::new(w),
            needs_space: false,
            xref: vec![Some(XrefEntry::FREE_HEAD)],
        }
    }

    /// Start writing a PDF dict
    pub fn pdf_dict(&mut self) -> PdfDict<'a, '_> {
        PdfDict {
            first: true,
            f: self,
        }
    }

    /// Start writing a PDF array
    pub fn pdf_arr(&mut self) -> PdfArr<'a, '_> {
        PdfArr {
            first: true,
            f: self,
        }
    }

    /// Write the `stream` keyword, the raw data and the `endstream` keyword
    ///
    /// Exactly one line feed separates the data from each keyword, so the
    /// `Length` of the stream is always `data.len()`.
    pub fn pdf_stream(&mut self, data: &[u8]) -> io::Result<()> {
        writeln!(self.inner)?;
        writeln!(self.inner, "stream")?;
        self.inner.write_all(data)?;
        writeln!(self.inner)?;
        write!(self.inner, "endstream")?;
        self.needs_space = false;
        Ok(())
    }

    /// Write the header of the file
    pub fn header(&mut self) -> io::Result<()> {
        self.inner.write_all(HEADER)
    }

    /// Write an object and record its offset in the xref table
    pub fn obj(&mut self, r#ref: ObjRef, obj: &dyn Serialize) -> io::Result<()> {
        let offset = self.inner.bytes_written();
        writeln!(self.inner, "{} {} obj", r#ref.id, r#ref.gen)?;
        self.needs_space = false;
        obj.write(self)?;
        if !self.inner.at_line_start() {
            writeln!(self.inner)?;
        }
        writeln!(self.inner, "endobj")?;
        self.needs_space = false;
        log::trace!("{} {} obj @ {}", r#ref.id, r#ref.gen, offset);

        while self.xref.len() <= (r#ref.id as usize) {
            self.xref.push(None);
        }
        self.xref[r#ref.id as usize] = Some(XrefEntry {
            offset,
            gen: r#ref.gen,
            free: false,
        });
        Ok(())
    }

    /// The number of entries in the xref table, including the free head
    pub fn xref_len(&self) -> usize {
        self.xref.len()
    }

    /// Write a classic xref section and return its offset
    pub fn xref(&mut self) -> io::Result<usize> {
        let offset = self.inner.bytes_written();
        writeln!(self.inner, "xref")?;

        let mut rest = &self.xref[..];
        let mut index = 0;
        while let Some(pos) = rest.iter().position(Option::is_some) {
            rest = &rest[pos..];
            index += pos;
            let mid = rest.iter().position(Option::is_none).unwrap_or(rest.len());
            let (a, b) = rest.split_at(mid);

            writeln!(self.inner, "{} {}", index, mid)?;
            for entry in a.iter().flatten() {
                let mark = if entry.free { 'f' } else { 'n' };
                // NOTE: the PDF spec requires the eol to be two bytes long (i.e. SP LF or CR LF)
                writeln!(self.inner, "{:010} {:05} {} ", entry.offset, entry.gen, mark)?;
            }

            rest = b;
            index += mid;
        }

        Ok(offset)
    }

    /// Write the trailer keyword, dict, `startxref` and the end-of-file marker
    pub fn trailer(&mut self, trailer: &dyn Serialize, startxref: usize) -> io::Result<()> {
        writeln!(self.inner, "trailer")?;
        self.needs_space = false;
        trailer.write(self)?;
        writeln!(self.inner)?;
        writeln!(self.inner, "startxref")?;
        writeln!(self.inner, "{}", startxref)?;
        writeln!(self.inner, "%%EOF")?;
        Ok(())
    }

    /// The number of bytes written so far
    pub fn bytes_written(&self) -> usize {
        self.inner.bytes_written()
    }

    fn space(&mut self) -> io::Result<()> {
        if self.needs_space {
            write!(self.inner, " ")?;
        }
        Ok(())
    }
}

/// Trait to serialize some PDF object
pub trait Serialize {
    /// Write the object to a stream
    fn write(&self, f: &mut Formatter) -> io::Result<()>;
}

impl<X: Serialize> Serialize for &'_ X {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        (*self).write(f)
    }
}

macro_rules! serialize_display_impl {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn write(&self, f: &mut Formatter) -> io::Result<()> {
                f.space()?;
                write!(f.inner, "{}", self)?;
                f.needs_space = true;
                Ok(())
            }
        }
    };
}

serialize_display_impl!(usize);
serialize_display_impl!(u32);
serialize_display_impl!(i32);

impl<X: Serialize> Serialize for [X] {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        f.pdf_arr().entries(self)?.finish()
    }
}

impl<X: Serialize> Serialize for Vec<X> {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        self.as_slice().write(f)
    }
}

impl Serialize for ObjRef {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        f.space()?;
        f.needs_space = write_ref(*self, &mut f.inner)?;
        Ok(())
    }
}

/// A borrowed PDF name (e.g. `/Info`)
#[derive(Debug, Copy, Clone)]
pub struct PdfName<'a>(pub &'a str);

impl Serialize for PdfName<'_> {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        f.space()?;
        f.needs_space = write_name(self.0, &mut f.inner)?;
        Ok(())
    }
}

/// Write a borrowed string as a PDF name
///
/// FIXME: names with delimiters or whitespace would need `#xx` escapes
pub fn write_name<W: Write>(name: &str, w: &mut W) -> io::Result<bool> {
    write!(w, "/{}", name)?;
    Ok(true)
}

/// Write a plain reference
pub fn write_ref<W: Write>(plain_ref: ObjRef, w: &mut W) -> io::Result<bool> {
    write!(w, "{} {} R", plain_ref.id, plain_ref.gen)?;
    Ok(true)
}
