//! Low-Level API
//!
//! This module contains the objects of a single-page PDF, already split up
//! into objects that refer to each other through [`ObjRef`]s.

use std::io;

use crate::{
    common::{BaseFont, ObjRef, Rectangle},
    write::{Formatter, PdfName, Serialize},
};

/// The document catalog, root of the object tree
#[derive(Debug, Clone)]
pub struct Catalog {
    /// The page tree
    pub pages: ObjRef,
}

impl Serialize for Catalog {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        f.pdf_dict()
            .field("Type", &PdfName("Catalog"))?
            .field("Pages", &self.pages)?
            .finish()
    }
}

/// The page tree node
#[derive(Debug, Clone)]
pub struct Pages {
    /// The pages in this tree
    pub kids: Vec<ObjRef>,
}

impl Serialize for Pages {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        f.pdf_dict()
            .field("Type", &PdfName("Pages"))?
            .arr_field("Kids", &self.kids)?
            .field("Count", &self.kids.len())?
            .finish()
    }
}

/// The font entries of a resource dictionary
#[derive(Debug, Clone)]
pub struct Resources<'a> {
    /// Resource name and font object
    pub fonts: &'a [(&'a str, ObjRef)],
}

struct FontDict<'a>(&'a [(&'a str, ObjRef)]);

impl Serialize for FontDict<'_> {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        let mut dict = f.pdf_dict();
        for (key, font) in self.0 {
            dict.field(key, font)?;
        }
        dict.finish()
    }
}

impl Serialize for Resources<'_> {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        f.pdf_dict()
            .field("Font", &FontDict(self.fonts))?
            .finish()
    }
}

/// A page object
#[derive(Debug, Clone)]
pub struct Page<'a> {
    /// Reference to the parent
    pub parent: ObjRef,
    /// (required, inheritable) describes the bound of the physical page
    /// in default user units
    pub media_box: Rectangle<i32>,
    /// The resources of this page
    pub resources: Resources<'a>,
    /// The content stream of the page
    pub contents: ObjRef,
}

impl Serialize for Page<'_> {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        f.pdf_dict()
            .field("Type", &PdfName("Page"))?
            .field("Parent", &self.parent)?
            .field("MediaBox", &self.media_box)?
            .field("Resources", &self.resources)?
            .field("Contents", &self.contents)?
            .finish()
    }
}

/// One of the standard 14 fonts, which need no embedded program
#[derive(Debug, Clone)]
pub struct Type1Font {
    /// The PostScript name
    pub base_font: BaseFont,
}

impl Serialize for Type1Font {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        f.pdf_dict()
            .field("Type", &PdfName("Font"))?
            .field("Subtype", &PdfName("Type1"))?
            .field("BaseFont", &self.base_font)?
            .finish()
    }
}

/// An unfiltered stream
#[derive(Debug, Clone)]
pub struct Stream<'a> {
    /// The raw bytes
    pub data: &'a [u8],
}

impl Serialize for Stream<'_> {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        f.pdf_dict()
            .field("Length", &self.data.len())?
            .finish()?;
        f.pdf_stream(self.data)
    }
}

/// The trailer dict
#[derive(Debug, Clone)]
pub struct Trailer {
    /// The number of xref entries, including the free head
    pub size: usize,
    /// The document catalog
    pub root: ObjRef,
}

impl Serialize for Trailer {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        f.pdf_dict()
            .field("Size", &self.size)?
            .field("Root", &self.root)?
            .finish()
    }
}
