//! Single-page document assembly
//!
//! The object graph is fixed:
//!
//! | id | object |
//! |----|--------|
//! | 1  | Catalog |
//! | 2  | Pages |
//! | 3  | Page |
//! | 4  | Font `/F1` (Helvetica) |
//! | 5  | Content stream |

use std::io::{self, Write};

use crate::{
    common::{BaseFont, ObjRef, PageSize},
    content::FONT_RESOURCE,
    encoding::latin1_encode_lossy,
    low,
    util::NextId,
    write::Formatter,
};

/// The number of objects in every file written by this module
pub const OBJECT_COUNT: usize = 5;

/// A page together with its content stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinglePage {
    /// The size of the media box
    pub size: PageSize,
    /// The encoded content stream
    pub contents: Vec<u8>,
}

impl SinglePage {
    /// Create a page from the concatenated content stream
    ///
    /// Characters outside of ISO-8859-1 are replaced by `?`.
    pub fn new(stream: &str, size: PageSize) -> Self {
        Self {
            size,
            contents: latin1_encode_lossy(stream),
        }
    }

    /// Write the whole PDF to the given writer
    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let mut fmt = Formatter::new(w);

        let mut id_gen = NextId::new(1);
        let catalog_ref = ObjRef::new(id_gen.next());
        let pages_ref = ObjRef::new(id_gen.next());
        let page_ref = ObjRef::new(id_gen.next());
        let font_ref = ObjRef::new(id_gen.next());
        let contents_ref = ObjRef::new(id_gen.next());

        let fonts = [(FONT_RESOURCE, font_ref)];

        // Start
        fmt.header()?;

        // **Catalog**
        let catalog = low::Catalog { pages: pages_ref };
        fmt.obj(catalog_ref, &catalog)?;

        // **Pages**
        let pages = low::Pages {
            kids: vec![page_ref],
        };
        fmt.obj(pages_ref, &pages)?;

        // **Page**
        let page = low::Page {
            parent: pages_ref,
            media_box: self.size.into(),
            resources: low::Resources { fonts: &fonts },
            contents: contents_ref,
        };
        fmt.obj(page_ref, &page)?;

        // **Font**
        let font = low::Type1Font {
            base_font: BaseFont::Helvetica,
        };
        fmt.obj(font_ref, &font)?;

        // **Contents**
        let contents = low::Stream {
            data: &self.contents,
        };
        fmt.obj(contents_ref, &contents)?;

        // **xref**
        let startxref = fmt.xref()?;

        let trailer = low::Trailer {
            size: fmt.xref_len(),
            root: catalog_ref,
        };
        fmt.trailer(&trailer, startxref)?;

        log::debug!(
            "Wrote {} objects, content stream {} bytes, file {} bytes",
            OBJECT_COUNT,
            self.contents.len(),
            fmt.bytes_written()
        );
        Ok(())
    }

    /// Write the PDF into a new buffer
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.contents.len() + 640);
        // `io::Write` for `Vec<u8>` does not return errors
        if let Err(e) = self.write(&mut out) {
            unreachable!("in-memory write failed: {}", e);
        }
        out
    }
}

/// Build a complete single-page PDF from a content stream and a page size
pub fn assemble(stream: &str, width: i32, height: i32) -> Vec<u8> {
    SinglePage::new(stream, PageSize::new(width, height)).to_bytes()
}

/// Build a complete single-page PDF from fragments, in painting order
pub fn assemble_fragments<S: AsRef<str>>(fragments: &[S], size: PageSize) -> Vec<u8> {
    let stream: String = fragments.iter().map(AsRef::as_ref).collect();
    SinglePage::new(&stream, size).to_bytes()
}

#[cfg(test)]
mod tests {
    use super::{assemble, assemble_fragments, SinglePage};
    use crate::{common::PageSize, content};

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack
            .windows(needle.len())
            .position(|substr| substr == needle)
    }

    #[test]
    fn byte_exact() {
        let pdf = assemble("0 0 m 1 1 l S\n", 595, 842);
        let mut expected = Vec::new();
        expected.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        let objects: [&[u8]; 5] = [
            b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n",
            b"2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n",
            b"3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 595 842] \
              /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>\nendobj\n",
            b"4 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n",
            b"5 0 obj\n<< /Length 14 >>\nstream\n0 0 m 1 1 l S\n\nendstream\nendobj\n",
        ];
        let mut offsets = Vec::new();
        for obj in objects.iter() {
            offsets.push(expected.len());
            expected.extend_from_slice(obj);
        }
        let startxref = expected.len();
        expected.extend_from_slice(b"xref\n0 6\n0000000000 65535 f \n");
        for offset in offsets {
            expected.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        expected.extend_from_slice(
            format!(
                "trailer\n<< /Size 6 /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                startxref
            )
            .as_bytes(),
        );
        assert_eq!(pdf, expected);
    }

    #[test]
    fn binary_header() {
        let pdf = assemble("", 10, 10);
        assert_eq!(&pdf[..15], b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        assert!(find(&pdf, b"<< /Length 0 >>\nstream\n\nendstream").is_some());
    }

    #[test]
    fn deterministic() {
        let fragments = [
            content::rect(1, 2, 3, 4, false),
            content::text(5, 6, "Same", 10),
        ];
        assert_eq!(
            assemble_fragments(&fragments, PageSize::A4_LANDSCAPE),
            assemble_fragments(&fragments, PageSize::A4_LANDSCAPE)
        );
    }

    #[test]
    fn length_counts_encoded_bytes() {
        let page = SinglePage::new("(€ü)", PageSize::A4_PORTRAIT);
        assert_eq!(page.contents, b"(?\xfc)");
        let pdf = page.to_bytes();
        assert!(find(&pdf, b"<< /Length 4 >>\nstream\n(?\xfc)\nendstream").is_some());
    }

    #[test]
    fn landscape_media_box() {
        let pdf = assemble_fragments::<&str>(&[], PageSize::A4_LANDSCAPE);
        assert!(find(&pdf, b"/MediaBox [0 0 842 595]").is_some());
    }
}
