//! Common structs and enums

use std::{fmt, io};

use crate::write::{Formatter, PdfName, Serialize};

/// A reference to an object
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ObjRef {
    /// The index within the file
    pub id: u64,
    /// The generation number
    pub gen: u16,
}

impl ObjRef {
    /// A reference with generation 0
    pub const fn new(id: u64) -> Self {
        Self { id, gen: 0 }
    }
}

/// The base font of the single font resource
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BaseFont {
    /// `Helvetica`, the built-in sans-serif face
    Helvetica,
}

impl BaseFont {
    /// The PostScript name of the font
    pub fn name(self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
        }
    }
}

impl Serialize for BaseFont {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        PdfName(self.name()).write(f)
    }
}

/// A simple two-dimensional coordinate
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Point<P> {
    /// Horizontal offset
    pub x: P,
    /// Vertical offset
    pub y: P,
}

/// The size of the page, in points (1/72 inch)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PageSize {
    /// The width
    pub width: i32,
    /// The height
    pub height: i32,
}

impl PageSize {
    /// A4 paper, portrait
    pub const A4_PORTRAIT: Self = Self {
        width: 595,
        height: 842,
    };

    /// A4 paper, landscape
    pub const A4_LANDSCAPE: Self = Self::A4_PORTRAIT.rotate_90();

    /// Create a new page size
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Rotate the page 90 degrees
    pub const fn rotate_90(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

impl From<PageSize> for Rectangle<i32> {
    fn from(value: PageSize) -> Self {
        Rectangle::media_box(value.width, value.height)
    }
}

/// A primitive rectangle
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rectangle<P> {
    /// lower left
    pub ll: Point<P>,
    /// upper right
    pub ur: Point<P>,
}

impl Rectangle<i32> {
    /// A media box anchored at the origin
    pub fn media_box(width: i32, height: i32) -> Self {
        Rectangle {
            ll: Point { x: 0, y: 0 },
            ur: Point {
                x: width,
                y: height,
            },
        }
    }
}

impl<P: Serialize> Serialize for Rectangle<P> {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        f.pdf_arr()
            .entry(&self.ll.x)?
            .entry(&self.ll.y)?
            .entry(&self.ur.x)?
            .entry(&self.ur.y)?
            .finish()
    }
}

/// An RGB color with components in `0.0..=1.0`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
}

impl Color {
    /// Black
    pub const BLACK: Self = Self::gray(0.0);
    /// White
    pub const WHITE: Self = Self::gray(1.0);

    /// Create a color from its components
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// A neutral gray
    pub const fn gray(level: f32) -> Self {
        Self::rgb(level, level, level)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.r, self.g, self.b)
    }
}
