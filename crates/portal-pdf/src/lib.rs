#![warn(missing_docs)]
//! # portal-pdf
//!
//! Single-page layouts for the portal: a titled [`Report`] with wrapped
//! paragraphs and a weekly [`Timetable`] grid.
//!
//! Both layouts fit everything onto one page. By default, text that does not
//! fit is clipped or dropped silently; [`Overflow::Error`] turns that into a
//! [`LayoutError`] instead.

use std::fmt;

use pdf_page::{
    common::{Color, PageSize},
    content::Contents,
    page::assemble_fragments,
    util::clip,
};
use thiserror::Error;

mod report;
mod timetable;
pub mod wrap;

pub use report::Report;
pub use timetable::{DayRow, Timetable, DEFAULT_ACADEMIC_YEAR};

/// The green of the title band
pub const BAND_COLOR: Color = Color::rgb(0.14, 0.53, 0.34);

/// What to do with text that does not fit
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Overflow {
    /// Clip or drop the text, and keep going
    Truncate,
    /// Fail with [`LayoutError::ContentOverflow`]
    Error,
}

impl Default for Overflow {
    fn default() -> Self {
        Overflow::Truncate
    }
}

/// A piece of content that did not fit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overflowed {
    /// A field was cut to its character budget
    Clipped {
        /// The name of the field
        field: String,
        /// The character budget
        limit: usize,
        /// The length of the original text
        len: usize,
    },
    /// Lines below the bottom margin were not drawn
    Dropped {
        /// The number of wrapped lines that were lost
        lines: usize,
    },
}

impl fmt::Display for Overflowed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clipped { field, limit, len } => {
                write!(f, "{} has {} characters, limit is {}", field, len, limit)
            }
            Self::Dropped { lines } => write!(f, "{} lines below the bottom margin", lines),
        }
    }
}

/// Failed to lay out a page
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// Some text does not fit and [`Overflow::Error`] was requested
    #[error("Content does not fit on the page: {0}")]
    ContentOverflow(Overflowed),
}

/// A laid out page that has not been assembled yet
#[derive(Debug, Clone)]
pub struct Sheet {
    /// The page size
    pub size: PageSize,
    /// The drawing operations
    pub contents: Contents,
    /// Everything that was clipped or dropped, in layout order
    pub overflow: Vec<Overflowed>,
}

impl Sheet {
    fn new(size: PageSize) -> Self {
        Self {
            size,
            contents: Contents::new(),
            overflow: Vec::new(),
        }
    }

    /// Cut `text` to `limit` characters and note it if something was lost
    fn clip<'a>(&mut self, field: &str, text: &'a str, limit: usize) -> &'a str {
        let clipped = clip(text, limit);
        if clipped.len() < text.len() {
            let len = text.chars().count();
            log::debug!("Clipped {} from {} to {} characters", field, len, limit);
            self.overflow.push(Overflowed::Clipped {
                field: field.to_owned(),
                limit,
                len,
            });
        }
        clipped
    }

    /// Assemble the PDF, ignoring overflow
    pub fn to_pdf(&self) -> Vec<u8> {
        assemble_fragments(self.contents.fragments(), self.size)
    }

    /// Assemble the PDF, applying the overflow policy
    pub fn finish(self, policy: Overflow) -> Result<Vec<u8>, LayoutError> {
        match (policy, self.overflow.first()) {
            (Overflow::Error, Some(first)) => Err(LayoutError::ContentOverflow(first.clone())),
            _ => Ok(self.to_pdf()),
        }
    }
}
