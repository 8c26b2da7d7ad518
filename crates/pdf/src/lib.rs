#![warn(missing_docs)]
//! # pdf-page
//!
//! Library to write a single-page PDF file from raw content-stream operators.
//!
//! ```
//! use pdf_page::{
//!     common::{Color, PageSize},
//!     content::Contents,
//!     page::assemble_fragments,
//! };
//!
//! // Collect drawing operations in render order
//! let mut contents = Contents::new();
//! contents
//!     .fill_color(Color::rgb(0.14, 0.53, 0.34))
//!     .rect(30, 770, 535, 46, true)
//!     .fill_color(Color::WHITE)
//!     .text(45, 796, "Hello (World)", 16);
//!
//! // Build the file
//! let pdf = assemble_fragments(contents.fragments(), PageSize::A4_PORTRAIT);
//! assert!(pdf.starts_with(b"%PDF-1.4\n"));
//! assert!(pdf.ends_with(b"%%EOF\n"));
//! ```
//!
//! Reference: <https://www.adobe.com/content/dam/acom/en/devnet/pdf/PDF32000_2008.pdf>

pub mod common;
pub mod content;
pub mod encoding;
pub mod low;
pub mod page;
pub mod read;
pub mod util;
pub mod write;
