//! Content stream operators
//!
//! Every function here returns one self-contained fragment, terminated by a
//! line feed. Graphics state (colors, line width) is only ever carried by the
//! emitted operators, so fragments that set it must be placed before the
//! geometry that uses it.

use crate::{common::Color, encoding::escape};

/// The resource name of the single font
pub const FONT_RESOURCE: &str = "F1";

/// The font size used by [`text_default`]
pub const DEFAULT_FONT_SIZE: u32 = 10;

/// Place `text` with its baseline origin at (`x`, `y`)
pub fn text(x: i32, y: i32, text: &str, size: u32) -> String {
    format!(
        "BT /{} {} Tf {} {} Td ({}) Tj ET\n",
        FONT_RESOURCE,
        size,
        x,
        y,
        escape(text)
    )
}

/// Place `text` at the default size
pub fn text_default(x: i32, y: i32, text: &str) -> String {
    self::text(x, y, text, DEFAULT_FONT_SIZE)
}

/// Stroke a straight line from (`x1`, `y1`) to (`x2`, `y2`)
pub fn line(x1: i32, y1: i32, x2: i32, y2: i32) -> String {
    format!("{} {} m {} {} l S\n", x1, y1, x2, y2)
}

/// Fill or stroke the rectangle with lower left corner (`x`, `y`)
pub fn rect(x: i32, y: i32, w: i32, h: i32, filled: bool) -> String {
    let op = if filled { 'f' } else { 'S' };
    format!("{} {} {} {} re {}\n", x, y, w, h, op)
}

/// Set the non-stroking color
pub fn fill_color(color: Color) -> String {
    format!("{} rg\n", color)
}

/// Set the stroking color
pub fn stroke_color(color: Color) -> String {
    format!("{} RG\n", color)
}

/// Set the line width
pub fn line_width(width: f32) -> String {
    format!("{} w\n", width)
}

/// An ordered list of fragments, in painting order
#[derive(Debug, Default, Clone)]
pub struct Contents {
    fragments: Vec<String>,
}

impl Contents {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw fragment
    pub fn push(&mut self, fragment: String) -> &mut Self {
        self.fragments.push(fragment);
        self
    }

    /// See [`text`]
    pub fn text(&mut self, x: i32, y: i32, text: &str, size: u32) -> &mut Self {
        self.push(self::text(x, y, text, size))
    }

    /// See [`line`]
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> &mut Self {
        self.push(self::line(x1, y1, x2, y2))
    }

    /// See [`rect`]
    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, filled: bool) -> &mut Self {
        self.push(self::rect(x, y, w, h, filled))
    }

    /// See [`fill_color`]
    pub fn fill_color(&mut self, color: Color) -> &mut Self {
        self.push(self::fill_color(color))
    }

    /// See [`stroke_color`]
    pub fn stroke_color(&mut self, color: Color) -> &mut Self {
        self.push(self::stroke_color(color))
    }

    /// See [`line_width`]
    pub fn line_width(&mut self, width: f32) -> &mut Self {
        self.push(self::line_width(width))
    }

    /// The fragments so far
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// The number of fragments
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether nothing was added yet
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Concatenate all fragments into the stream body
    pub fn to_stream(&self) -> String {
        self.fragments.concat()
    }
}

#[cfg(test)]
mod tests {
    use super::{fill_color, line, line_width, rect, stroke_color, text, text_default, Contents};
    use crate::common::Color;

    #[test]
    fn text_fragment() {
        assert_eq!(
            text(45, 796, "Unit Test", 16),
            "BT /F1 16 Tf 45 796 Td (Unit Test) Tj ET\n"
        );
        assert_eq!(
            text_default(1, 2, "a (test) with \\ chars"),
            "BT /F1 10 Tf 1 2 Td (a \\(test\\) with \\\\ chars) Tj ET\n"
        );
    }

    #[test]
    fn geometry_fragments() {
        assert_eq!(line(42, 106, 830, 106), "42 106 m 830 106 l S\n");
        assert_eq!(rect(30, 770, 535, 46, true), "30 770 535 46 re f\n");
        assert_eq!(rect(42, 150, 788, 308, false), "42 150 788 308 re S\n");
        assert_eq!(rect(0, 0, -5, -5, false), "0 0 -5 -5 re S\n");
    }

    #[test]
    fn state_fragments() {
        assert_eq!(fill_color(Color::rgb(0.9, 0.96, 0.92)), "0.9 0.96 0.92 rg\n");
        assert_eq!(stroke_color(Color::BLACK), "0 0 0 RG\n");
        assert_eq!(line_width(0.9), "0.9 w\n");
    }

    #[test]
    fn contents_keep_order() {
        let mut contents = Contents::new();
        assert!(contents.is_empty());
        contents
            .fill_color(Color::WHITE)
            .rect(1, 2, 3, 4, true)
            .line(0, 0, 1, 1);
        assert_eq!(contents.len(), 3);
        assert_eq!(
            contents.to_stream(),
            "1 1 1 rg\n1 2 3 4 re f\n0 0 m 1 1 l S\n"
        );
    }
}
