use pdf_page::common::{Color, PageSize};

use crate::{wrap::wrap, LayoutError, Overflow, Overflowed, Sheet, BAND_COLOR};

const TITLE_CHARS: usize = 68;
const SUBTITLE_CHARS: usize = 90;
const FOOTER_CHARS: usize = 96;
const WRAP_CHARS: usize = 90;

const BODY_X: i32 = 44;
const BODY_TOP: i32 = 746;
const BOTTOM_MARGIN: i32 = 84;
const LINE_STEP: i32 = 15;
const PARAGRAPH_GAP: i32 = 8;

const FOOTER_COLOR: Color = Color::gray(0.33);

/// A titled document with wrapped paragraphs (A4 portrait)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Title in the band, up to 68 characters
    pub title: String,
    /// Line below the title, up to 90 characters
    pub subtitle: String,
    /// Body text, each wrapped at 90 characters
    pub paragraphs: Vec<String>,
    /// Small print at the bottom, up to 96 characters
    pub footer: Option<String>,
}

impl Report {
    /// The maximum number of title characters that are drawn
    pub const TITLE_CHARS: usize = TITLE_CHARS;

    /// Lay out the page
    pub fn layout(&self) -> Sheet {
        let mut sheet = Sheet::new(PageSize::A4_PORTRAIT);

        let title = sheet.clip("title", &self.title, TITLE_CHARS);
        let subtitle = sheet.clip("subtitle", &self.subtitle, SUBTITLE_CHARS);
        sheet
            .contents
            .fill_color(BAND_COLOR)
            .rect(30, 770, 535, 46, true)
            .fill_color(Color::WHITE)
            .text(45, 796, title, 16)
            .text(45, 780, subtitle, 10)
            .fill_color(Color::BLACK);

        let mut y = BODY_TOP;
        let mut dropped = 0;
        for para in &self.paragraphs {
            let mut lines = wrap(para, WRAP_CHARS);
            if lines.is_empty() {
                lines.push(String::new());
            }
            if y < BOTTOM_MARGIN {
                dropped += lines.len();
                continue;
            }
            for (index, line) in lines.iter().enumerate() {
                if y < BOTTOM_MARGIN {
                    dropped += lines.len() - index;
                    break;
                }
                sheet.contents.text(BODY_X, y, line, 11);
                y -= LINE_STEP;
            }
            if y >= BOTTOM_MARGIN {
                y -= PARAGRAPH_GAP;
            }
        }
        if dropped > 0 {
            log::debug!("Dropped {} lines below the bottom margin", dropped);
            sheet.overflow.push(Overflowed::Dropped { lines: dropped });
        }

        if let Some(footer) = self.footer.as_deref().filter(|f| !f.is_empty()) {
            let footer = sheet.clip("footer", footer, FOOTER_CHARS);
            sheet
                .contents
                .fill_color(FOOTER_COLOR)
                .text(BODY_X, 50, footer, 9);
        }

        sheet
    }

    /// Render the report, silently clipping what does not fit
    pub fn render(&self) -> Vec<u8> {
        self.layout().to_pdf()
    }

    /// Render the report with an explicit overflow policy
    pub fn render_checked(&self, policy: Overflow) -> Result<Vec<u8>, LayoutError> {
        self.layout().finish(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::Report;
    use crate::{LayoutError, Overflow, Overflowed};

    fn report(paragraphs: Vec<String>) -> Report {
        Report {
            title: String::from("Unit Test"),
            subtitle: String::from("Notes | Demo"),
            paragraphs,
            footer: None,
        }
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn title_band() {
        let sheet = report(vec![String::from("A short paragraph.")]).layout();
        let stream = sheet.contents.to_stream();
        assert!(stream.starts_with("0.14 0.53 0.34 rg\n30 770 535 46 re f\n1 1 1 rg\n"));
        assert!(stream.contains("BT /F1 16 Tf 45 796 Td (Unit Test) Tj ET\n"));
        assert!(stream.contains("BT /F1 10 Tf 45 780 Td (Notes | Demo) Tj ET\n"));
        assert!(stream.contains("0 0 0 rg\nBT /F1 11 Tf 44 746 Td (A short paragraph.) Tj ET\n"));
        assert!(sheet.overflow.is_empty());
    }

    #[test]
    fn title_budget() {
        let mut exact = report(vec![]);
        exact.title = "x".repeat(Report::TITLE_CHARS);
        let stream = exact.layout().contents.to_stream();
        assert!(stream.contains(&format!("({})", exact.title)));

        let mut long = report(vec![]);
        long.title = "x".repeat(Report::TITLE_CHARS + 1);
        let sheet = long.layout();
        let stream = sheet.contents.to_stream();
        assert!(stream.contains(&format!("({})", exact.title)));
        assert!(!stream.contains(&long.title));
        assert_eq!(
            sheet.overflow,
            vec![Overflowed::Clipped {
                field: String::from("title"),
                limit: 68,
                len: 69
            }]
        );
    }

    #[test]
    fn paragraph_spacing() {
        let lines = vec![String::from("One."), String::new(), String::from("Two.")];
        let stream = report(lines).layout().contents.to_stream();
        assert!(stream.contains("44 746 Td (One.)"));
        assert!(stream.contains("44 723 Td () Tj"));
        assert!(stream.contains("44 700 Td (Two.)"));
    }

    #[test]
    fn stops_at_bottom_margin() {
        // 90 characters per line, two lines per paragraph
        let para = format!("{} {}", "a".repeat(89), "b".repeat(89));
        let sheet = report(vec![para; 40]).layout();
        let stream = sheet.contents.to_stream();
        // Paragraphs start 38 points apart, the 18th starts at 100
        assert_eq!(count(&stream, "Tf 44 "), 36);
        assert!(stream.contains("Tf 44 85 Td"));
        assert!(!stream.contains("Tf 44 70 Td"));
        assert_eq!(sheet.overflow, vec![Overflowed::Dropped { lines: 44 }]);
    }

    #[test]
    fn footer() {
        let mut with_footer = report(vec![]);
        with_footer.footer = Some("f".repeat(100));
        let sheet = with_footer.layout();
        let stream = sheet.contents.to_stream();
        assert!(stream.ends_with(&format!(
            "0.33 0.33 0.33 rg\nBT /F1 9 Tf 44 50 Td ({}) Tj ET\n",
            "f".repeat(96)
        )));

        let mut empty_footer = report(vec![]);
        empty_footer.footer = Some(String::new());
        assert!(!empty_footer.layout().contents.to_stream().contains("0.33"));
    }

    #[test]
    fn strict_policy() {
        let mut long = report(vec![]);
        long.subtitle = "s".repeat(91);
        assert!(long.render_checked(Overflow::Truncate).is_ok());
        assert_eq!(
            long.render_checked(Overflow::Error),
            Err(LayoutError::ContentOverflow(Overflowed::Clipped {
                field: String::from("subtitle"),
                limit: 90,
                len: 91
            }))
        );
        assert_eq!(long.render(), long.render_checked(Overflow::Truncate).unwrap());
    }
}
