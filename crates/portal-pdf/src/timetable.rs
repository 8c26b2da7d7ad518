use pdf_page::common::{Color, PageSize};

use crate::{LayoutError, Overflow, Overflowed, Sheet, BAND_COLOR};

/// Left edge of the grid
pub const GRID_X: i32 = 42;
/// Top edge of the grid
pub const GRID_TOP: i32 = 458;
/// Height of every grid row, including the header
pub const ROW_HEIGHT: i32 = 44;
/// Width of the day column, followed by the seven periods
pub static COLUMN_WIDTHS: [i32; 8] = [88, 100, 100, 100, 100, 100, 100, 100];
/// Header labels
pub static COLUMN_LABELS: [&str; 8] = ["Day", "P1", "P2", "P3", "Recess", "P4", "P5", "P6"];
/// Number of period cells per day
pub const PERIODS: usize = 7;
/// Cell text budget, regardless of the column width
pub const CELL_CHARS: usize = 17;

/// Written out with two decimals, unlike the other colours
const HEADER_TINT: &str = "0.90 0.96 0.92 rg\n";
const FOOTER_COLOR: Color = Color::gray(0.3);
const GRID_LINE_WIDTH: f32 = 0.9;

const LEGEND: [&str; 2] = [
    "Time Slots: P1 09:00-09:50 | P2 09:55-10:45 | P3 10:50-11:40",
    "Recess 11:40-12:20 | P4 12:20-01:10 | P5 01:15-02:05 | P6 02:10-03:00",
];
const FOOTER: &str = "Generated by University Unified Portal";

/// The academic year printed when none is given
pub const DEFAULT_ACADEMIC_YEAR: &str = "2025-26";

/// One day of the week and its periods
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayRow {
    /// Name of the day, e.g. `Monday`
    pub day: String,
    /// Up to seven subjects, in period order
    pub cells: Vec<String>,
}

impl DayRow {
    /// Create a new row
    pub fn new<S: Into<String>>(day: S, cells: impl IntoIterator<Item = S>) -> Self {
        Self {
            day: day.into(),
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }
}

/// A weekly timetable for one branch (A4 landscape)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timetable {
    /// Short branch name, e.g. `BCA`
    pub branch: String,
    /// Full program name
    pub program: String,
    /// Semester label
    pub semester: String,
    /// Academic year label
    pub academic_year: String,
    /// One row per day
    pub rows: Vec<DayRow>,
}

impl Default for Timetable {
    fn default() -> Self {
        Self {
            branch: String::new(),
            program: String::new(),
            semester: String::new(),
            academic_year: String::from(DEFAULT_ACADEMIC_YEAR),
            rows: Vec::new(),
        }
    }
}

/// The x coordinate of every inner column boundary
pub fn column_boundaries() -> impl Iterator<Item = i32> {
    COLUMN_WIDTHS[..COLUMN_WIDTHS.len() - 1]
        .iter()
        .scan(GRID_X, |x, width| {
            *x += width;
            Some(*x)
        })
}

/// The x coordinate where each column starts
fn column_starts() -> impl Iterator<Item = i32> {
    COLUMN_WIDTHS.iter().scan(GRID_X, |x, width| {
        let start = *x;
        *x += width;
        Some(start)
    })
}

impl Timetable {
    /// Lay out the page
    pub fn layout(&self) -> Sheet {
        let mut sheet = Sheet::new(PageSize::A4_LANDSCAPE);

        let table_w: i32 = COLUMN_WIDTHS.iter().sum();
        let table_h = ROW_HEIGHT * (self.rows.len() as i32 + 1);
        let y_bottom = GRID_TOP - table_h;

        let title = format!("{} - {} Timetable", self.program, self.branch);
        let subtitle = format!(
            "Semester: {} | Academic Year: {}",
            self.semester, self.academic_year
        );
        sheet
            .contents
            .fill_color(BAND_COLOR)
            .rect(34, 535, 774, 42, true)
            .fill_color(Color::WHITE)
            .text(50, 560, &title, 17)
            .text(50, 545, &subtitle, 10)
            .fill_color(Color::BLACK)
            .text(44, 514, LEGEND[0], 9)
            .text(44, 501, LEGEND[1], 9);

        // Header tint
        sheet
            .contents
            .push(String::from(HEADER_TINT))
            .rect(GRID_X, GRID_TOP - ROW_HEIGHT, table_w, ROW_HEIGHT, true)
            .fill_color(Color::BLACK)
            .line_width(GRID_LINE_WIDTH);

        // Border and row boundaries
        sheet
            .contents
            .rect(GRID_X, y_bottom, table_w, table_h, false);
        for i in 1..=self.rows.len() as i32 {
            let y = GRID_TOP - i * ROW_HEIGHT;
            sheet.contents.line(GRID_X, y, GRID_X + table_w, y);
        }

        // Column boundaries
        for x in column_boundaries() {
            sheet.contents.line(x, y_bottom, x, GRID_TOP);
        }

        for (x, label) in column_starts().zip(COLUMN_LABELS.iter()) {
            sheet.contents.text(x + 8, GRID_TOP - 27, label, 10);
        }

        for (row_idx, row) in self.rows.iter().enumerate() {
            let y_text = GRID_TOP - (row_idx as i32 + 2) * ROW_HEIGHT + 18;
            if row.cells.len() > PERIODS {
                log::debug!(
                    "Ignoring {} extra periods on {}",
                    row.cells.len() - PERIODS,
                    row.day
                );
                let field = format!("{} periods", row.day);
                sheet.overflow.push(Overflowed::Clipped {
                    field,
                    limit: PERIODS,
                    len: row.cells.len(),
                });
            }
            let items = std::iter::once(&row.day).chain(row.cells.iter().take(PERIODS));
            for ((x, label), item) in column_starts().zip(COLUMN_LABELS.iter()).zip(items) {
                let field = format!("{} {}", row.day, label);
                let clipped = sheet.clip(&field, item, CELL_CHARS);
                sheet.contents.text(x + 7, y_text, clipped, 9);
            }
        }

        sheet
            .contents
            .fill_color(FOOTER_COLOR)
            .text(44, 42, FOOTER, 9);

        sheet
    }

    /// Render the timetable, silently clipping cell text
    pub fn render(&self) -> Vec<u8> {
        self.layout().to_pdf()
    }

    /// Render the timetable with an explicit overflow policy
    pub fn render_checked(&self, policy: Overflow) -> Result<Vec<u8>, LayoutError> {
        self.layout().finish(policy)
    }
}
