use std::{io, path::Path, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use portal_pdf::{DayRow, Overflow, Report, Timetable, DEFAULT_ACADEMIC_YEAR};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::*;

#[derive(Parser, Debug)]
/// Render portal documents as single-page PDF files
pub struct Options {
    #[clap(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a report script (A4 portrait)
    Report(RenderOpts),
    /// Render a timetable script (A4 landscape)
    Timetable(RenderOpts),
    /// Print the cross-reference table of a PDF and check its offsets
    Inspect(InspectOpts),
}

#[derive(Args, Debug)]
pub struct RenderOpts {
    /// A RON document script
    pub script: PathBuf,
    /// Output file or folder (- is STDOUT)
    pub out: Option<PathBuf>,
    /// Fail instead of clipping text that does not fit
    #[clap(long)]
    pub strict: bool,
}

impl RenderOpts {
    /// The overflow policy selected by `--strict`
    pub fn overflow(&self) -> Overflow {
        if self.strict {
            Overflow::Error
        } else {
            Overflow::Truncate
        }
    }
}

#[derive(Args, Debug)]
pub struct InspectOpts {
    /// A PDF file
    pub file: PathBuf,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("IO Error")]
    Io(#[from] io::Error),
    #[error("Deserialize Error")]
    Ron(#[from] ron::error::Error),
}

/// Read and deserialize a RON script
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T, ScriptError> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

/// Deserialize a RON script
pub fn parse<T: DeserializeOwned>(text: &str) -> Result<T, ScriptError> {
    Ok(ron::from_str(text)?)
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ReportScript {
    /// The title in the band
    pub title: String,
    /// The line below the title
    #[serde(default)]
    pub subtitle: String,
    /// The body text
    #[serde(default)]
    pub paragraphs: Vec<String>,
    /// Small print at the bottom of the page
    #[serde(default)]
    pub footer: Option<String>,
}

impl From<ReportScript> for Report {
    fn from(script: ReportScript) -> Self {
        Report {
            title: script.title,
            subtitle: script.subtitle,
            paragraphs: script.paragraphs,
            footer: script.footer,
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct TimetableScript {
    /// Short branch name, e.g. `CSE`
    pub branch: String,
    /// Full program name
    pub program: String,
    /// Semester label
    pub semester: String,
    /// Defaults to the current academic year
    #[serde(default)]
    pub academic_year: Option<String>,
    /// `(day, [subjects])` in period order
    #[serde(default)]
    pub rows: Vec<(String, Vec<String>)>,
}

impl From<TimetableScript> for Timetable {
    fn from(script: TimetableScript) -> Self {
        Timetable {
            branch: script.branch,
            program: script.program,
            semester: script.semester,
            academic_year: script
                .academic_year
                .unwrap_or_else(|| String::from(DEFAULT_ACADEMIC_YEAR)),
            rows: script
                .rows
                .into_iter()
                .map(|(day, cells)| DayRow { day, cells })
                .collect(),
        }
    }
}
