use color_eyre::eyre::{self, WrapErr};
use log::info;
use pdf_page::read::{content_stream, Xref};
use prettytable::{cell, format, row, Cell, Row, Table};

use super::opt::InspectOpts;

/// Print the xref table of a PDF file and check it
pub fn run(opt: InspectOpts) -> eyre::Result<()> {
    let buffer = std::fs::read(&opt.file)
        .wrap_err_with(|| format!("Failed to open file: `{}`", opt.file.display()))?;
    let xref = Xref::parse(&buffer).wrap_err("Failed to read the xref table")?;

    println!(
        "startxref: {}\n  size: {}\n  root: {} 0 R",
        xref.startxref, xref.size, xref.root
    );

    let mut xref_table = Table::new();
    xref_table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    xref_table.set_titles(row!["obj", "offset", "gen", "state"]);

    for (id, entry) in xref.entries.iter().enumerate() {
        xref_table.add_row(Row::new(vec![
            Cell::new(&format!("{:3}", id)),
            Cell::new(&format!("{:010}", entry.offset)),
            Cell::new(&format!("{:5}", entry.gen)),
            Cell::new(if entry.free { "free" } else { "in use" }),
        ]));
    }
    xref_table.printstd();

    xref.verify(&buffer).wrap_err("Inconsistent file structure")?;
    let stream = content_stream(&buffer).wrap_err("Failed to read the content stream")?;
    info!(
        "{} objects, content stream of {} bytes, all offsets match",
        xref.objects().count(),
        stream.len()
    );
    Ok(())
}
