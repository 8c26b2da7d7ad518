//! # Portal document tool
use color_eyre::eyre::{self, WrapErr};
use portal_pdf::{Report, Timetable};

use portal_docs::cli::{
    self, inspect,
    opt::{self, Command, Options, RenderOpts, ReportScript, TimetableScript},
    out::handle_out,
};

fn report(opt: RenderOpts) -> eyre::Result<()> {
    let script: ReportScript = opt::load(&opt.script)
        .wrap_err_with(|| format!("Failed to load report script `{}`", opt.script.display()))?;
    let pdf = Report::from(script).render_checked(opt.overflow())?;
    handle_out(opt.out.as_deref(), &opt.script, &pdf)
}

fn timetable(opt: RenderOpts) -> eyre::Result<()> {
    let script: TimetableScript = opt::load(&opt.script).wrap_err_with(|| {
        format!(
            "Failed to load timetable script `{}`",
            opt.script.display()
        )
    })?;
    let pdf = Timetable::from(script).render_checked(opt.overflow())?;
    handle_out(opt.out.as_deref(), &opt.script, &pdf)
}

fn main() -> color_eyre::Result<()> {
    let opt: Options = cli::init()?;
    match opt.cmd {
        Command::Report(opt) => report(opt),
        Command::Timetable(opt) => timetable(opt),
        Command::Inspect(opt) => inspect::run(opt),
    }
}
