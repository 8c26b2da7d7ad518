use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use color_eyre::eyre::{self, eyre, WrapErr};
use log::info;

/// Where to write the output for `script`
///
/// Returns `None` for STDOUT.
pub fn out_path(out: Option<&Path>, script: &Path) -> eyre::Result<Option<PathBuf>> {
    match out {
        Some(out) if out == Path::new("-") => Ok(None),
        Some(out) if !out.is_dir() => Ok(Some(out.to_owned())),
        _ => {
            let folder = out
                .or_else(|| script.parent())
                .unwrap_or_else(|| Path::new("."));
            let stem = script
                .file_stem()
                .ok_or_else(|| eyre!("Script path `{}` has no file name", script.display()))?;
            let mut buf = folder.join(stem);
            buf.set_extension("pdf");
            Ok(Some(buf))
        }
    }
}

/// Write a finished PDF to a file or STDOUT
pub fn handle_out(out: Option<&Path>, script: &Path, pdf: &[u8]) -> eyre::Result<()> {
    match out_path(out, script)? {
        None => {
            let stdout = std::io::stdout();
            let mut stdolock = stdout.lock();
            stdolock.write_all(pdf)?;
            stdolock.flush()?;
            Ok(())
        }
        Some(out) => {
            let out_file = File::create(&out)
                .wrap_err_with(|| format!("Failed to create file: `{}`", out.display()))?;
            let mut out_buf = BufWriter::new(out_file);
            info!("Writing `{}` ...", out.display());
            out_buf.write_all(pdf)?;
            out_buf.flush()?;
            info!("Done!");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::out_path;

    #[test]
    fn stdout() {
        let path = out_path(Some(Path::new("-")), Path::new("notice.ron")).unwrap();
        assert_eq!(path, None);
    }

    #[test]
    fn next_to_script() {
        let path = out_path(None, Path::new("demos/notice.ron")).unwrap();
        assert_eq!(path, Some(PathBuf::from("demos/notice.pdf")));
        let path = out_path(None, Path::new("notice.ron")).unwrap();
        assert_eq!(path, Some(PathBuf::from("notice.pdf")));
    }

    #[test]
    fn explicit() {
        let path = out_path(Some(Path::new("out/cse.pdf")), Path::new("cse.ron")).unwrap();
        assert_eq!(path, Some(PathBuf::from("out/cse.pdf")));

        let dir = std::env::temp_dir();
        let path = out_path(Some(&dir), Path::new("demos/cse.ron")).unwrap();
        assert_eq!(path, Some(dir.join("cse.pdf")));
    }
}
