use anyhow::{Context, Result};
use std::fs;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;

/// Print a rendered report to stdout and, when `file` is set, overwrite it
/// with the same text.
pub fn emit(text: &str, file: Option<&Path>) -> Result<()> {
    let mut out = BufWriter::new(stdout().lock());
    write_report(&mut out, text, file)?;
    out.flush()?;
    Ok(())
}

pub fn write_report<W: Write>(out: &mut W, text: &str, file: Option<&Path>) -> Result<()> {
    writeln!(out, "{text}")?;
    if let Some(path) = file {
        fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
        tracing::info!(path = %path.display(), "report written");
    }
    Ok(())
}
