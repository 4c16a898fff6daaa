use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use time::format_description::well_known::Rfc3339;
use tracing::warn;

pub fn ensure_dir(p: &Path) -> Result<()> {
    std::fs::create_dir_all(p).with_context(|| format!("create_dir_all {}", p.display()))
}

pub fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}

/// Load a file's full contents. A failing read yields None so the batch can
/// go on without it.
pub fn read_text(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(err) => {
            warn!("error while accessing file {}: {err}", path.display());
            None
        }
    }
}

/// All-or-nothing write: stage into a temp file in the target directory,
/// then rename over the final name. The output file either fully exists or
/// does not exist at all.
pub fn write_atomic(out_dir: &Path, file_name: &str, text: &str) -> Result<()> {
    let mut tmp = tempfile::NamedTempFile::new_in(out_dir)
        .with_context(|| format!("create temp file in {}", out_dir.display()))?;
    tmp.write_all(text.as_bytes())
        .with_context(|| format!("write {file_name}"))?;
    tmp.persist(out_dir.join(file_name))
        .with_context(|| format!("persist {file_name}"))?;
    Ok(())
}
