use crate::foundation::error::OpgenResult;
use crate::render::GeneratedSource;
use anyhow::Context as _;
use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

/// Create `dir` (and parents) if missing.
pub fn ensure_out_dir(dir: &Path) -> OpgenResult<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
    Ok(())
}

/// Write one generated file into `out_dir`, replacing any previous content.
///
/// Returns the path written.
pub fn write_source(out_dir: &Path, source: &GeneratedSource) -> OpgenResult<PathBuf> {
    let path = out_dir.join(&source.file_name);
    tracing::info!("generating {}", source.file_name);

    ensure_out_dir(out_dir)?;
    let file =
        File::create(&path).with_context(|| format!("create '{}'", path.display()))?;
    let mut w = BufWriter::new(file);
    w.write_all(source.text.as_bytes())
        .and_then(|()| w.flush())
        .with_context(|| format!("write '{}'", path.display()))?;
    Ok(path)
}

#[cfg(test)]
#[path = "../tests/unit/pipeline/emit.rs"]
mod tests;
