//! Table-to-directory pipeline.

use crate::emit::write_source;
use crate::foundation::error::OpgenResult;
use crate::render::render_op;
use crate::table::OpTable;
use std::path::PathBuf;

/// Options for [`generate`].
#[derive(Clone, Debug)]
pub struct GenerateOpts {
    /// Directory receiving the generated `.c` files.
    pub out_dir: PathBuf,
    /// Render every selected entry but write nothing.
    pub dry_run: bool,
    /// Restrict generation to these table names (`_` or `-` separated). Every entry carrying a
    /// listed name is selected, across families.
    pub only: Option<Vec<String>>,
}

impl Default for GenerateOpts {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            dry_run: false,
            only: None,
        }
    }
}

/// Summary of a [`generate`] run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerateStats {
    /// Paths written (or that would be written, for a dry run), in table order.
    pub files: Vec<PathBuf>,
    /// Total bytes of generated text.
    pub bytes: u64,
}

/// Render and write the selected entries of `table`, one at a time in table order.
///
/// Stops at the first failure; files written before it are left in place.
#[tracing::instrument(skip(table, opts), fields(out_dir = %opts.out_dir.display(), dry_run = opts.dry_run))]
pub fn generate(table: &OpTable, opts: &GenerateOpts) -> OpgenResult<GenerateStats> {
    let selected = table.select(opts.only.as_deref())?;
    let mut stats = GenerateStats::default();

    for spec in selected {
        let source = render_op(spec)?;
        let path = if opts.dry_run {
            opts.out_dir.join(&source.file_name)
        } else {
            write_source(&opts.out_dir, &source)?
        };
        stats.bytes += source.text.len() as u64;
        stats.files.push(path);
    }

    tracing::info!(files = stats.files.len(), bytes = stats.bytes, "generation finished");
    Ok(stats)
}

#[cfg(test)]
#[path = "../tests/unit/pipeline/generate.rs"]
mod tests;
