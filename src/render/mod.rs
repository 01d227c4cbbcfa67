//! Rendering of one table entry into the text of a GEGL C source file.
//!
//! The file is assembled from shared pieces in a fixed order:
//! license header, property block and op defines, `prepare`, the kernel, and the
//! registration footer. Only the kernel body and the footer metadata vary with the shape.

mod footer;
mod header;
mod kernel;
mod prepare;
mod prologue;

use crate::foundation::error::OpgenResult;
use crate::table::ident::OpIdent;
use crate::table::model::OperationSpec;
use anyhow::Context;
use std::fmt::{self, Write};

/// Fully rendered output for one operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedSource {
    /// File name relative to the output directory (`overlay.c`).
    pub file_name: String,
    /// Names the generated operation registers under.
    pub ident: OpIdent,
    /// Complete C source text.
    pub text: String,
}

/// Render the C source for one table entry.
///
/// The same entry always renders to byte-identical text.
#[tracing::instrument(skip(spec), fields(name = %spec.name, shape = spec.shape().label()))]
pub fn render_op(spec: &OperationSpec) -> OpgenResult<GeneratedSource> {
    let ident = spec.ident();
    let mut text = String::with_capacity(8 * 1024);
    write_source(&mut text, spec, &ident)
        .with_context(|| format!("render '{}'", ident.file_name()))?;
    tracing::debug!(file = %ident.file_name(), bytes = text.len(), "rendered");
    Ok(GeneratedSource {
        file_name: ident.file_name(),
        ident,
        text,
    })
}

fn write_source(out: &mut impl Write, spec: &OperationSpec, ident: &OpIdent) -> fmt::Result {
    header::write_header(out, spec.family())?;
    prologue::write_prologue(out, spec, ident)?;
    prepare::write_prepare(out, spec.family())?;
    writeln!(out)?;
    kernel::write_process(out, &spec.kind)?;
    footer::write_footer(out, spec, ident)
}

#[cfg(test)]
#[path = "../../tests/unit/render/render.rs"]
mod tests;
