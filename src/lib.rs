//! gegl-opgen generates the C sources of GEGL's table-driven point-composer operations.
//!
//! Each row of an operation table (math ops, SVG 1.2 blend modes, Porter-Duff operators)
//! becomes one self-contained `.c` file. The pipeline is:
//!
//! - Load and validate an [`OpTable`] (the built-in one, or JSON from disk)
//! - Render each [`OperationSpec`] with [`render_op`]
//! - Write the result with [`write_source`], or run the whole table through [`generate`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod emit;
pub(crate) mod generate;
/// C source rendering.
pub mod render;
/// The operation table model and loader.
pub mod table;

pub use crate::emit::write_source;
pub use crate::foundation::error::{OpgenError, OpgenResult};
pub use crate::generate::{GenerateOpts, GenerateStats, generate};
pub use crate::render::{GeneratedSource, render_op};
pub use crate::table::OpTable;
pub use crate::table::ident::OpIdent;
pub use crate::table::model::{Family, OpKind, OperationSpec, Shape, UNION_ALPHA};
