//! The operation table: loading, validation, and collision resolution.

pub(crate) mod ident;
pub(crate) mod model;
pub(crate) mod validate;

use crate::foundation::error::{OpgenError, OpgenResult};
use crate::table::model::{Family, OperationSpec, Shape};
use crate::table::validate::{resolve_collisions, validate_operations};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// The built-in table shipped with the generator.
const BUILTIN_TABLE_JSON: &str = include_str!("operations.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TableDef {
    operations: Vec<OperationSpec>,
}

/// Validated, read-only list of operations to generate.
///
/// Construction parses, validates and assigns collision prefixes; a table that exists is
/// always renderable.
#[derive(Debug, Clone)]
pub struct OpTable {
    operations: Vec<OperationSpec>,
}

impl OpTable {
    /// Load the table embedded in the binary.
    pub fn builtin() -> OpgenResult<Self> {
        Self::from_reader(BUILTIN_TABLE_JSON.as_bytes())
    }

    /// Parse and validate a table from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> OpgenResult<Self> {
        let def: TableDef = serde_json::from_reader(r)
            .map_err(|e| OpgenError::serde(format!("parse operation table JSON: {e}")))?;
        Self::from_operations(def.operations)
    }

    /// Parse and validate a table from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> OpgenResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            OpgenError::validation(format!("open operation table '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate an in-memory list of operations.
    #[tracing::instrument(skip(operations), fields(count = operations.len()))]
    pub fn from_operations(mut operations: Vec<OperationSpec>) -> OpgenResult<Self> {
        validate_operations(&operations)
            .map_err(|e| OpgenError::validation(format!("operation table is invalid:\n{e}")))?;
        resolve_collisions(&mut operations).map_err(|e| {
            OpgenError::validation(format!("operation table has name collisions:\n{e}"))
        })?;
        Ok(Self { operations })
    }

    /// All entries in table order.
    pub fn operations(&self) -> &[OperationSpec] {
        &self.operations
    }

    /// Entries of one shape, in table order.
    pub fn by_shape(&self, shape: Shape) -> impl Iterator<Item = &OperationSpec> {
        self.operations.iter().filter(move |op| op.shape() == shape)
    }

    /// Entries of one generator family, in table order.
    pub fn by_family(&self, family: Family) -> impl Iterator<Item = &OperationSpec> {
        self.operations.iter().filter(move |op| op.family() == family)
    }

    /// Look up an entry by table name or hyphenated name. Math entries win ties.
    pub fn get(&self, name: &str) -> Option<&OperationSpec> {
        let wanted = name.replace('-', "_");
        Family::ALL
            .into_iter()
            .find_map(|family| self.by_family(family).find(|op| op.name == wanted))
    }

    /// Entries whose table name is listed in `only` (`_` or `-` separated), in table order.
    ///
    /// `None` selects everything. A listed name matching no entry is a validation error.
    pub fn select(&self, only: Option<&[String]>) -> OpgenResult<Vec<&OperationSpec>> {
        let Some(only) = only else {
            return Ok(self.operations.iter().collect());
        };

        let wanted: Vec<String> = only.iter().map(|n| n.replace('-', "_")).collect();
        let unknown: Vec<&str> = only
            .iter()
            .zip(&wanted)
            .filter(|(_, w)| self.operations.iter().all(|op| &op.name != *w))
            .map(|(n, _)| n.as_str())
            .collect();
        if !unknown.is_empty() {
            return Err(OpgenError::validation(format!(
                "unknown operation name(s): {}",
                unknown.join(", ")
            )));
        }

        Ok(self
            .operations
            .iter()
            .filter(|op| wanted.contains(&op.name))
            .collect())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// `true` when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/table/table.rs"]
mod tests;
