use crate::table::model::{Family, OpKind, OperationSpec};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Length of the opaque reference hashes (an MD5 hex digest).
pub(crate) const REFERENCE_HASH_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TablePathElem {
    Field(&'static str),
    Index(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct TableError {
    pub(crate) path: Vec<TablePathElem>,
    pub(crate) message: String,
}

impl TableError {
    fn at(path: &[TablePathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[TablePathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            TablePathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            TablePathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

#[derive(Debug, Clone)]
pub(crate) struct TableErrors {
    pub(crate) errors: Vec<TableError>,
}

impl fmt::Display for TableErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for TableErrors {}

fn entry_path(index: usize) -> Vec<TablePathElem> {
    vec![TablePathElem::Field("operations"), TablePathElem::Index(index)]
}

fn field_path(index: usize, field: &'static str) -> Vec<TablePathElem> {
    let mut path = entry_path(index);
    path.push(TablePathElem::Field(field));
    path
}

/// Check every entry in isolation, then the uniqueness rules across the table.
pub(crate) fn validate_operations(ops: &[OperationSpec]) -> Result<(), TableErrors> {
    let mut errors = Vec::new();

    for (i, op) in ops.iter().enumerate() {
        validate_entry(i, op, &mut errors);
    }

    // Duplicates inside one family are authoring errors; cross-family clashes are resolved later.
    let mut seen = HashMap::<(Family, &str), usize>::new();
    for (i, op) in ops.iter().enumerate() {
        if let Some(first) = seen.insert((op.family(), op.name.as_str()), i) {
            errors.push(TableError::at(
                &field_path(i, "name"),
                format!(
                    "duplicate name '{}' (first defined at $.operations[{first}])",
                    op.name
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(TableErrors { errors })
    }
}

fn validate_entry(i: usize, op: &OperationSpec, errors: &mut Vec<TableError>) {
    if op.name.is_empty() {
        errors.push(TableError::at(&field_path(i, "name"), "must not be empty"));
    } else if !op
        .name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        errors.push(TableError::at(
            &field_path(i, "name"),
            format!("'{}' must only contain [a-z0-9_]", op.name),
        ));
    } else if op.name.starts_with('_') || op.name.ends_with('_') {
        errors.push(TableError::at(
            &field_path(i, "name"),
            format!("'{}' must not start or end with '_'", op.name),
        ));
    }

    for (field, text) in op.kind.formula_fields() {
        if text.trim().is_empty() {
            errors.push(TableError::at(&field_path(i, field), "must not be empty"));
        }
    }

    if let OpKind::Direct { default_value, .. } = &op.kind
        && !default_value.is_finite()
    {
        errors.push(TableError::at(
            &field_path(i, "default_value"),
            "must be a finite number",
        ));
    }

    if let Some(hash) = op.reference_hash.as_deref() {
        let well_formed =
            hash.len() == REFERENCE_HASH_LEN && hash.chars().all(|c| c.is_ascii_hexdigit());
        if !well_formed {
            errors.push(TableError::at(
                &field_path(i, "reference_hash"),
                format!("'{hash}' must be {REFERENCE_HASH_LEN} hex characters"),
            ));
        }
    }
}

/// Assign collision prefixes so that every registered name and file name is unique.
///
/// Families claim names in precedence order. An entry that hits a name owned by an earlier
/// family is retried with its family's prefix; anything still clashing is an error.
pub(crate) fn resolve_collisions(ops: &mut [OperationSpec]) -> Result<(), TableErrors> {
    let mut errors = Vec::new();
    let mut owners = HashMap::<String, (Family, usize)>::new();
    let mut files = HashSet::<String>::new();

    for family in Family::ALL {
        for i in 0..ops.len() {
            if ops[i].family() != family {
                continue;
            }

            let ident = ops[i].ident();
            let clash = ident.claims().find_map(|n| owners.get(n).copied());
            let ident = match (clash, family.collision_prefix()) {
                (None, _) => ident,
                (Some((owner, _)), Some(prefix)) if owner < family => {
                    tracing::debug!(
                        name = %ops[i].name,
                        prefix,
                        "name already claimed by an earlier family; disambiguating"
                    );
                    ops[i].collision_prefix = Some(prefix.to_string());
                    let prefixed = ops[i].ident();
                    if let Some((_, other)) = prefixed.claims().find_map(|n| owners.get(n).copied())
                    {
                        errors.push(TableError::at(
                            &field_path(i, "name"),
                            format!(
                                "'{}' collides with $.operations[{other}] even as '{}'",
                                ops[i].name, prefixed.name
                            ),
                        ));
                        continue;
                    }
                    prefixed
                }
                (Some((_, other)), _) => {
                    errors.push(TableError::at(
                        &field_path(i, "name"),
                        format!(
                            "registered name of '{}' collides with $.operations[{other}]",
                            ops[i].name
                        ),
                    ));
                    continue;
                }
            };

            if !files.insert(ident.file_name()) {
                errors.push(TableError::at(
                    &field_path(i, "name"),
                    format!("output file '{}' is produced twice", ident.file_name()),
                ));
                continue;
            }
            for claim in ident.claims() {
                owners.insert(claim.to_string(), (family, i));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(TableErrors { errors })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/table/validate.rs"]
mod tests;
