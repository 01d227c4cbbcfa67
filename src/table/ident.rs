use crate::foundation::names::{c_identifier, capitalize, hyphenate};
use crate::table::model::{OperationSpec, Shape};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Every name a generated file is known by.
pub struct OpIdent {
    /// File name without extension (`color-dodge`, `svg-multiply`).
    pub file_stem: String,
    /// Value of `GEGL_OP_NAME`.
    pub c_name: String,
    /// Primary registered operation name (`svg:overlay`, `gegl:add`).
    pub name: String,
    /// Alternate registered name, when the shape registers one.
    pub compat_name: Option<String>,
    /// Human readable title.
    pub title: String,
}

impl OpIdent {
    /// Output file name (`<stem>.c`).
    pub fn file_name(&self) -> String {
        format!("{}.c", self.file_stem)
    }

    /// Registered names claimed in the global operation namespace.
    pub fn claims(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.compat_name.as_deref())
    }
}

impl OperationSpec {
    /// Derive file and registry names from the table name and the loader-assigned collision prefix.
    pub fn ident(&self) -> OpIdent {
        let plain = hyphenate(&self.name);
        let title = capitalize(&plain);

        if let Some(prefix) = self.collision_prefix.as_deref() {
            let file_stem = format!("{prefix}{plain}");
            return OpIdent {
                c_name: c_identifier(&file_stem),
                name: format!("gegl:{file_stem}"),
                compat_name: Some(format!("svg:{plain}")),
                file_stem,
                title,
            };
        }

        let (name, compat_name) = match self.shape() {
            Shape::Direct | Shape::TwoCondition => (format!("gegl:{plain}"), None),
            Shape::TwoOperand | Shape::OneCondition | Shape::AlphaPair | Shape::PorterDuff => (
                format!("svg:{plain}"),
                Some(format!("gegl:{plain}")),
            ),
        };
        OpIdent {
            c_name: c_identifier(&plain),
            file_stem: plain,
            name,
            compat_name,
            title,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/table/ident.rs"]
mod tests;
