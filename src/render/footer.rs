//! `gegl_op_class_init`: wires the routines into the class and registers the operation keys.

use crate::foundation::names::{c_string_escape, hyphenate};
use crate::table::ident::OpIdent;
use crate::table::model::{Family, OpKind, OperationSpec};
use std::fmt::{self, Write};

/// Human readable description; embeds every formula string the kernel uses.
pub(crate) fn description(spec: &OperationSpec) -> String {
    let name = hyphenate(&spec.name);
    match &spec.kind {
        OpKind::Direct { formula, .. } => format!(
            "Math operation {name}, performs the operation per pixel, using either the constant \
             provided in 'value' or the corresponding pixel from the buffer on aux as operands. \
             The result is the evaluation of the expression {formula}"
        ),
        OpKind::TwoOperand { formula } => {
            format!("SVG blend operation {name} (<code>d = {formula}</code>)")
        }
        OpKind::OneCondition {
            condition,
            then,
            otherwise,
        } => format!(
            "SVG blend operation {name} (<code>if {condition}: d = {then} otherwise: d = {otherwise}</code>)"
        ),
        OpKind::TwoCondition {
            first_condition,
            first,
            second_condition,
            second,
            otherwise,
        } => format!(
            "SVG blend operation {name} (<code>if {first_condition}: d = {first}; \
             if {second_condition}: d = {second}; otherwise: d = {otherwise}</code>)"
        ),
        OpKind::AlphaPair { formula, alpha } => {
            format!("SVG blend operation {name} (<code>d = {formula}; aD = {alpha}</code>)")
        }
        OpKind::PorterDuff { formula, alpha } => {
            format!("Porter Duff operation {name} (d = {formula}; aD = {alpha})")
        }
    }
}

pub(crate) fn write_footer(
    out: &mut impl Write,
    spec: &OperationSpec,
    ident: &OpIdent,
) -> fmt::Result {
    let family = spec.family();

    out.write_str(
        r#"
static void
gegl_op_class_init (GeglOpClass *klass)
{
  GeglOperationClass              *operation_class;
  GeglOperationPointComposerClass *point_composer_class;

  operation_class      = GEGL_OPERATION_CLASS (klass);
  point_composer_class = GEGL_OPERATION_POINT_COMPOSER_CLASS (klass);

  point_composer_class->process = process;
"#,
    )?;
    if family == Family::SvgBlend {
        writeln!(out, "  operation_class->process      = operation_process;")?;
    }
    writeln!(out, "  operation_class->prepare      = prepare;")?;
    writeln!(out)?;

    writeln!(out, "  gegl_operation_class_set_keys (operation_class,")?;
    write_key(out, "name", &ident.name)?;
    if let Some(compat) = &ident.compat_name {
        write_key(out, "compat-name", compat)?;
    }
    write_key(out, "title", &ident.title)?;
    write_key(out, "categories", family.category())?;
    if let Some(hash) = &spec.reference_hash {
        write_key(out, "reference-hash", hash)?;
    }
    writeln!(out, "    {:<16}  ,", "\"description\"")?;
    writeln!(
        out,
        "        _(\"{}\"),",
        c_string_escape(&description(spec))
    )?;
    writeln!(out, "        NULL);")?;
    out.write_str("}\n\n#endif\n")
}

fn write_key(out: &mut impl Write, key: &str, value: &str) -> fmt::Result {
    writeln!(
        out,
        "    {:<16}  , \"{}\",",
        format!("\"{key}\""),
        c_string_escape(value)
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/footer.rs"]
mod tests;
