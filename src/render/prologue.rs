use crate::table::ident::OpIdent;
use crate::table::model::{Family, OpKind, OperationSpec};
use std::fmt::{self, Write};

const MATH_INCLUDES: &str = r#"
#include <math.h>
#ifdef _MSC_VER
#define powf(a,b) ((gfloat)pow(a,b))
#endif
"#;

/// Includes, the property block, and the op defines up to `#include "gegl-op.h"`.
pub(crate) fn write_prologue(
    out: &mut impl Write,
    spec: &OperationSpec,
    ident: &OpIdent,
) -> fmt::Result {
    out.write_str("\n#include \"config.h\"\n#include <glib/gi18n-lib.h>\n\n\n")?;
    out.write_str("#ifdef GEGL_PROPERTIES\n\n")?;
    write_properties(out, spec)?;
    out.write_str("\n#else\n\n")?;

    writeln!(out, "#define GEGL_OP_POINT_COMPOSER")?;
    writeln!(out, "#define GEGL_OP_NAME         {}", ident.c_name)?;
    writeln!(out, "#define GEGL_OP_C_FILE       \"{}\"", ident.file_name())?;
    writeln!(out)?;
    writeln!(out, "#include \"gegl-op.h\"")?;

    match spec.kind {
        OpKind::Direct { .. } => out.write_str(MATH_INCLUDES)?,
        // sqrt () in the soft-light style formulas
        OpKind::TwoCondition { .. } => writeln!(out, "#include <math.h>")?,
        _ => {}
    }
    writeln!(out)
}

fn write_properties(out: &mut impl Write, spec: &OperationSpec) -> fmt::Result {
    match (&spec.kind, spec.family()) {
        (OpKind::Direct { default_value, .. }, _) => {
            writeln!(out, "property_double (value, _(\"Value\"), {default_value:?})")?;
            writeln!(
                out,
                "   description(_(\"global value used if aux doesn't contain data\"))"
            )?;
            writeln!(out, "   ui_range (-1.0, 1.0)")
        }
        (_, Family::SvgBlend | Family::PorterDuff) => {
            writeln!(out, "property_boolean (srgb, _(\"sRGB\"), FALSE)")?;
            writeln!(out, "    description (_(\"Use sRGB gamma instead of linear\"))")
        }
        (_, Family::Math) => Ok(()),
    }
}
