//! The `prepare` routine: map whatever babl model arrives on `input` to a float working format.

use crate::table::model::Family;
use std::fmt::{self, Write};

/// One `if` arm of the negotiation: accepted models and the resulting format(s).
struct FormatRow {
    models: &'static [&'static str],
    linear: &'static str,
    srgb: Option<&'static str>,
}

struct Negotiation {
    srgb_toggle: bool,
    rows: &'static [FormatRow],
    fallback: FormatRow,
}

const GRAY: &[&str] = &["Y", "Y'", "Y~"];
const GRAY_ALPHA: &[&str] = &["YA", "Y'A", "Y~A", "YaA", "Y'aA"];
const RGB: &[&str] = &["RGB", "R'G'B'", "R~G~B~"];
const RGB_ALPHA: &[&str] = &[
    "RGBA",
    "RGB",
    "R'G'B'A",
    "R'G'B'",
    "R~G~B~A",
    "R~G~B~",
    "RaGaBaA",
    "R'aG'aB'aA",
];

/// Math ops work on straight (non-premultiplied) linear floats.
static MATH: Negotiation = Negotiation {
    srgb_toggle: false,
    rows: &[
        FormatRow {
            models: GRAY,
            linear: "Y float",
            srgb: None,
        },
        FormatRow {
            models: GRAY_ALPHA,
            linear: "YA float",
            srgb: None,
        },
        FormatRow {
            models: RGB,
            linear: "RGB float",
            srgb: None,
        },
    ],
    fallback: FormatRow {
        models: &[],
        linear: "RGBA float",
        srgb: None,
    },
};

/// Compositing ops work on premultiplied floats, optionally with perceptual (sRGB) TRC.
static COMPOSITOR: Negotiation = Negotiation {
    srgb_toggle: true,
    rows: &[
        FormatRow {
            models: GRAY,
            linear: "Y float",
            srgb: Some("Y~ float"),
        },
        FormatRow {
            models: GRAY_ALPHA,
            linear: "YaA float",
            srgb: Some("Y~aA float"),
        },
        FormatRow {
            models: RGB,
            linear: "RGB float",
            srgb: Some("R~G~B~ float"),
        },
        FormatRow {
            models: RGB_ALPHA,
            linear: "RaGaBaA float",
            srgb: Some("R~aG~aB~a float"),
        },
    ],
    fallback: FormatRow {
        models: &[],
        linear: "RaGaBaA float",
        srgb: Some("R~aG~aB~a float"),
    },
};

fn negotiation(family: Family) -> &'static Negotiation {
    match family {
        Family::Math => &MATH,
        Family::SvgBlend | Family::PorterDuff => &COMPOSITOR,
    }
}

pub(crate) fn write_prepare(out: &mut impl Write, family: Family) -> fmt::Result {
    let neg = negotiation(family);

    writeln!(out, "static void prepare (GeglOperation *operation)")?;
    writeln!(out, "{{")?;
    if neg.srgb_toggle {
        writeln!(
            out,
            "  int use_srgb = GEGL_PROPERTIES (operation)->srgb?1:0;"
        )?;
    }
    out.write_str(
        r#"  const Babl *format = gegl_operation_get_source_format (operation, "input");
  const Babl *space = NULL;
  const Babl *model = NULL;
  if (!format)
    format = gegl_operation_get_source_format (operation, "aux");
  if (format)
  {
    model = babl_format_get_model (format);
  }

"#,
    )?;

    for (i, row) in neg.rows.iter().enumerate() {
        let lead = if i == 0 { "  if (" } else { "  else if (" };
        let indent = " ".repeat(lead.len());
        let tests = row
            .models
            .iter()
            .map(|m| format!("babl_model_is (model, \"{m}\")"))
            .collect::<Vec<_>>()
            .join(&format!(" ||\n{indent}"));
        writeln!(out, "{lead}{tests})")?;
        write_format_block(out, neg, row)?;
    }
    writeln!(out, "  else")?;
    write_format_block(out, neg, &neg.fallback)?;

    out.write_str(
        r#"
  gegl_operation_set_format (operation, "input",  format);
  gegl_operation_set_format (operation, "aux",    format);
  gegl_operation_set_format (operation, "output", format);
}
"#,
    )
}

fn write_format_block(out: &mut impl Write, neg: &Negotiation, row: &FormatRow) -> fmt::Result {
    let choice = match (neg.srgb_toggle, row.srgb) {
        (true, Some(srgb)) => format!("use_srgb?\"{srgb}\":\"{}\"", row.linear),
        _ => format!("\"{}\"", row.linear),
    };
    writeln!(out, "  {{")?;
    writeln!(out, "    format  = babl_format_with_space ({choice}, space);")?;
    writeln!(out, "  }}")
}

#[cfg(test)]
#[path = "../../tests/unit/render/prepare.rs"]
mod tests;
