//! Per-pixel `process` routines.
//!
//! Every shape shares the signature and the local setup; the blend and Porter-Duff families
//! also share the pixel loop and differ only in how the aux operand is read and how a channel
//! value is computed.

use crate::table::model::OpKind;
use std::fmt::{self, Write};

const PROCESS_HEAD: &str = r#"static gboolean
process (GeglOperation       *op,
         void                *in_buf,
         void                *aux_buf,
         void                *out_buf,
         glong                n_pixels,
         const GeglRectangle *roi,
         gint                 level)
{
  gfloat * GEGL_ALIGNED in = in_buf;
  gfloat * GEGL_ALIGNED aux = aux_buf;
  gfloat * GEGL_ALIGNED out = out_buf;
  const Babl *format = gegl_operation_get_format (op, "output");
  gint    components = babl_format_get_n_components (format);
  gint    alpha      = babl_format_has_alpha (format);
  gint    i;

"#;

const PROCESS_TAIL: &str = "  return TRUE;\n}\n";

/// Pass `input` or `aux` straight through when the other operand is absent or out of range.
const PASSTHROUGH_FAST_PATH: &str = r#"/* Fast paths */
static gboolean operation_process (GeglOperation        *operation,
                                   GeglOperationContext *context,
                                   const gchar          *output_prop,
                                   const GeglRectangle  *result,
                                   gint                  level)
{
  GeglOperationClass  *operation_class;
  gpointer input, aux;
  operation_class = GEGL_OPERATION_CLASS (gegl_op_parent_class);

  /* get the raw values this does not increase the reference count */
  input = gegl_operation_context_get_object (context, "input");
  aux = gegl_operation_context_get_object (context, "aux");

  /* pass the input/aux buffers directly through if they are alone*/
  {
    const GeglRectangle *in_extent = NULL;
    const GeglRectangle *aux_extent = NULL;

    if (input)
      in_extent = gegl_buffer_get_abyss (input);

    if ((!input ||
        (aux && !gegl_rectangle_intersect (NULL, in_extent, result))))
      {
         gegl_operation_context_take_object (context, "output",
                                             g_object_ref (aux));
         return TRUE;
      }
    if (aux)
      aux_extent = gegl_buffer_get_abyss (aux);

    if (!aux ||
        (input && !gegl_rectangle_intersect (NULL, aux_extent, result)))
      {
        gegl_operation_context_take_object (context, "output",
                                            g_object_ref (input));
        return TRUE;
      }
  }
  /* chain up, which will create the needed buffers for our actual
   * process function
   */
  return operation_class->process (operation, context, output_prop, result, level);
}

"#;

/// How a single output channel is computed from `cA`/`cB`.
#[derive(Debug)]
pub(crate) enum ChannelRule<'a> {
    /// `out[j] = formula;`
    Unclamped(&'a str),
    /// `out[j] = CLAMP (formula, 0, aD);`
    Clamped(&'a str),
    /// Chained `if`/`else if`/`else`, each arm clamped.
    Branches {
        arms: Vec<(&'a str, &'a str)>,
        otherwise: &'a str,
    },
}

/// Where the source operand comes from inside a pixel loop.
#[derive(Debug, PartialEq, Eq)]
enum AuxSource {
    Buffer,
    /// No aux buffer connected: source is fully transparent.
    Transparent,
}

/// Indented line writer for the generated C body.
struct Lines<'w, W: Write> {
    out: &'w mut W,
    indent: usize,
}

impl<W: Write> Lines<'_, W> {
    fn line(&mut self, text: &str) -> fmt::Result {
        if text.is_empty() {
            writeln!(self.out)
        } else {
            writeln!(self.out, "{:indent$}{text}", "", indent = self.indent)
        }
    }

    fn nested(&mut self, by: usize) -> Lines<'_, W> {
        Lines {
            out: &mut *self.out,
            indent: self.indent + by,
        }
    }
}

/// Write the `process` routine (and the blend fast path) for `kind`.
pub(crate) fn write_process(out: &mut impl Write, kind: &OpKind) -> fmt::Result {
    let rule = match kind {
        OpKind::Direct { formula, .. } => return write_direct(out, formula),
        OpKind::TwoOperand { formula } | OpKind::AlphaPair { formula, .. } => {
            ChannelRule::Clamped(formula)
        }
        OpKind::OneCondition {
            condition,
            then,
            otherwise,
        } => ChannelRule::Branches {
            arms: vec![(condition.as_str(), then.as_str())],
            otherwise: otherwise.as_str(),
        },
        OpKind::TwoCondition {
            first_condition,
            first,
            second_condition,
            second,
            otherwise,
        } => ChannelRule::Branches {
            arms: vec![
                (first_condition.as_str(), first.as_str()),
                (second_condition.as_str(), second.as_str()),
            ],
            otherwise: otherwise.as_str(),
        },
        OpKind::PorterDuff { formula, .. } => ChannelRule::Unclamped(formula),
    };
    // Every shape but Direct carries an output alpha.
    let Some(alpha) = kind.alpha_formula() else {
        return Err(fmt::Error);
    };

    match kind {
        OpKind::PorterDuff { .. } => write_porter_duff(out, alpha, &rule),
        _ => write_blend(out, alpha, &rule),
    }
}

fn write_direct(out: &mut impl Write, formula: &str) -> fmt::Result {
    out.write_str(PROCESS_HEAD)?;
    write!(
        out,
        r#"  if (aux == NULL)
    {{
      gfloat value = GEGL_PROPERTIES (op)->value;
      for (i=0; i<n_pixels; i++)
        {{
          gint   j;
          for (j=0; j<components-alpha; j++)
            {{
              gfloat result;
              gfloat input=in[j];
              {formula};
              out[j]=result;
            }}
          if (alpha)
            out[components-1]=in[components-1];
          in += components;
          out+= components;
        }}
    }}
  else
    {{
      for (i=0; i<n_pixels; i++)
        {{
          gint   j;
          gfloat value;
          for (j=0; j<components-alpha; j++)
            {{
              gfloat input =in[j];
              gfloat result;
              value=aux[j];
              {formula};
              out[j]=result;
            }}
          if (alpha)
            out[components-1]=in[components-1];

          in  += components;
          aux += components;
          out += components;
        }}
    }}
"#
    )?;
    out.write_str(PROCESS_TAIL)
}

fn write_blend(out: &mut impl Write, alpha: &str, rule: &ChannelRule<'_>) -> fmt::Result {
    out.write_str(PASSTHROUGH_FAST_PATH)?;
    out.write_str(PROCESS_HEAD)?;
    out.write_str("  if (aux == NULL)\n    return TRUE;\n\n")?;
    write_pixel_loop(
        &mut Lines {
            out: &mut *out,
            indent: 2,
        },
        AuxSource::Buffer,
        alpha,
        rule,
        false,
    )?;
    out.write_str(PROCESS_TAIL)
}

fn write_porter_duff(out: &mut impl Write, alpha: &str, rule: &ChannelRule<'_>) -> fmt::Result {
    out.write_str(PROCESS_HEAD)?;
    out.write_str("  if (!aux)\n    {\n")?;
    write_pixel_loop(
        &mut Lines {
            out: &mut *out,
            indent: 6,
        },
        AuxSource::Transparent,
        alpha,
        rule,
        true,
    )?;
    out.write_str("    }\n  else\n    {\n")?;
    write_pixel_loop(
        &mut Lines {
            out: &mut *out,
            indent: 6,
        },
        AuxSource::Buffer,
        alpha,
        rule,
        true,
    )?;
    out.write_str("    }\n")?;
    out.write_str(PROCESS_TAIL)
}

fn write_pixel_loop<W: Write>(
    l: &mut Lines<'_, W>,
    aux: AuxSource,
    alpha: &str,
    rule: &ChannelRule<'_>,
    mark_unused: bool,
) -> fmt::Result {
    let unused = if mark_unused { " G_GNUC_UNUSED" } else { "" };

    l.line("for (i = 0; i < n_pixels; i++)")?;
    l.line("  {")?;
    {
        let mut px = l.nested(4);
        px.line(&format!("gfloat aA{unused}, aB{unused}, aD{unused};"))?;
        px.line("gint   j;")?;
        px.line("")?;
        px.line("if (alpha)")?;
        px.line("  {")?;
        px.line("    aB = in[components-1];")?;
        match aux {
            AuxSource::Buffer => px.line("    aA = aux[components-1];")?,
            AuxSource::Transparent => px.line("    aA = 0.0f;")?,
        }
        px.line("  }")?;
        px.line("else")?;
        px.line("  {")?;
        match aux {
            AuxSource::Buffer => px.line("    aB = aA = 1.0f;")?,
            AuxSource::Transparent => {
                px.line("    aB = 1.0f;")?;
                px.line("    aA = 0.0f;")?;
            }
        }
        px.line("  }")?;
        px.line(&format!("aD = {alpha};"))?;
        px.line("")?;

        px.line("for (j = 0; j < components-alpha; j++)")?;
        px.line("  {")?;
        {
            let mut ch = px.nested(4);
            ch.line(&format!("gfloat cA{unused}, cB{unused};"))?;
            ch.line("")?;
            ch.line("cB = in[j];")?;
            match aux {
                AuxSource::Buffer => ch.line("cA = aux[j];")?,
                AuxSource::Transparent => ch.line("cA = 0.0f;")?,
            }
            write_channel(&mut ch, rule)?;
        }
        px.line("  }")?;

        px.line("if (alpha)")?;
        px.line("  out[components-1] = aD;")?;
        px.line("in  += components;")?;
        if aux == AuxSource::Buffer {
            px.line("aux += components;")?;
        }
        px.line("out += components;")?;
    }
    l.line("  }")
}

fn write_channel<W: Write>(l: &mut Lines<'_, W>, rule: &ChannelRule<'_>) -> fmt::Result {
    match rule {
        ChannelRule::Unclamped(formula) => l.line(&format!("out[j] = {formula};")),
        ChannelRule::Clamped(formula) => l.line(&clamped(formula)),
        ChannelRule::Branches { arms, otherwise } => {
            for (i, (condition, formula)) in arms.iter().enumerate() {
                let keyword = if i == 0 { "if" } else { "else if" };
                l.line(&format!("{keyword} ({condition})"))?;
                l.line(&format!("  {}", clamped(formula)))?;
            }
            l.line("else")?;
            l.line(&format!("  {}", clamped(otherwise)))
        }
    }
}

fn clamped(formula: &str) -> String {
    format!("out[j] = CLAMP ({formula}, 0, aD);")
}

#[cfg(test)]
#[path = "../../tests/unit/render/kernel.rs"]
mod tests;
