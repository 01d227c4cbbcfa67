use crate::table::model::Family;
use std::fmt::{self, Write};

/// Name written into the provenance line of every generated file.
pub(crate) const GENERATOR: &str = "gegl-opgen";

const LICENSE: &str = r#" *
 * This file is an image processing operation for GEGL
 *
 * GEGL is free software; you can redistribute it and/or
 * modify it under the terms of the GNU Lesser General Public
 * License as published by the Free Software Foundation; either
 * version 3 of the License, or (at your option) any later version.
 *
 * GEGL is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * Lesser General Public License for more details.
 *
 * You should have received a copy of the GNU Lesser General Public
 * License along with GEGL; if not, see <https://www.gnu.org/licenses/>.
 *
"#;

const MATH_CREDITS: &str = " * Copyright 2006 Øyvind Kolås <pippin@gimp.org>\n";

const SVG_CREDITS: &str = r#" *  Copyright 2006, 2007 Øyvind Kolås <pippin@gimp.org>
 *            2007 John Marshall
 *            2013 Daniel Sabo
 *
 * SVG rendering modes; see:
 *     http://www.w3.org/TR/SVG12/rendering.html
 *     http://www.w3.org/TR/2004/WD-SVG12-20041027/rendering.html#comp-op-prop
 *
 *     aA = aux(src) alpha      aB = in(dst) alpha      aD = out alpha
 *     cA = aux(src) colour     cB = in(dst) colour     cD = out colour
"#;

/// License and provenance comment; identical for every file of a family.
pub(crate) fn write_header(out: &mut impl Write, family: Family) -> fmt::Result {
    writeln!(out)?;
    writeln!(
        out,
        "/* !!!! AUTOGENERATED FILE generated by {GENERATOR}/{} !!!!!",
        family.generator()
    )?;
    out.write_str(LICENSE)?;
    out.write_str(match family {
        Family::Math => MATH_CREDITS,
        Family::SvgBlend | Family::PorterDuff => SVG_CREDITS,
    })?;
    out.write_str(" *\n * !!!! AUTOGENERATED FILE !!!!!\n */")
}
