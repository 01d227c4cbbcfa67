use super::*;
use crate::table::OpTable;
use crate::foundation::names::hyphenate;
use crate::table::model::{Family, OpKind};

fn builtin() -> OpTable {
    OpTable::builtin().unwrap()
}

fn render_named(table: &OpTable, name: &str) -> GeneratedSource {
    render_op(table.get(name).unwrap()).unwrap()
}

#[test]
fn rendering_is_deterministic() {
    let table = builtin();
    for op in table.operations() {
        assert_eq!(render_op(op).unwrap(), render_op(op).unwrap(), "{}", op.name);
    }
}

#[test]
fn description_contains_every_kernel_formula() {
    let table = builtin();
    for op in table.operations() {
        let text = render_op(op).unwrap().text;
        let described = text
            .lines()
            .find(|line| line.trim_start().starts_with("_(\""))
            .unwrap();
        for (field, formula) in op.kind.formula_fields() {
            assert!(
                described.contains(formula),
                "{}: {field} missing from description",
                op.name
            );
            assert!(text.contains(formula));
        }
    }
}

#[test]
fn sections_appear_in_file_order() {
    let src = render_named(&builtin(), "overlay");
    let markers = [
        "AUTOGENERATED FILE generated by gegl-opgen/svg-12-blend",
        "#include \"config.h\"",
        "#ifdef GEGL_PROPERTIES",
        "property_boolean (srgb",
        "#else",
        "#define GEGL_OP_NAME         overlay",
        "#include \"gegl-op.h\"",
        "static void prepare",
        "static gboolean operation_process",
        "process (GeglOperation       *op,",
        "gegl_op_class_init",
        "#endif",
    ];
    let mut from = 0;
    for marker in markers {
        let at = src.text[from..]
            .find(marker)
            .unwrap_or_else(|| panic!("'{marker}' out of order"));
        from += at + marker.len();
    }
    assert!(src.text.starts_with("\n/* !!!! AUTOGENERATED FILE"));
}

#[test]
fn add_uses_constant_and_aux_operands() {
    let src = render_named(&builtin(), "add");
    assert_eq!(src.file_name, "add.c");
    let text = &src.text;
    assert!(text.contains("property_double (value, _(\"Value\"), 0.0)"));
    assert!(text.contains("gfloat value = GEGL_PROPERTIES (op)->value;"));
    assert!(text.contains("value=aux[j];"));
    assert_eq!(text.matches("result = input + value;").count(), 2);
    assert_eq!(text.matches("out[components-1]=in[components-1];").count(), 2);
    assert!(text.contains("#define powf(a,b) ((gfloat)pow(a,b))"));
    assert!(!text.contains("use_srgb"));
}

#[test]
fn overlay_branches_on_its_condition() {
    let text = render_named(&builtin(), "overlay").text;
    assert!(text.contains("aD = aA + aB - aA * aB;"));
    assert!(text.contains(
        "if (2 * cB > aB)\n            out[j] = CLAMP (2 * cA * cB + cA * (1 - aB) + cB * (1 - aA), 0, aD);"
    ));
    assert!(text.contains(
        "else\n            out[j] = CLAMP (aA * aB - 2 * (aB - cB) * (aA - cA) + cA * (1 - aB) + cB * (1 - aA), 0, aD);"
    ));
    assert!(text.contains("\"name\"            , \"svg:overlay\","));
    assert!(text.contains("\"compat-name\"     , \"gegl:overlay\","));
}

#[test]
fn plus_uses_its_own_alpha() {
    let text = render_named(&builtin(), "plus").text;
    assert!(text.contains("aD = MIN (aA + aB, 1);"));
    assert!(!text.contains("aD = aA + aB - aA * aB;"));
    assert!(text.contains("out[j] = CLAMP (cA + cB, 0, aD);"));
}

#[test]
fn colliding_blend_multiply_gets_prefixed_names() {
    let table = builtin();
    let blend = table
        .by_family(Family::SvgBlend)
        .find(|op| op.name == "multiply")
        .unwrap();
    let src = render_op(blend).unwrap();
    assert_eq!(src.file_name, "svg-multiply.c");
    assert!(src.text.contains("#define GEGL_OP_NAME         svg_multiply\n"));
    assert!(src.text.contains("#define GEGL_OP_C_FILE       \"svg-multiply.c\"\n"));
    assert!(src.text.contains("\"name\"            , \"gegl:svg-multiply\","));
    assert!(src.text.contains("\"compat-name\"     , \"svg:multiply\","));
    assert!(src.text.contains("\"title\"           , \"Multiply\","));

    let math = render_named(&table, "multiply");
    assert_eq!(math.file_name, "multiply.c");
    assert!(math.text.contains("\"name\"            , \"gegl:multiply\","));
}

#[test]
fn soft_light_pulls_in_math_header() {
    let text = render_named(&builtin(), "soft_light").text;
    assert!(text.contains("#include \"gegl-op.h\"\n#include <math.h>\n"));
    assert!(text.contains("\"name\"            , \"gegl:soft-light\","));
    assert!(!text.contains("compat-name"));
}

#[test]
fn porter_duff_matches_family_layout() {
    let src = render_named(&builtin(), "dst_out");
    assert_eq!(src.file_name, "dst-out.c");
    let text = &src.text;
    assert!(text.contains("generated by gegl-opgen/svg-12-porter-duff"));
    assert!(text.contains("\"categories\"      , \"compositors:porter-duff\","));
    assert!(text.contains("\"reference-hash\"  , \"b0ffe0c9b9a5a48d21df751ce576ffa9\","));
    assert!(!text.contains("operation_process"));
    assert_eq!(text.matches("out[j] = cB * (1.0f - aA);").count(), 2);
}

#[test]
fn file_names_are_unique_across_the_table() {
    let table = builtin();
    let mut names: Vec<String> = table
        .operations()
        .iter()
        .map(|op| render_op(op).unwrap().file_name)
        .collect();
    let total = names.len();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), total);
}

#[test]
fn file_name_follows_table_name_for_every_entry() {
    let table = builtin();
    let mut prefixed = 0;
    for op in table.operations() {
        let src = render_op(op).unwrap();
        let plain = hyphenate(&op.name);
        match op.collision_prefix.as_deref() {
            None => assert_eq!(src.file_name, format!("{plain}.c")),
            Some(prefix) => {
                prefixed += 1;
                assert_eq!(prefix, "svg-");
                assert_eq!(src.file_name, format!("svg-{plain}.c"));
                assert_eq!(src.ident.name, format!("gegl:svg-{plain}"));
                assert_eq!(src.ident.compat_name, Some(format!("svg:{plain}")));
            }
        }
        let c_file = format!("#define GEGL_OP_C_FILE       \"{}\"", src.file_name);
        assert!(src.text.contains(&c_file), "{}", op.name);
    }
    assert_eq!(prefixed, 1);
}

#[test]
fn every_composer_kernel_defaults_and_guards_alpha() {
    let table = builtin();
    for op in table.operations() {
        let text = render_op(op).unwrap().text;
        if let OpKind::Direct { .. } = op.kind {
            assert!(!text.contains("aD"), "{}", op.name);
            continue;
        }
        assert!(text.contains("aB = aA = 1.0f;"), "{}", op.name);
        if let OpKind::PorterDuff { .. } = op.kind {
            assert!(text.contains("aB = 1.0f;\n"), "{}", op.name);
            assert!(text.contains("aA = 0.0f;\n"), "{}", op.name);
        }
        let writes = text.matches("out[components-1] = aD;").count();
        assert!(writes > 0, "{}", op.name);
        assert_eq!(
            text.matches("if (alpha)\n        out[components-1] = aD;").count()
                + text.matches("if (alpha)\n            out[components-1] = aD;").count(),
            writes,
            "{}",
            op.name
        );
    }
}
