use super::*;

fn footer_text(spec: &OperationSpec) -> String {
    let mut out = String::new();
    write_footer(&mut out, spec, &spec.ident()).unwrap();
    out
}

fn add() -> OperationSpec {
    OperationSpec::new(
        "add",
        OpKind::Direct {
            formula: "result = input + value".to_string(),
            default_value: 0.0,
        },
    )
    .with_reference_hash("3b665a3c7f3d3aac89c67bd7051c276f")
}

#[test]
fn math_footer_registers_plain_gegl_name() {
    let text = footer_text(&add());
    assert!(text.contains("    \"name\"            , \"gegl:add\",\n"));
    assert!(!text.contains("compat-name"));
    assert!(text.contains("\"title\"           , \"Add\","));
    assert!(text.contains("\"categories\"      , \"compositors:math\","));
    assert!(text.contains("\"reference-hash\"  , \"3b665a3c7f3d3aac89c67bd7051c276f\","));
    assert!(!text.contains("operation_process"));
    assert!(text.ends_with("        NULL);\n}\n\n#endif\n"));
}

#[test]
fn keys_are_emitted_in_fixed_order() {
    let spec = OperationSpec::new(
        "color_dodge",
        OpKind::OneCondition {
            condition: "c".to_string(),
            then: "t".to_string(),
            otherwise: "o".to_string(),
        },
    )
    .with_reference_hash("30a75546688fe4a12e7d0721b5c357ce");
    let text = footer_text(&spec);
    let order = [
        "\"name\"",
        "\"compat-name\"",
        "\"title\"",
        "\"categories\"",
        "\"reference-hash\"",
        "\"description\"",
    ]
    .map(|key| text.find(key).unwrap());
    assert!(order.windows(2).all(|w| w[0] < w[1]), "{text}");
    assert!(text.contains("\"svg:color-dodge\""));
    assert!(text.contains("\"gegl:color-dodge\""));
    assert!(text.contains("\"Color-dodge\""));
    assert!(text.contains("  operation_class->process      = operation_process;\n"));
}

#[test]
fn missing_hash_omits_the_key() {
    let spec = OperationSpec::new(
        "src_over",
        OpKind::PorterDuff {
            formula: "cA + cB * (1.0f - aA)".to_string(),
            alpha: "aA + aB - aA * aB".to_string(),
        },
    );
    let text = footer_text(&spec);
    assert!(!text.contains("reference-hash"));
    assert!(text.contains("\"compositors:porter-duff\""));
    assert!(text.contains(
        "_(\"Porter Duff operation src-over (d = cA + cB * (1.0f - aA); aD = aA + aB - aA * aB)\"),"
    ));
}

#[test]
fn description_embeds_every_formula_field() {
    let spec = OperationSpec::new(
        "soft_light",
        OpKind::TwoCondition {
            first_condition: "2 * cA < aA".to_string(),
            first: "F1".to_string(),
            second_condition: "8 * cB <= aB".to_string(),
            second: "F2".to_string(),
            otherwise: "F3".to_string(),
        },
    );
    let text = description(&spec);
    assert_eq!(
        text,
        "SVG blend operation soft-light (<code>if 2 * cA < aA: d = F1; if 8 * cB <= aB: d = F2; \
         otherwise: d = F3</code>)"
    );
    for (_, formula) in spec.kind.formula_fields() {
        assert!(text.contains(formula));
    }
}

#[test]
fn description_is_escaped_in_the_literal() {
    let spec = OperationSpec::new(
        "quoted",
        OpKind::TwoOperand {
            formula: r#"f ("x\y")"#.to_string(),
        },
    );
    let text = footer_text(&spec);
    assert!(text.contains(r#"(<code>d = f (\"x\\y\")</code>)"#), "{text}");
}

#[test]
fn math_description_matches_legacy_wording() {
    assert_eq!(
        description(&add()),
        "Math operation add, performs the operation per pixel, using either the constant provided \
         in 'value' or the corresponding pixel from the buffer on aux as operands. The result is \
         the evaluation of the expression result = input + value"
    );
}
