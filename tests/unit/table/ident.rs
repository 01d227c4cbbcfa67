use super::*;
use crate::table::model::OpKind;

fn blend(name: &str) -> OperationSpec {
    OperationSpec::new(
        name,
        OpKind::TwoOperand {
            formula: "cA + cB - cA * cB".to_string(),
        },
    )
}

#[test]
fn direct_registers_under_gegl_without_compat() {
    let spec = OperationSpec::new(
        "add",
        OpKind::Direct {
            formula: "result = input + value".to_string(),
            default_value: 0.0,
        },
    );
    let id = spec.ident();
    assert_eq!(id.file_name(), "add.c");
    assert_eq!(id.c_name, "add");
    assert_eq!(id.name, "gegl:add");
    assert_eq!(id.compat_name, None);
    assert_eq!(id.title, "Add");
}

#[test]
fn blend_names_are_hyphenated_and_carry_gegl_compat() {
    let spec = OperationSpec::new(
        "color_dodge",
        OpKind::OneCondition {
            condition: "c".to_string(),
            then: "a".to_string(),
            otherwise: "b".to_string(),
        },
    );
    let id = spec.ident();
    assert_eq!(id.file_name(), "color-dodge.c");
    assert_eq!(id.c_name, "color_dodge");
    assert_eq!(id.name, "svg:color-dodge");
    assert_eq!(id.compat_name.as_deref(), Some("gegl:color-dodge"));
    assert_eq!(id.title, "Color-dodge");
}

#[test]
fn two_condition_registers_under_gegl_only() {
    let spec = OperationSpec::new(
        "soft_light",
        OpKind::TwoCondition {
            first_condition: "c1".to_string(),
            first: "f1".to_string(),
            second_condition: "c2".to_string(),
            second: "f2".to_string(),
            otherwise: "f3".to_string(),
        },
    );
    let id = spec.ident();
    assert_eq!(id.name, "gegl:soft-light");
    assert!(id.compat_name.is_none());
}

#[test]
fn collision_prefix_moves_plain_name_to_compat() {
    let id = blend("multiply").with_collision_prefix("svg-").ident();
    assert_eq!(id.file_name(), "svg-multiply.c");
    assert_eq!(id.c_name, "svg_multiply");
    assert_eq!(id.name, "gegl:svg-multiply");
    assert_eq!(id.compat_name.as_deref(), Some("svg:multiply"));
    assert_eq!(id.title, "Multiply");
}

#[test]
fn claims_cover_primary_and_compat() {
    let id = blend("screen").ident();
    let claims: Vec<&str> = id.claims().collect();
    assert_eq!(claims, vec!["svg:screen", "gegl:screen"]);
}
