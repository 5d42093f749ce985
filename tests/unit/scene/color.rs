use super::*;
use serde_json::json;

#[test]
fn parses_hex_forms() {
    let c: ColorDef = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c.to_rgba8(), Rgba8::rgb(255, 0, 0));

    let c: ColorDef = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert_eq!(c.to_rgba8().b, 255);
    assert_eq!(c.to_rgba8().a, 128);

    let c: ColorDef = serde_json::from_value(json!("#0f0")).unwrap();
    assert_eq!(c.to_rgba8(), Rgba8::rgb(0, 255, 0));
}

#[test]
fn parses_css_rgba_and_names() {
    let c = parse_color_str("rgba(255, 0, 0, 0.5)").unwrap();
    assert_eq!(c.to_rgba8(), Rgba8 { r: 255, g: 0, b: 0, a: 128 });

    let c = parse_color_str("RGB(0,0,255)").unwrap();
    assert_eq!(c.to_rgba8(), Rgba8::rgb(0, 0, 255));

    assert_eq!(parse_color_str("Red").unwrap().to_rgba8(), Rgba8::rgb(255, 0, 0));
    assert!(parse_color_str("not-a-color").is_err());
}

#[test]
fn parses_object_and_array() {
    let c: ColorDef = serde_json::from_value(json!({"r": 1.0, "g": 0.5, "b": 0.0})).unwrap();
    assert_eq!(c, ColorDef::rgba(1.0, 0.5, 0.0, 1.0));

    let c: ColorDef = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.9])).unwrap();
    assert_eq!(c, ColorDef::rgba(0.25, 0.5, 0.75, 0.9));

    assert!(serde_json::from_value::<ColorDef>(json!([1.0, 2.0])).is_err());
}

#[test]
fn nearest_name_picks_closest_opaque_entry() {
    assert_eq!(nearest_name(Rgba8::rgb(250, 10, 5)), "red");
    assert_eq!(nearest_name(Rgba8::rgb(120, 130, 125)), "gray");
    assert_eq!(nearest_name(Rgba8 { r: 0, g: 0, b: 0, a: 0 }), "black");
}

#[test]
fn public_parse_reports_validation_errors() {
    assert_eq!(parse_color("#00ff0080").unwrap(), Rgba8 { r: 0, g: 255, b: 0, a: 128 });
    assert!(matches!(
        parse_color("nope"),
        Err(LayercastError::Validation(_))
    ));
}
