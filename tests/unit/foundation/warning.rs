use super::*;

#[test]
fn layer_ids_are_reported_per_variant() {
    let scale = ComposeWarning::DegenerateScale {
        raw: f64::NAN,
        clamped_to: 0.1,
    };
    assert_eq!(scale.layer_id(), None);

    let canvas_crop = ComposeWarning::InvalidPolygon {
        layer_id: None,
        vertices: 2,
    };
    assert_eq!(canvas_crop.layer_id(), None);

    let zero = ComposeWarning::ZeroArea {
        layer_id: "dot".to_owned(),
    };
    assert_eq!(zero.layer_id(), Some("dot"));
}

#[test]
fn display_names_the_layer_and_cause() {
    let w = ComposeWarning::MissingFont {
        layer_id: "title".to_owned(),
        family: Some("Inter".to_owned()),
    };
    assert_eq!(
        w.to_string(),
        "layer 'title' skipped: no font for family 'Inter'"
    );

    let w = ComposeWarning::InvalidPolygon {
        layer_id: None,
        vertices: 1,
    };
    assert!(w.to_string().starts_with("canvas crop path has 1 vertices"));
}
