use super::*;
use crate::foundation::core::{Rgba8, Rgba8Premul};
use crate::scene::layer::{ShapeContent, ShapeGeometry, TextContent};
use std::sync::Arc;

fn red_rect(w: f64, h: f64, alpha: f32) -> Layer {
    Layer::new(
        "rect",
        LayerContent::VectorShape(ShapeContent {
            geometry: ShapeGeometry::Rectangle,
            fill: Rgba8::rgb(255, 0, 0),
            alpha,
            stroke_width: None,
        }),
        w,
        h,
    )
}

fn render(layer: &Layer, source: Option<&Raster>) -> Result<RenderedLayer, ComposeWarning> {
    let fonts = FontBook::new();
    let inputs = RenderInputs { source, fonts: &fonts };
    render_layer(layer, &inputs, &mut TextLayoutEngine::new())
}

#[test]
fn base_image_is_resized_to_footprint() {
    let src = Raster::filled(1024, 768, Rgba8Premul::from_straight_rgba(10, 20, 30, 255));
    let layer = Layer::new("base", LayerContent::BaseImage, 512.0, 384.0)
        .with_scale(2.0, 2.0)
        .with_center(512.0, 384.0);
    let out = render(&layer, Some(&src)).unwrap();
    assert_eq!(out.raster, src);
    assert_eq!(out.paint_origin(), Point::new(0.0, 0.0));
}

#[test]
fn anchor_holds_for_every_angle() {
    for angle in [0.0, 17.0, 45.0, 90.0, 135.0, 180.0, 270.0, -33.0] {
        let layer = red_rect(100.0, 50.0, 1.0)
            .with_center(200.0, 200.0)
            .with_scale(1.3, 0.8)
            .with_angle(angle);
        let out = render(&layer, None).unwrap();
        assert_eq!((out.raster.width, out.raster.height), (130, 40), "angle {angle}");
        let o = out.paint_origin();
        assert_eq!(o.x + f64::from(out.raster.width) / 2.0, 200.0);
        assert_eq!(o.y + f64::from(out.raster.height) / 2.0, 200.0);
    }
}

#[test]
fn rotated_half_alpha_rectangle_is_clipped_to_its_box() {
    let layer = red_rect(100.0, 50.0, 0.5)
        .with_center(200.0, 200.0)
        .with_angle(45.0);
    let out = render(&layer, None).unwrap();
    assert_eq!((out.raster.width, out.raster.height), (100, 50));

    let center = out.raster.pixel(50, 25);
    assert!(center[3].abs_diff(128) <= 1, "{center:?}");
    assert!(center[0].abs_diff(center[3]) <= 1);
    // Corners of the box fall outside the rotated rectangle.
    assert_eq!(out.raster.pixel(0, 0)[3], 0);
    assert_eq!(out.raster.pixel(99, 49)[3], 0);
}

#[test]
fn flip_mirrors_before_rotation() {
    let mut src = Raster::transparent(2, 1);
    src.data[0..4].copy_from_slice(&[255, 255, 255, 255]);
    let layer = Layer::new("base", LayerContent::BaseImage, 2.0, 1.0).with_flip(true, false);
    let out = render(&layer, Some(&src)).unwrap();
    assert_eq!(out.raster.pixel(0, 0)[3], 0);
    assert_eq!(out.raster.pixel(1, 0), [255, 255, 255, 255]);
}

#[test]
fn zero_area_layer_is_skipped() {
    let layer = red_rect(100.0, 50.0, 1.0).with_scale(0.001, 1.0);
    let err = render(&layer, None).unwrap_err();
    assert_eq!(
        err,
        ComposeWarning::ZeroArea {
            layer_id: "rect".to_owned()
        }
    );
}

#[test]
fn undecodable_image_is_skipped() {
    let layer = Layer::new(
        "logo",
        LayerContent::SuppliedImage {
            bytes: Arc::new(b"not an image".to_vec()),
        },
        10.0,
        10.0,
    );
    let err = render(&layer, None).unwrap_err();
    assert!(matches!(err, ComposeWarning::UndecodableContent { ref layer_id, .. } if layer_id == "logo"));
}

#[test]
fn text_without_fonts_is_skipped() {
    let layer = Layer::new(
        "caption",
        LayerContent::Text(TextContent {
            text: "hi".to_owned(),
            font_size: 12.0,
            font_family: Some("Serif".to_owned()),
            fill: Rgba8::BLACK,
        }),
        1.0,
        1.0,
    );
    let err = render(&layer, None).unwrap_err();
    assert_eq!(
        err,
        ComposeWarning::MissingFont {
            layer_id: "caption".to_owned(),
            family: Some("Serif".to_owned())
        }
    );
}

#[test]
fn paint_origin_rounds_half_pixels() {
    assert_eq!(paint_origin(Point::new(10.0, 10.0), 5, 4), Point::new(8.0, 8.0));
    assert_eq!(paint_origin(Point::new(-50.0, 3000.0), 20, 20), Point::new(-60.0, 2990.0));
}
