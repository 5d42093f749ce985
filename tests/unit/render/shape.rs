use super::*;
use crate::foundation::core::Rgba8;

fn red(geometry: ShapeGeometry, alpha: f32) -> ShapeContent {
    ShapeContent {
        geometry,
        fill: Rgba8::rgb(255, 0, 0),
        alpha,
        stroke_width: None,
    }
}

#[test]
fn rectangle_fills_whole_buffer() {
    let out = rasterize_shape(&red(ShapeGeometry::Rectangle, 1.0), 10.0, 5.0, 20, 10).unwrap();
    assert_eq!((out.width, out.height), (20, 10));
    assert_eq!(out.pixel(0, 0), [255, 0, 0, 255]);
    assert_eq!(out.pixel(19, 9), [255, 0, 0, 255]);
}

#[test]
fn alpha_is_premultiplied_into_the_fill() {
    let out = rasterize_shape(&red(ShapeGeometry::Rectangle, 0.5), 4.0, 4.0, 4, 4).unwrap();
    let px = out.pixel(2, 2);
    assert!(px[3].abs_diff(128) <= 1, "{px:?}");
    assert!(px[0].abs_diff(px[3]) <= 1, "{px:?}");
    assert_eq!(px[1], 0);
}

#[test]
fn ellipse_leaves_corners_empty() {
    let out = rasterize_shape(&red(ShapeGeometry::Ellipse, 1.0), 40.0, 20.0, 40, 20).unwrap();
    assert_eq!(out.pixel(0, 0)[3], 0);
    assert_eq!(out.pixel(39, 19)[3], 0);
    assert_eq!(out.pixel(20, 10)[3], 255);
}

#[test]
fn polygon_is_scaled_with_the_box() {
    let tri = ShapeGeometry::Polygon(vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(0.0, 10.0),
    ]);
    let out = rasterize_shape(&red(tri, 1.0), 10.0, 10.0, 30, 30).unwrap();
    assert_eq!(out.pixel(3, 3)[3], 255);
    assert_eq!(out.pixel(27, 27)[3], 0);
}

#[test]
fn freehand_with_stroke_width_is_stroked() {
    let mut shape = red(
        ShapeGeometry::Freehand(vec![Point::new(0.0, 10.0), Point::new(20.0, 10.0)]),
        1.0,
    );
    shape.stroke_width = Some(4.0);
    let out = rasterize_shape(&shape, 20.0, 20.0, 20, 20).unwrap();
    assert_eq!(out.pixel(10, 10)[3], 255);
    assert_eq!(out.pixel(10, 2)[3], 0);
}

#[test]
fn empty_native_box_is_rejected() {
    assert!(rasterize_shape(&red(ShapeGeometry::Rectangle, 1.0), 0.0, 5.0, 4, 4).is_err());
}
