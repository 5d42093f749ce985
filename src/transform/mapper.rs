use crate::foundation::core::{Point, Vec2};
use crate::scene::layer::{Layer, LayerContent, ShapeGeometry};

/// Map one editor-space layer into source space.
///
/// Image layers keep their native size and grow their scale; shape and text layers are redefined
/// at the new size with their scale untouched, so content is never scaled twice.
pub fn map_layer(layer: &Layer, factor: f64) -> Layer {
    let mut out = layer.clone();
    if factor == 1.0 {
        return out;
    }

    out.center = scale_point(layer.center, factor);
    out.crop_path = map_points(&layer.crop_path, factor);
    match &mut out.content {
        LayerContent::BaseImage | LayerContent::SuppliedImage { .. } => {
            out.scale = Vec2::new(layer.scale.x * factor, layer.scale.y * factor);
        }
        LayerContent::VectorShape(shape) => {
            out.width = layer.width * factor;
            out.height = layer.height * factor;
            match &mut shape.geometry {
                ShapeGeometry::Polygon(points) | ShapeGeometry::Freehand(points) => {
                    *points = map_points(points, factor);
                }
                ShapeGeometry::Rectangle | ShapeGeometry::Ellipse => {}
            }
            shape.stroke_width = shape.stroke_width.map(|w| w * factor);
        }
        LayerContent::Text(text) => {
            out.width = layer.width * factor;
            out.height = layer.height * factor;
            text.font_size *= factor;
        }
    }
    out
}

/// Map every layer; the input is left untouched.
pub fn map_layers(layers: &[Layer], factor: f64) -> Vec<Layer> {
    layers.iter().map(|l| map_layer(l, factor)).collect()
}

/// Scale a list of points about the origin.
pub fn map_points(points: &[Point], factor: f64) -> Vec<Point> {
    points.iter().map(|&p| scale_point(p, factor)).collect()
}

fn scale_point(p: Point, factor: f64) -> Point {
    Point::new(p.x * factor, p.y * factor)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/mapper.rs"]
mod tests;
