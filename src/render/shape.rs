use kurbo::Shape;

use crate::foundation::core::{Affine, BezPath, Point, Rect};
use crate::foundation::error::{LayercastError, LayercastResult};
use crate::render::cpu::{affine_to_cpu, bezpath_to_cpu, render_offscreen};
use crate::render::raster::Raster;
use crate::scene::layer::{ShapeContent, ShapeGeometry};

const CURVE_TOLERANCE: f64 = 0.1;

/// Rasterize `shape` into an `out_w x out_h` buffer.
///
/// Geometry is authored in the native `native_w x native_h` box and stretched onto the output
/// buffer, so the shape is drawn at its final resolution instead of being resampled.
pub(crate) fn rasterize_shape(
    shape: &ShapeContent,
    native_w: f64,
    native_h: f64,
    out_w: u32,
    out_h: u32,
) -> LayercastResult<Raster> {
    if !(native_w > 0.0 && native_h > 0.0) {
        return Err(LayercastError::evaluation("shape native box must be > 0"));
    }
    let xf = Affine::scale_non_uniform(
        f64::from(out_w) / native_w,
        f64::from(out_h) / native_h,
    );
    let c = shape.fill.with_alpha_mul(shape.alpha);
    let paint = vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a);
    let native = Rect::new(0.0, 0.0, native_w, native_h);

    render_offscreen(out_w, out_h, |ctx| {
        ctx.set_transform(affine_to_cpu(xf));
        ctx.set_paint(paint);
        match &shape.geometry {
            ShapeGeometry::Rectangle => {
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, native_w, native_h));
            }
            ShapeGeometry::Ellipse => {
                let path = kurbo::Ellipse::from_rect(native).to_path(CURVE_TOLERANCE);
                ctx.fill_path(&bezpath_to_cpu(&path));
            }
            ShapeGeometry::Polygon(points) => {
                ctx.fill_path(&bezpath_to_cpu(&polyline(points, true)));
            }
            ShapeGeometry::Freehand(points) => match shape.stroke_width {
                Some(width) => {
                    let stroke = vello_cpu::kurbo::Stroke::new(width)
                        .with_caps(vello_cpu::kurbo::Cap::Round)
                        .with_join(vello_cpu::kurbo::Join::Round);
                    ctx.set_stroke(stroke);
                    ctx.stroke_path(&bezpath_to_cpu(&polyline(points, false)));
                }
                None => ctx.fill_path(&bezpath_to_cpu(&polyline(points, true))),
            },
        }
        Ok(())
    })
}

fn polyline(points: &[Point], close: bool) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(&first) = iter.next() {
        path.move_to(first);
        for &p in iter {
            path.line_to(p);
        }
        if close {
            path.close_path();
        }
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/render/shape.rs"]
mod tests;
