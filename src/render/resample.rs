use crate::foundation::core::{Affine, Point};
use crate::foundation::error::{LayercastError, LayercastResult};
use crate::foundation::math::approx_eq;
use crate::render::cpu::{affine_to_cpu, image_paint, render_offscreen};
use crate::render::raster::Raster;

/// Resample ratios closer than this to 1.0 leave the buffer untouched.
pub(crate) const RESAMPLE_EPSILON: f64 = 1e-3;

/// Resize `src` to `width x height` with a Lanczos3 filter.
///
/// Returns `src` unchanged when both resample ratios are within [`RESAMPLE_EPSILON`] of 1.
pub(crate) fn resize_to(src: Raster, width: u32, height: u32) -> LayercastResult<Raster> {
    if width == 0 || height == 0 {
        return Err(LayercastError::evaluation("resize target must not be empty"));
    }
    let rx = f64::from(width) / f64::from(src.width.max(1));
    let ry = f64::from(height) / f64::from(src.height.max(1));
    if approx_eq(rx, 1.0, RESAMPLE_EPSILON) && approx_eq(ry, 1.0, RESAMPLE_EPSILON) {
        return Ok(src);
    }

    let (sw, sh) = (src.width, src.height);
    let buf = image::RgbaImage::from_raw(sw, sh, src.data)
        .ok_or_else(|| LayercastError::evaluation("resize source byte len mismatch"))?;
    // Resampling premultiplied pixels keeps edges free of dark fringes.
    let resized =
        image::imageops::resize(&buf, width, height, image::imageops::FilterType::Lanczos3);
    let mut data = resized.into_raw();
    clamp_premul_in_place(&mut data);
    Raster::from_premul_bytes(width, height, data)
}

// Lanczos overshoot can push a color channel above its alpha.
fn clamp_premul_in_place(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = px[3];
        for c in &mut px[..3] {
            *c = (*c).min(a);
        }
    }
}

/// Rotate `src` clockwise by `angle_deg` about its own center without growing the buffer.
///
/// Content rotated outside the original bounds is clipped. Multiples of 180 degrees are exact.
pub(crate) fn rotate_about_center(mut src: Raster, angle_deg: f64) -> LayercastResult<Raster> {
    let a = angle_deg.rem_euclid(360.0);
    if approx_eq(a, 0.0, RESAMPLE_EPSILON) || approx_eq(a, 360.0, RESAMPLE_EPSILON) {
        return Ok(src);
    }
    if approx_eq(a, 180.0, RESAMPLE_EPSILON) {
        src.flip_horizontal();
        src.flip_vertical();
        return Ok(src);
    }

    let (w, h) = (f64::from(src.width), f64::from(src.height));
    let paint = image_paint(&src)?;
    let center = Point::new(w / 2.0, h / 2.0);
    // y points down, so a positive angle turns clockwise on screen.
    let xf = Affine::rotate_about(a.to_radians(), center);
    render_offscreen(src.width, src.height, |ctx| {
        ctx.set_transform(affine_to_cpu(xf));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        Ok(())
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/resample.rs"]
mod tests;
