//! Glue between layercast rasters/geometry and the `vello_cpu` rasterizer.

use std::sync::Arc;

use crate::foundation::core::{Affine, BezPath};
use crate::foundation::error::{LayercastError, LayercastResult};
use crate::render::raster::Raster;

/// Largest edge (in pixels) of any buffer handed to `vello_cpu`.
pub(crate) const MAX_VELLO_DIM: u32 = u16::MAX as u32;

pub(crate) fn dims_u16(width: u32, height: u32) -> LayercastResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| LayercastError::evaluation("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| LayercastError::evaluation("pixmap height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(LayercastError::evaluation("pixmap must not be empty"));
    }
    Ok((w, h))
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

pub(crate) fn pixmap_from_raster(raster: &Raster) -> LayercastResult<vello_cpu::Pixmap> {
    let (w, h) = dims_u16(raster.width, raster.height)?;
    // Pixmap stores PremulRgba8; raster bytes are already premultiplied.
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (raster.width as usize) * (raster.height as usize),
    );
    for px in raster.data.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    let may_have_opacities = !raster.is_opaque();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

pub(crate) fn raster_from_pixmap(pixmap: &vello_cpu::Pixmap) -> LayercastResult<Raster> {
    Raster::from_premul_bytes(
        u32::from(pixmap.width()),
        u32::from(pixmap.height()),
        pixmap.data_as_u8_slice().to_vec(),
    )
}

pub(crate) fn image_paint(raster: &Raster) -> LayercastResult<vello_cpu::Image> {
    let pixmap = pixmap_from_raster(raster)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

/// Run `draw` against a fresh transparent context of `width x height` and read back the pixels.
pub(crate) fn render_offscreen(
    width: u32,
    height: u32,
    draw: impl FnOnce(&mut vello_cpu::RenderContext) -> LayercastResult<()>,
) -> LayercastResult<Raster> {
    let (w, h) = dims_u16(width, height)?;
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    draw(&mut ctx)?;
    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    raster_from_pixmap(&pixmap)
}
