use rayon::prelude::*;

use crate::composite::blend::over_in_place;
use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::LayercastResult;
use crate::foundation::math::clip_origin;
use crate::render::layer::RenderedLayer;
use crate::render::raster::Raster;

/// Fixed-size output canvas that rendered layers are painted onto, one at a time.
///
/// The canvas never grows: pixels of a layer that fall outside it are dropped.
#[derive(Debug)]
pub struct Compositor {
    canvas: Canvas,
    target: Raster,
}

impl Compositor {
    /// Allocate a canvas filled with `background`.
    pub fn new(canvas: Canvas, background: Rgba8) -> Self {
        Self {
            canvas,
            target: Raster::filled(canvas.width, canvas.height, background.premultiplied()),
        }
    }

    /// Canvas size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Source-over paint `layer` at its paint origin with its opacity.
    pub fn paste(&mut self, layer: &RenderedLayer) -> LayercastResult<()> {
        paste_over(
            &mut self.target,
            &layer.raster,
            layer.paint_origin(),
            layer.layer.opacity,
        )
    }

    /// Hand out the finished raster.
    pub fn finish(self) -> Raster {
        self.target
    }
}

/// Order layers for painting: ascending paint order, ties keep their input order.
pub fn sort_for_paint(layers: &mut [RenderedLayer]) {
    layers.sort_by_key(|l| l.layer.paint_order);
}

/// Paint every layer onto a fresh `canvas` in paint order.
pub fn composite(
    canvas: Canvas,
    background: Rgba8,
    layers: Vec<RenderedLayer>,
) -> LayercastResult<Raster> {
    composite_checked(canvas, background, layers, || Ok(()))
}

/// [`composite`], running `before_paste` ahead of every paste.
///
/// The first error returned by `before_paste` stops painting and is passed through; the pipeline
/// uses this to abort on cancellation.
pub fn composite_checked(
    canvas: Canvas,
    background: Rgba8,
    mut layers: Vec<RenderedLayer>,
    mut before_paste: impl FnMut() -> LayercastResult<()>,
) -> LayercastResult<Raster> {
    sort_for_paint(&mut layers);
    let mut compositor = Compositor::new(canvas, background);
    for layer in &layers {
        before_paste()?;
        compositor.paste(layer)?;
    }
    Ok(compositor.finish())
}

/// Blend `src` over `dst` with `src`'s top-left corner at `origin`, clipped to `dst`.
///
/// Rows are blended in parallel; a `src` entirely outside `dst` is a no-op.
pub fn paste_over(
    dst: &mut Raster,
    src: &Raster,
    origin: Point,
    opacity: f32,
) -> LayercastResult<()> {
    let ox = clip_origin(origin.x, dst.width, src.width);
    let oy = clip_origin(origin.y, dst.height, src.height);
    let (dw, dh) = (i64::from(dst.width), i64::from(dst.height));
    let (sw, sh) = (i64::from(src.width), i64::from(src.height));

    let x0 = ox.max(0);
    let y0 = oy.max(0);
    let x1 = (ox + sw).min(dw);
    let y1 = (oy + sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }

    let dst_stride = dst.stride();
    let src_stride = src.stride();
    let span = ((x1 - x0) * 4) as usize;
    let dst_col = (x0 * 4) as usize;
    let src_col = ((x0 - ox) * 4) as usize;
    let src_row0 = (y0 - oy) as usize;

    dst.data
        .par_chunks_mut(dst_stride)
        .skip(y0 as usize)
        .take((y1 - y0) as usize)
        .enumerate()
        .try_for_each(|(i, row)| {
            let s = (src_row0 + i) * src_stride + src_col;
            over_in_place(&mut row[dst_col..dst_col + span], &src.data[s..s + span], opacity)
        })
}

#[cfg(test)]
#[path = "../../tests/unit/composite/canvas.rs"]
mod tests;
