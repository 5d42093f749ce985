use crate::assets::fonts::{TextBrushRgba8, TextLayoutEngine};
use crate::foundation::core::{Affine, Vec2};
use crate::foundation::error::{LayercastError, LayercastResult};
use crate::render::cpu::{MAX_VELLO_DIM, affine_to_cpu, render_offscreen};
use crate::render::raster::Raster;
use crate::scene::layer::TextContent;

/// A font picked from the [`FontBook`](crate::FontBook) for one text layer.
pub(crate) struct ResolvedFont<'a> {
    pub(crate) name: &'a str,
    pub(crate) bytes: &'a [u8],
}

/// Lay out `text` at its font size and rasterize it into a buffer sized to the measured box,
/// stretched by `scale`.
///
/// Returns `Ok(None)` when the measured box is empty (for example, blank text).
pub(crate) fn rasterize_text(
    text: &TextContent,
    scale: Vec2,
    font: ResolvedFont<'_>,
    engine: &mut TextLayoutEngine,
) -> LayercastResult<Option<Raster>> {
    let fill = text.fill;
    let brush = TextBrushRgba8 {
        r: fill.r,
        g: fill.g,
        b: fill.b,
        a: fill.a,
    };
    let layout = engine.layout_plain(
        &text.text,
        font.name,
        font.bytes,
        text.font_size as f32,
        brush,
    )?;

    let w = (f64::from(layout.width()) * scale.x).ceil();
    let h = (f64::from(layout.height()) * scale.y).ceil();
    if !(w >= 1.0 && h >= 1.0) {
        return Ok(None);
    }
    if w > f64::from(MAX_VELLO_DIM) || h > f64::from(MAX_VELLO_DIM) {
        return Err(LayercastError::evaluation(format!(
            "text box {w}x{h} exceeds the rasterizer limit"
        )));
    }

    let glyph_font = engine.glyph_font(font.name, font.bytes);
    let xf = Affine::scale_non_uniform(scale.x, scale.y);
    let raster = render_offscreen(w as u32, h as u32, |ctx| {
        ctx.set_transform(affine_to_cpu(xf));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&glyph_font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    })?;
    Ok(Some(raster))
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
