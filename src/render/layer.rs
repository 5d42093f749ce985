use crate::assets::decode::decode_image;
use crate::assets::fonts::{FontBook, TextLayoutEngine};
use crate::foundation::core::Point;
use crate::foundation::error::LayercastResult;
use crate::foundation::warning::ComposeWarning;
use crate::render::cpu::MAX_VELLO_DIM;
use crate::render::raster::Raster;
use crate::render::resample::{resize_to, rotate_about_center};
use crate::render::shape::rasterize_shape;
use crate::render::text::{ResolvedFont, rasterize_text};
use crate::scene::layer::{Layer, LayerContent};

/// A layer's final pixels, ready to paste, together with the (mapped) record that produced them.
#[derive(Clone, Debug)]
pub struct RenderedLayer {
    /// Mapped layer record.
    pub layer: Layer,
    /// Flipped and rotated content; rotation never changes its size.
    pub raster: Raster,
}

impl RenderedLayer {
    /// Top-left canvas position such that the buffer center lands on the layer center.
    pub fn paint_origin(&self) -> Point {
        paint_origin(self.layer.center, self.raster.width, self.raster.height)
    }
}

/// Integer paint origin for a `width x height` buffer centered on `center`.
pub fn paint_origin(center: Point, width: u32, height: u32) -> Point {
    Point::new(
        (center.x - f64::from(width) / 2.0).round(),
        (center.y - f64::from(height) / 2.0).round(),
    )
}

/// Resources shared by every layer of one composition.
pub(crate) struct RenderInputs<'a> {
    /// Raster painted by `BaseImage` layers.
    pub(crate) source: Option<&'a Raster>,
    /// Fonts for text layers.
    pub(crate) fonts: &'a FontBook,
}

/// Render one mapped layer: native content, resize to footprint, flip, then rotate in place.
///
/// Per-layer failures are returned as the warning that explains the skip; the caller decides
/// whether to keep going.
#[tracing::instrument(skip_all, fields(layer = %layer.id, kind = layer.kind().as_str()))]
pub(crate) fn render_layer(
    layer: &Layer,
    inputs: &RenderInputs<'_>,
    engine: &mut TextLayoutEngine,
) -> Result<RenderedLayer, ComposeWarning> {
    let zero_area = || ComposeWarning::ZeroArea {
        layer_id: layer.id.clone(),
    };
    let failed = |what: String| ComposeWarning::UndecodableContent {
        layer_id: layer.id.clone(),
        reason: what,
    };
    // Text is sized by its measured layout, everything else by its footprint.
    let footprint = || {
        let (fw, fh) = layer.footprint();
        let (w, h) = (fw.round(), fh.round());
        if !(w >= 1.0 && h >= 1.0) {
            return Err(zero_area());
        }
        if w > f64::from(MAX_VELLO_DIM) || h > f64::from(MAX_VELLO_DIM) {
            return Err(failed(format!("footprint {w}x{h} exceeds the rasterizer limit")));
        }
        Ok((w as u32, h as u32))
    };

    let fitted = match &layer.content {
        LayerContent::BaseImage => {
            let (w, h) = footprint()?;
            let src = inputs
                .source
                .cloned()
                .unwrap_or_else(|| Raster::transparent(w, h));
            resize_to(src, w, h).map_err(|e| failed(e.to_string()))?
        }
        LayerContent::SuppliedImage { bytes } => {
            let (w, h) = footprint()?;
            let decoded = decode_image(bytes).map_err(|e| ComposeWarning::UndecodableContent {
                layer_id: layer.id.clone(),
                reason: format!("{e:#}"),
            })?;
            resize_to(decoded, w, h).map_err(|e| failed(e.to_string()))?
        }
        LayerContent::VectorShape(shape) => {
            let (w, h) = footprint()?;
            rasterize_shape(shape, layer.width, layer.height, w, h)
                .map_err(|e| failed(e.to_string()))?
        }
        LayerContent::Text(text) => {
            let Some((name, bytes)) = inputs.fonts.resolve(text.font_family.as_deref()) else {
                return Err(ComposeWarning::MissingFont {
                    layer_id: layer.id.clone(),
                    family: text.font_family.clone(),
                });
            };
            let font = ResolvedFont { name, bytes };
            rasterize_text(text, layer.scale, font, engine)
                .map_err(|e| failed(e.to_string()))?
                .ok_or_else(zero_area)?
        }
    };

    finish(fitted, layer).map_err(|e| failed(e.to_string()))
}

fn finish(mut raster: Raster, layer: &Layer) -> LayercastResult<RenderedLayer> {
    if layer.flip_x {
        raster.flip_horizontal();
    }
    if layer.flip_y {
        raster.flip_vertical();
    }
    let raster = rotate_about_center(raster, layer.angle_deg)?;
    Ok(RenderedLayer {
        layer: layer.clone(),
        raster,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/layer.rs"]
mod tests;
