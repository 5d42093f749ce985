use crate::foundation::warning::ComposeWarning;
use crate::scene::layer::{Layer, LayerKind};

/// Smallest editor-to-source scale factor the resolver will return.
pub const MIN_SCALE_FACTOR: f64 = 0.1;

/// Inputs of the editor-to-source scale computation, fixed for one composition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleContext {
    /// Editor canvas width.
    pub editor_canvas_width: f64,
    /// Editor canvas height.
    pub editor_canvas_height: f64,
    /// Source raster width in pixels.
    pub source_width: f64,
    /// Source raster height in pixels.
    pub source_height: f64,
    /// Fit-to-view scale baked into the authored base layer size.
    pub prior_display_scale: f64,
}

impl ScaleContext {
    /// Context with `prior_display_scale = 1.0`.
    pub fn new(editor: (f64, f64), source: (f64, f64)) -> Self {
        Self {
            editor_canvas_width: editor.0,
            editor_canvas_height: editor.1,
            source_width: source.0,
            source_height: source.1,
            prior_display_scale: 1.0,
        }
    }

    /// Return the context with a prior display scale.
    pub fn with_prior_display_scale(mut self, scale: f64) -> Self {
        self.prior_display_scale = scale;
        self
    }
}

/// Result of [`resolve`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleResolution {
    /// Factor applied to every editor-space length.
    pub factor: f64,
    /// Factor computed before clamping.
    pub raw: f64,
    /// `true` when `raw` was non-finite or below [`MIN_SCALE_FACTOR`].
    pub clamped: bool,
}

impl ScaleResolution {
    /// Unit factor used when there is nothing to scale against.
    pub const IDENTITY: Self = Self {
        factor: 1.0,
        raw: 1.0,
        clamped: false,
    };

    /// Warning describing the clamp, if one happened.
    pub fn warning(&self) -> Option<ComposeWarning> {
        self.clamped.then_some(ComposeWarning::DegenerateScale {
            raw: self.raw,
            clamped_to: self.factor,
        })
    }
}

/// Compute the editor-to-source scale factor.
///
/// The base image layer (lowest paint order) anchors the computation: its authored width and
/// height, times the prior display scale, are what the source raster was shown as. The factor is
/// the smaller of the two per-axis ratios so the result never overflows the source on either axis.
/// Without a base image layer the factor is 1.
pub fn resolve(ctx: &ScaleContext, layers: &[Layer]) -> ScaleResolution {
    let Some(base) = layers
        .iter()
        .filter(|l| l.kind() == LayerKind::BaseImage)
        .min_by_key(|l| l.paint_order)
    else {
        return ScaleResolution::IDENTITY;
    };

    let effective_w = base.width * ctx.prior_display_scale;
    let effective_h = base.height * ctx.prior_display_scale;
    let sx = ctx.source_width / effective_w;
    let sy = ctx.source_height / effective_h;
    let raw = sx.min(sy);

    if raw.is_finite() && raw >= MIN_SCALE_FACTOR {
        ScaleResolution {
            factor: raw,
            raw,
            clamped: false,
        }
    } else {
        ScaleResolution {
            factor: MIN_SCALE_FACTOR,
            raw,
            clamped: true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/scale.rs"]
mod tests;
