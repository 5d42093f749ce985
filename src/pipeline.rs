use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::{
    assets::fonts::{FontBook, TextLayoutEngine},
    composite::canvas::composite_checked,
    composite::crop::{CropMask, invalid_crop_warning},
    foundation::core::{Canvas, Rgba8},
    foundation::error::{LayercastError, LayercastResult},
    foundation::warning::ComposeWarning,
    render::layer::{RenderInputs, RenderedLayer, render_layer},
    render::raster::Raster,
    scene::document::Scene,
    scene::layer::{Layer, LayerKind},
    transform::mapper::{map_layers, map_points},
    transform::scale::{ScaleContext, resolve},
};

/// Environment variable read by [`ComposeOpts::from_env`] to pick the worker thread count.
pub const THREADS_ENV: &str = "LAYERCAST_THREADS";

#[derive(Clone, Debug, PartialEq)]
/// Knobs for one composition.
pub struct ComposeOpts {
    /// Canvas fill painted under every layer.
    pub background: Rgba8,
    /// Copy the source raster straight through when the document is an unedited base image.
    pub fast_path: bool,
    /// Optional explicit worker thread count for layer rendering.
    pub threads: Option<usize>,
}

impl Default for ComposeOpts {
    fn default() -> Self {
        Self {
            background: Rgba8::WHITE,
            fast_path: true,
            threads: None,
        }
    }
}

impl ComposeOpts {
    /// Defaults, with `threads` taken from `LAYERCAST_THREADS` when set.
    pub fn from_env() -> LayercastResult<Self> {
        let threads = match std::env::var(THREADS_ENV) {
            Ok(raw) => Some(parse_threads(&raw)?),
            Err(std::env::VarError::NotPresent) => None,
            Err(e) => {
                return Err(LayercastError::validation(format!("{THREADS_ENV}: {e}")));
            }
        };
        Ok(Self {
            threads,
            ..Self::default()
        })
    }

    /// Return the options with a different background.
    pub fn with_background(mut self, background: Rgba8) -> Self {
        self.background = background;
        self
    }

    /// Return the options with the fast path enabled or disabled.
    pub fn with_fast_path(mut self, enabled: bool) -> Self {
        self.fast_path = enabled;
        self
    }

    /// Return the options with an explicit worker thread count.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }
}

fn parse_threads(raw: &str) -> LayercastResult<usize> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(LayercastError::validation(format!(
            "{THREADS_ENV} must be an integer >= 1, got '{raw}'"
        ))),
    }
}

/// Cooperative cancellation flag shared between a caller and a running composition.
///
/// The pipeline checks it before each layer render and between pastes.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Return `true` once [`CancelToken::cancel`] was called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn check(&self) -> LayercastResult<()> {
        if self.is_cancelled() {
            Err(LayercastError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Result of a composition.
#[derive(Clone, Debug)]
pub struct Composed {
    /// Flattened output at source resolution (premultiplied RGBA8).
    pub raster: Raster,
    /// Editor-to-source scale factor that was applied.
    pub scale_factor: f64,
    /// Layers after mapping into source space, in document order.
    pub mapped_layers: Vec<Layer>,
    /// Everything that was recovered from along the way.
    pub warnings: Vec<ComposeWarning>,
    /// `true` when the source raster was passed through untouched.
    pub fast_path: bool,
}

enum LayerOutcome {
    Rendered(RenderedLayer),
    Skipped(ComposeWarning),
    Cancelled,
}

/// Compose `scene` over `source` at the source resolution.
///
/// `source` is the raster painted by base image layers; its size is the output canvas size. When
/// it is `None`, the editor canvas size is used and base image layers paint nothing.
///
/// Per-layer problems are recovered and listed in [`Composed::warnings`]. Errors are reserved for
/// an empty canvas, a bad thread configuration and cancellation.
pub fn compose(
    scene: &Scene,
    source: Option<&Raster>,
    fonts: &FontBook,
    opts: &ComposeOpts,
) -> LayercastResult<Composed> {
    compose_with_cancel(scene, source, fonts, opts, &CancelToken::new())
}

/// [`compose`] with a cancellation token.
#[tracing::instrument(skip_all, fields(layers = scene.layers.len()))]
pub fn compose_with_cancel(
    scene: &Scene,
    source: Option<&Raster>,
    fonts: &FontBook,
    opts: &ComposeOpts,
    cancel: &CancelToken,
) -> LayercastResult<Composed> {
    let canvas = match source {
        Some(src) => src.canvas()?,
        None => Canvas::new(
            scene.editor_canvas.width.round() as u32,
            scene.editor_canvas.height.round() as u32,
        )?,
    };
    if let Some(n) = opts.threads
        && n == 0
    {
        return Err(LayercastError::validation("'threads' must be >= 1 when set"));
    }

    let mut warnings = scene.warnings.clone();
    let scale_ctx = ScaleContext::new(
        (scene.editor_canvas.width, scene.editor_canvas.height),
        (f64::from(canvas.width), f64::from(canvas.height)),
    )
    .with_prior_display_scale(scene.display_scale);
    let resolution = resolve(&scale_ctx, &scene.layers);
    if let Some(w) = resolution.warning() {
        tracing::warn!("{w}");
        warnings.push(w);
    }
    let factor = resolution.factor;
    tracing::debug!(factor, width = canvas.width, height = canvas.height, "resolved scale");

    let mapped = map_layers(&scene.layers, factor);
    let canvas_crop = map_points(&scene.crop_path, factor);

    if mapped.is_empty() {
        tracing::debug!("no layers; returning the unmodified source");
        let raster = match source {
            Some(src) => src.clone(),
            None => Raster::filled(canvas.width, canvas.height, opts.background.premultiplied()),
        };
        return Ok(Composed {
            raster,
            scale_factor: factor,
            mapped_layers: mapped,
            warnings,
            fast_path: false,
        });
    }

    if opts.fast_path
        && let Some(src) = source
        && is_unedited_base(&mapped, canvas)
        && canvas_crop.is_empty()
    {
        tracing::debug!("single identity base image; copying source through");
        return Ok(Composed {
            raster: src.clone(),
            scale_factor: factor,
            mapped_layers: mapped,
            warnings,
            fast_path: true,
        });
    }

    for layer in &mapped {
        if let Some(w) = invalid_crop_warning(Some(&layer.id), &layer.crop_path) {
            tracing::warn!(layer = %layer.id, "{w}");
            warnings.push(w);
        }
    }

    cancel.check()?;
    let inputs = RenderInputs { source, fonts };
    let outcomes = run_in_pool(opts.threads, || {
        mapped
            .par_iter()
            .map_init(TextLayoutEngine::new, |engine, layer| {
                if cancel.is_cancelled() {
                    return LayerOutcome::Cancelled;
                }
                match render_layer(layer, &inputs, engine) {
                    Ok(mut rendered) => {
                        if let Some(mask) = CropMask::rasterize(canvas, &layer.crop_path) {
                            let origin = rendered.paint_origin();
                            mask.apply_to_layer(&mut rendered.raster, origin);
                        }
                        LayerOutcome::Rendered(rendered)
                    }
                    Err(w) => LayerOutcome::Skipped(w),
                }
            })
            .collect::<Vec<_>>()
    })?;

    let mut rendered = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            LayerOutcome::Rendered(r) => rendered.push(r),
            LayerOutcome::Skipped(w) => {
                tracing::warn!(layer = w.layer_id().unwrap_or_default(), "{w}");
                warnings.push(w);
            }
            LayerOutcome::Cancelled => return Err(LayercastError::Cancelled),
        }
    }

    let mut raster = composite_checked(canvas, opts.background, rendered, || cancel.check())?;

    if let Some(w) = invalid_crop_warning(None, &canvas_crop) {
        tracing::warn!("{w}");
        warnings.push(w);
    }
    if let Some(mask) = CropMask::rasterize(canvas, &canvas_crop) {
        mask.apply_to_canvas(&mut raster)?;
    }

    Ok(Composed {
        raster,
        scale_factor: factor,
        mapped_layers: mapped,
        warnings,
        fast_path: false,
    })
}

fn is_unedited_base(mapped: &[Layer], canvas: Canvas) -> bool {
    let [layer] = mapped else {
        return false;
    };
    layer.kind() == LayerKind::BaseImage && layer.is_identity_on(canvas)
}

fn run_in_pool<R: Send>(threads: Option<usize>, f: impl FnOnce() -> R + Send) -> LayercastResult<R> {
    match threads {
        Some(n) => Ok(build_thread_pool(n)?.install(f)),
        None => Ok(f()),
    }
}

fn build_thread_pool(threads: usize) -> LayercastResult<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| LayercastError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
