//! layercast is a resolution-independent layer transform and compositing engine.
//!
//! Layers are authored in an editor at whatever resolution the screen allowed; layercast replays
//! them onto the full-resolution source image:
//!
//! - Load a [`Scene`] (typed layers, or a JSON editor document)
//! - Resolve the editor-to-source scale factor and map every layer into source space
//! - Render each layer (decode, rasterize, resize, flip, rotate) in parallel
//! - Paint layers in order onto a canvas the size of the source, then apply crop masks
//!
//! [`compose`] runs the whole pipeline and returns a [`Composed`] raster plus the warnings for
//! anything that had to be skipped.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

/// Canvas compositing and crop masks.
pub mod composite;
/// Top-level composition entry points.
pub mod pipeline;
/// Layer rendering.
pub mod render;
/// Scene model and document loading.
pub mod scene;
/// Natural-language edit summaries.
pub mod summary;
/// Scale resolution and layer mapping.
pub mod transform;

pub use crate::assets::decode::decode_image;
pub use crate::assets::fonts::FontBook;
pub use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8, Rgba8Premul, Vec2};
pub use crate::foundation::error::{LayercastError, LayercastResult};
pub use crate::foundation::warning::ComposeWarning;

pub use crate::composite::canvas::{Compositor, composite, composite_checked};
pub use crate::composite::crop::CropMask;
pub use crate::pipeline::{CancelToken, ComposeOpts, Composed, compose, compose_with_cancel};
pub use crate::render::layer::RenderedLayer;
pub use crate::render::raster::Raster;
pub use crate::scene::color::parse_color;
pub use crate::scene::document::{Document, Scene};
pub use crate::scene::layer::{
    Layer, LayerContent, LayerKind, ShapeContent, ShapeGeometry, TextContent,
};
pub use crate::summary::describe_edits;
pub use crate::transform::mapper::{map_layer, map_layers};
pub use crate::transform::scale::{ScaleContext, ScaleResolution, resolve as resolve_scale};
