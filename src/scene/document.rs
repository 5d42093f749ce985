use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::foundation::core::{Point, Rgba8, Vec2};
use crate::foundation::error::{LayercastError, LayercastResult};
use crate::foundation::warning::ComposeWarning;
use crate::scene::color::ColorDef;
use crate::scene::layer::{
    Layer, LayerContent, ShapeContent, ShapeGeometry, TextContent,
};
use crate::scene::payload::{decode_data_url, probe_dimensions, read_rel_file};

const DEFAULT_FONT_SIZE: f64 = 24.0;

/// Editor document as sent by the authoring surface.
///
/// Layers are kept in document order; that order is the default paint order.
#[derive(Debug, Deserialize)]
pub struct Document {
    /// Editor canvas size.
    pub canvas: WireCanvas,
    /// Layers keyed by id.
    #[serde(default)]
    pub layers: serde_json::Map<String, serde_json::Value>,
    /// Secondary fit-to-view scale applied by the authoring surface.
    #[serde(default, alias = "displayScale")]
    pub display_scale: Option<f64>,
    /// Crop applied to the whole composition after painting.
    #[serde(default, alias = "cropPath")]
    pub crop_path: Option<Vec<WirePoint>>,
}

/// Editor canvas size in editor units.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct WireCanvas {
    /// Width in editor units.
    pub width: f64,
    /// Height in editor units.
    pub height: f64,
}

/// A vertex given either as `[x, y]` or `{"x": .., "y": ..}`.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(untagged)]
pub enum WirePoint {
    /// `[x, y]`.
    Pair([f64; 2]),
    /// `{"x": .., "y": ..}`.
    Obj {
        /// Horizontal coordinate.
        x: f64,
        /// Vertical coordinate.
        y: f64,
    },
}

impl WirePoint {
    fn to_point(self) -> Point {
        match self {
            Self::Pair([x, y]) | Self::Obj { x, y } => Point::new(x, y),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireLayer {
    #[serde(rename = "centerX")]
    center_x: Option<f64>,
    #[serde(rename = "centerY")]
    center_y: Option<f64>,
    #[serde(rename = "scaleX")]
    scale_x: Option<f64>,
    #[serde(rename = "scaleY")]
    scale_y: Option<f64>,
    angle: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    #[serde(rename = "flipX")]
    flip_x: Option<bool>,
    #[serde(rename = "flipY")]
    flip_y: Option<bool>,
    #[serde(rename = "type")]
    kind: Option<String>,
    shape: Option<String>,
    source: Option<String>,
    image_data: Option<String>,
    points: Option<Vec<WirePoint>>,
    crop_path: Option<Vec<WirePoint>>,
    text: Option<String>,
    #[serde(rename = "fontSize")]
    font_size: Option<f64>,
    #[serde(rename = "fontFamily")]
    font_family: Option<String>,
    fill: Option<ColorDef>,
    alpha: Option<f64>,
    opacity: Option<f64>,
    #[serde(alias = "strokeWidth")]
    stroke_width: Option<f64>,
    #[serde(alias = "paintOrder", alias = "zIndex")]
    paint_order: Option<i64>,
    visible: Option<bool>,
}

/// A parsed document: typed layers in editor space plus the composition-level settings.
#[derive(Clone, Debug)]
pub struct Scene {
    /// Editor canvas size.
    pub editor_canvas: kurbo::Size,
    /// Secondary fit-to-view scale, `1.0` when absent.
    pub display_scale: f64,
    /// Whole-canvas crop path in editor space.
    pub crop_path: Vec<Point>,
    /// Layers in document order.
    pub layers: Vec<Layer>,
    /// Entries that were skipped while loading.
    pub warnings: Vec<ComposeWarning>,
}

impl Scene {
    /// Create a scene directly from typed layers.
    pub fn new(editor_width: f64, editor_height: f64, layers: Vec<Layer>) -> LayercastResult<Self> {
        let editor_canvas = validate_editor_canvas(editor_width, editor_height)?;
        Ok(Self {
            editor_canvas,
            display_scale: 1.0,
            crop_path: Vec::new(),
            layers,
            warnings: Vec::new(),
        })
    }

    /// Parse a JSON document.
    ///
    /// Relative image `source` paths are resolved against `assets_root`; without a root, such
    /// layers are skipped with a warning.
    #[tracing::instrument(skip(json))]
    pub fn from_json_str(json: &str, assets_root: Option<&Path>) -> LayercastResult<Self> {
        let doc: Document = serde_json::from_str(json)?;
        Self::from_document(doc, assets_root)
    }

    /// Convert a deserialized [`Document`] into typed layers.
    pub fn from_document(doc: Document, assets_root: Option<&Path>) -> LayercastResult<Self> {
        let editor_canvas = validate_editor_canvas(doc.canvas.width, doc.canvas.height)?;
        let display_scale = match doc.display_scale {
            Some(s) if s.is_finite() && s > 0.0 => s,
            Some(s) => {
                return Err(LayercastError::validation(format!(
                    "display_scale must be finite and > 0, got {s}"
                )));
            }
            None => 1.0,
        };

        let mut layers = Vec::with_capacity(doc.layers.len());
        let mut warnings = Vec::new();
        for (index, (id, value)) in doc.layers.into_iter().enumerate() {
            let wire: WireLayer = match serde_json::from_value(value) {
                Ok(w) => w,
                Err(e) => {
                    warn_skip(&mut warnings, &id, format!("invalid layer object: {e}"));
                    continue;
                }
            };
            if wire.visible == Some(false) {
                tracing::debug!(layer = %id, "skipping hidden layer");
                continue;
            }
            match layer_from_wire(&id, wire, index as i64, editor_canvas, assets_root) {
                Ok(layer) => layers.push(layer),
                Err(w) => {
                    tracing::warn!(layer = %id, "{w}");
                    warnings.push(w);
                }
            }
        }

        Ok(Self {
            editor_canvas,
            display_scale,
            crop_path: points(doc.crop_path),
            layers,
            warnings,
        })
    }
}

fn validate_editor_canvas(width: f64, height: f64) -> LayercastResult<kurbo::Size> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(LayercastError::validation(format!(
            "canvas dimensions must be finite and > 0, got {width}x{height}"
        )));
    }
    Ok(kurbo::Size::new(width, height))
}

fn warn_skip(warnings: &mut Vec<ComposeWarning>, id: &str, reason: String) {
    let w = ComposeWarning::MalformedLayer {
        layer_id: id.to_owned(),
        reason,
    };
    tracing::warn!(layer = %id, "{w}");
    warnings.push(w);
}

fn points(wire: Option<Vec<WirePoint>>) -> Vec<Point> {
    wire.unwrap_or_default()
        .into_iter()
        .map(WirePoint::to_point)
        .collect()
}

fn malformed(id: &str, reason: impl Into<String>) -> ComposeWarning {
    ComposeWarning::MalformedLayer {
        layer_id: id.to_owned(),
        reason: reason.into(),
    }
}

fn is_base_source(source: Option<&str>) -> bool {
    matches!(
        source.map(str::to_ascii_lowercase).as_deref(),
        Some("base" | "original" | "background" | "source")
    )
}

fn layer_from_wire(
    id: &str,
    wire: WireLayer,
    index: i64,
    editor_canvas: kurbo::Size,
    assets_root: Option<&Path>,
) -> Result<Layer, ComposeWarning> {
    let kind = match wire.kind.as_deref().map(str::to_ascii_lowercase) {
        Some(k) => k,
        None if wire.text.is_some() => "text".to_owned(),
        None => return Err(malformed(id, "missing 'type'")),
    };
    let kind = if kind == "shape" {
        wire.shape
            .as_deref()
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| malformed(id, "shape layer without 'shape'"))?
    } else {
        kind
    };

    let shape_points = points(wire.points.clone());
    let content = match kind.as_str() {
        "base" | "base_image" | "background" => LayerContent::BaseImage,
        "image" if is_base_source(wire.source.as_deref()) => LayerContent::BaseImage,
        "image" | "supplied_image" => {
            let bytes = supplied_bytes(id, &wire, assets_root)?;
            LayerContent::SuppliedImage {
                bytes: Arc::new(bytes),
            }
        }
        "rect" | "rectangle" => shape(&wire, ShapeGeometry::Rectangle),
        "ellipse" | "circle" => shape(&wire, ShapeGeometry::Ellipse),
        "polygon" => {
            if shape_points.len() < 3 {
                return Err(malformed(id, "polygon needs at least 3 points"));
            }
            shape(&wire, ShapeGeometry::Polygon(shape_points.clone()))
        }
        "path" | "freehand" | "polyline" => {
            if shape_points.len() < 2 {
                return Err(malformed(id, "freehand path needs at least 2 points"));
            }
            shape(&wire, ShapeGeometry::Freehand(shape_points.clone()))
        }
        "text" | "i-text" | "textbox" => LayerContent::Text(TextContent {
            text: wire.text.clone().unwrap_or_default(),
            font_size: wire
                .font_size
                .filter(|s| s.is_finite() && *s > 0.0)
                .unwrap_or(DEFAULT_FONT_SIZE),
            font_family: wire.font_family.clone(),
            fill: wire.fill.map(ColorDef::to_rgba8).unwrap_or(Rgba8::BLACK),
        }),
        other => return Err(malformed(id, format!("unknown layer type '{other}'"))),
    };

    let (width, height) = native_size(id, &wire, &content, &shape_points, editor_canvas)?;

    let (scale_x, flip_x) = signed_scale(wire.scale_x, wire.flip_x);
    let (scale_y, flip_y) = signed_scale(wire.scale_y, wire.flip_y);
    let angle = wire.angle.unwrap_or(0.0);
    let center = Point::new(
        wire.center_x.unwrap_or(editor_canvas.width / 2.0),
        wire.center_y.unwrap_or(editor_canvas.height / 2.0),
    );
    if ![scale_x, scale_y, angle, center.x, center.y]
        .iter()
        .all(|v| v.is_finite())
    {
        return Err(malformed(id, "non-finite transform value"));
    }

    Ok(Layer {
        id: id.to_owned(),
        center,
        scale: Vec2::new(scale_x, scale_y),
        angle_deg: angle,
        flip_x,
        flip_y,
        width,
        height,
        opacity: wire.opacity.map(|o| o.clamp(0.0, 1.0) as f32).unwrap_or(1.0),
        content,
        crop_path: points(wire.crop_path),
        paint_order: wire.paint_order.unwrap_or(index),
    })
}

// A negative scale is folded into the flip flag so scale stays positive.
fn signed_scale(scale: Option<f64>, flip: Option<bool>) -> (f64, bool) {
    let s = scale.unwrap_or(1.0);
    let flip = flip.unwrap_or(false);
    if s < 0.0 { (-s, !flip) } else { (s, flip) }
}

fn shape(wire: &WireLayer, geometry: ShapeGeometry) -> LayerContent {
    LayerContent::VectorShape(ShapeContent {
        geometry,
        fill: wire.fill.map(ColorDef::to_rgba8).unwrap_or(Rgba8::BLACK),
        alpha: wire.alpha.map(|a| a.clamp(0.0, 1.0) as f32).unwrap_or(1.0),
        stroke_width: wire.stroke_width.filter(|w| w.is_finite() && *w > 0.0),
    })
}

fn supplied_bytes(
    id: &str,
    wire: &WireLayer,
    assets_root: Option<&Path>,
) -> Result<Vec<u8>, ComposeWarning> {
    let undecodable = |reason: String| ComposeWarning::UndecodableContent {
        layer_id: id.to_owned(),
        reason,
    };
    if let Some(data) = wire.image_data.as_deref() {
        return decode_data_url(data).map_err(|e| undecodable(format!("{e:#}")));
    }
    match (wire.source.as_deref(), assets_root) {
        (Some(rel), Some(root)) => read_rel_file(root, rel).map_err(|e| undecodable(e.to_string())),
        (Some(rel), None) => Err(undecodable(format!(
            "image source '{rel}' given without an assets root"
        ))),
        (None, _) => Err(malformed(id, "image layer without 'image_data' or 'source'")),
    }
}

fn native_size(
    id: &str,
    wire: &WireLayer,
    content: &LayerContent,
    shape_points: &[Point],
    editor_canvas: kurbo::Size,
) -> Result<(f64, f64), ComposeWarning> {
    let given = match (wire.width, wire.height) {
        (Some(w), Some(h)) if w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0 => {
            return Ok((w, h));
        }
        (None, None) => None,
        (w, h) => Some((w, h)),
    };

    match content {
        LayerContent::BaseImage => Ok((editor_canvas.width, editor_canvas.height)),
        // Text is sized by its measured layout; the native box is informational.
        LayerContent::Text(_) => Ok((
            wire.width.filter(|w| *w > 0.0).unwrap_or(1.0),
            wire.height.filter(|h| *h > 0.0).unwrap_or(1.0),
        )),
        LayerContent::SuppliedImage { bytes } if given.is_none() => probe_dimensions(bytes)
            .map(|(w, h)| (f64::from(w), f64::from(h)))
            .map_err(|e| ComposeWarning::UndecodableContent {
                layer_id: id.to_owned(),
                reason: format!("{e:#}"),
            }),
        LayerContent::VectorShape(_) if given.is_none() && !shape_points.is_empty() => {
            let (w, h) = shape_points
                .iter()
                .fold((0.0f64, 0.0f64), |(w, h), p| (w.max(p.x), h.max(p.y)));
            if w > 0.0 && h > 0.0 {
                Ok((w, h))
            } else {
                Err(malformed(id, "points span a zero-area box"))
            }
        }
        _ => Err(malformed(
            id,
            format!(
                "width/height must be finite and > 0, got {:?}x{:?}",
                wire.width, wire.height
            ),
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/document.rs"]
mod tests;
