use std::sync::Arc;

use crate::foundation::core::{Canvas, Point, Rgba8, Vec2};
use crate::foundation::math::approx_eq;

/// Content kind of a layer, without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// The source photo being edited.
    BaseImage,
    /// An encoded image supplied by the user.
    SuppliedImage,
    /// A filled vector annotation shape.
    VectorShape,
    /// A text label.
    Text,
}

impl LayerKind {
    /// Lowercase name used in logs and summaries.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BaseImage => "base image",
            Self::SuppliedImage => "image",
            Self::VectorShape => "shape",
            Self::Text => "text",
        }
    }
}

/// Geometry of a vector annotation shape.
///
/// Polygon and freehand points are in layer-local native coordinates, with the origin at the
/// top-left corner of the layer's `width x height` box.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeGeometry {
    /// Axis-aligned rectangle filling the native box.
    Rectangle,
    /// Ellipse inscribed in the native box.
    Ellipse,
    /// Closed polygon.
    Polygon(Vec<Point>),
    /// Open freehand path; stroked when the shape has a stroke width, filled otherwise.
    Freehand(Vec<Point>),
}

impl ShapeGeometry {
    /// Lowercase name used in logs and summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
            Self::Polygon(_) => "polygon",
            Self::Freehand(_) => "freehand stroke",
        }
    }
}

/// Payload of a [`LayerContent::VectorShape`] layer.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeContent {
    /// Geometry to rasterize.
    pub geometry: ShapeGeometry,
    /// Fill (or stroke) color.
    pub fill: Rgba8,
    /// Alpha multiplier applied to `fill`, in `[0, 1]`.
    pub alpha: f32,
    /// Stroke width in native units; only used by freehand geometry.
    pub stroke_width: Option<f64>,
}

/// Payload of a [`LayerContent::Text`] layer.
#[derive(Clone, Debug, PartialEq)]
pub struct TextContent {
    /// Text to lay out; `\n` starts a new line.
    pub text: String,
    /// Font size in layer units.
    pub font_size: f64,
    /// Requested font family, resolved through a [`FontBook`](crate::FontBook).
    pub font_family: Option<String>,
    /// Glyph color.
    pub fill: Rgba8,
}

/// What a layer paints, one variant per content kind.
#[derive(Clone, Debug)]
pub enum LayerContent {
    /// The source raster handed alongside the document.
    BaseImage,
    /// Encoded image bytes, already resident in memory.
    SuppliedImage {
        /// Encoded bytes (PNG, JPEG, ...).
        bytes: Arc<Vec<u8>>,
    },
    /// Procedurally rasterized vector shape.
    VectorShape(ShapeContent),
    /// Procedurally rasterized text.
    Text(TextContent),
}

impl LayerContent {
    /// Kind tag of this content.
    pub fn kind(&self) -> LayerKind {
        match self {
            Self::BaseImage => LayerKind::BaseImage,
            Self::SuppliedImage { .. } => LayerKind::SuppliedImage,
            Self::VectorShape(_) => LayerKind::VectorShape,
            Self::Text(_) => LayerKind::Text,
        }
    }
}

/// One layer's transform record plus its content.
///
/// Transforms are center based: the layer's native `width x height` box is scaled by `scale`,
/// mirrored by the flip flags, rotated clockwise by `angle_deg` about its center and finally
/// placed so that its center lands on `center`.
#[derive(Clone, Debug)]
pub struct Layer {
    /// Stable id, the key of the layer in the document.
    pub id: String,
    /// Geometric center.
    pub center: Point,
    /// Multipliers applied to the native size; always positive.
    pub scale: Vec2,
    /// Clockwise rotation in degrees.
    pub angle_deg: f64,
    /// Mirror horizontally before rotation.
    pub flip_x: bool,
    /// Mirror vertically before rotation.
    pub flip_y: bool,
    /// Native (unscaled) content width.
    pub width: f64,
    /// Native (unscaled) content height.
    pub height: f64,
    /// Layer opacity in `[0, 1]`.
    pub opacity: f32,
    /// Layer content.
    pub content: LayerContent,
    /// Crop polygon in the same space as `center`; empty means no crop.
    pub crop_path: Vec<Point>,
    /// Paint order; layers are painted ascending.
    pub paint_order: i64,
}

impl Layer {
    /// Create a layer with a neutral transform centered on `center`.
    pub fn new(id: impl Into<String>, content: LayerContent, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            center: Point::new(width / 2.0, height / 2.0),
            scale: Vec2::new(1.0, 1.0),
            angle_deg: 0.0,
            flip_x: false,
            flip_y: false,
            width,
            height,
            opacity: 1.0,
            content,
            crop_path: Vec::new(),
            paint_order: 0,
        }
    }

    /// Return the layer moved to `center`.
    pub fn with_center(mut self, x: f64, y: f64) -> Self {
        self.center = Point::new(x, y);
        self
    }

    /// Return the layer with scale factors `(x, y)`.
    pub fn with_scale(mut self, x: f64, y: f64) -> Self {
        self.scale = Vec2::new(x, y);
        self
    }

    /// Return the layer rotated clockwise by `angle_deg`.
    pub fn with_angle(mut self, angle_deg: f64) -> Self {
        self.angle_deg = angle_deg;
        self
    }

    /// Return the layer with the given flip flags.
    pub fn with_flip(mut self, flip_x: bool, flip_y: bool) -> Self {
        self.flip_x = flip_x;
        self.flip_y = flip_y;
        self
    }

    /// Return the layer with the given opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Return the layer with a crop polygon.
    pub fn with_crop_path(mut self, path: Vec<Point>) -> Self {
        self.crop_path = path;
        self
    }

    /// Return the layer with an explicit paint order.
    pub fn with_paint_order(mut self, order: i64) -> Self {
        self.paint_order = order;
        self
    }

    /// Kind tag of this layer's content.
    pub fn kind(&self) -> LayerKind {
        self.content.kind()
    }

    /// Final pixel footprint `(width * scale.x, height * scale.y)`.
    pub fn footprint(&self) -> (f64, f64) {
        (self.width * self.scale.x, self.height * self.scale.y)
    }

    /// Axis-aligned bounds of the scaled (unrotated) box around `center`.
    pub fn bounds(&self) -> kurbo::Rect {
        let (w, h) = self.footprint();
        kurbo::Rect::from_center_size(self.center, (w, h))
    }

    /// Return `true` when this layer's footprint exactly covers `canvas` with no rotation, flip,
    /// crop or transparency.
    ///
    /// Used to detect the "no edit" composition of a lone base image.
    pub fn is_identity_on(&self, canvas: Canvas) -> bool {
        const EPS: f64 = 1e-3;
        let c = canvas.center();
        let (w, h) = self.footprint();
        w.round() == f64::from(canvas.width)
            && h.round() == f64::from(canvas.height)
            && approx_eq(self.angle_deg.rem_euclid(360.0), 0.0, EPS)
            && !self.flip_x
            && !self.flip_y
            && approx_eq(self.center.x, c.x, 0.5)
            && approx_eq(self.center.y, c.y, 0.5)
            && self.crop_path.is_empty()
            && self.opacity >= 1.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/layer.rs"]
mod tests;
