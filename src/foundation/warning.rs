use std::fmt;

/// A recovered, per-layer (or per-composition) problem.
///
/// Warnings never abort a composition; they are attached to the result so callers can surface
/// them. Each warning is also logged through `tracing` at the point it is raised.
#[derive(Clone, Debug, PartialEq)]
pub enum ComposeWarning {
    /// The resolved scale factor was non-finite or below the floor and was clamped.
    DegenerateScale {
        /// Factor computed from the inputs.
        raw: f64,
        /// Factor actually used.
        clamped_to: f64,
    },
    /// Image bytes could not be decoded; the layer was skipped.
    UndecodableContent {
        /// Offending layer.
        layer_id: String,
        /// Decoder message.
        reason: String,
    },
    /// The layer's pixel footprint rounds to zero on an axis; the layer was skipped.
    ZeroArea {
        /// Offending layer.
        layer_id: String,
    },
    /// A crop path with fewer than 3 vertices was treated as empty.
    InvalidPolygon {
        /// Owning layer, or `None` for the whole-canvas crop.
        layer_id: Option<String>,
        /// Number of vertices supplied.
        vertices: usize,
    },
    /// No font was available for a text layer; the layer was skipped.
    MissingFont {
        /// Offending layer.
        layer_id: String,
        /// Requested family, if any.
        family: Option<String>,
    },
    /// A document entry could not be turned into a layer; it was skipped.
    MalformedLayer {
        /// Offending layer.
        layer_id: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl ComposeWarning {
    /// Id of the layer the warning refers to, if it refers to one.
    pub fn layer_id(&self) -> Option<&str> {
        match self {
            Self::DegenerateScale { .. } => None,
            Self::InvalidPolygon { layer_id, .. } => layer_id.as_deref(),
            Self::UndecodableContent { layer_id, .. }
            | Self::ZeroArea { layer_id }
            | Self::MissingFont { layer_id, .. }
            | Self::MalformedLayer { layer_id, .. } => Some(layer_id),
        }
    }
}

impl fmt::Display for ComposeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateScale { raw, clamped_to } => {
                write!(f, "degenerate scale factor {raw} clamped to {clamped_to}")
            }
            Self::UndecodableContent { layer_id, reason } => {
                write!(f, "layer '{layer_id}' skipped: undecodable content ({reason})")
            }
            Self::ZeroArea { layer_id } => {
                write!(f, "layer '{layer_id}' skipped: zero-area footprint")
            }
            Self::InvalidPolygon {
                layer_id: Some(id),
                vertices,
            } => write!(f, "layer '{id}' crop path has {vertices} vertices; crop ignored"),
            Self::InvalidPolygon {
                layer_id: None,
                vertices,
            } => write!(f, "canvas crop path has {vertices} vertices; crop ignored"),
            Self::MissingFont {
                layer_id,
                family: Some(family),
            } => write!(f, "layer '{layer_id}' skipped: no font for family '{family}'"),
            Self::MissingFont {
                layer_id,
                family: None,
            } => write!(f, "layer '{layer_id}' skipped: no fonts registered"),
            Self::MalformedLayer { layer_id, reason } => {
                write!(f, "layer '{layer_id}' skipped: {reason}")
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/warning.rs"]
mod tests;
