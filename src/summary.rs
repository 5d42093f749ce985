//! Plain-language summary of the edits in a scene.
//!
//! The summary is what gets handed to prompt tooling downstream; it describes what the user did,
//! not how the pixels were produced.

use crate::foundation::math::approx_eq;
use crate::scene::color::nearest_name;
use crate::scene::document::Scene;
use crate::scene::layer::{Layer, LayerContent};

const MAX_QUOTED_CHARS: usize = 40;

/// Describe the edits in `scene` as one sentence per kind of change, in paint order.
///
/// Returns `"No edits."` for a scene that only shows the untouched photo.
pub fn describe_edits(scene: &Scene) -> String {
    let mut layers: Vec<&Layer> = scene.layers.iter().collect();
    layers.sort_by_key(|l| l.paint_order);

    let mut clauses = Vec::new();
    for layer in layers {
        describe_layer(layer, scene, &mut clauses);
    }
    if scene.crop_path.len() >= 3 {
        clauses.push("cropped the picture to a custom outline".to_owned());
    }

    if clauses.is_empty() {
        return "No edits.".to_owned();
    }
    let mut out = clauses.join("; ");
    if let Some(first) = out.get(..1).map(str::to_ascii_uppercase) {
        out.replace_range(..1, &first);
    }
    out.push('.');
    out
}

fn describe_layer(layer: &Layer, scene: &Scene, clauses: &mut Vec<String>) {
    let what = match &layer.content {
        LayerContent::BaseImage => {
            describe_base(layer, scene, clauses);
            return;
        }
        LayerContent::SuppliedImage { .. } => "an image".to_owned(),
        LayerContent::VectorShape(shape) => {
            let color = nearest_name(shape.fill);
            let translucent = if shape.alpha < 1.0 || shape.fill.a < 255 {
                "translucent "
            } else {
                ""
            };
            format!("a {translucent}{color} {}", shape.geometry.as_str())
        }
        LayerContent::Text(text) => format!("the text \"{}\"", quoted(&text.text)),
    };

    let mut clause = format!("added {what}");
    let angle = normalized_angle(layer.angle_deg);
    if angle != 0 {
        clause.push_str(&format!(" rotated {angle} degrees"));
    }
    if layer.flip_x || layer.flip_y {
        clause.push_str(" mirrored");
    }
    clause.push_str(&format!(" {}", placement(layer, scene)));
    clauses.push(clause);
}

fn describe_base(layer: &Layer, scene: &Scene, clauses: &mut Vec<String>) {
    let angle = normalized_angle(layer.angle_deg);
    if angle != 0 {
        clauses.push(format!("rotated the photo {angle} degrees"));
    }
    match (layer.flip_x, layer.flip_y) {
        (true, true) => clauses.push("flipped the photo both ways".to_owned()),
        (true, false) => clauses.push("mirrored the photo horizontally".to_owned()),
        (false, true) => clauses.push("flipped the photo vertically".to_owned()),
        (false, false) => {}
    }
    let (w, h) = layer.footprint();
    let fills = approx_eq(w, scene.editor_canvas.width, 0.5)
        && approx_eq(h, scene.editor_canvas.height, 0.5);
    if !fills {
        let ratio = (w * h) / (scene.editor_canvas.width * scene.editor_canvas.height);
        clauses.push(if ratio > 1.0 {
            "zoomed into the photo".to_owned()
        } else {
            "shrank the photo".to_owned()
        });
    }
    if layer.crop_path.len() >= 3 {
        clauses.push("cropped the photo".to_owned());
    }
}

fn normalized_angle(angle_deg: f64) -> i64 {
    let a = angle_deg.rem_euclid(360.0).round() as i64;
    if a == 360 { 0 } else { a }
}

fn quoted(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX_QUOTED_CHARS {
        flat
    } else {
        let cut: String = flat.chars().take(MAX_QUOTED_CHARS).collect();
        format!("{}...", cut.trim_end())
    }
}

// Thirds of the editor canvas, named the way a person would point at them.
fn placement(layer: &Layer, scene: &Scene) -> String {
    let fx = layer.center.x / scene.editor_canvas.width;
    let fy = layer.center.y / scene.editor_canvas.height;
    if !(0.0..=1.0).contains(&fx) || !(0.0..=1.0).contains(&fy) {
        return "outside the visible area".to_owned();
    }
    let row = match fy {
        y if y < 1.0 / 3.0 => Some("top"),
        y if y > 2.0 / 3.0 => Some("bottom"),
        _ => None,
    };
    let col = match fx {
        x if x < 1.0 / 3.0 => Some("left"),
        x if x > 2.0 / 3.0 => Some("right"),
        _ => None,
    };
    match (row, col) {
        (None, None) => "in the center".to_owned(),
        (Some(r), None) => format!("at the {r}"),
        (None, Some(c)) => format!("on the {c}"),
        (Some(r), Some(c)) => format!("in the {r} {c}"),
    }
}

#[cfg(test)]
#[path = "../tests/unit/summary.rs"]
mod tests;
