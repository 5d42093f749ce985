use crate::foundation::core::Rgba8;
use crate::foundation::error::{LayercastError, LayercastResult};
use serde::Deserialize;

/// Color as it appears in editor documents.
///
/// Accepted forms: `"#rgb"`, `"#rrggbb"`, `"#rrggbbaa"`, CSS `rgb(..)`/`rgba(..)` strings, a small
/// set of CSS names, `{r,g,b,a}` objects (0..1 floats) and `[r,g,b(,a)]` arrays (0..1 floats).
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ColorDef {
    pub(crate) r: f64,
    pub(crate) g: f64,
    pub(crate) b: f64,
    pub(crate) a: f64,
}

impl ColorDef {
    pub(crate) fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub(crate) fn to_rgba8(self) -> Rgba8 {
        fn to_u8(x: f64) -> u8 {
            if !x.is_finite() {
                return 0;
            }
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        Rgba8 {
            r: to_u8(self.r),
            g: to_u8(self.g),
            b: to_u8(self.b),
            a: to_u8(self.a),
        }
    }
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => parse_color_str(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
            Repr::Arr(v) => {
                if v.len() == 3 {
                    Ok(Self::rgba(v[0], v[1], v[2], 1.0))
                } else if v.len() == 4 {
                    Ok(Self::rgba(v[0], v[1], v[2], v[3]))
                } else {
                    Err(serde::de::Error::custom(
                        "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                    ))
                }
            }
        }
    }
}

/// Parse a color string (`#rrggbb`, `rgb(..)`, a CSS name, ...) into straight-alpha RGBA8.
pub fn parse_color(s: &str) -> LayercastResult<Rgba8> {
    parse_color_str(s)
        .map(ColorDef::to_rgba8)
        .map_err(LayercastError::validation)
}

pub(crate) fn parse_color_str(s: &str) -> Result<ColorDef, String> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = s.to_ascii_lowercase();
    if let Some(args) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_css_rgb(args);
    }
    named(&lower).ok_or_else(|| format!("unrecognized color \"{s}\""))
}

fn parse_hex(s: &str) -> Result<ColorDef, String> {
    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err("hex color must be ascii".to_owned());
    }

    let (r, g, b, a) = match s.len() {
        3 => {
            let nib = |i: usize| hex_byte(&s[i..i + 1]).map(|v| v * 17);
            (nib(0)?, nib(1)?, nib(2)?, 255)
        }
        6 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            255,
        ),
        8 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        ),
        _ => {
            return Err("hex color must be #RGB, #RRGGBB or #RRGGBBAA".to_owned());
        }
    };

    Ok(ColorDef::rgba(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        f64::from(a) / 255.0,
    ))
}

// CSS channel values are 0..255, alpha is 0..1.
fn parse_css_rgb(args: &str) -> Result<ColorDef, String> {
    let parts = args
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid rgb() component: {e}"))?;
    match parts.as_slice() {
        [r, g, b] => Ok(ColorDef::rgba(r / 255.0, g / 255.0, b / 255.0, 1.0)),
        [r, g, b, a] => Ok(ColorDef::rgba(r / 255.0, g / 255.0, b / 255.0, *a)),
        _ => Err("rgb()/rgba() expects 3 or 4 components".to_owned()),
    }
}

const NAMED: &[(&str, [u8; 4])] = &[
    ("black", [0, 0, 0, 255]),
    ("white", [255, 255, 255, 255]),
    ("red", [255, 0, 0, 255]),
    ("green", [0, 128, 0, 255]),
    ("lime", [0, 255, 0, 255]),
    ("blue", [0, 0, 255, 255]),
    ("yellow", [255, 255, 0, 255]),
    ("orange", [255, 165, 0, 255]),
    ("purple", [128, 0, 128, 255]),
    ("magenta", [255, 0, 255, 255]),
    ("fuchsia", [255, 0, 255, 255]),
    ("cyan", [0, 255, 255, 255]),
    ("aqua", [0, 255, 255, 255]),
    ("gray", [128, 128, 128, 255]),
    ("grey", [128, 128, 128, 255]),
    ("transparent", [0, 0, 0, 0]),
];

fn named(name: &str) -> Option<ColorDef> {
    let [r, g, b, a] = NAMED.iter().find(|(n, _)| *n == name)?.1;
    Some(ColorDef::rgba(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        f64::from(a) / 255.0,
    ))
}

/// Closest opaque named color, by squared RGB distance. Used for human-readable descriptions.
pub(crate) fn nearest_name(c: Rgba8) -> &'static str {
    let dist = |rgb: [u8; 4]| -> i32 {
        let dr = i32::from(c.r) - i32::from(rgb[0]);
        let dg = i32::from(c.g) - i32::from(rgb[1]);
        let db = i32::from(c.b) - i32::from(rgb[2]);
        dr * dr + dg * dg + db * db
    };
    NAMED
        .iter()
        .filter(|(_, rgb)| rgb[3] == 255)
        .min_by_key(|(_, rgb)| dist(*rgb))
        .map_or("black", |(name, _)| name)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/color.rs"]
mod tests;
