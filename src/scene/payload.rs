use std::io::Cursor;
use std::path::Path;

use anyhow::Context;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};

use crate::foundation::error::{LayercastError, LayercastResult};

/// Decode an inline image payload.
///
/// Accepts `data:<mime>;base64,<payload>` URLs as produced by browser canvases, or a bare base64
/// string.
pub(crate) fn decode_data_url(s: &str) -> anyhow::Result<Vec<u8>> {
    let s = s.trim();
    let payload = if let Some(rest) = s.strip_prefix("data:") {
        let (meta, data) = rest
            .split_once(',')
            .context("data url is missing the ',' separator")?;
        if !meta.ends_with(";base64") {
            anyhow::bail!("only base64 data urls are supported");
        }
        data
    } else {
        s
    };
    BASE64_STANDARD
        .decode(payload.trim())
        .context("decode base64 image payload")
}

/// Normalize and validate document-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub(crate) fn normalize_rel_path(source: &str) -> LayercastResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(LayercastError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(LayercastError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(LayercastError::validation(
                "asset paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(LayercastError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

/// Read a document-relative image file from `root`.
pub(crate) fn read_rel_file(root: &Path, rel: &str) -> LayercastResult<Vec<u8>> {
    let norm = normalize_rel_path(rel)?;
    let p = root.join(Path::new(&norm));
    std::fs::read(&p).map_err(|e| {
        LayercastError::evaluation(format!("failed to read asset '{}': {e}", p.display()))
    })
}

/// Read the pixel dimensions of encoded image bytes without decoding the pixels.
pub(crate) fn probe_dimensions(bytes: &[u8]) -> anyhow::Result<(u32, u32)> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .context("guess image format")?;
    reader.into_dimensions().context("read image dimensions")
}

#[cfg(test)]
#[path = "../../tests/unit/scene/payload.rs"]
mod tests;
