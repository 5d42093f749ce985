use anyhow::Context;

use crate::foundation::error::LayercastResult;
use crate::render::raster::{Raster, premultiply_rgba8_in_place};

/// Decode encoded image bytes (any format the `image` crate reads) into a premultiplied raster.
pub fn decode_image(bytes: &[u8]) -> LayercastResult<Raster> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Raster::from_premul_bytes(width, height, rgba8_premul)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
