use crate::foundation::error::{LayercastError, LayercastResult};
use crate::foundation::math::{add_sat_u8, mul_div255_u8, unit_to_u8};

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Premultiplied source-over with an extra opacity multiplier on `src`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let op = unit_to_u8(opacity);
    over_u8(dst, src, op)
}

#[inline]
fn over_u8(dst: PremulRgba8, src: PremulRgba8, op: u16) -> PremulRgba8 {
    if op == 0 || src[3] == 0 {
        return dst;
    }
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Blend a run of `src` pixels over the same-length run of `dst` pixels.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> LayercastResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(LayercastError::evaluation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    let op = unit_to_u8(opacity);
    if op == 0 {
        return Ok(());
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over_u8([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], op);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Scale every pixel of `data` by the matching single-channel `coverage` value.
pub(crate) fn mask_in_place(data: &mut [u8], coverage: &[u8]) {
    for (px, &m) in data.chunks_exact_mut(4).zip(coverage) {
        match m {
            255 => {}
            0 => px.fill(0),
            m => {
                for c in px.iter_mut() {
                    *c = mul_div255_u8(u16::from(*c), u16::from(m));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/blend.rs"]
mod tests;
