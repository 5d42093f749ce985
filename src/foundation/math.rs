pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

pub(crate) fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Map a unit float (opacity, alpha) into `0..=255`.
pub(crate) fn unit_to_u8(v: f32) -> u16 {
    if !v.is_finite() {
        return 255;
    }
    ((v.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u16
}

pub(crate) fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// Integer placement of a `src_len` span at `origin` along a `dst_len` axis.
///
/// Origins past either edge are pulled in to just outside it, so the span still misses `dst`
/// and later `origin + offset` arithmetic cannot overflow.
pub(crate) fn clip_origin(origin: f64, dst_len: u32, src_len: u32) -> i64 {
    let lo = -f64::from(src_len);
    let hi = f64::from(dst_len);
    if origin.is_nan() {
        return hi as i64;
    }
    origin.clamp(lo, hi) as i64
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
