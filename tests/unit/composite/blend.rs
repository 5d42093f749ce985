use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_dst_transparent_returns_scaled_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn half_alpha_red_over_white_is_pink() {
    let out = over([255, 255, 255, 255], [128, 0, 0, 128], 1.0);
    assert_eq!(out[3], 255);
    assert_eq!(out[0], 255);
    assert!(out[1].abs_diff(127) <= 1, "{out:?}");
}

#[test]
fn over_in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
}

#[test]
fn over_in_place_applies_opacity() {
    let mut dst = vec![0, 0, 0, 255, 0, 0, 0, 255];
    over_in_place(&mut dst, &[255, 255, 255, 255, 0, 0, 0, 0], 0.5).unwrap();
    assert_eq!(dst[..4], [128, 128, 128, 255]);
    assert_eq!(dst[4..], [0, 0, 0, 255]);
}

#[test]
fn mask_clears_and_scales() {
    let mut data = vec![200, 100, 50, 200, 200, 100, 50, 200, 200, 100, 50, 200];
    mask_in_place(&mut data, &[0, 255, 128]);
    assert_eq!(data[..4], [0, 0, 0, 0]);
    assert_eq!(data[4..8], [200, 100, 50, 200]);
    assert_eq!(data[8..], [100, 50, 25, 100]);
}
