use super::*;
use crate::foundation::core::Rgba8Premul;

fn solid(w: u32, h: u32, px: [u8; 4]) -> Raster {
    Raster::from_premul_bytes(w, h, px.repeat((w * h) as usize)).unwrap()
}

#[test]
fn resize_within_epsilon_is_identity() {
    let src = solid(4, 4, [10, 20, 30, 255]);
    let out = resize_to(src.clone(), 4, 4).unwrap();
    assert_eq!(out, src);
}

#[test]
fn resize_constant_image_stays_constant() {
    let src = solid(4, 2, [200, 100, 50, 255]);
    let out = resize_to(src, 10, 7).unwrap();
    assert_eq!((out.width, out.height), (10, 7));
    for px in out.data.chunks_exact(4) {
        assert!(px[0].abs_diff(200) <= 2, "{px:?}");
        assert!(px[1].abs_diff(100) <= 2, "{px:?}");
        assert!(px[3] >= 254, "{px:?}");
    }
}

#[test]
fn resize_keeps_channels_below_alpha() {
    let mut src = Raster::transparent(8, 1);
    for x in 4..8 {
        let i = x * 4;
        src.data[i..i + 4].copy_from_slice(&[255, 255, 255, 255]);
    }
    let out = resize_to(src, 23, 3).unwrap();
    for px in out.data.chunks_exact(4) {
        assert!(px[0] <= px[3] && px[1] <= px[3] && px[2] <= px[3], "{px:?}");
    }
}

#[test]
fn resize_rejects_empty_target() {
    assert!(resize_to(solid(2, 2, [0, 0, 0, 255]), 0, 2).is_err());
}

#[test]
fn rotation_keeps_buffer_size() {
    let src = Raster::filled(40, 10, Rgba8Premul::from_straight_rgba(255, 0, 0, 255));
    for angle in [0.0, 30.0, 90.0, 180.0, -45.0, 725.0] {
        let out = rotate_about_center(src.clone(), angle).unwrap();
        assert_eq!((out.width, out.height), (40, 10), "angle {angle}");
    }
}

#[test]
fn rotation_by_180_is_exact_point_reflection() {
    let mut src = Raster::transparent(3, 2);
    src.data[0..4].copy_from_slice(&[9, 8, 7, 255]);
    let out = rotate_about_center(src, 180.0).unwrap();
    assert_eq!(out.pixel(2, 1), [9, 8, 7, 255]);
    assert_eq!(out.pixel(0, 0), [0, 0, 0, 0]);
}

#[test]
fn rotation_by_90_clips_wide_buffer_to_its_center_band() {
    let src = Raster::filled(40, 10, Rgba8Premul::from_straight_rgba(255, 255, 255, 255));
    let out = rotate_about_center(src, 90.0).unwrap();
    // The rotated 10-wide band covers x in [15, 25); the left edge is empty.
    assert_eq!(out.pixel(2, 5)[3], 0);
    assert_eq!(out.pixel(20, 5)[3], 255);
}
