use super::*;

fn numbered(w: u32, h: u32) -> Raster {
    let mut data = Vec::new();
    for i in 0..(w * h) {
        data.extend_from_slice(&[i as u8, 0, 0, 255]);
    }
    Raster::from_premul_bytes(w, h, data).unwrap()
}

#[test]
fn premul_roundtrip_through_rgba_image() {
    let img = image::RgbaImage::from_raw(2, 1, vec![200, 100, 50, 255, 100, 50, 200, 128]).unwrap();
    let r = Raster::from_rgba_image(&img);
    assert_eq!(r.pixel(0, 0), [200, 100, 50, 255]);
    assert_eq!(
        r.pixel(1, 0),
        [
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
    let back = r.to_rgba_image();
    assert_eq!(back.get_pixel(0, 0).0, [200, 100, 50, 255]);
    let p = back.get_pixel(1, 0).0;
    assert!(p[0].abs_diff(100) <= 1 && p[1].abs_diff(50) <= 1 && p[2].abs_diff(200) <= 1);
}

#[test]
fn byte_len_is_validated() {
    assert!(Raster::from_premul_bytes(2, 2, vec![0; 15]).is_err());
    assert!(Raster::from_premul_bytes(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn flips_mirror_axes_and_are_involutions() {
    let orig = numbered(3, 2);

    let mut h = orig.clone();
    h.flip_horizontal();
    assert_eq!(h.pixel(0, 0)[0], 2);
    assert_eq!(h.pixel(2, 1)[0], 3);
    h.flip_horizontal();
    assert_eq!(h, orig);

    let mut v = orig.clone();
    v.flip_vertical();
    assert_eq!(v.pixel(0, 0)[0], 3);
    assert_eq!(v.pixel(2, 1)[0], 2);
    v.flip_vertical();
    assert_eq!(v, orig);
}

#[test]
fn filled_and_transparent_have_expected_pixels() {
    let f = Raster::filled(2, 3, Rgba8Premul::from_straight_rgba(255, 255, 255, 255));
    assert!(f.is_opaque());
    assert_eq!(f.data.len(), 24);
    assert!(!Raster::transparent(1, 1).is_opaque());
}
