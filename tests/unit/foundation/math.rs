use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn unit_to_u8_clamps_and_handles_nan() {
    assert_eq!(unit_to_u8(0.0), 0);
    assert_eq!(unit_to_u8(0.5), 128);
    assert_eq!(unit_to_u8(7.0), 255);
    assert_eq!(unit_to_u8(f32::NAN), 255);
}

#[test]
fn approx_eq_is_inclusive() {
    assert!(approx_eq(1.0, 1.001, 1e-3 + 1e-12));
    assert!(!approx_eq(1.0, 1.01, 1e-3));
}

#[test]
fn clip_origin_keeps_in_range_values_and_pins_far_ones() {
    assert_eq!(clip_origin(-3.0, 100, 10), -3);
    assert_eq!(clip_origin(42.0, 100, 10), 42);
    assert_eq!(clip_origin(1.0e19, 100, 10), 100);
    assert_eq!(clip_origin(-1.0e19, 100, 10), -10);
    assert_eq!(clip_origin(f64::INFINITY, 100, 10), 100);
    assert_eq!(clip_origin(f64::NAN, 100, 10), 100);
}
