use super::*;
use crate::scene::layer::LayerContent;

fn base(w: f64, h: f64) -> Layer {
    Layer::new("base", LayerContent::BaseImage, w, h)
}

#[test]
fn no_base_layer_means_unit_factor() {
    let ctx = ScaleContext::new((800.0, 600.0), (4000.0, 3000.0));
    assert_eq!(resolve(&ctx, &[]), ScaleResolution::IDENTITY);
}

#[test]
fn factor_is_source_over_authored_base_size() {
    let ctx = ScaleContext::new((800.0, 600.0), (4000.0, 3000.0));
    let r = resolve(&ctx, &[base(800.0, 600.0)]);
    assert_eq!(r.factor, 5.0);
    assert!(!r.clamped);
    assert!(r.warning().is_none());
}

#[test]
fn prior_display_scale_is_folded_in() {
    let ctx =
        ScaleContext::new((800.0, 600.0), (4000.0, 3000.0)).with_prior_display_scale(2.0);
    assert_eq!(resolve(&ctx, &[base(800.0, 600.0)]).factor, 2.5);
}

#[test]
fn mismatched_aspect_takes_the_smaller_axis() {
    let ctx = ScaleContext::new((100.0, 100.0), (300.0, 200.0));
    assert_eq!(resolve(&ctx, &[base(100.0, 100.0)]).factor, 2.0);
}

#[test]
fn lowest_paint_order_base_layer_wins() {
    let ctx = ScaleContext::new((100.0, 100.0), (400.0, 400.0));
    let layers = [
        base(50.0, 50.0).with_paint_order(3),
        base(100.0, 100.0).with_paint_order(1),
    ];
    assert_eq!(resolve(&ctx, &layers).factor, 4.0);
}

#[test]
fn tiny_factor_is_clamped_with_warning() {
    let ctx = ScaleContext::new((100.0, 100.0), (5.0, 5.0));
    let r = resolve(&ctx, &[base(100.0, 100.0)]);
    assert_eq!(r.factor, MIN_SCALE_FACTOR);
    assert_eq!(r.raw, 0.05);
    assert_eq!(
        r.warning(),
        Some(ComposeWarning::DegenerateScale {
            raw: 0.05,
            clamped_to: MIN_SCALE_FACTOR
        })
    );
}

#[test]
fn non_finite_factor_collapses_to_floor() {
    let ctx = ScaleContext::new((100.0, 100.0), (500.0, 500.0)).with_prior_display_scale(0.0);
    let r = resolve(&ctx, &[base(100.0, 100.0)]);
    assert!(r.clamped);
    assert_eq!(r.factor, MIN_SCALE_FACTOR);
}
