use super::*;
use crate::foundation::core::Rgba8;

fn fixture_font() -> Vec<u8> {
    std::fs::read("tests/data/fonts/DejaVuSans.ttf").unwrap()
}

fn label(text: &str, font_size: f64) -> TextContent {
    TextContent {
        text: text.to_owned(),
        font_size,
        font_family: None,
        fill: Rgba8::rgb(0, 0, 255),
    }
}

#[test]
fn text_renders_inside_measured_box() {
    let bytes = fixture_font();
    let mut engine = TextLayoutEngine::new();
    let font = ResolvedFont {
        name: "Sans",
        bytes: &bytes,
    };
    let out = rasterize_text(&label("Hello", 32.0), Vec2::new(1.0, 1.0), font, &mut engine)
        .unwrap()
        .unwrap();
    assert!(out.width > 40 && out.height >= 32, "{}x{}", out.width, out.height);
    assert!(out.data.chunks_exact(4).any(|px| px[3] > 0));
    assert!(
        out.data
            .chunks_exact(4)
            .all(|px| px[0] == 0 && px[1] == 0 && px[2] <= px[3])
    );
}

#[test]
fn text_box_follows_font_size_and_scale() {
    let bytes = fixture_font();
    let mut engine = TextLayoutEngine::new();
    let small = rasterize_text(
        &label("Hi", 20.0),
        Vec2::new(1.0, 1.0),
        ResolvedFont {
            name: "Sans",
            bytes: &bytes,
        },
        &mut engine,
    )
    .unwrap()
    .unwrap();
    let stretched = rasterize_text(
        &label("Hi", 20.0),
        Vec2::new(2.0, 1.0),
        ResolvedFont {
            name: "Sans",
            bytes: &bytes,
        },
        &mut engine,
    )
    .unwrap()
    .unwrap();
    assert!(stretched.width.abs_diff(small.width * 2) <= 1);
    assert_eq!(stretched.height, small.height);
}

#[test]
fn blank_text_has_no_box() {
    let bytes = fixture_font();
    let mut engine = TextLayoutEngine::new();
    let out = rasterize_text(
        &label("", 20.0),
        Vec2::new(1.0, 1.0),
        ResolvedFont {
            name: "Sans",
            bytes: &bytes,
        },
        &mut engine,
    )
    .unwrap();
    assert!(out.is_none());
}
