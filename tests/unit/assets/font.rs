use super::*;
use crate::test_support::test_font;

fn engine() -> TextLayoutEngine {
    TextLayoutEngine::from_path(&test_font()).unwrap()
}

#[test]
fn normalize_text_drops_control_characters() {
    assert_eq!(normalize_text("a\u{0}b\tc\u{7f}"), "abc");
    assert_eq!(normalize_text("ボア🐗"), "ボア🐗");
}

#[test]
fn garbage_font_bytes_are_rejected() {
    assert!(TextLayoutEngine::from_font_bytes(b"not a font".to_vec()).is_err());
}

#[test]
fn width_grows_with_text_and_size() {
    let mut eng = engine();
    let short = eng.measure("boar", 24.0).unwrap();
    let long = eng.measure("boarboar", 24.0).unwrap();
    let big = eng.measure("boar", 48.0).unwrap();
    assert!(short > 0.0);
    assert!(long > short);
    assert!(big > short);
}

#[test]
fn empty_text_measures_zero() {
    let mut eng = engine();
    let block = eng.layout("", 24.0, Rgba8::rgb(255, 255, 255)).unwrap();
    assert_eq!(block.width, 0.0);
    assert!(block.is_empty());
}

#[test]
fn control_only_text_measures_zero() {
    let mut eng = engine();
    assert_eq!(eng.measure("\u{7}", 24.0).unwrap(), 0.0);
    assert_eq!(eng.measure("\t\n", 24.0).unwrap(), 0.0);
    let spans = eng
        .layout_spans(&[("", Rgba8::rgb(255, 255, 255)), ("\u{0}", Rgba8::rgb(0, 0, 0))], 24.0)
        .unwrap();
    assert!(spans.is_empty());
}

#[test]
fn baseline_sits_below_layout_top() {
    let mut eng = engine();
    let block = eng.layout("Hg", 32.0, Rgba8::rgb(0, 0, 0)).unwrap();
    assert!(block.baseline > 0.0);
    assert!(block.ascent > 0.0);
    assert!(!eng.family_name().is_empty());
}

#[test]
fn non_positive_sizes_are_rejected() {
    let mut eng = engine();
    assert!(eng.layout("x", 0.0, Rgba8::rgb(0, 0, 0)).is_err());
    assert!(eng.layout("x", f32::NAN, Rgba8::rgb(0, 0, 0)).is_err());
}

#[test]
fn spans_measure_like_the_joined_string() {
    let mut eng = engine();
    let white = Rgba8::rgb(255, 255, 255);
    let gold = Rgba8::rgb(255, 200, 0);
    let joined = eng.measure("+$120", 30.0).unwrap();
    let spans = eng
        .layout_spans(&[("+", white), ("$120", gold)], 30.0)
        .unwrap();
    assert!((spans.width - joined).abs() < 0.01);

    let mut brushes = Vec::new();
    for line in spans.layout.lines() {
        for item in line.items() {
            if let parley::layout::PositionedLayoutItem::GlyphRun(run) = item {
                brushes.push(run.style().brush);
            }
        }
    }
    assert!(brushes.contains(&TextBrushRgba8::from(white)));
    assert!(brushes.contains(&TextBrushRgba8::from(gold)));
}
