use super::*;

#[test]
fn flags_accept_common_truthy_spellings() {
    for raw in ["true", "TRUE", " 1 ", "yes"] {
        assert!(parse_flag(raw), "{raw}");
    }
    for raw in ["", "false", "0", "no", "boar"] {
        assert!(!parse_flag(raw), "{raw}");
    }
}

#[test]
fn missing_input_animation_is_an_error() {
    let plan = FramePlan::builder(plan::CanvasSource::Frame {
        size: crate::foundation::core::Size::new(3, 3),
    })
    .build()
    .unwrap();
    assert!(render_gif(&plan, Path::new("target/no/such/input.gif")).is_err());
}
