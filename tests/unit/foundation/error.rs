use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ComposeError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(ComposeError::asset("x").to_string().contains("asset error:"));
    assert!(ComposeError::text("x").to_string().contains("text error:"));
    assert!(
        ComposeError::encode("x")
            .to_string()
            .contains("encode error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ComposeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_config() {
    let err: ComposeError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, ComposeError::Config(_)));
}
