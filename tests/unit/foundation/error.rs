use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FrameStackError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FrameStackError::resource_binding("x")
            .to_string()
            .contains("resource binding error:")
    );
    assert!(
        FrameStackError::target_allocation("x")
            .to_string()
            .contains("target allocation error:")
    );
    assert!(
        FrameStackError::effect("x")
            .to_string()
            .contains("effect error:")
    );
    assert!(
        FrameStackError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FrameStackError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
