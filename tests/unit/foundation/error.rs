use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PapercutError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PapercutError::synthesis("x")
            .to_string()
            .contains("synthesis error:")
    );
    assert!(
        PapercutError::export("x")
            .to_string()
            .contains("export error:")
    );
    assert!(
        PapercutError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PapercutError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
