use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CardError::precondition("x")
            .to_string()
            .contains("precondition failed:")
    );
    assert!(
        CardError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CardError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CardError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: CardError = serde_json::from_str::<serde_json::Value>("{")
        .unwrap_err()
        .into();
    assert!(matches!(err, CardError::Serde(_)));
}
