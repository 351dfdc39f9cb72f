use super::*;

#[test]
fn five_forms_resolve_against_base() {
    assert_eq!(parse_dimension(&0.5.into(), 1000.0), 500.0);
    assert_eq!(parse_dimension(&560.0.into(), 1000.0), 560.0);
    assert_eq!(parse_dimension(&"50%".into(), 1000.0), 500.0);
    assert_eq!(parse_dimension(&"560px".into(), 1000.0), 560.0);
    assert_eq!(parse_dimension(&"0.25".into(), 1000.0), 250.0);
    assert_eq!(parse_dimension(&"300".into(), 1000.0), 300.0);
}

#[test]
fn bare_one_is_a_fraction_of_base() {
    assert_eq!(parse_dimension(&1.0.into(), 1000.0), 1000.0);
    assert_eq!(parse_dimension(&1.0.into(), 640.0), 640.0);
    assert_eq!(parse_dimension(&"1".into(), 640.0), 640.0);
    // Just above the boundary switches to pixels.
    assert_eq!(parse_dimension(&1.5.into(), 640.0), 1.5);
}

#[test]
fn whitespace_and_unit_case_are_tolerated() {
    assert_eq!(parse_dimension(&" 25 % ".into(), 200.0), 50.0);
    assert_eq!(parse_dimension(&"12PX".into(), 200.0), 12.0);
}

#[test]
fn garbage_resolves_to_zero() {
    assert_eq!(parse_dimension(&"wide".into(), 200.0), 0.0);
    assert_eq!(parse_dimension(&"%".into(), 200.0), 0.0);
    assert_eq!(parse_dimension(&"".into(), 200.0), 0.0);
}

#[test]
fn json_decodes_numbers_and_strings() {
    let v: Vec<DimensionValue> = serde_json::from_str(r#"[0.1, "10%", 42]"#).unwrap();
    assert_eq!(
        v,
        vec![
            DimensionValue::Number(0.1),
            DimensionValue::Text("10%".to_string()),
            DimensionValue::Number(42.0),
        ]
    );
}
