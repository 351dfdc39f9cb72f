use super::*;

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct Probe {
    width: Field<f64>,
}

#[test]
fn absent_null_and_value_are_distinct() {
    let absent: Probe = serde_json::from_str("{}").unwrap();
    let null: Probe = serde_json::from_str(r#"{"width":null}"#).unwrap();
    let zero: Probe = serde_json::from_str(r#"{"width":0}"#).unwrap();

    assert_eq!(absent.width, Field::Unset);
    assert_eq!(null.width, Field::Cleared);
    assert_eq!(zero.width, Field::Value(0.0));
}

#[test]
fn map_preserves_state() {
    assert_eq!(Field::Value(2).map(|v| v * 2), Field::Value(4));
    assert_eq!(Field::<i32>::Unset.map(|v| v * 2), Field::Unset);
    assert_eq!(Field::<i32>::Cleared.map(|v| v * 2), Field::Cleared);
    assert_eq!(Field::Value(3).get(), Some(3));
    assert_eq!(Field::<i32>::Cleared.get(), None);
}
