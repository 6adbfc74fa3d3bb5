use serde::{Deserialize, Serialize};
use waypoint_utils::*;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Row {
    zeta: u32,
    alpha: String,
    #[serde(serialize_with = "serialize_cost", deserialize_with = "deserialize_cost")]
    cost: f64,
}

#[test]
fn test_jsonify_keeps_field_order() {
    let row = Row {
        zeta: 1,
        alpha: "York".to_string(),
        cost: 2.5,
    };
    assert_eq!(jsonify(&row), r#"{"zeta":1,"alpha":"York","cost":2.5}"#);
}

#[test]
fn test_dejsonify() {
    let row: Row = dejsonify(r#"{"zeta":3,"alpha":"Leeds","cost":1.0}"#).unwrap();
    assert_eq!(
        row,
        Row {
            zeta: 3,
            alpha: "Leeds".to_string(),
            cost: 1.0
        }
    );
}

#[test]
fn test_infinite_cost_uses_sentinel() {
    let row = Row {
        zeta: 0,
        alpha: String::new(),
        cost: f64::INFINITY,
    };
    let json = serde_json::to_string(&row).unwrap();
    assert_eq!(json, r#"{"zeta":0,"alpha":"","cost":"inf"}"#);
    let back: Row = dejsonify(&json).unwrap();
    assert!(back.cost.is_infinite());
}

#[test]
fn test_unknown_cost_text_is_rejected() {
    assert!(dejsonify::<Row>(r#"{"zeta":0,"alpha":"","cost":"nan"}"#).is_err());
}
