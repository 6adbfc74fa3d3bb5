//! Serde helpers for route costs.
//!
//! JSON has no representation for infinity, so an infeasible cost is written
//! as the string `"inf"` and read back as `f64::INFINITY`.

use serde::{de, Deserialize, Deserializer, Serializer};

pub const INFINITE_COST: &str = "inf";

pub fn serialize_cost<S>(cost: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if cost.is_finite() {
        serializer.serialize_f64(*cost)
    } else {
        serializer.serialize_str(INFINITE_COST)
    }
}

pub fn deserialize_cost<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum CostRepr {
        Number(f64),
        Text(String),
    }

    match CostRepr::deserialize(deserializer)? {
        CostRepr::Number(n) => Ok(n),
        CostRepr::Text(s) if s == INFINITE_COST => Ok(f64::INFINITY),
        CostRepr::Text(s) => Err(de::Error::custom(format!("invalid cost '{}'", s))),
    }
}
