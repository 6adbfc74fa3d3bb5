use serde::{Deserialize, Serialize};
use serde_json::to_string;

pub fn dejsonify<'a, T>(json_str: &'a str) -> serde_json::Result<T>
where
    T: Deserialize<'a>,
{
    serde_json::from_str::<T>(json_str)
}

/// Serializes `obj` on one line, fields in declaration order.
pub fn jsonify<T>(obj: &T) -> String
where
    T: Serialize,
{
    to_string(obj).expect("to_string failed on serializable object")
}
