//! Deserialization helpers for loosely shaped service responses.

use serde::{Deserialize, Deserializer};

/// Read a field that may be `null`, falling back to `T::default()`. Pair
/// with `#[serde(default)]` so a missing field gets the same treatment.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Totals {
        #[serde(default, deserialize_with = "null_as_default")]
        count: u64,
        #[serde(default, deserialize_with = "null_as_default")]
        names: Vec<String>,
    }

    #[test]
    fn test_null_and_missing_become_default() {
        let totals: Totals = serde_json::from_str(r#"{"count": null, "names": null}"#).unwrap();
        assert_eq!(totals.count, 0);
        assert!(totals.names.is_empty());

        let totals: Totals = serde_json::from_str("{}").unwrap();
        assert_eq!(totals.count, 0);

        let totals: Totals = serde_json::from_str(r#"{"count": 3, "names": ["a"]}"#).unwrap();
        assert_eq!(totals.count, 3);
        assert_eq!(totals.names, ["a"]);
    }
}
