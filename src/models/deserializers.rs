use serde::{Deserialize, Deserializer};

/// Deserialize an optional field, treating an explicit `null` the same as an absent one
///
/// Pair with `#[serde(default)]` so a missing key also yields `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Notes {
        #[serde(default, deserialize_with = "super::null_as_default")]
        text: String,
        #[serde(default, deserialize_with = "super::null_as_default")]
        tags: Vec<String>,
    }

    #[test]
    fn test_null_becomes_default() {
        let notes: Notes = serde_json::from_str(r#"{"text": null, "tags": null}"#).unwrap();
        assert!(notes.text.is_empty());
        assert!(notes.tags.is_empty());
    }

    #[test]
    fn test_absent_becomes_default() {
        let notes: Notes = serde_json::from_str("{}").unwrap();
        assert!(notes.text.is_empty());
        assert!(notes.tags.is_empty());
    }

    #[test]
    fn test_present_values_are_kept() {
        let json = r#"{"text": "mist daily", "tags": ["fern"]}"#;
        let notes: Notes = serde_json::from_str(json).unwrap();
        assert_eq!(notes.text, "mist daily");
        assert_eq!(notes.tags, vec!["fern"]);
    }

    #[test]
    fn test_wrong_type_still_fails() {
        assert!(serde_json::from_str::<Notes>(r#"{"text": 5}"#).is_err());
    }
}
