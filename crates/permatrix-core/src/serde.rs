use serde::{Deserialize, Deserializer};

/// Treats missing, `null`, and blank strings alike as `None`, trimming the rest.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => Ok(Some(s.trim().to_string())),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        description: Option<String>,
    }

    #[test]
    fn blank_strings_become_none() {
        let form: Form = serde_json::from_str(r#"{"description":"   "}"#).unwrap();
        assert_eq!(form.description, None);

        let form: Form = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(form.description, None);

        let form: Form = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(form.description, None);
    }

    #[test]
    fn values_are_trimmed() {
        let form: Form = serde_json::from_str(r#"{"description":" Full access "}"#).unwrap();
        assert_eq!(form.description.as_deref(), Some("Full access"));
    }
}
