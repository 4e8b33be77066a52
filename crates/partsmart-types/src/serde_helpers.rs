//! Lenient deserializers for form-shaped payloads
//!
//! Browser forms send every value as a string and leave blank inputs as `""`.
//! Use these with `#[serde(default, deserialize_with = "...")]`.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// `12.5`, `"12.50"`, `""` and `null` all accepted
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid number: {}", s))),
    }
}

/// Same as [`opt_f64`] but the value is required
pub fn f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    opt_f64(deserializer)?.ok_or_else(|| serde::de::Error::custom("missing number"))
}

/// Blank strings become `None`
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "opt_f64")]
        price: Option<f64>,
        #[serde(default, deserialize_with = "opt_string")]
        note: Option<String>,
    }

    #[test]
    fn test_price_accepts_strings_and_numbers() {
        let form: Form = serde_json::from_str(r#"{"price": "180.00"}"#).unwrap();
        assert_eq!(form.price, Some(180.0));

        let form: Form = serde_json::from_str(r#"{"price": 42}"#).unwrap();
        assert_eq!(form.price, Some(42.0));

        let form: Form = serde_json::from_str(r#"{"price": "", "note": "  "}"#).unwrap();
        assert_eq!(form.price, None);
        assert_eq!(form.note, None);

        let form: Form = serde_json::from_str("{}").unwrap();
        assert_eq!(form.price, None);
    }

    #[test]
    fn test_garbage_price_is_an_error() {
        assert!(serde_json::from_str::<Form>(r#"{"price": "cheap"}"#).is_err());
    }
}
