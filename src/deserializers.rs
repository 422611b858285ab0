//! Custom deserializers for forgiving request parsing.
//!
//! Request bodies come from browser clients that routinely send `null`,
//! `false`, `0` or an empty string for fields they have no value for. The
//! content field folds those falsy values into `None` and rejects any other
//! non-string. The file name field never fails; anything but a string is
//! treated as absent.

use serde::{Deserialize, Deserializer};

/// Deserializes the submitted content text.
///
/// # Accepted Formats
///
/// * absent key, `null`, `false`, `0` or `""` → `None`
/// * any other JSON string → `Some(string)`
///
/// # Errors
///
/// Returns an error for `true`, non-zero numbers, arrays and objects.
pub fn de_content_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let opt = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(v) = opt else { return Ok(None) };
    if is_falsy(&v) {
        return Ok(None);
    }
    match v {
        serde_json::Value::String(s) => Ok(Some(s)),
        other => Err(D::Error::custom(format!(
            "expected a string, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Deserializes an optional label such as a file name.
///
/// Strings pass through unchanged (empty strings included); every other JSON
/// value becomes `None`.
pub fn de_lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match opt {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

/// `null`, `false`, numeric zero and the empty string
pub fn is_falsy(v: &serde_json::Value) -> bool {
    match v {
        serde_json::Value::Null => true,
        serde_json::Value::Bool(b) => !b,
        serde_json::Value::Number(n) => n.as_f64() == Some(0.0),
        serde_json::Value::String(s) => s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => false,
    }
}

/// Short JSON type label used in error messages
pub fn json_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "de_content_text")]
        text: Option<String>,
        #[serde(default, deserialize_with = "de_lenient_text")]
        label: Option<String>,
    }

    fn form(v: serde_json::Value) -> Form {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn absent_and_falsy_content_is_none() {
        assert_eq!(form(json!({})).text, None);
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert_eq!(form(json!({ "text": falsy })).text, None, "{falsy}");
        }
    }

    #[test]
    fn content_strings_pass_through() {
        assert_eq!(form(json!({ "text": "hello" })).text.as_deref(), Some("hello"));
    }

    #[test]
    fn truthy_non_string_content_is_rejected() {
        let err = serde_json::from_value::<Form>(json!({ "text": 42 })).unwrap_err();
        assert!(err.to_string().contains("expected a string, got number"));
        assert!(serde_json::from_value::<Form>(json!({ "text": ["a"] })).is_err());
        assert!(serde_json::from_value::<Form>(json!({ "text": true })).is_err());
        assert!(serde_json::from_value::<Form>(json!({ "text": {} })).is_err());
    }

    #[test]
    fn lenient_text_never_fails() {
        assert_eq!(form(json!({ "label": "a.pdf" })).label.as_deref(), Some("a.pdf"));
        assert_eq!(form(json!({ "label": "" })).label.as_deref(), Some(""));
        for other in [json!(null), json!(7), json!(true), json!(["x"]), json!({})] {
            assert_eq!(form(json!({ "label": other })).label, None, "{other}");
        }
    }
}
