//! Validation boundary for loosely typed input
//!
//! Values coming from outside the process (config files, JSON payloads, RESP
//! frames) are checked here before they reach the typed store API. Anything
//! that is not a non-empty string is rejected.

use crate::protocol::Value as RespValue;

/// A value that may or may not be a usable key or value
pub trait LooseInput {
    /// The value as a non-empty string, or `None` if it is anything else
    fn as_filled_str(&self) -> Option<&str>;
}

impl LooseInput for str {
    fn as_filled_str(&self) -> Option<&str> {
        if self.is_empty() { None } else { Some(self) }
    }
}

impl LooseInput for String {
    fn as_filled_str(&self) -> Option<&str> {
        self.as_str().as_filled_str()
    }
}

impl<T: LooseInput + ?Sized> LooseInput for &T {
    fn as_filled_str(&self) -> Option<&str> {
        (**self).as_filled_str()
    }
}

/// `None` stands for a missing argument
impl<T: LooseInput> LooseInput for Option<T> {
    fn as_filled_str(&self) -> Option<&str> {
        self.as_ref().and_then(LooseInput::as_filled_str)
    }
}

impl LooseInput for bool {
    fn as_filled_str(&self) -> Option<&str> {
        None
    }
}

impl LooseInput for i64 {
    fn as_filled_str(&self) -> Option<&str> {
        None
    }
}

/// Includes NaN
impl LooseInput for f64 {
    fn as_filled_str(&self) -> Option<&str> {
        None
    }
}

impl LooseInput for serde_json::Value {
    fn as_filled_str(&self) -> Option<&str> {
        match self {
            serde_json::Value::String(s) => s.as_filled_str(),
            _ => None,
        }
    }
}

impl LooseInput for toml::Value {
    fn as_filled_str(&self) -> Option<&str> {
        match self {
            toml::Value::String(s) => s.as_filled_str(),
            _ => None,
        }
    }
}

/// Bulk and simple strings count when they hold non-empty UTF-8
impl LooseInput for RespValue {
    fn as_filled_str(&self) -> Option<&str> {
        match self {
            RespValue::BulkString(Some(data)) => std::str::from_utf8(data)
                .ok()
                .and_then(LooseInput::as_filled_str),
            RespValue::SimpleString(s) => s.as_filled_str(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strings() {
        assert_eq!("key".as_filled_str(), Some("key"));
        assert_eq!("".as_filled_str(), None);
        assert_eq!(String::from("key").as_filled_str(), Some("key"));
        assert_eq!(Some("key").as_filled_str(), Some("key"));
        assert_eq!(None::<String>.as_filled_str(), None);
    }

    #[test]
    fn test_scalars_are_never_strings() {
        assert_eq!(true.as_filled_str(), None);
        assert_eq!(0i64.as_filled_str(), None);
        assert_eq!(f64::NAN.as_filled_str(), None);
    }

    #[test]
    fn test_json_values() {
        assert_eq!(json!("key").as_filled_str(), Some("key"));
        for value in [
            json!(""),
            json!(null),
            json!(false),
            json!(1),
            json!([1]),
            json!({"a": "a"}),
        ] {
            assert_eq!(value.as_filled_str(), None, "{value}");
        }
    }

    #[test]
    fn test_toml_values() {
        assert_eq!(toml::Value::String("key".into()).as_filled_str(), Some("key"));
        assert_eq!(toml::Value::String(String::new()).as_filled_str(), None);
        assert_eq!(toml::Value::Integer(1).as_filled_str(), None);
        assert_eq!(toml::Value::Boolean(true).as_filled_str(), None);
        assert_eq!(toml::Value::Float(f64::NAN).as_filled_str(), None);
        assert_eq!(toml::Value::Array(vec![]).as_filled_str(), None);
    }

    #[test]
    fn test_resp_values() {
        assert_eq!(
            RespValue::BulkString(Some(b"key".to_vec())).as_filled_str(),
            Some("key")
        );
        assert_eq!(RespValue::SimpleString("key".into()).as_filled_str(), Some("key"));
        assert_eq!(RespValue::BulkString(Some(Vec::new())).as_filled_str(), None);
        assert_eq!(RespValue::BulkString(Some(vec![0xff, 0xfe])).as_filled_str(), None);
        assert_eq!(RespValue::BulkString(None).as_filled_str(), None);
        assert_eq!(RespValue::Integer(1).as_filled_str(), None);
        assert_eq!(RespValue::Array(Some(vec![])).as_filled_str(), None);
        assert_eq!(RespValue::Error("key".into()).as_filled_str(), None);
    }
}
