//! Login event and login record types.
//!
//! A [`LoginEvent`] is what producers put on the queue: a JSON object whose
//! recognized keys are all optional at decode time. A [`LoginRecord`] is the
//! masked row written to `user_logins`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Error type for message body decoding.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to decode body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("body is not a JSON object (found {0})")]
    NotAnObject(&'static str),
}

/// Raw login event as received from the queue.
///
/// Unknown keys are ignored. The pass-through fields (`user_id`,
/// `device_type`, `locale`) may hold any JSON value; see [`field_text`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoginEvent {
    pub user_id: Option<Value>,
    pub device_type: Option<Value>,
    pub ip: Option<String>,
    pub device_id: Option<String>,
    pub locale: Option<Value>,
    pub app_version: Option<String>,
}

impl LoginEvent {
    /// Decode a message body.
    ///
    /// The body must be a JSON object; arrays, strings and other scalars are
    /// rejected even though they are valid JSON.
    pub fn decode(body: &str) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_str(body)?;
        if !value.is_object() {
            return Err(DecodeError::NotAnObject(json_kind(&value)));
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// A pass-through field rendered as text.
///
/// Strings are used as-is, other values become their JSON text, and a JSON
/// `null` counts as absent.
pub fn field_text(field: Option<&Value>) -> Option<String> {
    match field? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A masked login, one row of `user_logins`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRecord {
    pub user_id: String,
    pub device_type: String,
    pub masked_ip: String,
    pub masked_device_id: String,
    pub locale: String,
    /// Major component of the client version.
    pub app_version: i32,
    pub create_date: NaiveDate,
}
