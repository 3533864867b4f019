//! PII masking for login events.
//!
//! `ip` and `device_id` are replaced by the lowercase hex SHA-512 of their
//! UTF-8 bytes. The digest is unsalted, so equal inputs always mask to equal
//! outputs and masked values can still be grouped and joined on.

use std::num::ParseIntError;

use chrono::NaiveDate;
use serde_json::Value;
use sha2::{Digest, Sha512};
use thiserror::Error;

use crate::model::{field_text, LoginEvent, LoginRecord};

/// Length of a masked value: 512 bits, hex encoded.
pub const MASKED_LEN: usize = 128;

/// Reasons a single event does not become a record.
#[derive(Debug, Error)]
pub enum AnonymizeError {
    /// `ip` or `device_id` is absent. Dropped without a trace.
    #[error("event carries no ip or device_id")]
    MissingPii,

    #[error("event is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("app_version {version:?} has a non-numeric major component: {source}")]
    AppVersion {
        version: String,
        #[source]
        source: ParseIntError,
    },
}

impl AnonymizeError {
    /// Whether this is the silent PII rejection rather than a malformed event.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::MissingPii)
    }
}

/// Hex-encoded SHA-512 of `value`.
pub fn mask(value: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}

/// Major component of a `MAJOR.MINOR.PATCH` version string.
///
/// `"3.2.1"` gives 3 and `"10"` gives 10. Whitespace around the major
/// component is ignored.
pub fn major_version(version: &str) -> Result<i32, AnonymizeError> {
    let major = version.split('.').next().unwrap_or_default().trim();
    major
        .parse::<i32>()
        .map_err(|source| AnonymizeError::AppVersion {
            version: version.to_string(),
            source,
        })
}

/// Turn a raw event into a masked record stamped with `create_date`.
///
/// The PII check runs first: an event without `ip` or `device_id` is a
/// [`AnonymizeError::MissingPii`] no matter what else it lacks.
pub fn anonymize(event: &LoginEvent, create_date: NaiveDate) -> Result<LoginRecord, AnonymizeError> {
    let (Some(ip), Some(device_id)) = (event.ip.as_deref(), event.device_id.as_deref()) else {
        return Err(AnonymizeError::MissingPii);
    };

    let user_id = passthrough(event.user_id.as_ref(), "user_id")?;
    let device_type = passthrough(event.device_type.as_ref(), "device_type")?;
    let locale = passthrough(event.locale.as_ref(), "locale")?;
    let version = event
        .app_version
        .as_deref()
        .ok_or(AnonymizeError::MissingField("app_version"))?;
    let app_version = major_version(version)?;

    Ok(LoginRecord {
        user_id,
        device_type,
        masked_ip: mask(ip),
        masked_device_id: mask(device_id),
        locale,
        app_version,
        create_date,
    })
}

/// [`anonymize`] stamped with today's local date.
pub fn anonymize_now(event: &LoginEvent) -> Result<LoginRecord, AnonymizeError> {
    anonymize(event, crate::today())
}

fn passthrough(field: Option<&Value>, name: &'static str) -> Result<String, AnonymizeError> {
    field_text(field).ok_or(AnonymizeError::MissingField(name))
}
