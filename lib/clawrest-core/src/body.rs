//! Canonical JSON serialization of request bodies.
//!
//! Bodies are pretty printed by `serde_json` with a two spaces indentation.
//! Fields that must stay out of the body are excluded with the usual serde
//! attributes (`#[serde(skip)]`, `#[serde(skip_serializing_if = "...")]`),
//! nothing is filtered here.

use serde::Serialize;

use crate::error::RequestError;

/// Serializes a value into its canonical, pretty printed, JSON form.
///
/// # Errors
///
/// Fails if the value cannot be serialized by `serde_json`.
///
/// # Examples
///
/// ```rust
/// use clawrest_core::body::to_formatted_json;
///
/// let json = to_formatted_json(&serde_json::json!({ "draft": true }))?;
/// assert_eq!(json, "{\n  \"draft\": true\n}");
/// # Ok::<(), clawrest_core::RequestError>(())
/// ```
pub fn to_formatted_json<T>(value: &T) -> Result<String, RequestError>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string_pretty(value)?;
    Ok(json)
}
