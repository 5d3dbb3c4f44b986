//! Wire form shared by both containers: encoded exactly like `Option<T>`, so
//! an absent value is `null` and a present one is its own encoding in JSON.
//! Failure reasons are not encoded.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub(crate) fn serialize<T, S>(value: Option<&T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(value) => serializer.serialize_some(value),
        None => serializer.serialize_none(),
    }
}

pub(crate) fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer)
}

/// Whether `payload` stands for "no value": `null`, empty, or blank.
///
/// # Examples
/// ```
/// # use optionals::wire::is_null_payload;
/// assert!(is_null_payload(b" null "));
/// assert!(is_null_payload(b""));
/// assert!(!is_null_payload(b"0"));
/// ```
#[cfg(feature = "json")]
pub fn is_null_payload(payload: &[u8]) -> bool {
    let trimmed = payload.trim_ascii();
    trimmed.is_empty() || trimmed == b"null"
}

#[cfg(feature = "json")]
pub(crate) fn encode_json<T: Serialize>(
    value: Option<&T>,
) -> Result<alloc::vec::Vec<u8>, crate::error::WireError> {
    match value {
        Some(value) => serde_json::to_vec(value).map_err(crate::error::WireError::Encode),
        None => Ok(b"null".to_vec()),
    }
}

#[cfg(feature = "json")]
pub(crate) fn decode_json<T>(payload: &[u8]) -> Result<Option<T>, crate::error::WireError>
where
    T: serde::de::DeserializeOwned,
{
    if is_null_payload(payload) {
        return Ok(None);
    }
    serde_json::from_slice(payload)
        .map(Some)
        .map_err(crate::error::WireError::Decode)
}
