use thiserror::Error;

/// Absence as an error value: what an [`Optional`](crate::optional::Optional)
/// turns into when a `Result` is needed, and the reason an
/// [`Expected`](crate::expected::Expected) carries after decoding `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Error)]
#[error("value is missing")]
pub struct Missing;

/// Failure to move a container to or from its JSON form.
#[cfg(feature = "json")]
#[derive(Debug, Error)]
pub enum WireError {
    #[error("failed to encode value: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode payload: {0}")]
    Decode(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use std::string::ToString;

    use super::*;

    #[test]
    fn missing_renders_message() {
        assert_eq!(Missing.to_string(), "value is missing");
    }

    #[cfg(feature = "json")]
    #[test]
    fn wire_error_keeps_source() {
        use core::error::Error as _;

        let err = serde_json::from_str::<u8>("[").unwrap_err();
        let wrapped = WireError::Decode(err);
        assert!(wrapped.to_string().starts_with("failed to decode payload: "));
        assert!(wrapped.source().is_some());
    }
}
