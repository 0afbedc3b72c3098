use thiserror::Error;

/// Top-level error type for the Rapport system.
///
/// Startup concerns (configuration, filesystem) are the only places
/// where errors propagate to the caller; per-turn lookup failures are
/// rendered to user-facing text inside `rapport-chat` and never reach
/// this type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RapportError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for RapportError {
    fn from(err: toml::de::Error) -> Self {
        RapportError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for RapportError {
    fn from(err: toml::ser::Error) -> Self {
        RapportError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for RapportError {
    fn from(err: serde_json::Error) -> Self {
        RapportError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Rapport operations.
pub type Result<T> = std::result::Result<T, RapportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RapportError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");

        let err = RapportError::Serialization("invalid json".to_string());
        assert_eq!(err.to_string(), "Serialization error: invalid json");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RapportError = io_err.into();
        assert!(matches!(err, RapportError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let bad_toml = "invalid = [[[";
        let parsed: std::result::Result<toml::Value, _> = toml::from_str(bad_toml);
        let err: RapportError = parsed.unwrap_err().into();
        assert!(matches!(err, RapportError::Config(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let bad_json = "{ invalid json }";
        let parsed: std::result::Result<serde_json::Value, _> = serde_json::from_str(bad_json);
        let err: RapportError = parsed.unwrap_err().into();
        assert!(matches!(err, RapportError::Serialization(_)));
    }

    #[test]
    fn test_result_type_with_question_mark() {
        fn inner() -> Result<String> {
            let io_result: std::result::Result<i32, std::io::Error> = Ok(42);
            let _value = io_result?;
            Ok("success".to_string())
        }

        assert_eq!(inner().unwrap(), "success");
    }

    #[test]
    fn test_error_debug_impl() {
        let err = RapportError::Config("test debug".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Config"));
        assert!(debug_str.contains("test debug"));
    }
}
