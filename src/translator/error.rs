//! Translator error types

use thiserror::Error;

/// Status reported when the provider gave none
pub const DEFAULT_ERROR_STATUS: u16 = 500;

/// Failures surfaced by a search
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslatorError {
    /// Credential missing; no request was attempted.
    #[error("Missing API key for provider '{provider}'. Set {env_var} in the environment")]
    Configuration {
        provider: &'static str,
        env_var: &'static str,
    },

    /// Upstream call failed or returned a non-2xx response.
    #[error("Provider '{provider}' request failed ({status}): {message}")]
    ProviderRequestFailed {
        provider: &'static str,
        status: u16,
        message: String,
    },
}

impl TranslatorError {
    pub fn provider_failed(provider: &'static str, status: Option<u16>, message: String) -> Self {
        Self::ProviderRequestFailed {
            provider,
            status: status.unwrap_or(DEFAULT_ERROR_STATUS),
            message,
        }
    }

    /// Short error label placed in the envelope's `error` field
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "ConfigurationError",
            Self::ProviderRequestFailed { .. } => "ProviderRequestFailed",
        }
    }

    pub const fn status(&self) -> u16 {
        match self {
            Self::Configuration { .. } => DEFAULT_ERROR_STATUS,
            Self::ProviderRequestFailed { status, .. } => *status,
        }
    }

    /// Human-readable detail placed in the envelope's `message` field
    pub fn message(&self) -> String {
        match self {
            Self::Configuration { .. } => self.to_string(),
            Self::ProviderRequestFailed { message, .. } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status() {
        let err = TranslatorError::provider_failed("freepik", None, "connection reset".into());
        assert_eq!(err.status(), 500);
        assert_eq!(err.label(), "ProviderRequestFailed");
        assert_eq!(err.message(), "connection reset");
    }

    #[test]
    fn test_configuration_message_names_variable() {
        let err = TranslatorError::Configuration {
            provider: "freepik",
            env_var: "FREEPIK_API_KEY",
        };
        assert_eq!(err.status(), 500);
        assert!(err.message().contains("FREEPIK_API_KEY"));
    }
}
