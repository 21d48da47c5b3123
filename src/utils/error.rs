use thiserror::Error;

#[derive(Error, Debug)]
pub enum FhirClientError {
    #[error("Error {status}: {reason}")]
    HttpStatus { status: u16, reason: String },

    #[error("FHIR request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV rendering error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl FhirClientError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FhirClientError::HttpStatus { status, .. } => Some(*status),
            FhirClientError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FhirClientError::HttpStatus { status: 404, .. } => {
                "El recurso solicitado no existe en el servidor FHIR".to_string()
            }
            FhirClientError::HttpStatus { status, reason } => {
                format!("El servidor FHIR respondió con error {}: {}", status, reason)
            }
            FhirClientError::Request(_) => {
                "No se pudo conectar con el servidor FHIR".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FhirClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_message_embeds_status_and_reason() {
        let err = FhirClientError::HttpStatus {
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "Error 404: Not Found");
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_config_errors_have_no_status() {
        let err = FhirClientError::ConfigError {
            message: "TOML parsing error: missing field `server`".to_string(),
        };
        assert_eq!(err.status(), None);
        assert!(!err.is_not_found());
        assert_eq!(
            err.user_friendly_message(),
            "Configuration error: TOML parsing error: missing field `server`"
        );
    }
}
