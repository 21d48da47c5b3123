use crate::config::OutputFormat;
use crate::core::client::{join_base_url, FhirClient, DEFAULT_BASE_PATH};
use crate::domain::model::{MatchMode, SystemMatcher, DEFAULT_IDENTIFIER_SYSTEM};
use crate::utils::error::{FhirClientError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub origin: String,
    pub base_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    pub identifier_system: Option<String>,
    pub identifier_match: Option<MatchMode>,
    pub format: Option<OutputFormat>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                origin: DEFAULT_ORIGIN.to_string(),
                base_path: None,
            },
            display: DisplayConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;
        toml::from_str(&processed).map_err(|e| FhirClientError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FhirClientError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn base_path(&self) -> &str {
        self.server.base_path.as_deref().unwrap_or(DEFAULT_BASE_PATH)
    }

    pub fn base_url(&self) -> String {
        join_base_url(&self.server.origin, self.base_path())
    }

    /// Missing parts fall back to a substring match on `"dni"`.
    pub fn identifier_matcher(&self) -> SystemMatcher {
        let system = self
            .display
            .identifier_system
            .as_deref()
            .unwrap_or(DEFAULT_IDENTIFIER_SYSTEM);
        SystemMatcher::new(self.display.identifier_match.unwrap_or_default(), system)
    }

    pub fn output_format(&self) -> OutputFormat {
        self.display.format.unwrap_or_default()
    }

    pub fn client(&self) -> FhirClient {
        FhirClient::from_origin(&self.server.origin, self.base_path())
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("server.origin", &self.server.origin)?;
        validation::validate_base_path("server.base_path", self.base_path())?;
        if let Some(system) = &self.display.identifier_system {
            validation::validate_non_empty_string("display.identifier_system", system)?;
        }
        Ok(())
    }
}
