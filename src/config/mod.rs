pub mod toml_config;

pub use toml_config::{ClientConfig, DEFAULT_ORIGIN};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

#[cfg(feature = "cli")]
mod cli {
    use super::{ClientConfig, OutputFormat};
    use crate::domain::model::MatchMode;
    use crate::utils::error::Result;
    use crate::utils::validation::Validate;
    use clap::{Parser, Subcommand};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "fhir-view")]
    #[command(about = "Query a FHIR server and print readable summaries")]
    pub struct CliConfig {
        #[arg(long, help = "TOML configuration file")]
        pub config: Option<PathBuf>,

        #[arg(long, help = "Server origin, e.g. http://localhost:8080")]
        pub server: Option<String>,

        #[arg(long, help = "Path the FHIR API is mounted under (default /fhir)")]
        pub base_path: Option<String>,

        #[arg(long, value_enum)]
        pub format: Option<OutputFormat>,

        #[arg(long, help = "Identifier system preferred for the document column")]
        pub identifier_system: Option<String>,

        #[arg(long, help = "Match the identifier system exactly instead of by substring")]
        pub exact_identifier: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Search resources of a type
        Search {
            resource_type: String,
            #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
            params: Vec<(String, String)>,
        },
        /// Read a single resource by id
        Read { resource_type: String, id: String },
    }

    fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
        if key.is_empty() {
            return Err(format!("empty parameter name in '{}'", s));
        }
        Ok((key.to_string(), value.to_string()))
    }

    impl CliConfig {
        /// Loads the config file (or defaults), applies flag overrides and validates.
        pub fn resolve(&self) -> Result<ClientConfig> {
            let mut config = match &self.config {
                Some(path) => ClientConfig::from_file(path)?,
                None => ClientConfig::default(),
            };

            if let Some(server) = &self.server {
                config.server.origin = server.clone();
            }
            if let Some(base_path) = &self.base_path {
                config.server.base_path = Some(base_path.clone());
            }
            if let Some(format) = self.format {
                config.display.format = Some(format);
            }
            if let Some(system) = &self.identifier_system {
                config.display.identifier_system = Some(system.clone());
            }
            if self.exact_identifier {
                config.display.identifier_match = Some(MatchMode::Exact);
            }

            config.validate()?;
            Ok(config)
        }
    }

}

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
