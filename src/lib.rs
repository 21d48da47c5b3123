pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::{ClientConfig, OutputFormat};
pub use crate::core::{
    client::{FhirClient, DEFAULT_BASE_PATH},
    fetch::{fetch_resources, fetch_resources_or_none, FetchOutcome},
};
pub use utils::error::{FhirClientError, Result};
