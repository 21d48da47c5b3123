use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Read side of a FHIR REST server.
#[async_trait]
pub trait FhirSource: Send + Sync {
    /// Base URL requests are issued against, used for diagnostics.
    fn base_url(&self) -> &str;

    async fn search(&self, resource_type: &str, params: &[(&str, &str)]) -> Result<Value>;

    async fn read(&self, resource_type: &str, id: &str) -> Result<Value>;
}

/// A page-like surface holding named containers whose contents can be replaced.
pub trait Document {
    /// Replaces the markup of `container_id`. Returns `false` when no such
    /// container exists.
    fn replace_contents(&mut self, container_id: &str, html: &str) -> bool;
}
