use crate::domain::ports::FhirSource;
use crate::utils::error::{FhirClientError, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use url::Url;

/// Path the FHIR API is mounted under on the serving host.
pub const DEFAULT_BASE_PATH: &str = "/fhir";

pub const FHIR_JSON: &str = "application/fhir+json";

#[derive(Debug, Clone)]
pub struct FhirClient {
    client: Client,
    base_url: String,
}

impl FhirClient {
    /// `base_url` is the absolute URL of the FHIR API root, e.g.
    /// `http://localhost:8080/fhir`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Joins a server origin with the API base path.
    pub fn from_origin(origin: &str, base_path: &str) -> Self {
        Self::new(join_base_url(origin, base_path))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/{resource_type}?{params}`; the query is omitted when `params` is empty.
    pub fn search_url(&self, resource_type: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.resource_url(&[resource_type])?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }
        Ok(url)
    }

    /// `{base}/{resource_type}/{id}`
    pub fn read_url(&self, resource_type: &str, id: &str) -> Result<Url> {
        self.resource_url(&[resource_type, id])
    }

    pub async fn search(&self, resource_type: &str, params: &[(&str, &str)]) -> Result<Value> {
        let url = self.search_url(resource_type, params)?;
        self.get_json(url).await
    }

    pub async fn read(&self, resource_type: &str, id: &str) -> Result<Value> {
        let url = self.read_url(resource_type, id)?;
        self.get_json(url).await
    }

    fn resource_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| FhirClientError::ConfigError {
                message: format!("Base URL cannot carry a path: {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<Value> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(ACCEPT, FHIR_JSON)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("FHIR response status: {}", status);

        if !status.is_success() {
            return Err(FhirClientError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl FhirSource for FhirClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn search(&self, resource_type: &str, params: &[(&str, &str)]) -> Result<Value> {
        FhirClient::search(self, resource_type, params).await
    }

    async fn read(&self, resource_type: &str, id: &str) -> Result<Value> {
        FhirClient::read(self, resource_type, id).await
    }
}

pub fn join_base_url(origin: &str, base_path: &str) -> String {
    let origin = origin.trim_end_matches('/');
    let path = base_path.trim_matches('/');
    if path.is_empty() {
        origin.to_string()
    } else {
        format!("{}/{}", origin, path)
    }
}
