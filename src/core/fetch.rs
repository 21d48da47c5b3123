use crate::domain::ports::FhirSource;
use crate::utils::error::FhirClientError;
use serde_json::Value;

/// Result of a best-effort search that never surfaces an error to the caller.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The server answered with resources (or a single non-Bundle resource).
    Found(Value),
    /// The server answered with a Bundle carrying no entries.
    Empty(Value),
    /// The request failed; the error has already been logged.
    Failed(FhirClientError),
}

impl FetchOutcome {
    fn from_body(body: Value) -> Self {
        if is_empty_bundle(&body) {
            FetchOutcome::Empty(body)
        } else {
            FetchOutcome::Found(body)
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, FetchOutcome::Found(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FetchOutcome::Empty(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }

    pub fn error(&self) -> Option<&FhirClientError> {
        match self {
            FetchOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Collapses failures into `None`. An empty Bundle is still `Some`.
    pub fn into_option(self) -> Option<Value> {
        match self {
            FetchOutcome::Found(body) | FetchOutcome::Empty(body) => Some(body),
            FetchOutcome::Failed(_) => None,
        }
    }
}

fn is_empty_bundle(body: &Value) -> bool {
    if body.get("resourceType").and_then(Value::as_str) != Some("Bundle") {
        return false;
    }
    match body.get("entry").and_then(Value::as_array) {
        Some(entries) => entries.is_empty(),
        None => true,
    }
}

pub async fn fetch_resources<S>(
    source: &S,
    resource_type: &str,
    params: &[(&str, &str)],
) -> FetchOutcome
where
    S: FhirSource + ?Sized,
{
    match source.search(resource_type, params).await {
        Ok(body) => {
            let outcome = FetchOutcome::from_body(body);
            if outcome.is_empty() {
                tracing::info!("No {} resources found", resource_type);
            }
            outcome
        }
        Err(e) => {
            tracing::error!("Error fetching FHIR resources: {:?}", e);
            tracing::error!("Attempted URL: {}/{}", source.base_url(), resource_type);
            tracing::error!("Error details: {}", e);
            FetchOutcome::Failed(e)
        }
    }
}

/// Search that reports every failure as `None`, indistinguishable from "no data".
pub async fn fetch_resources_or_none<S>(
    source: &S,
    resource_type: &str,
    params: &[(&str, &str)],
) -> Option<Value>
where
    S: FhirSource + ?Sized,
{
    fetch_resources(source, resource_type, params)
        .await
        .into_option()
}
