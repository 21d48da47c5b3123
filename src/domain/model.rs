use serde::{Deserialize, Serialize};

/// FHIR HumanName (only the parts used for display).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HumanName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeableConcept {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coding: Option<Vec<Coding>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// FHIR ContactPoint ("telecom"): phone | fax | email | pager | url | sms | other
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<String>,
}

/// System substring the default matcher looks for.
pub const DEFAULT_IDENTIFIER_SYSTEM: &str = "dni";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    #[default]
    Contains,
    Exact,
}

/// Predicate picking the preferred identifier out of an identifier list.
///
/// The default keeps the substring test on `"dni"` that national ID systems
/// like `urn:dni` or `http://reniec.gob.pe/dni` satisfy. `Exact` compares the
/// whole system URI instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemMatcher {
    Contains(String),
    Exact(String),
}

impl SystemMatcher {
    pub fn new(mode: MatchMode, system: impl Into<String>) -> Self {
        match mode {
            MatchMode::Contains => SystemMatcher::Contains(system.into()),
            MatchMode::Exact => SystemMatcher::Exact(system.into()),
        }
    }

    pub fn matches(&self, system: &str) -> bool {
        match self {
            SystemMatcher::Contains(needle) => system.contains(needle.as_str()),
            SystemMatcher::Exact(expected) => system == expected,
        }
    }
}

impl Default for SystemMatcher {
    fn default() -> Self {
        SystemMatcher::new(MatchMode::Contains, DEFAULT_IDENTIFIER_SYSTEM)
    }
}
