use crate::core::format::{
    format_address, format_codeable_concept, format_date, format_gender, format_identifier,
    format_name, format_status, format_telecom, NOT_AVAILABLE,
};
use crate::domain::model::{
    Address, CodeableConcept, ContactPoint, HumanName, Identifier, SystemMatcher,
};
use crate::utils::error::{FhirClientError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Resources carried by a response: the `entry[].resource` of a Bundle, or
/// the response itself when it is a single resource.
pub fn bundle_resources(body: &Value) -> Vec<&Value> {
    if body.get("resourceType").and_then(Value::as_str) == Some("Bundle") {
        return body
            .get("entry")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(|e| e.get("resource")).collect())
            .unwrap_or_default();
    }
    if body.is_object() {
        vec![body]
    } else {
        Vec::new()
    }
}

/// Read-only view over a raw FHIR resource. Fields with an unexpected JSON
/// shape are treated as absent.
#[derive(Debug, Clone, Copy)]
pub struct ResourceView<'a> {
    resource: &'a Value,
}

impl<'a> ResourceView<'a> {
    pub fn new(resource: &'a Value) -> Self {
        Self { resource }
    }

    fn str_field(&self, field: &str) -> Option<&'a str> {
        self.resource.get(field).and_then(Value::as_str)
    }

    fn decode<T: DeserializeOwned>(&self, field: &str) -> Option<T> {
        let value = self.resource.get(field)?;
        match serde_json::from_value(value.clone()) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::debug!("Ignoring malformed '{}' field: {}", field, e);
                None
            }
        }
    }

    pub fn resource_type(&self) -> Option<&'a str> {
        self.str_field("resourceType")
    }

    pub fn id(&self) -> Option<&'a str> {
        self.str_field("id")
    }

    pub fn name(&self) -> String {
        format_name(self.decode::<Vec<HumanName>>("name").as_deref())
    }

    pub fn gender(&self) -> String {
        format_gender(self.str_field("gender"))
    }

    pub fn identifier(&self, matcher: &SystemMatcher) -> String {
        format_identifier(self.decode::<Vec<Identifier>>("identifier").as_deref(), matcher)
    }

    pub fn birth_date(&self) -> String {
        format_date(self.str_field("birthDate"))
    }

    pub fn date(&self, field: &str) -> String {
        format_date(self.str_field(field))
    }

    pub fn address(&self) -> String {
        format_address(self.decode::<Vec<Address>>("address").as_deref())
    }

    pub fn telecom(&self, system: Option<&str>) -> String {
        format_telecom(self.decode::<Vec<ContactPoint>>("telecom").as_deref(), system)
    }

    /// `status` when present, else the boolean `active` flag most person
    /// resources carry.
    pub fn status(&self) -> String {
        if let Some(status) = self.str_field("status") {
            return format_status(Some(status));
        }
        match self.resource.get("active").and_then(Value::as_bool) {
            Some(true) => format_status(Some("active")),
            Some(false) => format_status(Some("inactive")),
            None => format_status(None),
        }
    }

    /// Formats a top-level CodeableConcept (or list of them, taking the first).
    pub fn concept(&self, field: &str) -> String {
        let concept = match self.resource.get(field) {
            Some(Value::Array(_)) => self
                .decode::<Vec<CodeableConcept>>(field)
                .and_then(|v| v.into_iter().next()),
            Some(_) => self.decode::<CodeableConcept>(field),
            None => None,
        };
        format_codeable_concept(concept.as_ref())
    }

    pub fn summary(&self, matcher: &SystemMatcher) -> ResourceSummary {
        ResourceSummary {
            id: self.id().unwrap_or(NOT_AVAILABLE).to_string(),
            resource_type: self.resource_type().unwrap_or(NOT_AVAILABLE).to_string(),
            name: self.name(),
            identifier: self.identifier(matcher),
            gender: self.gender(),
            birth_date: self.birth_date(),
            phone: self.telecom(Some("phone")),
            email: self.telecom(Some("email")),
            address: self.address(),
            status: self.status(),
        }
    }
}

/// One display row per resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceSummary {
    pub id: String,
    pub resource_type: String,
    pub name: String,
    pub identifier: String,
    pub gender: String,
    pub birth_date: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub status: String,
}

const HEADERS: [&str; 10] = [
    "ID",
    "Tipo",
    "Nombre",
    "Documento",
    "Género",
    "Nacimiento",
    "Teléfono",
    "Email",
    "Dirección",
    "Estado",
];

impl ResourceSummary {
    fn cells(&self) -> [&str; 10] {
        [
            &self.id,
            &self.resource_type,
            &self.name,
            &self.identifier,
            &self.gender,
            &self.birth_date,
            &self.phone,
            &self.email,
            &self.address,
            &self.status,
        ]
    }
}

pub fn summarize(body: &Value, matcher: &SystemMatcher) -> Vec<ResourceSummary> {
    bundle_resources(body)
        .into_iter()
        .map(|resource| ResourceView::new(resource).summary(matcher))
        .collect()
}

pub fn render_csv(rows: &[ResourceSummary]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS)?;
    for row in rows {
        writer.write_record(row.cells())?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| FhirClientError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn render_json(rows: &[ResourceSummary]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// Plain-text table with columns padded to their widest cell.
pub fn render_table(rows: &[ResourceSummary]) -> String {
    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: [&str; 10]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width - cell.chars().count();
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_line(HEADERS)];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in rows {
        lines.push(format_line(row.cells()));
    }
    lines.join("\n")
}
