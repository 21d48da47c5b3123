//! Display formatting for FHIR fragments.
//!
//! Every function here is total: missing or empty input yields a fixed
//! sentinel instead of an error. Labels follow the `es-PE` locale.

use crate::domain::model::{
    Address, CodeableConcept, ContactPoint, HumanName, Identifier, SystemMatcher,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_NAME: &str = "Sin nombre";

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Formats the first name of a HumanName list as "given... family".
pub fn format_name(names: Option<&[HumanName]>) -> String {
    let Some(name) = names.and_then(|n| n.first()) else {
        return NO_NAME.to_string();
    };

    let given = name.given.as_deref().map(|g| g.join(" ")).unwrap_or_default();
    let family = name.family.as_deref().unwrap_or_default();
    let full = format!("{} {}", given, family);
    let full = full.trim();

    if !full.is_empty() {
        return full.to_string();
    }
    non_empty(name.text.as_deref()).unwrap_or(NO_NAME).to_string()
}

pub fn gender_label(code: &str) -> Option<&'static str> {
    match code {
        "male" => Some("Masculino"),
        "female" => Some("Femenino"),
        "other" => Some("Otro"),
        "unknown" => Some("Desconocido"),
        _ => None,
    }
}

pub fn format_gender(code: Option<&str>) -> String {
    match non_empty(code) {
        Some(code) => gender_label(code).unwrap_or(code).to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Prefers the first identifier whose system satisfies `matcher`, then the
/// first identifier of the list.
pub fn format_identifier(identifiers: Option<&[Identifier]>, matcher: &SystemMatcher) -> String {
    let Some(identifiers) = identifiers.filter(|ids| !ids.is_empty()) else {
        return NOT_AVAILABLE.to_string();
    };

    let preferred = identifiers
        .iter()
        .find(|id| id.system.as_deref().is_some_and(|s| matcher.matches(s)))
        .and_then(|id| non_empty(id.value.as_deref()));

    if let Some(value) = preferred {
        return value.to_string();
    }
    non_empty(identifiers[0].value.as_deref())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

pub fn format_dni(identifiers: Option<&[Identifier]>) -> String {
    format_identifier(identifiers, &SystemMatcher::default())
}

/// Accepts FHIR `date`/`dateTime` shapes: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`,
/// RFC 3339 and zone-less date-times. The calendar date is taken as written,
/// without converting between zones.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    for layout in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, layout) {
            return Some(dt.date());
        }
    }
    // Partial dates resolve to the first day of the period.
    if value.len() == 7 {
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d") {
            return Some(date);
        }
    }
    if value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit()) {
        return value
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
    }
    None
}

/// `dd/mm/yyyy`; unparseable input is returned verbatim.
pub fn format_date(value: Option<&str>) -> String {
    match non_empty(value) {
        // Parsing tolerates surrounding whitespace; the fallback keeps it.
        Some(raw) => match parse_calendar_date(raw) {
            Some(date) => date.format("%d/%m/%Y").to_string(),
            None => raw.to_string(),
        },
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_codeable_concept(concept: Option<&CodeableConcept>) -> String {
    let Some(concept) = concept else {
        return NOT_AVAILABLE.to_string();
    };
    if let Some(text) = non_empty(concept.text.as_deref()) {
        return text.to_string();
    }
    concept
        .coding
        .as_deref()
        .and_then(|codings| codings.first())
        .and_then(|c| non_empty(c.display.as_deref()).or_else(|| non_empty(c.code.as_deref())))
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

pub fn format_address(addresses: Option<&[Address]>) -> String {
    let Some(address) = addresses.and_then(|a| a.first()) else {
        return NOT_AVAILABLE.to_string();
    };
    if let Some(text) = non_empty(address.text.as_deref()) {
        return text.to_string();
    }

    let mut parts: Vec<String> = Vec::new();
    let lines: Vec<&str> = address
        .line
        .iter()
        .flatten()
        .map(String::as_str)
        .filter(|l| !l.is_empty())
        .collect();
    if !lines.is_empty() {
        parts.push(lines.join(", "));
    }
    for component in [&address.city, &address.state, &address.country] {
        if let Some(value) = non_empty(component.as_deref()) {
            parts.push(value.to_string());
        }
    }

    if parts.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        parts.join(", ")
    }
}

/// With `system` set, only entries of that system (`phone`, `email`, ...) are
/// considered; without it the first entry wins.
pub fn format_telecom(telecom: Option<&[ContactPoint]>, system: Option<&str>) -> String {
    let Some(telecom) = telecom.filter(|t| !t.is_empty()) else {
        return NOT_AVAILABLE.to_string();
    };

    let entry = match system {
        Some(system) => telecom
            .iter()
            .find(|t| t.system.as_deref() == Some(system)),
        None => telecom.first(),
    };

    entry
        .and_then(|t| non_empty(t.value.as_deref()))
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

pub fn status_label(code: &str) -> Option<&'static str> {
    match code {
        "active" => Some("Activo"),
        "inactive" => Some("Inactivo"),
        "completed" => Some("Completado"),
        "suspended" => Some("Suspendido"),
        _ => None,
    }
}

pub fn format_status(code: Option<&str>) -> String {
    match non_empty(code) {
        Some(code) => status_label(code).unwrap_or(code).to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Coding;

    fn name(given: &[&str], family: Option<&str>, text: Option<&str>) -> HumanName {
        HumanName {
            given: if given.is_empty() {
                None
            } else {
                Some(given.iter().map(|s| s.to_string()).collect())
            },
            family: family.map(str::to_string),
            text: text.map(str::to_string),
        }
    }

    fn identifier(system: &str, value: &str) -> Identifier {
        Identifier {
            system: Some(system.to_string()),
            value: Some(value.to_string()),
        }
    }

    fn contact(system: &str, value: &str) -> ContactPoint {
        ContactPoint {
            system: Some(system.to_string()),
            value: Some(value.to_string()),
            use_: None,
        }
    }

    #[test]
    fn test_absent_inputs_yield_sentinels() {
        assert_eq!(format_name(None), NO_NAME);
        assert_eq!(format_name(Some(&[])), NO_NAME);
        assert_eq!(format_gender(None), NOT_AVAILABLE);
        assert_eq!(format_gender(Some("")), NOT_AVAILABLE);
        assert_eq!(format_dni(None), NOT_AVAILABLE);
        assert_eq!(format_dni(Some(&[])), NOT_AVAILABLE);
        assert_eq!(format_date(None), NOT_AVAILABLE);
        assert_eq!(format_date(Some("")), NOT_AVAILABLE);
        assert_eq!(format_codeable_concept(None), NOT_AVAILABLE);
        assert_eq!(format_codeable_concept(Some(&CodeableConcept::default())), NOT_AVAILABLE);
        assert_eq!(format_address(None), NOT_AVAILABLE);
        assert_eq!(format_address(Some(&[Address::default()])), NOT_AVAILABLE);
        assert_eq!(format_telecom(None, None), NOT_AVAILABLE);
        assert_eq!(format_telecom(Some(&[]), Some("phone")), NOT_AVAILABLE);
        assert_eq!(format_status(None), NOT_AVAILABLE);
    }

    #[test]
    fn test_format_name() {
        let names = [name(&["Ana", "Maria"], Some("Lopez"), None)];
        assert_eq!(format_name(Some(&names)), "Ana Maria Lopez");

        let family_only = [name(&[], Some("Quispe"), None)];
        assert_eq!(format_name(Some(&family_only)), "Quispe");

        let text_only = [name(&[], None, Some("Dr. Juan Perez"))];
        assert_eq!(format_name(Some(&text_only)), "Dr. Juan Perez");

        assert_eq!(format_name(Some(&[HumanName::default()])), NO_NAME);
    }

    #[test]
    fn test_format_name_uses_first_entry_only() {
        let names = [
            name(&[], None, None),
            name(&["Rosa"], Some("Huaman"), None),
        ];
        assert_eq!(format_name(Some(&names)), NO_NAME);
    }

    #[test]
    fn test_format_gender() {
        assert_eq!(format_gender(Some("male")), "Masculino");
        assert_eq!(format_gender(Some("female")), "Femenino");
        assert_eq!(format_gender(Some("other")), "Otro");
        assert_eq!(format_gender(Some("unknown")), "Desconocido");
        assert_eq!(format_gender(Some("nonbinary")), "nonbinary");
    }

    #[test]
    fn test_format_identifier_prefers_dni() {
        let ids = [identifier("urn:dni", "12345678"), identifier("other", "X")];
        assert_eq!(format_dni(Some(&ids)), "12345678");

        let ids = [identifier("other", "X"), identifier("urn:dni", "12345678")];
        assert_eq!(format_dni(Some(&ids)), "12345678");

        let ids = [identifier("other", "X")];
        assert_eq!(format_dni(Some(&ids)), "X");
    }

    #[test]
    fn test_format_identifier_dni_without_value_falls_back() {
        let ids = [
            identifier("passport", "P-1"),
            Identifier {
                system: Some("urn:dni".to_string()),
                value: None,
            },
        ];
        assert_eq!(format_dni(Some(&ids)), "P-1");

        let ids = [Identifier::default()];
        assert_eq!(format_dni(Some(&ids)), NOT_AVAILABLE);
    }

    #[test]
    fn test_format_identifier_with_exact_matcher() {
        let ids = [identifier("urn:dni:legacy", "0001"), identifier("urn:dni", "4242")];
        let exact = SystemMatcher::Exact("urn:dni".to_string());
        assert_eq!(format_identifier(Some(&ids), &exact), "4242");
        assert_eq!(format_dni(Some(&ids)), "0001");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(Some("2024-03-05")), "05/03/2024");
        assert_eq!(format_date(Some("2024-03-05T23:30:00-05:00")), "05/03/2024");
        assert_eq!(format_date(Some("2024-03-05T08:15:00Z")), "05/03/2024");
        assert_eq!(format_date(Some("2024-03-05T08:15:00")), "05/03/2024");
        assert_eq!(format_date(Some("1987-11")), "01/11/1987");
        assert_eq!(format_date(Some("1987")), "01/01/1987");
    }

    #[test]
    fn test_format_date_returns_unparseable_input_verbatim() {
        assert_eq!(format_date(Some("unknown")), "unknown");
        assert_eq!(format_date(Some("2024-13-45")), "2024-13-45");
    }

    #[test]
    fn test_format_date_with_surrounding_whitespace() {
        assert_eq!(format_date(Some(" 2024-03-05 ")), "05/03/2024");
        assert_eq!(format_date(Some(" unknown ")), " unknown ");
    }

    #[test]
    fn test_format_codeable_concept() {
        let with_text = CodeableConcept {
            text: Some("Cardiología".to_string()),
            coding: Some(vec![Coding {
                display: Some("Cardiology".to_string()),
                ..Default::default()
            }]),
        };
        assert_eq!(format_codeable_concept(Some(&with_text)), "Cardiología");

        let display_only = CodeableConcept {
            text: None,
            coding: Some(vec![Coding {
                code: Some("394579002".to_string()),
                display: Some("Cardiology".to_string()),
                ..Default::default()
            }]),
        };
        assert_eq!(format_codeable_concept(Some(&display_only)), "Cardiology");

        let code_only = CodeableConcept {
            text: None,
            coding: Some(vec![Coding {
                code: Some("394579002".to_string()),
                ..Default::default()
            }]),
        };
        assert_eq!(format_codeable_concept(Some(&code_only)), "394579002");

        let empty_coding = CodeableConcept {
            text: None,
            coding: Some(vec![]),
        };
        assert_eq!(format_codeable_concept(Some(&empty_coding)), NOT_AVAILABLE);
    }

    #[test]
    fn test_format_address() {
        let with_text = [Address {
            text: Some("Av. Arequipa 123, Lima".to_string()),
            city: Some("Ignored".to_string()),
            ..Default::default()
        }];
        assert_eq!(format_address(Some(&with_text)), "Av. Arequipa 123, Lima");

        let composed = [Address {
            line: Some(vec![
                "Av. Arequipa 123".to_string(),
                "".to_string(),
                "Dpto 4".to_string(),
            ]),
            city: Some("Lima".to_string()),
            state: None,
            country: Some("PE".to_string()),
            ..Default::default()
        }];
        assert_eq!(
            format_address(Some(&composed)),
            "Av. Arequipa 123, Dpto 4, Lima, PE"
        );

        let city_only = [Address {
            city: Some("Cusco".to_string()),
            ..Default::default()
        }];
        assert_eq!(format_address(Some(&city_only)), "Cusco");
    }

    #[test]
    fn test_format_telecom() {
        let telecom = [contact("phone", "+51 999 888 777"), contact("email", "ana@example.pe")];
        assert_eq!(format_telecom(Some(&telecom), Some("email")), "ana@example.pe");
        assert_eq!(format_telecom(Some(&telecom), Some("phone")), "+51 999 888 777");
        assert_eq!(format_telecom(Some(&telecom), None), "+51 999 888 777");
        assert_eq!(format_telecom(Some(&telecom), Some("fax")), NOT_AVAILABLE);
    }

    #[test]
    fn test_format_status() {
        assert_eq!(format_status(Some("active")), "Activo");
        assert_eq!(format_status(Some("inactive")), "Inactivo");
        assert_eq!(format_status(Some("completed")), "Completado");
        assert_eq!(format_status(Some("suspended")), "Suspendido");
        assert_eq!(format_status(Some("entered-in-error")), "entered-in-error");
        assert_eq!(format_status(Some("")), NOT_AVAILABLE);
    }
}
