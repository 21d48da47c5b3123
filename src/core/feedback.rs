use crate::domain::ports::Document;
use std::collections::HashMap;

pub const LOADING_MESSAGE: &str = "Cargando datos desde el servidor FHIR...";
pub const NO_DATA_MESSAGE: &str = "No se encontraron registros en el servidor.";

pub fn loading_markup() -> String {
    format!("<p>{}</p>", LOADING_MESSAGE)
}

pub fn error_markup(message: &str) -> String {
    format!(
        r#"<div class="alert alert-danger">{}</div>"#,
        escape_html(message)
    )
}

pub fn no_data_markup() -> String {
    format!(r#"<div class="alert alert-info">{}</div>"#, NO_DATA_MESSAGE)
}

/// Each helper returns `false` and leaves the document untouched when the
/// container is missing.
pub fn show_loading<D: Document + ?Sized>(doc: &mut D, container_id: &str) -> bool {
    doc.replace_contents(container_id, &loading_markup())
}

pub fn show_error<D: Document + ?Sized>(doc: &mut D, container_id: &str, message: &str) -> bool {
    doc.replace_contents(container_id, &error_markup(message))
}

pub fn show_no_data<D: Document + ?Sized>(doc: &mut D, container_id: &str) -> bool {
    doc.replace_contents(container_id, &no_data_markup())
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Containers keyed by id, for rendering pages server-side and for tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocument {
    containers: HashMap<String, String>,
}

impl InMemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_container(mut self, container_id: impl Into<String>) -> Self {
        self.containers.insert(container_id.into(), String::new());
        self
    }

    pub fn contents(&self, container_id: &str) -> Option<&str> {
        self.containers.get(container_id).map(String::as_str)
    }
}

impl Document for InMemoryDocument {
    fn replace_contents(&mut self, container_id: &str, html: &str) -> bool {
        match self.containers.get_mut(container_id) {
            Some(contents) => {
                *contents = html.to_string();
                true
            }
            None => {
                tracing::debug!("Container '{}' not found, skipping", container_id);
                false
            }
        }
    }
}
