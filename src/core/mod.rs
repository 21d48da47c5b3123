pub mod client;
pub mod feedback;
pub mod fetch;
pub mod format;
pub mod summary;

pub use crate::domain::model::{
    Address, CodeableConcept, Coding, ContactPoint, HumanName, Identifier, SystemMatcher,
};
pub use crate::domain::ports::{Document, FhirSource};
pub use crate::utils::error::Result;
