// Domain layer: FHIR display fragments and the ports the core talks through.

pub mod model;
pub mod ports;
