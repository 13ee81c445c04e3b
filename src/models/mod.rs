//! Data models for plant identification results.
//!
//! - [`IdentificationRecord`] - One complete analysis, as kept in history
//! - [`PlantAnalysis`] - The model-produced part of a record, before local metadata is attached
//! - Value groups ([`Taxonomy`], [`Morphology`], [`CareRequirements`], ...) - Flat sections
//!   of the botanical report
//!
//! Field names serialize in camelCase so persisted history matches the JSON documents the
//! identification model returns.

mod deserializers;
pub mod identification;

pub use identification::{
    CareRequirements, DiagnosticResult, EcologicalInfo, HealthStatus, IdentificationRecord,
    Morphology, PlantAnalysis, SafetyProfile, SimilarSpecies, Taxonomy,
};
