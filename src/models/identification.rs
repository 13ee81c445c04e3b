use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::deserializers::null_as_default;
use crate::normalizer::EmbeddedImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Diseased,
    #[serde(rename = "Pest Infested")]
    PestInfested,
    #[serde(rename = "Nutrient Deficient")]
    NutrientDeficient,
    Unknown,
}

impl HealthStatus {
    pub const ALL: [HealthStatus; 5] = [
        HealthStatus::Healthy,
        HealthStatus::Diseased,
        HealthStatus::PestInfested,
        HealthStatus::NutrientDeficient,
        HealthStatus::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::Diseased => "Diseased",
            HealthStatus::PestInfested => "Pest Infested",
            HealthStatus::NutrientDeficient => "Nutrient Deficient",
            HealthStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub genus: String,
    pub family: String,
    pub order: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Morphology {
    pub leaves: String,
    pub flowers: String,
    pub fruits: String,
    pub stems: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareRequirements {
    pub light: String,
    pub water: String,
    pub soil: String,
    pub humidity: String,
    pub temperature: String,
    pub fertilizer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcologicalInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub native_region: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub habitat: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyProfile {
    pub is_poisonous: bool,
    pub is_invasive: bool,
    pub is_endangered: bool,
    pub is_medicinal: bool,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticResult {
    pub status: HealthStatus,
    pub details: String,
    /// Empty when no treatment applies (typically for healthy plants)
    #[serde(default, deserialize_with = "null_as_default")]
    pub treatment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarSpecies {
    pub name: String,
    pub difference: String,
}

/// The model-produced portion of an identification.
///
/// Identity fields and the taxonomy, morphology, care, safety and diagnostics groups have no
/// defaults: a document missing any of them fails to deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantAnalysis {
    pub scientific_name: String,
    pub common_names: Vec<String>,
    pub confidence: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reasoning: String,
    pub taxonomy: Taxonomy,
    pub morphology: Morphology,
    pub care: CareRequirements,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ecology: EcologicalInfo,
    pub safety: SafetyProfile,
    pub diagnostics: DiagnosticResult,
    #[serde(default, deserialize_with = "null_as_default")]
    pub similar_species: Vec<SimilarSpecies>,
}

/// One stored identification: the analysis plus the local metadata attached when it was made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationRecord {
    pub id: String,
    #[serde(flatten)]
    pub analysis: PlantAnalysis,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Data URI of the normalized image the analysis was made from
    pub image_url: EmbeddedImage,
}

impl IdentificationRecord {
    pub fn new(analysis: PlantAnalysis, image_url: EmbeddedImage) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            analysis,
            timestamp: Utc::now(),
            image_url,
        }
    }

    /// Name to show first: the primary common name, falling back to the scientific name
    pub fn primary_name(&self) -> &str {
        self.analysis
            .common_names
            .first()
            .map(String::as_str)
            .unwrap_or(&self.analysis.scientific_name)
    }

    pub fn health_status(&self) -> HealthStatus {
        self.analysis.diagnostics.status
    }
}
