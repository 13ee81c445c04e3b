//! Validation of identification model responses

use serde_json::Value;
use thiserror::Error;

use super::request::REQUIRED_FIELDS;
use crate::models::PlantAnalysis;

#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("empty response from model")]
    Empty,

    #[error("response is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("response is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("response does not match the identification schema: {0}")]
    SchemaMismatch(#[source] serde_json::Error),

    #[error("confidence {0} is outside 0-100")]
    ConfidenceOutOfRange(f64),
}

/// Parse and validate the raw text returned by the model.
///
/// Required fields are checked by name first so a missing group is reported precisely; the
/// document is then deserialized strictly, which also rejects incomplete groups.
pub fn parse_response(text: &str) -> Result<PlantAnalysis, ResponseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ResponseError::Empty);
    }

    let value: Value = serde_json::from_str(text).map_err(ResponseError::InvalidJson)?;
    let object = value.as_object().ok_or(ResponseError::NotAnObject)?;

    if let Some(missing) =
        REQUIRED_FIELDS.iter().find(|field| object.get(**field).is_none_or(Value::is_null))
    {
        return Err(ResponseError::MissingField(*missing));
    }

    let analysis: PlantAnalysis =
        serde_json::from_value(value).map_err(ResponseError::SchemaMismatch)?;

    if !analysis.confidence.is_finite() || !(0.0..=100.0).contains(&analysis.confidence) {
        return Err(ResponseError::ConfidenceOutOfRange(analysis.confidence));
    }

    Ok(analysis)
}
