//! Boundary to the remote identification model
//!
//! The model itself (and its transport) is an injected collaborator behind [`Identifier`]. This
//! module owns both sides of the contract: the request that is sent ([`request`]) and the
//! validation of what comes back ([`response`]).
//!
//! # Error Handling Strategy
//!
//! Every failure (collaborator error, malformed JSON, missing required group, out-of-range
//! confidence) collapses into [`IdentifyError::CouldNotIdentify`]. The specific cause is logged
//! and kept as the error source for diagnostics; end users only see the generic message.

pub mod request;
pub mod response;

use serde_json::Value;
use thiserror::Error;

pub use request::build_request;
pub use response::{ResponseError, parse_response};

use crate::models::IdentificationRecord;
use crate::normalizer::EmbeddedImage;

/// Remote model that analyzes an identification request and returns its raw text answer
pub trait Identifier {
    fn analyze(&self, request: &Value) -> anyhow::Result<String>;
}

/// Replays a fixed response document, e.g. one saved from an earlier model call
#[derive(Debug, Clone)]
pub struct StaticIdentifier {
    response: String,
}

impl StaticIdentifier {
    pub fn new(response: impl Into<String>) -> Self {
        Self { response: response.into() }
    }
}

impl Identifier for StaticIdentifier {
    fn analyze(&self, _request: &Value) -> anyhow::Result<String> {
        Ok(self.response.clone())
    }
}

#[derive(Debug, Error)]
pub enum IdentifyError {
    #[error("Could not identify plant")]
    CouldNotIdentify(#[source] anyhow::Error),
}

impl IdentifyError {
    /// Underlying cause, for diagnostics only
    pub fn cause(&self) -> &anyhow::Error {
        match self {
            IdentifyError::CouldNotIdentify(cause) => cause,
        }
    }
}

/// Identify the plant in a normalized image and build a complete record.
///
/// The record gets a fresh id, the current time, and the image payload as its `image_url`.
pub fn identify(
    identifier: &dyn Identifier,
    image: &EmbeddedImage,
) -> Result<IdentificationRecord, IdentifyError> {
    let request = build_request(image);

    let text = identifier.analyze(&request).map_err(|e| {
        log::error!("IDENTIFY_FAILED stage=model error={:#}", e);
        IdentifyError::CouldNotIdentify(e)
    })?;

    let analysis = parse_response(&text).map_err(|e| {
        log::error!("IDENTIFY_FAILED stage=validation error={}", e);
        IdentifyError::CouldNotIdentify(e.into())
    })?;

    let record = IdentificationRecord::new(analysis, image.clone());
    log::info!(
        "PLANT_IDENTIFIED id={} species={:?} confidence={} status={}",
        record.id,
        record.analysis.scientific_name,
        record.analysis.confidence,
        record.health_status()
    );

    Ok(record)
}
