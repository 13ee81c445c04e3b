//! Embedded image payloads (`data:` URIs)

use std::fmt;
use std::str::FromStr;

use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};

use super::NormalizeError;

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Image subtypes accepted when parsing an existing payload
const ACCEPTED_SUBTYPES: [&str; 5] = ["png", "jpg", "jpeg", "webp", "gif"];

/// A self-describing image payload: declared MIME type plus base64-encoded bytes.
///
/// The string form is `data:<mime>;base64,<data>`. The MIME type and data are kept as offsets
/// into the single string so the payload can be handed around without re-assembly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmbeddedImage {
    uri: String,
    mime_end: usize,
}

impl EmbeddedImage {
    /// Encode raw image bytes as a payload with the given MIME type (e.g. `image/jpeg`)
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        let encoded = general_purpose::STANDARD.encode(bytes);
        let uri = format!("{}{}{}{}", DATA_PREFIX, mime_type, BASE64_MARKER, encoded);
        Self { uri, mime_end: DATA_PREFIX.len() + mime_type.len() }
    }

    /// Parse a `data:image/<type>;base64,<data>` string
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::InvalidPayload`] if the prefix is missing, the MIME type is not
    /// an accepted image type, or the data section is not valid base64.
    pub fn parse(uri: &str) -> Result<Self, NormalizeError> {
        let rest = uri
            .strip_prefix(DATA_PREFIX)
            .ok_or_else(|| NormalizeError::InvalidPayload("missing data: prefix".to_string()))?;
        let (mime, data) = rest.split_once(BASE64_MARKER).ok_or_else(|| {
            NormalizeError::InvalidPayload("missing ;base64, marker".to_string())
        })?;

        let subtype = mime.strip_prefix("image/").ok_or_else(|| {
            NormalizeError::InvalidPayload(format!("not an image MIME type: {}", mime))
        })?;
        if !ACCEPTED_SUBTYPES.contains(&subtype) {
            return Err(NormalizeError::InvalidPayload(format!(
                "unsupported image type: {}",
                mime
            )));
        }

        general_purpose::STANDARD
            .decode(data)
            .map_err(|e| NormalizeError::InvalidPayload(format!("invalid base64 data: {}", e)))?;

        Ok(Self { uri: uri.to_string(), mime_end: DATA_PREFIX.len() + mime.len() })
    }

    /// Declared MIME type, e.g. `image/jpeg`
    pub fn mime_type(&self) -> &str {
        &self.uri[DATA_PREFIX.len()..self.mime_end]
    }

    /// The base64 data section without the `data:...;base64,` prefix
    pub fn base64_data(&self) -> &str {
        &self.uri[self.mime_end + BASE64_MARKER.len()..]
    }

    /// Decoded image bytes
    pub fn decode_bytes(&self) -> Result<Vec<u8>, NormalizeError> {
        general_purpose::STANDARD
            .decode(self.base64_data())
            .map_err(|e| NormalizeError::InvalidPayload(format!("invalid base64 data: {}", e)))
    }

    pub fn as_str(&self) -> &str {
        &self.uri
    }

    /// Length of the whole `data:` URI in bytes, as it is sent and stored
    pub fn encoded_len(&self) -> usize {
        self.uri.len()
    }
}

impl fmt::Display for EmbeddedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

impl FromStr for EmbeddedImage {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EmbeddedImage {
    type Error = NormalizeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmbeddedImage> for String {
    fn from(value: EmbeddedImage) -> Self {
        value.uri
    }
}
