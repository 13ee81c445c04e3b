//! Botanix - Plant identification from photos, with a local history of results
//!
//! This library holds the non-visual core of a plant identification app:
//!
//! - Normalizing user photos into compact JPEG `data:` URIs for upload
//! - The request/response contract with the remote identification model, including
//!   validation of the returned botanical report
//! - A bounded (50 entries), persisted, newest-first history of identifications
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use botanix::identification::{StaticIdentifier, identify};
//! use botanix::normalizer::normalize_file;
//! use botanix::storage::{FileStore, HistoryStore};
//!
//! let history = HistoryStore::open(FileStore::new("/tmp/botanix"));
//! if let Some(image) = normalize_file(Path::new("fern.jpg"))? {
//!     let model = StaticIdentifier::new(std::fs::read_to_string("fern-response.json")?);
//!     let record = identify(&model, &image.payload)?;
//!     let _ = history.append(record);
//! }
//! println!("{} identifications", history.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod identification;
pub mod models;
pub mod normalizer;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use identification::{IdentifyError, Identifier, identify};
pub use models::IdentificationRecord;
pub use normalizer::{EmbeddedImage, NormalizedImage, normalize, normalize_file};
pub use storage::{HistoryStore, Persisted};
