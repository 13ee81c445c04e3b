//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use botanix::models::IdentificationRecord;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for a scratch workspace holding images, responses and a data directory
pub struct WorkspaceBuilder {
    temp_dir: TempDir,
}

impl WorkspaceBuilder {
    /// Create a new builder with an empty temp directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Directory the history store should use
    pub fn data_dir(&self) -> PathBuf {
        self.temp_dir.path().join("data")
    }

    /// Write an image file of the given size and format
    pub fn with_image(self, name: &str, width: u32, height: u32, format: ImageFormat) -> Self {
        fs::write(self.temp_dir.path().join(name), image_bytes(width, height, format))
            .expect("Failed to write image");
        self
    }

    /// Write an arbitrary file
    pub fn with_file(self, name: &str, content: &[u8]) -> Self {
        fs::write(self.temp_dir.path().join(name), content).expect("Failed to write file");
        self
    }

    /// Write a model response document
    pub fn with_response(self, name: &str, response: &ResponseBuilder) -> Self {
        self.with_file(name, response.to_json().as_bytes())
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for WorkspaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a gradient test image; PNG gets an alpha channel to exercise flattening
pub fn image_bytes(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = match format {
        ImageFormat::Png => DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 90, 200])
        })),
        _ => DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 90])
        })),
    };

    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).expect("Failed to encode test image");
    buf.into_inner()
}

/// Builder for identification model responses
pub struct ResponseBuilder {
    value: Value,
}

impl ResponseBuilder {
    /// A complete, valid response
    pub fn new() -> Self {
        Self {
            value: json!({
                "scientificName": "Ocimum basilicum",
                "commonNames": ["Basil", "Sweet basil"],
                "confidence": 92,
                "description": "Aromatic annual herb",
                "reasoning": "Opposite ovate leaves with a strong scent profile",
                "taxonomy": {"genus": "Ocimum", "family": "Lamiaceae", "order": "Lamiales"},
                "morphology": {"leaves": "Ovate, glossy", "flowers": "White spikes",
                               "fruits": "Nutlets", "stems": "Square"},
                "care": {"light": "Full sun", "water": "Keep moist", "soil": "Rich, well-drained",
                         "humidity": "Moderate", "temperature": "18-30C", "fertilizer": "Every 2 weeks"},
                "ecology": {"nativeRegion": "Tropical Asia", "habitat": "Gardens", "role": "Pollinator plant"},
                "safety": {"isPoisonous": false, "isInvasive": false, "isEndangered": false,
                           "isMedicinal": true, "notes": "Edible"},
                "diagnostics": {"status": "Nutrient Deficient", "details": "Yellowing lower leaves",
                                "treatment": "Apply nitrogen fertilizer"},
                "similarSpecies": [{"name": "Ocimum tenuiflorum", "difference": "Hairy stems"}]
            }),
        }
    }

    pub fn scientific_name(mut self, name: &str) -> Self {
        self.value["scientificName"] = json!(name);
        self
    }

    pub fn common_names(mut self, names: &[&str]) -> Self {
        self.value["commonNames"] = json!(names);
        self
    }

    pub fn confidence(mut self, confidence: f64) -> Self {
        self.value["confidence"] = json!(confidence);
        self
    }

    /// Drop a top-level field
    pub fn without(mut self, field: &str) -> Self {
        self.value.as_object_mut().expect("response is an object").remove(field);
        self
    }

    pub fn to_json(&self) -> String {
        self.value.to_string()
    }
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A record with a fixed id and timestamp (epoch milliseconds)
pub fn record(id: &str, millis: i64) -> IdentificationRecord {
    let mut value: Value =
        serde_json::from_str(&ResponseBuilder::new().scientific_name(id).to_json()).unwrap();
    let obj = value.as_object_mut().unwrap();
    obj.insert("id".to_string(), json!(id));
    obj.insert("timestamp".to_string(), json!(millis));
    obj.insert("imageUrl".to_string(), json!("data:image/jpeg;base64,/9j/"));
    serde_json::from_value(value).expect("test record is valid")
}

pub fn ids(records: &[IdentificationRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}
