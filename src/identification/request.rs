//! The fixed request contract sent to the identification model

use serde_json::{Value, json};

use crate::normalizer::EmbeddedImage;

pub const MODEL: &str = "gemini-2.5-flash";

/// Low temperature keeps the answers factual
pub const TEMPERATURE: f64 = 0.4;

pub const SYSTEM_INSTRUCTION: &str = "\
You are an advanced botanical AI expert. Your task is to identify plants from images with high precision.
Analyze the provided image for:
1. Species identification (Genus species).
2. Morphological features (leaves, flowers, bark, etc.).
3. Ecological context and care requirements.
4. Signs of distress, disease, or pests.

If the image is unclear, provide the best possible guess with a lower confidence score and explain why in the reasoning.
Return strictly valid JSON matching the provided schema.";

pub const USER_PROMPT: &str = "Analyze this plant image thoroughly.";

/// Top-level fields the model must always return
pub const REQUIRED_FIELDS: [&str; 8] = [
    "scientificName",
    "commonNames",
    "confidence",
    "taxonomy",
    "morphology",
    "care",
    "safety",
    "diagnostics",
];

fn string_field(description: &str) -> Value {
    json!({ "type": "STRING", "description": description })
}

fn object_of_strings(fields: &[&str]) -> Value {
    let properties: serde_json::Map<String, Value> =
        fields.iter().map(|f| (f.to_string(), json!({ "type": "STRING" }))).collect();
    json!({ "type": "OBJECT", "properties": properties })
}

/// Response schema describing an identification document
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "scientificName": string_field("Scientific Latin name"),
            "commonNames": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "List of common names"
            },
            "confidence": {
                "type": "NUMBER",
                "description": "Confidence score between 0 and 100"
            },
            "description": string_field("Brief botanical description"),
            "reasoning": string_field("Why the AI identified this plant based on visible features"),
            "taxonomy": object_of_strings(&["genus", "family", "order"]),
            "morphology": {
                "type": "OBJECT",
                "properties": {
                    "leaves": string_field("Shape, margin, texture"),
                    "flowers": string_field("Color, petals, season"),
                    "fruits": string_field("Type, seeds"),
                    "stems": string_field("Structure, bark")
                }
            },
            "care": object_of_strings(&[
                "light", "water", "soil", "humidity", "temperature", "fertilizer",
            ]),
            "ecology": object_of_strings(&["nativeRegion", "habitat", "role"]),
            "safety": {
                "type": "OBJECT",
                "properties": {
                    "isPoisonous": { "type": "BOOLEAN" },
                    "isInvasive": { "type": "BOOLEAN" },
                    "isEndangered": { "type": "BOOLEAN" },
                    "isMedicinal": { "type": "BOOLEAN" },
                    "notes": { "type": "STRING" }
                }
            },
            "diagnostics": {
                "type": "OBJECT",
                "properties": {
                    "status": {
                        "type": "STRING",
                        "enum": ["Healthy", "Diseased", "Pest Infested", "Nutrient Deficient", "Unknown"]
                    },
                    "details": string_field("Explanation of the health status"),
                    "treatment": string_field("Recommended treatment if applicable")
                }
            },
            "similarSpecies": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "difference": string_field("Key differentiator")
                    }
                }
            }
        },
        "required": REQUIRED_FIELDS,
    })
}

/// Build the request body for one image.
///
/// The image is embedded inline as base64 without its `data:` prefix.
pub fn build_request(image: &EmbeddedImage) -> Value {
    json!({
        "model": MODEL,
        "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema(),
            "temperature": TEMPERATURE,
        },
        "contents": [{
            "parts": [
                { "inlineData": { "mimeType": image.mime_type(), "data": image.base64_data() } },
                { "text": USER_PROMPT }
            ]
        }]
    })
}
