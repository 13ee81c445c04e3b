//! Plain-text rendering of identification records

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use super::timestamps::format_scan_time;
use crate::models::{HealthStatus, IdentificationRecord};

/// One-line summary for history listings
pub fn summary_line(record: &IdentificationRecord, now: &DateTime<Utc>) -> String {
    format!(
        "{}  {:<16} {} ({}) {:.0}% [{}]",
        short_id(&record.id),
        format_scan_time(&record.timestamp, now),
        record.primary_name(),
        record.analysis.scientific_name,
        record.analysis.confidence,
        record.health_status()
    )
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "-".repeat(title.len()));
}

fn field(out: &mut String, label: &str, value: &str) {
    if !value.is_empty() {
        let _ = writeln!(out, "  {:<13} {}", format!("{}:", label), value);
    }
}

/// Full botanical report for one record
pub fn render_report(record: &IdentificationRecord) -> String {
    let a = &record.analysis;
    let mut out = String::new();

    let _ = writeln!(out, "{}", record.primary_name());
    let _ = writeln!(out, "{}", a.scientific_name);
    if a.common_names.len() > 1 {
        let _ = writeln!(out, "Also known as: {}", a.common_names[1..].join(", "));
    }
    let _ = writeln!(out, "Confidence: {:.0}% match", a.confidence);
    let _ = writeln!(out, "Scanned: {}", record.timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out, "Id: {}", record.id);

    let flags: Vec<&str> = [
        (a.safety.is_poisonous, "Toxic"),
        (a.safety.is_invasive, "Invasive"),
        (a.safety.is_endangered, "Endangered"),
        (a.safety.is_medicinal, "Medicinal"),
    ]
    .into_iter()
    .filter_map(|(set, label)| set.then_some(label))
    .collect();
    if !flags.is_empty() {
        let _ = writeln!(out, "Flags: {}", flags.join(", "));
    }

    if !a.description.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", a.description);
    }

    section(&mut out, "Taxonomy");
    field(&mut out, "Order", &a.taxonomy.order);
    field(&mut out, "Family", &a.taxonomy.family);
    field(&mut out, "Genus", &a.taxonomy.genus);

    section(&mut out, "Care");
    field(&mut out, "Light", &a.care.light);
    field(&mut out, "Water", &a.care.water);
    field(&mut out, "Soil", &a.care.soil);
    field(&mut out, "Humidity", &a.care.humidity);
    field(&mut out, "Temperature", &a.care.temperature);
    field(&mut out, "Fertilizer", &a.care.fertilizer);

    section(&mut out, "Morphology");
    field(&mut out, "Leaves", &a.morphology.leaves);
    field(&mut out, "Flowers", &a.morphology.flowers);
    field(&mut out, "Fruits", &a.morphology.fruits);
    field(&mut out, "Stems", &a.morphology.stems);

    let eco = &a.ecology;
    if !(eco.native_region.is_empty() && eco.habitat.is_empty() && eco.role.is_empty()) {
        section(&mut out, "Ecology");
        field(&mut out, "Native region", &eco.native_region);
        field(&mut out, "Habitat", &eco.habitat);
        field(&mut out, "Role", &eco.role);
    }

    section(&mut out, "Health");
    let marker = if a.diagnostics.status == HealthStatus::Healthy { "ok" } else { "!!" };
    let _ = writeln!(out, "  [{}] {}", marker, a.diagnostics.status);
    field(&mut out, "Details", &a.diagnostics.details);
    field(&mut out, "Treatment", &a.diagnostics.treatment);

    if !a.safety.notes.is_empty() {
        section(&mut out, "Safety");
        let _ = writeln!(out, "  {}", a.safety.notes);
    }

    if !a.similar_species.is_empty() {
        section(&mut out, "Similar species");
        for species in &a.similar_species {
            let _ = writeln!(out, "  - {}: {}", species.name, species.difference);
        }
    }

    if !a.reasoning.is_empty() {
        section(&mut out, "Reasoning");
        let _ = writeln!(out, "  {}", a.reasoning);
    }

    out
}
