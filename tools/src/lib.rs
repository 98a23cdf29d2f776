//! Inspection and editing tools for PNT measurement files.
//!
//! This crate provides the pieces behind the `pnt-tools` binary:
//!
//! - Summaries of a decoded measurement (header, sample count, surface, peak force)
//! - Pretty and JSON renderings of headers and of the field table
//! - Plain-text force profiles
//!
//! # Design Principles
//!
//! - **Library first** - The binary only parses arguments and prints.
//! - **Human-readable output** - Sorted header listings, fixed-precision profiles.

use std::fmt::Write as _;
use std::path::PathBuf;

use codec::{Header, HeaderValue, Measurement, SampleSeries};
use serde::Serialize;
use serde_json::{Map, Value};

/// Force in newtons at which the snow surface is assumed.
pub const DEFAULT_SURFACE_THRESHOLD_N: f64 = 0.1;

/// Everything `inspect` reports about one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectReport {
    pub source: Option<PathBuf>,
    pub summary: String,
    /// Header fields sorted by name, values rendered as text.
    pub fields: Vec<(String, String)>,
    pub sample_count: usize,
    pub surface_mm: Option<f64>,
    pub max_force_n: Option<f64>,
    pub max_force_depth_mm: Option<f64>,
    pub penetration_mm: Option<f64>,
}

/// Builds the report for a decoded measurement.
#[must_use]
pub fn inspect_measurement(measurement: &Measurement, surface_threshold_n: f64) -> InspectReport {
    let mut fields: Vec<(String, String)> = measurement
        .header
        .iter()
        .map(|(descriptor, value)| (descriptor.name.to_string(), value.to_string()))
        .collect();
    fields.sort();
    let max = measurement.max_force();
    InspectReport {
        source: measurement.source.clone(),
        summary: measurement.to_string(),
        fields,
        sample_count: measurement.sample_count(),
        surface_mm: measurement.surface_position(surface_threshold_n),
        max_force_n: max.map(|m| m.force_n),
        max_force_depth_mm: max.map(|m| m.depth_mm),
        penetration_mm: measurement.penetration_depth(surface_threshold_n),
    }
}

/// Renders a report as aligned `name value` lines.
#[must_use]
pub fn format_report_pretty(report: &InspectReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.summary);
    out.push_str("Header:\n");
    for (name, value) in &report.fields {
        let _ = writeln!(out, "{name:<15} {value}");
    }
    let _ = writeln!(out, "samples: {}", report.sample_count);
    match report.surface_mm {
        Some(surface) => {
            let _ = writeln!(out, "surface: {surface:.2} mm");
        }
        None => out.push_str("surface: not found\n"),
    }
    if let (Some(force), Some(depth)) = (report.max_force_n, report.max_force_depth_mm) {
        let _ = writeln!(out, "max force: {force:.3} N at {depth:.2} mm");
    }
    if let Some(penetration) = report.penetration_mm {
        let _ = writeln!(out, "penetration: {penetration:.2} mm");
    }
    out
}

/// Renders the force profile as tab-separated depth and force columns.
#[must_use]
pub fn format_samples(samples: &SampleSeries) -> String {
    let mut out = String::from("x [mm]\ty [N]");
    for sample in samples {
        let _ = write!(out, "\n{:.3}\t{:.3}", sample.depth_mm, sample.force_n);
    }
    out
}

/// Header as a JSON object keyed by field name.
#[must_use]
pub fn header_json(header: &Header) -> Value {
    let map: Map<String, Value> = header
        .iter()
        .map(|(descriptor, value)| (descriptor.name.to_string(), value_json(value)))
        .collect();
    Value::Object(map)
}

fn value_json(value: &HeaderValue) -> Value {
    match value {
        HeaderValue::Int(v) => Value::from(*v),
        // Non-finite floats become null
        HeaderValue::Float(v) => Value::from(*v),
        HeaderValue::Ints(values) => Value::from(values.clone()),
        HeaderValue::Text(_) => Value::from(value.to_string()),
    }
}

/// Report plus full header as JSON.
pub fn report_json(report: &InspectReport, header: &Header) -> serde_json::Result<Value> {
    let mut value = serde_json::to_value(report)?;
    if let Value::Object(map) = &mut value {
        map.remove("fields");
        map.insert("header".to_string(), header_json(header));
    }
    Ok(value)
}

/// The field table as JSON.
pub fn schema_json() -> serde_json::Result<Value> {
    serde_json::to_value(schema::describe())
}

/// The field table as aligned text, one field per line.
#[must_use]
pub fn format_schema_pretty() -> String {
    let mut out = String::new();
    for descriptor in schema::describe() {
        let _ = writeln!(
            out,
            "{:>3}  {:<22} {:<12} {:>4}  {}",
            descriptor.offset,
            descriptor.name,
            descriptor.kind.to_string(),
            descriptor.length,
            descriptor.unit.unwrap_or("-")
        );
    }
    out
}
