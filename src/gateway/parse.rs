//! Parsers for package-manager output.
//!
//! Workspace listings come in two shapes depending on the tool version:
//!
//! - enveloped: a single JSON record `{"type":"log","data":"<json string>"}`
//!   whose `data` holds the workspace map encoded a second time. The record
//!   may span several lines or be followed by other output lines;
//! - banner-wrapped: a banner line, the JSON workspace map, and a footer line.
//!
//! Command listings are newline-delimited JSON records, one of which carries
//! the `possibleCommands` list.

use crate::error::DiscoveryError;
use crate::types::{CommandCatalog, WorkspaceInfo};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace};

/// Output shape of a workspace listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingShape {
    Enveloped,
    BannerWrapped,
}

impl ListingShape {
    /// Enveloped when the whole output, or else its first non-empty line, is a
    /// JSON object carrying `data`.
    pub fn sniff(output: &str) -> Self {
        if envelope(output).is_some() {
            ListingShape::Enveloped
        } else {
            ListingShape::BannerWrapped
        }
    }
}

fn envelope(output: &str) -> Option<serde_json::Map<String, Value>> {
    let as_envelope = |text: &str| match serde_json::from_str::<Value>(text.trim()) {
        Ok(Value::Object(map)) if map.contains_key("data") => Some(map),
        _ => None,
    };
    as_envelope(output).or_else(|| {
        output
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .and_then(as_envelope)
    })
}

/// Parse a workspace listing in either supported shape.
pub fn parse_workspace_listing(output: &str) -> Result<WorkspaceInfo, DiscoveryError> {
    let output = output.trim();
    let shape = ListingShape::sniff(output);
    debug!(?shape, "parsing workspace listing");
    match shape {
        ListingShape::Enveloped => parse_enveloped(output),
        ListingShape::BannerWrapped => parse_banner_wrapped(output),
    }
}

fn parse_enveloped(output: &str) -> Result<WorkspaceInfo, DiscoveryError> {
    let mut envelope = envelope(output).ok_or_else(|| {
        DiscoveryError::UnexpectedShape("output is not a JSON envelope".to_string())
    })?;
    match envelope.remove("data") {
        Some(Value::String(encoded)) => Ok(serde_json::from_str(&encoded)?),
        Some(data @ Value::Object(_)) => Ok(serde_json::from_value(data)?),
        Some(other) => Err(DiscoveryError::UnexpectedShape(format!(
            "envelope data is neither a string nor an object: {}",
            other
        ))),
        None => Err(DiscoveryError::UnexpectedShape(
            "envelope has no data field".to_string(),
        )),
    }
}

fn parse_banner_wrapped(output: &str) -> Result<WorkspaceInfo, DiscoveryError> {
    let (first, last) = match (output.find('\n'), output.rfind('\n')) {
        (Some(first), Some(last)) if first < last => (first, last),
        _ => {
            return Err(DiscoveryError::UnexpectedShape(format!(
                "expected banner, JSON body, and footer lines, got: {}",
                output
            )))
        }
    };
    Ok(serde_json::from_str(&output[first + 1..last])?)
}

#[derive(Debug, Deserialize)]
struct ListRecord {
    #[serde(rename = "type")]
    kind: String,
    data: ListData,
}

#[derive(Debug, Deserialize)]
struct ListData {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    items: Vec<String>,
}

/// Extract the `possibleCommands` items from newline-delimited JSON records.
///
/// Lines that are not JSON, or are other record types, are skipped. No
/// matching record yields an empty catalog.
pub fn parse_command_listing(output: &str) -> CommandCatalog {
    for line in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let record: ListRecord = match serde_json::from_str(line) {
            Ok(record) => record,
            Err(e) => {
                trace!(error = %e, "skipping non-list record");
                continue;
            }
        };
        if record.kind == "list" && record.data.kind == "possibleCommands" {
            return record.data.items;
        }
    }
    Vec::new()
}
