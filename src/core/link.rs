//! Directions link building
//!
//! Turns an ordered label list into a mapping-service directions URL where
//! every label becomes one percent-encoded path segment.

use std::path::Path;

use reqwest::Url;

use crate::core::assembler::Route;
use crate::core::error::{Error, Result};

/// Minimum number of labels for a directions link
pub const MIN_ROUTE_LABELS: usize = 2;

/// Configuration for the directions link
pub struct LinkConfig {
    /// Base URL the labels are appended to as path segments
    pub base_url: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.google.com/maps/dir/".to_string(),
        }
    }
}

/// Build a directions URL, or `None` when fewer than two labels remain
///
/// Blank labels are ignored. The first label is the origin, the rest are
/// waypoints in order. Every remaining label becomes exactly one segment.
pub fn directions_link<S: AsRef<str>>(labels: &[S], config: &LinkConfig) -> Result<Option<String>> {
    let segments: Vec<String> = labels
        .iter()
        .map(|l| l.as_ref().trim())
        .filter(|l| !l.is_empty())
        .map(encode_segment)
        .collect();

    if segments.len() < MIN_ROUTE_LABELS {
        return Ok(None);
    }

    let base = Url::parse(&config.base_url)
        .map_err(|e| Error::InvalidInput(format!("Invalid maps URL '{}': {e}", config.base_url)))?;
    if base.cannot_be_a_base() {
        return Err(Error::InvalidInput(format!(
            "Maps URL '{}' cannot carry path segments",
            config.base_url
        )));
    }
    if base.query().is_some() || base.fragment().is_some() {
        return Err(Error::InvalidInput(format!(
            "Maps URL '{}' must not have a query or fragment",
            config.base_url
        )));
    }

    let mut link = base.as_str().trim_end_matches('/').to_string();
    for segment in &segments {
        link.push('/');
        link.push_str(segment);
    }

    Ok(Some(link))
}

/// Percent-encode a label as one path segment
///
/// Everything outside the RFC 3986 unreserved set is escaped. A label made
/// only of `.` or `..` has its dots escaped too, otherwise URL consumers would
/// resolve it as a relative path step.
fn encode_segment(label: &str) -> String {
    if label == "." || label == ".." {
        return label.replace('.', "%2E");
    }

    let mut encoded = String::with_capacity(label.len());
    for byte in label.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(char::from(byte))
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

/// Read a persisted route artifact and build its directions URL
pub fn link_from_route_file(path: &Path, config: &LinkConfig) -> Result<Option<String>> {
    let route = Route::read_from(path)?;
    directions_link(route.labels(), config)
}
