//! Route assembly and the persisted route artifact
//!
//! The artifact is plain UTF-8 text with one label per line and no header,
//! written over any previous file at the same path.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, warn};

use crate::core::error::Result;
use crate::core::point::{LocatedPoint, Point};

/// Default artifact filename
pub const DEFAULT_ROUTE_FILE: &str = "pontos_rota.txt";

/// An ordered list of labels to visit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    labels: Vec<String>,
}

impl Route {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn into_labels(self) -> Vec<String> {
        self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Write the route, one label per line, replacing any existing file
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if path.exists() {
            warn!("⚠️  Overwriting existing route file: {}", path.display());
        }

        let mut writer = BufWriter::new(File::create(path)?);
        for label in &self.labels {
            writeln!(writer, "{}", single_line(label))?;
        }
        writer.flush()?;

        debug!("Wrote {} labels to {}", self.labels.len(), path.display());
        Ok(())
    }

    /// Read a route artifact back, trimming lines and skipping blank ones
    pub fn read_from(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let mut labels = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let label = line.trim();
            if !label.is_empty() {
                labels.push(label.to_string());
            }
        }
        Ok(Self { labels })
    }
}

/// Labels must not break the line-per-label format
fn single_line(label: &str) -> String {
    if label.contains(['\n', '\r']) {
        label
            .split(['\n', '\r'])
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        label.to_string()
    }
}

/// Tour labels first, then unlocated labels in their original order
pub fn assemble(tour: &[LocatedPoint], unlocated: &[Point]) -> Route {
    let labels = tour
        .iter()
        .map(|p| p.label().to_string())
        .chain(unlocated.iter().map(|p| p.label.clone()))
        .collect();
    Route::new(labels)
}
