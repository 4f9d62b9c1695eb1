//! Spreadsheet ingestion
//!
//! Reads a delimited text export of the visit spreadsheet and exposes its
//! rows by owner.

use std::io::Read;
use std::path::Path;

use log::{debug, warn};

use crate::core::error::{suggest_correction, Error, Result};

/// Column layout and format of the spreadsheet export
#[derive(Debug, Clone)]
pub struct SheetConfig {
    /// Header of the owner column
    pub owner_column: String,

    /// Header of the address column
    pub address_column: String,

    /// Field delimiter
    pub delimiter: u8,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            owner_column: "Proprietário".to_string(),
            address_column: "Endereço".to_string(),
            delimiter: b',',
        }
    }
}

/// One spreadsheet row with an address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    /// 1-based line number in the source file
    pub line: usize,
    pub owner: String,
    pub address: String,
}

/// Rows of a spreadsheet export, in file order
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    rows: Vec<SheetRow>,
    owners: Vec<String>,
}

impl Sheet {
    /// Load a spreadsheet export from disk
    pub fn from_path(path: &Path, config: &SheetConfig) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        debug!("Reading spreadsheet {}", path.display());
        Self::from_reader(file, config)
    }

    /// Parse a spreadsheet export from any reader
    pub fn from_reader<R: Read>(reader: R, config: &SheetConfig) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(config.delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let owner_idx = column_index(&headers, &config.owner_column)?;
        let address_idx = column_index(&headers, &config.address_column)?;

        let mut rows = Vec::new();
        let mut owners: Vec<String> = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            // Header is line 1
            let line = record.position().map_or(i + 2, |p| p.line() as usize);

            let owner = record.get(owner_idx).unwrap_or("").to_string();
            if !owners.contains(&owner) {
                owners.push(owner.clone());
            }

            let address = record.get(address_idx).unwrap_or("");
            if address.is_empty() {
                warn!("Line {line}: no address for owner '{owner}', skipping row");
                continue;
            }

            rows.push(SheetRow {
                line,
                owner,
                address: address.to_string(),
            });
        }

        debug!("Loaded {} rows with addresses", rows.len());
        Ok(Self { rows, owners })
    }

    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    /// Distinct owners in order of first appearance
    ///
    /// Includes owners whose rows all lack an address.
    pub fn owners(&self) -> &[String] {
        &self.owners
    }

    /// Rows belonging to `owner`, in file order
    pub fn rows_for(&self, owner: &str) -> Result<Vec<&SheetRow>> {
        let owner = owner.trim();
        if !self.owners.iter().any(|o| o == owner) {
            return Err(Error::OwnerNotFound {
                owner: owner.to_string(),
                suggestion: suggest_correction(owner, &self.owners),
            });
        }

        let rows: Vec<&SheetRow> = self.rows.iter().filter(|r| r.owner == owner).collect();
        if rows.is_empty() {
            return Err(Error::NoAddresses(owner.to_string()));
        }
        Ok(rows)
    }
}

fn column_index(headers: &[String], column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column.trim())
        .ok_or_else(|| Error::MissingColumn {
            column: column.to_string(),
            suggestion: suggest_correction(column, headers),
        })
}
