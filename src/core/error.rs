//! Error types for butterfly-visit
//!
//! Provides the crate error enum and fuzzy "did you mean" suggestions for
//! spreadsheet column and owner names.

use std::fmt;

use strsim::{jaro_winkler, normalized_levenshtein};

/// Minimum combined similarity for a candidate to be suggested.
///
/// Tuned so that accent slips ("Endereco" → "Endereço") and single typos in
/// owner names match, while unrelated names stay silent.
const MIN_SUGGESTION_SCORE: f64 = 0.65;

/// Find the closest candidate to `input`
///
/// Combines Jaro-Winkler (70%) with normalized Levenshtein (30%) on the
/// lowercased strings. Returns `None` when `input` already is one of the
/// candidates or when nothing scores above [`MIN_SUGGESTION_SCORE`].
pub fn suggest_correction<S: AsRef<str>>(input: &str, candidates: &[S]) -> Option<String> {
    let input = input.trim();
    if candidates.iter().any(|c| c.as_ref() == input) {
        return None;
    }

    let input_lower = input.to_lowercase();
    let mut best_match = None;
    let mut best_score = 0.0f64;

    for candidate in candidates {
        let candidate = candidate.as_ref();
        let candidate_lower = candidate.to_lowercase();

        // Only the case differs: always the best possible suggestion
        if candidate_lower == input_lower {
            return Some(candidate.to_string());
        }

        let jw_score = jaro_winkler(&input_lower, &candidate_lower);
        let lev_score = normalized_levenshtein(&input_lower, &candidate_lower);
        let score = (jw_score * 0.7) + (lev_score * 0.3);

        if score >= MIN_SUGGESTION_SCORE && score > best_score {
            best_score = score;
            best_match = Some(candidate.to_string());
        }
    }

    best_match
}

/// Main error type for butterfly-visit operations
#[derive(Debug)]
pub enum Error {
    /// A required spreadsheet column is absent from the header row
    MissingColumn {
        column: String,
        suggestion: Option<String>,
    },

    /// The selected owner does not appear in the spreadsheet
    OwnerNotFound {
        owner: String,
        suggestion: Option<String>,
    },

    /// The selected owner has no rows with an address
    NoAddresses(String),

    /// Malformed spreadsheet content
    SheetError(String),

    /// HTTP-specific error
    HttpError(String),

    /// Network connectivity issues
    NetworkError(String),

    /// File I/O error
    IoError(std::io::Error),

    /// Invalid configuration or parameters
    InvalidInput(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingColumn { column, suggestion } => {
                write!(f, "Spreadsheet has no '{}' column", column)?;
                if let Some(suggestion) = suggestion {
                    write!(f, ". Did you mean '{}'?", suggestion)?;
                }
                Ok(())
            }
            Error::OwnerNotFound { owner, suggestion } => {
                write!(f, "Owner '{}' not found in spreadsheet", owner)?;
                if let Some(suggestion) = suggestion {
                    write!(f, ". Did you mean '{}'?", suggestion)?;
                }
                Ok(())
            }
            Error::NoAddresses(owner) => {
                write!(f, "No addresses found for owner '{}'", owner)
            }
            Error::SheetError(msg) => {
                write!(f, "Spreadsheet error: {}", msg)
            }
            Error::HttpError(msg) => {
                write!(f, "HTTP error: {}", msg)
            }
            Error::NetworkError(msg) => {
                write!(f, "Network error: {}", msg)
            }
            Error::IoError(err) => {
                write!(f, "I/O error: {}", err)
            }
            Error::InvalidInput(msg) => {
                write!(f, "Invalid input: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Error::NetworkError(err.to_string())
        } else {
            Error::HttpError(err.to_string())
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(io_err) => Error::IoError(io_err),
                other => Error::SheetError(format!("{other:?}")),
            }
        } else {
            Error::SheetError(err.to_string())
        }
    }
}

/// Convenience result type for butterfly-visit operations
pub type Result<T> = std::result::Result<T, Error>;
