//! Loading a listings catalog from a JSON file.
//!
//! The catalog file is a plain JSON array of tagged listing records. It
//! is read once at startup; the engine itself never writes it back.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::listing::Listing;

/// Catalog loading errors.
#[derive(Debug)]
pub enum CatalogError {
    Io(String),
    Parse(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "Cannot read catalog: {}", msg),
            Self::Parse(msg) => write!(f, "Malformed catalog: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}

/// An in-memory listings catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub listings: Vec<Listing>,
}

impl Catalog {
    /// Load a catalog from a JSON file.
    pub fn load_from(path: &Path) -> Result<Self, CatalogError> {
        let data = fs::read_to_string(path).map_err(|e| CatalogError::Io(e.to_string()))?;
        let listings: Vec<Listing> =
            serde_json::from_str(&data).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Ok(Self { listings })
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
