//! Catalogue loading.
//!
//! A catalogue is a JSON array of root units stored as `<data dir>/ua.json`
//! or `<data dir>/ru.json`. It is read once and then held as immutable
//! source data; every query is evaluated against it with
//! [`filter_units`](crate::filter::filter_units).

use crate::error::CatalogueError;
use crate::types::{tree_size, Unit};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Which catalogue to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Ua,
    Ru,
}

impl Side {
    pub fn title(self) -> &'static str {
        match self {
            Side::Ua => "Ukrainian Units",
            Side::Ru => "Russian Units",
        }
    }

    pub fn datafile(self) -> &'static str {
        match self {
            Side::Ua => "ua.json",
            Side::Ru => "ru.json",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Ua => write!(f, "ua"),
            Side::Ru => write!(f, "ru"),
        }
    }
}

impl FromStr for Side {
    type Err = CatalogueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ua" => Ok(Side::Ua),
            "ru" => Ok(Side::Ru),
            other => Err(CatalogueError::UnknownSide(other.to_string())),
        }
    }
}

/// A loaded unit catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalogue {
    pub side: Side,
    pub title: String,
    pub units: Vec<Unit>,
}

impl Catalogue {
    pub fn new(side: Side, units: Vec<Unit>) -> Self {
        Self {
            side,
            title: side.title().to_string(),
            units,
        }
    }

    /// Load `<data_dir>/<side datafile>`.
    pub fn load(side: Side, data_dir: &Path) -> Result<Self, CatalogueError> {
        Self::from_path(side, &Self::path_for(side, data_dir))
    }

    /// Load a catalogue from an explicit file, labelled as `side`.
    pub fn from_path(side: Side, path: &Path) -> Result<Self, CatalogueError> {
        let src = std::fs::read_to_string(path).map_err(|source| CatalogueError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let units = parse_units(&src).map_err(|source| CatalogueError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            path = %path.display(),
            %side,
            roots = units.len(),
            nodes = tree_size(&units),
            "catalogue loaded"
        );
        Ok(Self::new(side, units))
    }

    /// Build a catalogue from an in-memory document.
    pub fn from_json_str(side: Side, src: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(side, parse_units(src)?))
    }

    /// Path this side would be loaded from under `data_dir`.
    pub fn path_for(side: Side, data_dir: &Path) -> PathBuf {
        data_dir.join(side.datafile())
    }
}

/// Parse a catalogue document (a JSON array of units).
pub fn parse_units(src: &str) -> Result<Vec<Unit>, serde_json::Error> {
    serde_json::from_str(src)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
