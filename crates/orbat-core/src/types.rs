//! Core types for orbat-core.
//!
//! A catalogue is an ordered list of root [`Unit`]s. Every unit may carry a
//! name, descriptive [`Meta`], image [`Patch`]es and nested sub-units. The
//! tree is a plain value: no shared nodes, no cycles, and cloning it yields a
//! fully independent copy.
//!
//! Absent fields are a valid state, not an error. They are skipped on
//! serialization so a filtered tree round-trips to the same JSON shape as the
//! source document. Keys the model does not know about are kept in `extra`
//! and written back out unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Image path used for both `full` and `thumb` of the compact-mode placeholder.
pub const PLACEHOLDER_IMAGE: &str = "images/unknown.jpg";

/// A node in the unit catalogue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subunits: Option<Vec<Unit>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patches: Option<Vec<Patch>>,
    /// Any other keys present in the source document.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Descriptive metadata attached to a unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-text tags (a single string, not a list).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An image reference: full-size path and thumbnail path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    pub full: String,
    pub thumb: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Patch {
    pub fn new(full: impl Into<String>, thumb: impl Into<String>) -> Self {
        Self {
            full: full.into(),
            thumb: thumb.into(),
            extra: Map::new(),
        }
    }

    /// The "unknown" image shown for direct matches that have no patches.
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_IMAGE, PLACEHOLDER_IMAGE)
    }

    pub fn is_placeholder(&self) -> bool {
        self.full == PLACEHOLDER_IMAGE && self.thumb == PLACEHOLDER_IMAGE
    }
}

impl Unit {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Display label: the name, or `(unnamed)` for pure container nodes.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed)")
    }

    /// Sub-units as a slice; absent and empty look the same.
    pub fn children(&self) -> &[Unit] {
        self.subunits.as_deref().unwrap_or(&[])
    }

    /// Patches as a slice; absent and empty look the same.
    pub fn patch_list(&self) -> &[Patch] {
        self.patches.as_deref().unwrap_or(&[])
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Unit::node_count).sum::<usize>()
    }
}

/// Total node count over a slice of root units.
pub fn tree_size(units: &[Unit]) -> usize {
    units.iter().map(Unit::node_count).sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
