//! Test builders: ergonomic constructors for `Unit` trees.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use orbat_core::{Meta, Patch, Unit};

// ---------------------------------------------------------------------------
// UnitBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Unit`] test fixtures.
///
/// # Example
///
/// ```rust
/// let unit = UnitBuilder::new("1st Brigade")
///     .description("Mechanised brigade")
///     .tags("armour")
///     .patch("full.jpg", "thumb.jpg")
///     .child(UnitBuilder::new("1st Battalion"))
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct UnitBuilder {
    name: Option<String>,
    description: Option<String>,
    tags: Option<String>,
    patches: Option<Vec<Patch>>,
    subunits: Option<Vec<Unit>>,
}

impl UnitBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// A unit without a name.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn patch(mut self, full: &str, thumb: &str) -> Self {
        self.patches
            .get_or_insert_with(Vec::new)
            .push(Patch::new(full, thumb));
        self
    }

    pub fn child(mut self, child: UnitBuilder) -> Self {
        self.subunits
            .get_or_insert_with(Vec::new)
            .push(child.build());
        self
    }

    /// Present-but-empty `subunits`.
    pub fn no_children(mut self) -> Self {
        self.subunits = Some(Vec::new());
        self
    }

    pub fn build(self) -> Unit {
        let meta = (self.description.is_some() || self.tags.is_some()).then(|| Meta {
            description: self.description,
            tags: self.tags,
            ..Meta::default()
        });
        Unit {
            name: self.name,
            subunits: self.subunits,
            meta,
            patches: self.patches,
            ..Unit::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// A leaf with only a name.
pub fn leaf(name: &str) -> Unit {
    UnitBuilder::new(name).build()
}

/// Names of `units` in order; `"(unnamed)"` for anonymous units.
pub fn names(units: &[Unit]) -> Vec<String> {
    units.iter().map(|u| u.label().to_string()).collect()
}

/// Every name in the tree, preorder.
pub fn all_names(units: &[Unit]) -> Vec<String> {
    let mut out = Vec::new();
    for unit in units {
        out.push(unit.label().to_string());
        out.extend(all_names(unit.children()));
    }
    out
}
