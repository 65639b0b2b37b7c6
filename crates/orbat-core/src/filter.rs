//! Filter engine: recursive, bottom-up pruning of a unit tree.
//!
//! [`filter_units`] is the entry point. It clones the caller's roots once
//! and then lets [`filter_unit`] rewrite that private copy in place, so the
//! source tree is never observably changed.
//!
//! # Per-node rules
//!
//! 1. Children are filtered first; only surviving children are kept, in
//!    their original order.
//! 2. The node matches when all tokens are found in its lower-cased name,
//!    description or tags (any one of the three is enough). Absent fields
//!    never match.
//! 3. In compact mode a matching node without patches gets a single
//!    placeholder patch.
//! 4. A node that does not match but still has children is a pass-through
//!    ancestor: its meta and patches are removed and it is kept.
//! 5. Anything else is kept iff it matched.

use crate::query::{Matcher, Query};
use crate::types::{tree_size, Patch, Unit};
use serde::Serialize;

/// Display options that affect the filter output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOptions {
    /// Inject placeholder patches for matches that have none.
    pub compact: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self { compact: true }
    }
}

/// In-page navigation entry for one surviving root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JumpTarget {
    /// Position of the root in the filtered output.
    pub index: usize,
    /// Stable anchor, `cat-<index>`.
    pub anchor: String,
    pub name: Option<String>,
}

/// Result of one filter pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOutcome {
    /// True when the query had at least one token.
    pub search_mode: bool,
    pub jump_targets: Vec<JumpTarget>,
    pub units: Vec<Unit>,
}

impl FilterOutcome {
    fn new(units: Vec<Unit>, search_mode: bool) -> Self {
        let jump_targets = jump_targets(&units);
        Self {
            search_mode,
            jump_targets,
            units,
        }
    }
}

/// Build one [`JumpTarget`] per root, in order.
pub fn jump_targets(units: &[Unit]) -> Vec<JumpTarget> {
    units
        .iter()
        .enumerate()
        .map(|(index, unit)| JumpTarget {
            index,
            anchor: format!("cat-{index}"),
            name: unit.name.clone(),
        })
        .collect()
}

/// Filter a catalogue's roots against `query`.
///
/// With no tokens this returns a copy of `units` unchanged and search mode
/// off. Otherwise the roots are copied once and each is filtered on its own;
/// roots that do not survive are dropped and the rest keep their order.
pub fn filter_units(units: &[Unit], query: &Query, options: FilterOptions) -> FilterOutcome {
    if !query.is_search_mode() {
        return FilterOutcome::new(units.to_vec(), false);
    }

    let matcher = query.matcher();
    let mut filtered = units.to_vec();
    filtered.retain_mut(|unit| filter_unit(unit, &matcher, options.compact));

    tracing::debug!(
        tokens = matcher.len(),
        compact = options.compact,
        scanned = tree_size(units),
        kept = tree_size(&filtered),
        roots = filtered.len(),
        "filter pass complete"
    );

    FilterOutcome::new(filtered, true)
}

/// Filter a single node in place and report whether it survives.
///
/// `unit` must already be a private copy: its sub-units, meta and patches
/// are rewritten. A dropped node may be left partially rewritten.
pub fn filter_unit(unit: &mut Unit, matcher: &Matcher, compact: bool) -> bool {
    let has_matching_subunits = match unit.subunits.as_mut() {
        Some(subunits) => {
            subunits.retain_mut(|child| filter_unit(child, matcher, compact));
            !subunits.is_empty()
        }
        None => false,
    };

    let pattern_found = unit_matches(unit, matcher);

    if compact && pattern_found && unit.patches.is_none() {
        unit.patches = Some(vec![Patch::placeholder()]);
    }

    if !pattern_found && has_matching_subunits {
        unit.patches = None;
        unit.meta = None;
        return true;
    }

    pattern_found
}

/// Name, description or tags contain every token.
///
/// Absent and empty fields never match, even for tokens like `a*` that
/// accept the empty string.
pub fn unit_matches(unit: &Unit, matcher: &Matcher) -> bool {
    let field_matches = |field: Option<&str>| {
        field
            .filter(|text| !text.is_empty())
            .is_some_and(|text| matcher.matches_all(&text.to_lowercase()))
    };

    let meta = unit.meta.as_ref();
    field_matches(unit.name.as_deref())
        || field_matches(meta.and_then(|m| m.tags.as_deref()))
        || field_matches(meta.and_then(|m| m.description.as_deref()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Meta;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn meta(description: Option<&str>, tags: Option<&str>) -> Option<Meta> {
        Some(Meta {
            description: description.map(str::to_string),
            tags: tags.map(str::to_string),
            ..Meta::default()
        })
    }

    fn with_children(name: &str, children: Vec<Unit>) -> Unit {
        Unit {
            subunits: Some(children),
            ..Unit::named(name)
        }
    }

    fn run(units: &[Unit], raw: &str, compact: bool) -> FilterOutcome {
        filter_units(units, &Query::parse(raw), FilterOptions { compact })
    }

    #[test]
    fn empty_query_is_identity() {
        let units = vec![with_children("Alpha", vec![Unit::named("Bravo")])];
        let out = run(&units, "", true);
        assert!(!out.search_mode);
        assert_eq!(out.units, units);
    }

    #[test]
    fn end_to_end_compact_example() {
        let units = vec![with_children("Alpha", vec![Unit::named("Bravo Company")])];
        let out = run(&units, "bravo", true);

        let expected = vec![with_children(
            "Alpha",
            vec![Unit {
                patches: Some(vec![Patch::placeholder()]),
                ..Unit::named("Bravo Company")
            }],
        )];
        assert!(out.search_mode);
        assert_eq!(out.units, expected);
    }

    #[test]
    fn details_mode_adds_no_placeholder() {
        let units = vec![Unit::named("Bravo")];
        let out = run(&units, "bravo", false);
        assert_eq!(out.units, vec![Unit::named("Bravo")]);
    }

    #[test]
    fn existing_patches_are_not_replaced() {
        let unit = Unit {
            patches: Some(vec![Patch::new("b.jpg", "b_t.jpg")]),
            ..Unit::named("Bravo")
        };
        let out = run(&[unit.clone()], "bravo", true);
        assert_eq!(out.units, vec![unit]);
    }

    #[test]
    fn empty_patch_list_is_not_absent() {
        let unit = Unit {
            patches: Some(Vec::new()),
            ..Unit::named("Bravo")
        };
        let out = run(&[unit.clone()], "bravo", true);
        assert_eq!(out.units, vec![unit]);
    }

    #[test]
    fn pass_through_ancestor_is_redacted() {
        let units = vec![Unit {
            meta: meta(Some("armoured"), Some("tanks")),
            patches: Some(vec![Patch::new("a.jpg", "a_t.jpg")]),
            ..with_children("Alpha", vec![Unit::named("Bravo")])
        }];
        let out = run(&units, "bravo", false);
        let root = &out.units[0];
        assert_eq!(root.name.as_deref(), Some("Alpha"));
        assert!(root.meta.is_none());
        assert!(root.patches.is_none());
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn matching_ancestor_keeps_its_own_content() {
        let ancestor = Unit {
            meta: meta(Some("bravo group hq"), None),
            patches: Some(vec![Patch::new("a.jpg", "a_t.jpg")]),
            ..with_children("Alpha", vec![Unit::named("Bravo")])
        };
        let out = run(&[ancestor.clone()], "bravo", false);
        assert_eq!(out.units, vec![ancestor]);
    }

    #[test]
    fn non_matching_leaf_is_dropped() {
        let units = vec![with_children(
            "Alpha",
            vec![Unit::named("Bravo"), Unit::named("Charlie")],
        )];
        let out = run(&units, "charlie", false);
        let names: Vec<_> = out.units[0].children().iter().map(Unit::label).collect();
        assert_eq!(names, vec!["Charlie"]);
    }

    #[test]
    fn container_emptied_by_filtering_is_dropped() {
        let units = vec![with_children("Alpha", vec![Unit::named("Bravo")])];
        let out = run(&units, "zulu", true);
        assert!(out.units.is_empty());
        assert!(out.jump_targets.is_empty());
    }

    #[test]
    fn matching_node_with_emptied_children_keeps_empty_list() {
        let units = vec![with_children("Alpha", vec![Unit::named("Bravo")])];
        let out = run(&units, "alpha", false);
        assert_eq!(out.units, vec![with_children("Alpha", Vec::new())]);
    }

    #[test]
    fn absent_subunits_stay_absent() {
        let out = run(&[Unit::named("Alpha")], "alpha", false);
        assert!(out.units[0].subunits.is_none());
    }

    #[test]
    fn description_and_tags_are_searched() {
        let by_description = Unit {
            meta: meta(Some("Mechanised Infantry"), None),
            ..Unit::named("1st")
        };
        let by_tags = Unit {
            meta: meta(None, Some("Artillery, HIMARS")),
            ..Unit::named("2nd")
        };
        let out = run(&[by_description, by_tags], "infantry", false);
        assert_eq!(out.units.len(), 1);
        assert_eq!(out.units[0].label(), "1st");

        let by_tags = Unit {
            meta: meta(None, Some("Artillery, HIMARS")),
            ..Unit::named("2nd")
        };
        let out = run(&[by_tags], "himars", false);
        assert_eq!(out.units.len(), 1);
    }

    #[test]
    fn all_tokens_must_hit_the_same_field() {
        let unit = Unit {
            meta: meta(Some("infantry"), None),
            ..Unit::named("Alpha")
        };
        let out = run(&[unit], "alpha infantry", false);
        assert!(out.units.is_empty());
    }

    #[test]
    fn unnamed_node_never_matches_by_name() {
        let out = run(&[Unit::default()], "", false);
        assert_eq!(out.units.len(), 1);
        let out = run(&[Unit::default()], "a", false);
        assert!(out.units.is_empty());
    }

    #[rstest]
    #[case("a*")]
    #[case("^$")]
    #[case("x?")]
    #[case(" ")]
    #[case("a  b")]
    fn empty_fields_never_match(#[case] query: &str) {
        let empty = Unit {
            meta: meta(Some(""), Some("")),
            ..Unit::named("")
        };
        let out = run(&[empty, Unit::default()], query, true);
        assert_eq!(out.units, Vec::<Unit>::new());
    }

    #[test]
    fn empty_name_falls_back_to_description() {
        let unit = Unit {
            meta: meta(Some("signals"), Some("")),
            ..Unit::named("")
        };
        let out = run(&[unit.clone()], "sig", false);
        assert_eq!(out.units, vec![unit]);
    }

    #[test]
    fn double_space_matches_every_named_node() {
        // "a  b" → ["a", "", "b"]; the empty token is found everywhere.
        let units = vec![Unit::named("ab"), Unit::named("zz")];
        let out = run(&units, "a  b", false);
        assert_eq!(out.units, vec![Unit::named("ab")]);

        let out = run(&units, " ", false);
        assert_eq!(out.units.len(), 2);
    }

    #[test]
    fn malformed_pattern_drops_everything() {
        let units = vec![Unit::named("(alpha)")];
        let out = run(&units, "(", true);
        assert!(out.search_mode);
        assert!(out.units.is_empty());
    }

    #[test]
    fn sibling_order_is_preserved() {
        let units = vec![
            Unit::named("x-1"),
            Unit::named("y"),
            Unit::named("x-2"),
            Unit::named("x-3"),
        ];
        let out = run(&units, "x", false);
        let names: Vec<_> = out.units.iter().map(Unit::label).collect();
        assert_eq!(names, vec!["x-1", "x-2", "x-3"]);
    }

    #[test]
    fn jump_targets_follow_filtered_roots() {
        let units = vec![Unit::named("Alpha"), Unit::named("Bravo"), Unit::named("Alps")];
        let out = run(&units, "alp", false);
        assert_eq!(
            out.jump_targets,
            vec![
                JumpTarget {
                    index: 0,
                    anchor: "cat-0".into(),
                    name: Some("Alpha".into())
                },
                JumpTarget {
                    index: 1,
                    anchor: "cat-1".into(),
                    name: Some("Alps".into())
                },
            ]
        );
    }

    #[test]
    fn source_is_not_mutated() {
        let units = vec![Unit {
            meta: meta(Some("hq"), None),
            ..with_children("Alpha", vec![Unit::named("Bravo"), Unit::named("Charlie")])
        }];
        let before = units.clone();
        for _ in 0..3 {
            run(&units, "bravo", true);
        }
        assert_eq!(units, before);
    }

    #[test]
    fn filter_unit_reports_keep() {
        let matcher = Query::parse("bravo").matcher();
        let mut unit = with_children("Alpha", vec![Unit::named("Bravo")]);
        assert!(filter_unit(&mut unit, &matcher, false));
        let mut unit = Unit::named("Charlie");
        assert!(!filter_unit(&mut unit, &matcher, false));
    }
}
