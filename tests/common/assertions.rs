//! Domain-specific assertion macros for orbat harnesses.
//!
//! These add context-rich failure messages that make it clear *which* filter
//! invariant was violated and *where* in the tree it happened.

use orbat_core::Unit;

// ---------------------------------------------------------------------------
// Tree shape assertions
// ---------------------------------------------------------------------------

/// Assert that the root names of a unit list are exactly `expected`, in order.
///
/// ```rust
/// assert_roots!(outcome.units, ["A", "D"]);
/// ```
#[macro_export]
macro_rules! assert_roots {
    ($units:expr, [$($name:expr),* $(,)?]) => {{
        let units: &[orbat_core::Unit] = &$units;
        let actual: Vec<&str> = units.iter().map(|u| u.label()).collect();
        let expected: Vec<&str> = vec![$($name),*];
        if actual != expected {
            panic!(
                "assert_roots! failed:\n  expected: {:?}\n  actual:   {:?}",
                expected, actual
            );
        }
    }};
}

/// Assert that a unit carries exactly the placeholder patch.
#[macro_export]
macro_rules! assert_placeholder {
    ($unit:expr) => {{
        let unit: &orbat_core::Unit = &$unit;
        match unit.patches.as_deref() {
            Some([p]) if p.is_placeholder() => {}
            other => panic!(
                "assert_placeholder! failed on {:?}:\n  patches: {:?}",
                unit.label(),
                other
            ),
        }
    }};
}

/// Assert that a unit was reduced to a pass-through ancestor: no meta, no
/// patches, at least one child.
#[macro_export]
macro_rules! assert_redacted {
    ($unit:expr) => {{
        let unit: &orbat_core::Unit = &$unit;
        if unit.meta.is_some() || unit.patches.is_some() || unit.children().is_empty() {
            panic!(
                "assert_redacted! failed on {:?}:\n  meta: {:?}\n  patches: {:?}\n  children: {}",
                unit.label(),
                unit.meta,
                unit.patches,
                unit.children().len()
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Invariant helpers (used by the property tests)
// ---------------------------------------------------------------------------

/// True when every surviving unit either matched on its own content or still
/// has children.
pub fn has_no_empty_shells(units: &[Unit], matched: &dyn Fn(&Unit) -> bool) -> bool {
    units.iter().all(|u| {
        (matched(u) || !u.children().is_empty()) && has_no_empty_shells(u.children(), matched)
    })
}

/// True when `sub` is an order-preserving subsequence of `full`.
pub fn is_subsequence<T: PartialEq>(sub: &[T], full: &[T]) -> bool {
    let mut it = full.iter();
    sub.iter().all(|s| it.any(|f| f == s))
}
