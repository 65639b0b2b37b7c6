//! Unit tree widget: collapsible tree of the filtered catalogue in the left pane.
//!
//! # Navigation
//! - `↑`/`k` and `↓`/`j` move the cursor up and down the visible list.
//! - `→`/`l` expands the focused node; `←`/`h` collapses it.
//! - `Enter` toggles expansion of the focused node.
//!
//! The tree is rebuilt from scratch after every filter pass with every node
//! expanded, so all surviving matches are visible. In search mode, nodes kept
//! only for a matching descendant are flagged and drawn dimmed.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use crate::widgets::highlighted;
use orbat_core::{unit_matches, Matcher, Unit};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};

// ---------------------------------------------------------------------------
// Tree node
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Child indices from the root list down to this node.
    pub path: Vec<usize>,
    pub label: String,
    pub expanded: bool,
    /// Kept only because a descendant matched; its own fields did not.
    pub ancestor: bool,
    pub patches: usize,
    /// The only patch is the compact-mode placeholder.
    pub placeholder: bool,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// `matcher` is the active query, `None` outside search mode.
    pub fn from_unit(unit: &Unit, path: Vec<usize>, matcher: Option<&Matcher>) -> Self {
        let children = unit
            .children()
            .iter()
            .enumerate()
            .map(|(i, child)| {
                let mut child_path = path.clone();
                child_path.push(i);
                TreeNode::from_unit(child, child_path, matcher)
            })
            .collect::<Vec<_>>();

        let patch_list = unit.patch_list();
        Self {
            path,
            label: unit.label().to_string(),
            expanded: true,
            ancestor: !children.is_empty() && matcher.is_some_and(|m| !unit_matches(unit, m)),
            patches: patch_list.len(),
            placeholder: patch_list.len() == 1 && patch_list[0].is_placeholder(),
            children,
        }
    }

    fn id(&self) -> &[usize] {
        &self.path
    }
}

// ---------------------------------------------------------------------------
// Tree state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct UnitTreeState {
    pub nodes: Vec<TreeNode>,
    /// Index into the currently-visible (flattened) list.
    pub cursor: usize,
}

impl UnitTreeState {
    pub fn from_units(units: &[Unit], matcher: Option<&Matcher>) -> Self {
        let nodes = units
            .iter()
            .enumerate()
            .map(|(i, u)| TreeNode::from_unit(u, vec![i], matcher))
            .collect();
        Self { nodes, cursor: 0 }
    }

    /// Path of the node at the cursor, if any.
    pub fn cursor_path(&self) -> Option<Vec<usize>> {
        self.visible()
            .into_iter()
            .nth(self.cursor)
            .map(|(_, n)| n.path.clone())
    }

    /// Flatten the tree into `(depth, &node)` pairs, respecting expanded state.
    pub fn visible(&self) -> Vec<(usize, &TreeNode)> {
        flatten(&self.nodes, 0)
    }

    /// Move the cursor onto root `index`. Returns `false` if there is no such root.
    pub fn select_root(&mut self, index: usize) -> bool {
        let found = self
            .visible()
            .iter()
            .position(|(depth, n)| *depth == 0 && n.path == [index]);
        match found {
            Some(pos) => {
                self.cursor = pos;
                tracing::debug!(root = index, cursor = pos, "tree: jump to root");
                true
            }
            None => false,
        }
    }

    /// Handle an [`AppEvent`], mutating state as appropriate.
    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::TreeNav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                tracing::debug!(cursor = self.cursor, "tree: cursor up");
            }
            AppEvent::TreeNav(Direction::Down) => {
                let max = self.visible().len().saturating_sub(1);
                if self.cursor < max {
                    self.cursor += 1;
                }
                tracing::debug!(cursor = self.cursor, "tree: cursor down");
            }
            AppEvent::TreeNav(Direction::Right) => {
                if let Some(path) = self.cursor_path() {
                    tracing::debug!(node = ?path, "tree: expand");
                    set_expanded(&mut self.nodes, &path, true);
                }
            }
            AppEvent::TreeNav(Direction::Left) => {
                if let Some(path) = self.cursor_path() {
                    tracing::debug!(node = ?path, "tree: collapse");
                    set_expanded(&mut self.nodes, &path, false);
                    self.clamp_cursor();
                }
            }
            AppEvent::Enter => {
                if let Some(path) = self.cursor_path() {
                    tracing::debug!(node = ?path, "tree: toggle expand");
                    toggle_expanded(&mut self.nodes, &path);
                    self.clamp_cursor();
                }
            }
            _ => {}
        }
    }

    fn clamp_cursor(&mut self) {
        let max = self.visible().len().saturating_sub(1);
        if self.cursor > max {
            self.cursor = max;
        }
    }
}

// ---------------------------------------------------------------------------
// Recursive tree helpers
// ---------------------------------------------------------------------------

fn flatten(nodes: &[TreeNode], depth: usize) -> Vec<(usize, &TreeNode)> {
    let mut out = Vec::new();
    for node in nodes {
        out.push((depth, node));
        if node.expanded {
            out.extend(flatten(&node.children, depth + 1));
        }
    }
    out
}

fn find_mut<'a>(nodes: &'a mut [TreeNode], path: &[usize]) -> Option<&'a mut TreeNode> {
    for node in nodes.iter_mut() {
        if node.id() == path {
            return Some(node);
        }
        if path.starts_with(node.id()) {
            return find_mut(&mut node.children, path);
        }
    }
    None
}

/// Set the `expanded` flag on the node at `path`. Returns `true` if found.
fn set_expanded(nodes: &mut [TreeNode], path: &[usize], expanded: bool) -> bool {
    match find_mut(nodes, path) {
        Some(node) => {
            node.expanded = expanded;
            true
        }
        None => false,
    }
}

/// Flip the `expanded` flag on the node at `path`. Returns `true` if found.
fn toggle_expanded(nodes: &mut [TreeNode], path: &[usize]) -> bool {
    match find_mut(nodes, path) {
        Some(node) => {
            node.expanded = !node.expanded;
            true
        }
        None => false,
    }
}

/// Resolve a tree path against the unit list it was built from.
pub fn unit_at<'a>(units: &'a [Unit], path: &[usize]) -> Option<&'a Unit> {
    let (first, rest) = path.split_first()?;
    let mut unit = units.get(*first)?;
    for &i in rest {
        unit = unit.children().get(i)?;
    }
    Some(unit)
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct UnitTree<'a> {
    state: &'a UnitTreeState,
    focused: bool,
    matcher: Option<&'a Matcher>,
    theme: &'a Theme,
}

impl<'a> UnitTree<'a> {
    pub fn new(
        state: &'a UnitTreeState,
        focused: bool,
        matcher: Option<&'a Matcher>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            state,
            focused,
            matcher,
            theme,
        }
    }

    fn node_line(&self, depth: usize, node: &TreeNode) -> Line<'static> {
        let indent = "  ".repeat(depth);
        let expand = if node.children.is_empty() {
            "  "
        } else if node.expanded {
            "▼ "
        } else {
            "▶ "
        };

        let base = if node.ancestor {
            self.theme.unit_ancestor
        } else if depth == 0 {
            self.theme.root_style(&node.label)
        } else {
            self.theme.unit_name
        };
        // Ancestors did not match themselves; don't highlight them.
        let matcher = if node.ancestor { None } else { self.matcher };

        let mut spans = vec![Span::raw(format!("{indent}{expand}"))];
        spans.extend(highlighted(&node.label, matcher, base, self.theme.search_highlight));
        if node.placeholder {
            spans.push(Span::styled(" [?]", self.theme.unit_placeholder));
        } else if node.patches > 0 {
            spans.push(Span::styled(format!(" [{}]", node.patches), self.theme.unit_patch));
        }
        Line::from(spans)
    }
}

impl Widget for UnitTree<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered().title("Units").border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let visible = self.state.visible();
        if visible.is_empty() {
            let msg = if self.matcher.is_some() {
                "no units match"
            } else {
                "catalogue is empty"
            };
            buf.set_string(
                inner.x + 1,
                inner.y,
                msg,
                Style::default().add_modifier(Modifier::DIM),
            );
            return;
        }

        let items: Vec<ListItem> = visible
            .iter()
            .map(|(depth, node)| ListItem::new(self.node_line(*depth, node)))
            .collect();

        let list =
            List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut list_state = ListState::default().with_selected(Some(self.state.cursor));
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use orbat_core::{Patch, Query};

    /// alpha → [bravo → [charlie], delta]; echo
    fn sample() -> Vec<Unit> {
        vec![
            Unit {
                subunits: Some(vec![
                    Unit {
                        subunits: Some(vec![Unit::named("charlie")]),
                        ..Unit::named("bravo")
                    },
                    Unit {
                        patches: Some(vec![Patch::placeholder()]),
                        ..Unit::named("delta")
                    },
                ]),
                ..Unit::named("alpha")
            },
            Unit::named("echo"),
        ]
    }

    fn labels(state: &UnitTreeState) -> Vec<&str> {
        state.visible().iter().map(|(_, n)| n.label.as_str()).collect()
    }

    #[test]
    fn builds_fully_expanded() {
        let state = UnitTreeState::from_units(&sample(), None);
        assert_eq!(labels(&state), vec!["alpha", "bravo", "charlie", "delta", "echo"]);
    }

    #[test]
    fn collapse_hides_descendants_and_clamps() {
        let mut state = UnitTreeState::from_units(&sample(), None);
        state.handle(&AppEvent::TreeNav(Direction::Left)); // collapse alpha
        assert_eq!(labels(&state), vec!["alpha", "echo"]);
        state.handle(&AppEvent::TreeNav(Direction::Right));
        assert_eq!(labels(&state).len(), 5);
    }

    #[test]
    fn enter_toggles_expansion() {
        let mut state = UnitTreeState::from_units(&sample(), None);
        state.handle(&AppEvent::TreeNav(Direction::Down)); // bravo
        state.handle(&AppEvent::Enter);
        assert_eq!(labels(&state), vec!["alpha", "bravo", "delta", "echo"]);
        state.handle(&AppEvent::Enter);
        assert_eq!(labels(&state).len(), 5);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut state = UnitTreeState::from_units(&sample(), None);
        state.handle(&AppEvent::TreeNav(Direction::Up));
        assert_eq!(state.cursor, 0);
        for _ in 0..10 {
            state.handle(&AppEvent::TreeNav(Direction::Down));
        }
        assert_eq!(state.cursor, 4);
    }

    #[test]
    fn cursor_path_resolves_to_unit() {
        let units = sample();
        let mut state = UnitTreeState::from_units(&units, None);
        state.handle(&AppEvent::TreeNav(Direction::Down));
        state.handle(&AppEvent::TreeNav(Direction::Down));
        let path = state.cursor_path().unwrap();
        assert_eq!(path, vec![0, 0, 0]);
        assert_eq!(unit_at(&units, &path).unwrap().label(), "charlie");
        assert!(unit_at(&units, &[3]).is_none());
        assert!(unit_at(&units, &[]).is_none());
    }

    #[test]
    fn select_root_moves_cursor() {
        let mut state = UnitTreeState::from_units(&sample(), None);
        assert!(state.select_root(1));
        assert_eq!(state.cursor, 4);
        assert!(!state.select_root(9));
    }

    #[test]
    fn non_matching_parents_are_ancestors_only_in_search_mode() {
        let units = sample();
        let browse = UnitTreeState::from_units(&units, None);
        assert!(!browse.nodes[0].ancestor);

        let matcher = Query::parse("charlie").matcher();
        let search = UnitTreeState::from_units(&units, Some(&matcher));
        let alpha = &search.nodes[0];
        assert!(alpha.ancestor);
        assert!(alpha.children[0].ancestor); // bravo
        // Leaves are never ancestors.
        assert!(!alpha.children[0].children[0].ancestor);
        assert!(!search.nodes[1].ancestor);
    }

    #[test]
    fn parent_matching_by_name_is_not_dimmed() {
        // Details mode: "alpha" has no meta or patches but matched itself.
        let units = vec![Unit {
            subunits: Some(vec![Unit::named("alpha-1")]),
            ..Unit::named("alpha")
        }];
        let matcher = Query::parse("alpha").matcher();
        let state = UnitTreeState::from_units(&units, Some(&matcher));
        assert!(!state.nodes[0].ancestor);
    }

    #[test]
    fn placeholder_patch_is_flagged() {
        let matcher = Query::parse("delta").matcher();
        let state = UnitTreeState::from_units(&sample(), Some(&matcher));
        let delta = &state.nodes[0].children[1];
        assert!(delta.placeholder);
        assert_eq!(delta.patches, 1);
    }
}
