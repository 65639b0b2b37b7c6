//! Colour theme for the orbat TUI.
//!
//! Themes are defined as TOML files. The default theme is embedded in the
//! binary via [`include_str!`] so the application works without any files on
//! disk. Call [`Theme::load_default`] at startup and pass the result through
//! the application as a shared reference.
//!
//! # Colour assignment for roots
//!
//! Root unit names are hashed to a stable index into the palette so the same
//! formation always gets the same colour, whatever the query leaves visible.

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types mirroring the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let modifiers = [
            (self.bold, Modifier::BOLD),
            (self.dim, Modifier::DIM),
            (self.italic, Modifier::ITALIC),
            (self.underlined, Modifier::UNDERLINED),
        ]
        .into_iter()
        .filter(|(on, _)| *on)
        .fold(Modifier::empty(), |acc, (_, m)| acc | m);

        let mut style = Style::default().add_modifier(modifiers);
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawUnits {
    name: RawStyle,
    ancestor: RawStyle,
    patch: RawStyle,
    placeholder: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawMeta {
    description: RawStyle,
    tags: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    command_bar: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawSearch {
    highlight: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawRoots {
    palette: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    units: RawUnits,
    meta: RawMeta,
    borders: RawBorders,
    search: RawSearch,
    roots: RawRoots,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme.
///
/// All styles are pre-resolved ratatui [`Style`] values, with no allocation at
/// render time.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Unit names in the tree and detail header.
    pub unit_name: Style,
    /// Pass-through ancestors kept only for their descendants.
    pub unit_ancestor: Style,
    /// Patch count marker.
    pub unit_patch: Style,
    /// Marker for the compact-mode placeholder image.
    pub unit_placeholder: Style,

    pub meta_description: Style,
    pub meta_tags: Style,

    /// Border style for the currently focused pane.
    pub border_focused: Style,
    /// Border style for the command bar pane
    pub border_command_bar: Style,
    /// Border style for unfocused panes.
    pub border_unfocused: Style,

    /// Inline highlight applied to matched query spans.
    pub search_highlight: Style,

    /// Ordered colour palette used for root unit colour cycling.
    root_palette: Vec<Color>,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Load and parse the embedded Gruvbox Dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Resolve a theme by name; unknown names fall back to the default.
    pub fn by_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Self::load_gruvbox_dark(),
            _ => Self::load_default(),
        }
    }

    /// Parse a theme from a TOML string.
    ///
    /// Unknown keys are ignored so user themes can be forward-compatible
    /// with future theme additions.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            unit_name: raw.units.name.into_style(),
            unit_ancestor: raw.units.ancestor.into_style(),
            unit_patch: raw.units.patch.into_style(),
            unit_placeholder: raw.units.placeholder.into_style(),
            meta_description: raw.meta.description.into_style(),
            meta_tags: raw.meta.tags.into_style(),
            border_focused: raw.borders.focused.into_style(),
            border_command_bar: raw.borders.command_bar.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            search_highlight: raw.search.highlight.into_style(),
            root_palette: raw
                .roots
                .palette
                .iter()
                .filter_map(|s| parse_color(s))
                .collect(),
        })
    }

    /// Return a stable [`Style`] for a root unit name.
    pub fn root_style(&self, name: &str) -> Style {
        if self.root_palette.is_empty() {
            return self.unit_name;
        }
        let idx = stable_hash(name) % self.root_palette.len();
        self.unit_name.fg(self.root_palette[idx])
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// djb2-style hash that is stable across Rust versions and process restarts.
fn stable_hash(s: &str) -> usize {
    s.bytes().fold(5381usize, |acc, b| {
        acc.wrapping_mul(31).wrapping_add(b as usize)
    })
}

/// Colour names (`dark_gray`, `light blue`), `#rrggbb` and 256-colour
/// indices, as ratatui parses them.
fn parse_color(s: &str) -> Option<Color> {
    s.parse().ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
