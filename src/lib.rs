//! orbat: order-of-battle catalogue browser
//!
//! Terminal browser for hierarchical unit catalogues with a whitespace-token
//! regex filter. The engine lives in `orbat-core`, the ratatui shell in
//! `orbat-tui`; this crate wires them into one binary and adds a headless
//! JSON mode so the filter can be scripted and tested from the outside.
//!
//! # Architecture
//!
//! ```text
//! Catalogue ──► Query ──► Filter ──► TUI
//!                            │
//!                            └──► Headless JSON
//! ```

pub mod headless;

pub use orbat_core::{
    config::Config, filter_units, Catalogue, FilterOptions, FilterOutcome, JumpTarget, Query,
    Side, Unit,
};
