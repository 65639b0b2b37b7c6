//! orbat-core: unit catalogue model and hierarchical query-filter engine.
//!
//! This crate owns everything below the presentation layer: the [`Unit`]
//! tree loaded from a catalogue document, the query tokenizer and token
//! matcher, and the recursive filter that decides which nodes of the tree
//! survive a query.
//!
//! # Pipeline
//!
//! ```text
//! raw query ──► tokenize ──► Query ──┐
//!                                    ├──► filter_units ──► FilterOutcome ──► UI / headless
//! Catalogue::load ──► [Unit] ────────┘
//! ```
//!
//! The filter is a pure function of its inputs: the caller's tree is never
//! mutated, and every call re-scans the whole tree.

pub mod catalogue;
pub mod config;
pub mod error;
pub mod filter;
pub mod query;
pub mod types;

pub use catalogue::{Catalogue, Side};
pub use error::CatalogueError;
pub use filter::{
    filter_unit, filter_units, unit_matches, FilterOptions, FilterOutcome, JumpTarget,
};
pub use query::{matches_all, tokenize, Matcher, Query};
pub use types::{tree_size, Meta, Patch, Unit, PLACEHOLDER_IMAGE};
