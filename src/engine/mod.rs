// src/engine/mod.rs
//! Domain-agnostic extraction cascade.
//!
//! A [`Catalog`](types::Catalog) is data: ordered rules, each a compiled
//! pattern plus a reconstruction policy. The cascade is logic: it offers
//! every still-unresolved row to rule 1, then the remainder to rule 2, and
//! so on. Nothing here knows about dates or units; `specs` supplies that.

#[allow(clippy::module_inception)]
pub mod engine;
pub mod types;

pub use engine::{cascade, cascade_into};
pub use types::{CascadeStats, Catalog, CatalogError, MatchCase, Reconstruct, Rule, RuleSpec};
