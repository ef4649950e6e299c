// src/specs/mod.rs
//! # Normalization "specs" module
//!
//! One file per semantic domain. Each spec encodes *what the noisy text looks
//! like* and *how to rebuild a canonical value from it*:
//!
//! - `dates`   – 14 date spellings → `NaiveDate` (via a "D Month YYYY" string)
//! - `lengths` – metres, or feet + inches → metres
//! - `weights` – long / short / metric tons → metric tonnes
//! - `speeds`  – knots, mph, bare numbers → knots
//! - `hull`    – hull symbol / serial → (type, number)
//!
//! ## What lives here
//! - **Catalogs**: ordered `RuleSpec` lists, most specific first, built once
//!   into `LazyLock` statics and validated at construction.
//! - **Reconstruction policies**: the unit arithmetic or string rebuild that
//!   runs on a match.
//!
//! ## What does **not** live here
//! - **Rule iteration / merge discipline** – that is `engine::cascade`.
//! - **Which physical columns to read** – `runner` + `store::ColumnMap`.
//! - **File I/O** – `store` / `csv`.
//!
//! ## Conventions & invariants
//! - Order is priority. An explicit unit marker always sits above a fallback
//!   that guesses the unit.
//! - Dates and measures match case-insensitively; hull codes do not.
//! - Policies only read groups they declare in `required_groups`, or look up
//!   optional groups with `caps.name(..)`.
//!
//! In short: **`specs` knows how values are written.** The engine decides
//! which rows still need one.
pub mod dates;
pub mod hull;
pub mod lengths;
pub mod speeds;
pub mod weights;

/// Force every built-in catalog. Panics, naming the broken rule, if any
/// catalog fails validation.
pub fn validate_all() -> usize {
    dates::catalog().len()
        + lengths::catalog().len()
        + weights::catalog().len()
        + speeds::catalog().len()
        + hull::field_catalog().len()
        + hull::fallback_catalog().len()
}

/// Round half to even at `dp` decimal places.
pub(crate) fn round_dp(x: f64, dp: i32) -> f64 {
    let f = 10f64.powi(dp);
    (x * f).round_ties_even() / f
}

/// Parse a named group as `f64`; `None` if absent or empty.
pub(crate) fn group_f64(caps: &regex::Captures<'_>, name: &str) -> Option<f64> {
    caps.name(name)
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}
