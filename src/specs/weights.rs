// src/specs/weights.rs
//! Displacement and tonnage → metric tonnes.
//!
//! Where a cell lists several figures, the first one that carries a
//! recognizable unit wins. For surface ships that is usually standard
//! displacement, for submarines surfaced displacement.

use std::sync::LazyLock;

use regex::Captures;

use super::{group_f64, round_dp};
use crate::config::consts::{LTONS_TO_MTONS, STONS_TO_MTONS, WEIGHT_DP};
use crate::engine::{self, Catalog, MatchCase, Reconstruct};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TonUnit {
    Long,
    Short,
    Metric,
}

impl TonUnit {
    /// Tonnes per unit.
    pub fn factor(self) -> f64 {
        match self {
            TonUnit::Long => LTONS_TO_MTONS,
            TonUnit::Short => STONS_TO_MTONS,
            TonUnit::Metric => 1.0,
        }
    }
}

/// `qk` thousands (optional), `qh` the rest, scaled by `unit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeightFormula {
    pub unit: TonUnit,
}

impl Reconstruct for WeightFormula {
    type Output = f64;

    fn required_groups(&self) -> Vec<&'static str> {
        vec!["qh"]
    }

    fn apply(&self, caps: &Captures<'_>) -> Option<f64> {
        let thousands = group_f64(caps, "qk").unwrap_or(0.0);
        let rest = group_f64(caps, "qh")?;
        Some(round_dp((thousands * 1000.0 + rest) * self.unit.factor(), WEIGHT_DP))
    }
}

const QTY: &str = r"\b(?:(?P<qk>\d{1,3}),)?(?P<qh>\d+)";

const LONG: WeightFormula = WeightFormula { unit: TonUnit::Long };
const SHORT: WeightFormula = WeightFormula { unit: TonUnit::Short };
const METRIC: WeightFormula = WeightFormula { unit: TonUnit::Metric };

static WEIGHTS: LazyLock<Catalog<WeightFormula>> = LazyLock::new(|| {
    let q = |unit: &str| [QTY, unit].concat();
    Catalog::build(
        "weights",
        MatchCase::Insensitive,
        rules![
            // "long" is optional: plain tons next to a figure are long tons.
            "long tons"         => q(r" (?:(?:t\.)?long |\(long\) )?tons?\b"), LONG;
            "short tons"        => q(r" short tons?\b"), SHORT;
            "metric tons"       => q(r" (?:metric tons?\b|tonnes?\b|t(?:\.|\b))"), METRIC;
            // Fallbacks below guess long tons, the naval default.
            "ton later"         => q(r".+ton"), LONG;
            // Known-imprecise: skips "cubic"/"m³" but also any other c/m word.
            "qty not c/m"       => q(r" [^cm]"), LONG;
            "bare number"       => r"^\s*(?P<qh>\d{2,})\s*$", LONG;
        ],
    )
    .unwrap_or_else(|e| panic!("{e}"))
});

pub fn catalog() -> &'static Catalog<WeightFormula> {
    &WEIGHTS
}

pub fn to_tonnes<S: AsRef<str>>(column: &[Option<S>]) -> Vec<Option<f64>> {
    engine::cascade(column, catalog())
}
