// src/specs/speeds.rs
use std::sync::LazyLock;

use regex::Captures;

use super::{group_f64, round_dp};
use crate::config::consts::{MPH_TO_KNOTS, SPEED_DP};
use crate::engine::{self, Catalog, MatchCase, Reconstruct};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeedUnit {
    Knots,
    Mph,
}

/// `kq` whole part, `kqd` tenths digit (optional).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpeedFormula {
    pub unit: SpeedUnit,
}

impl Reconstruct for SpeedFormula {
    type Output = f64;

    fn required_groups(&self) -> Vec<&'static str> {
        vec!["kq", "kqd"]
    }

    fn apply(&self, caps: &Captures<'_>) -> Option<f64> {
        let whole = group_f64(caps, "kq")?;
        let tenths = group_f64(caps, "kqd").unwrap_or(0.0);
        let value = whole + tenths / 10.0;
        let knots = match self.unit {
            SpeedUnit::Knots => value,
            SpeedUnit::Mph => value * MPH_TO_KNOTS,
        };
        Some(round_dp(knots, SPEED_DP))
    }
}

// Digits past the tenths are dropped.
const QTY: &str = r"(?P<kq>\d+)(?:\.(?P<kqd>\d)\d*)?";

const KNOTS: SpeedFormula = SpeedFormula { unit: SpeedUnit::Knots };
const MPH: SpeedFormula = SpeedFormula { unit: SpeedUnit::Mph };

static SPEEDS: LazyLock<Catalog<SpeedFormula>> = LazyLock::new(|| {
    let q = |unit: &str| [QTY, unit].concat();
    Catalog::build(
        "speeds",
        MatchCase::Insensitive,
        rules![
            "knots"  => q(r"\s?\+?(?:\[\d+\])?\s?(?:knots|kn|kt)"), KNOTS;
            "mph"    => q(r"\+? (?:miles per hour|mph)"), MPH;
            "k"      => q(r"\s?k"), KNOTS;
            "bare"   => q(""), KNOTS;
        ],
    )
    .unwrap_or_else(|e| panic!("{e}"))
});

pub fn catalog() -> &'static Catalog<SpeedFormula> {
    &SPEEDS
}

pub fn to_knots<S: AsRef<str>>(column: &[Option<S>]) -> Vec<Option<f64>> {
    engine::cascade(column, catalog())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(s: &str) -> Option<f64> {
        to_knots(&[Some(s)]).remove(0)
    }

    #[test]
    fn knots_variants() {
        assert_eq!(one("33 knots (61 km/h; 38 mph)"), Some(33.0));
        assert_eq!(one("32.5 kn"), Some(32.5));
        assert_eq!(one("35+ kt"), Some(35.0));
        assert_eq!(one("33[2] knots"), Some(33.0));
        assert_eq!(one("33.75 knots"), Some(33.7));
    }

    #[test]
    fn mph_is_converted() {
        assert_eq!(one("38 mph"), Some(33.021));
        assert_eq!(one("45 miles per hour"), Some(39.104));
    }

    #[test]
    fn low_confidence_forms() {
        assert_eq!(one("30k"), Some(30.0));
        assert_eq!(one("21"), Some(21.0));
        assert_eq!(one("about 18.2"), Some(18.2));
        assert_eq!(one("classified"), None);
    }

    #[test]
    fn knots_beat_mph_in_same_cell() {
        assert_eq!(one("38 mph (33 knots)"), Some(33.0));
    }
}
