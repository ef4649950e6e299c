// src/specs/lengths.rs
//! Length, beam and draught → metres.

use std::sync::LazyLock;

use regex::Captures;

use super::{group_f64, round_dp};
use crate::config::consts::{FT_TO_M, IN_TO_M, LENGTH_DP};
use crate::engine::{self, Catalog, MatchCase, Reconstruct};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthFormula {
    /// Already metres; pass through.
    Metres,
    /// Feet plus optional inches.
    FeetInches,
}

impl Reconstruct for LengthFormula {
    type Output = f64;

    fn required_groups(&self) -> Vec<&'static str> {
        match self {
            LengthFormula::Metres => vec!["mq"],
            LengthFormula::FeetInches => vec!["ftq", "inq"],
        }
    }

    fn apply(&self, caps: &Captures<'_>) -> Option<f64> {
        let metres = match self {
            LengthFormula::Metres => group_f64(caps, "mq")?,
            LengthFormula::FeetInches => {
                let ft = group_f64(caps, "ftq")?;
                let inches = group_f64(caps, "inq").unwrap_or(0.0);
                ft * FT_TO_M + inches * IN_TO_M
            }
        };
        Some(round_dp(metres, LENGTH_DP))
    }
}

static LENGTHS: LazyLock<Catalog<LengthFormula>> = LazyLock::new(|| {
    Catalog::build(
        "lengths",
        MatchCase::Insensitive,
        rules![
            "metres"      => r"(?P<mq>\d+(?:\.\d+)?)\s?m\b", LengthFormula::Metres;
            "feet inches" => r#"(?P<ftq>\d+)(?:'|′|\s?ft\b|\s?feet\b)(?:\s*(?P<inq>\d+(?:\.\d+)?)(?:"|″|′′|''|\s?in\b))?"#, LengthFormula::FeetInches;
        ],
    )
    .unwrap_or_else(|e| panic!("{e}"))
});

pub fn catalog() -> &'static Catalog<LengthFormula> {
    &LENGTHS
}

pub fn to_metres<S: AsRef<str>>(column: &[Option<S>]) -> Vec<Option<f64>> {
    engine::cascade(column, catalog())
}
