// src/config/options.rs
use std::path::Path;

use super::consts::*;

/// Which canonical type a column normalizes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Domain {
    Date,
    Length,
    Weight,
    Speed,
}

impl Domain {
    pub const ALL: [Domain; 4] = [Domain::Date, Domain::Length, Domain::Weight, Domain::Speed];

    pub fn label(&self) -> &'static str {
        match self {
            Domain::Date => "date",
            Domain::Length => "length",
            Domain::Weight => "weight",
            Domain::Speed => "speed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delim {
    Csv,
    Tsv,
}

impl Delim {
    pub fn ext(&self) -> &'static str {
        match self { Delim::Csv => "csv", Delim::Tsv => "tsv" }
    }
    pub fn sep(&self) -> char {
        match self { Delim::Csv => ',', Delim::Tsv => '\t' }
    }
    /// Guess from a file extension; anything but `.tsv` is CSV.
    pub fn from_path(p: &Path) -> Self {
        match p.extension().and_then(|e| e.to_str()) {
            Some(e) if e.eq_ignore_ascii_case("tsv") => Delim::Tsv,
            _ => Delim::Csv,
        }
    }
}

/// Where the identifier pair comes from and where it goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentifierOptions {
    pub field_col: String,
    pub fallback_col: String,
    pub type_col: String,
    pub number_col: String,
}

impl Default for IdentifierOptions {
    fn default() -> Self {
        Self {
            field_col: s!(ID_FIELD_COL),
            fallback_col: s!(ID_FALLBACK_COL),
            type_col: s!(ID_TYPE_COL),
            number_col: s!(ID_NUMBER_COL),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub dates: Vec<String>,
    pub lengths: Vec<String>,
    pub weights: Vec<String>,
    pub speeds: Vec<String>,
    /// `None` skips identifier extraction.
    pub identifiers: Option<IdentifierOptions>,
    /// Optional prefix the date must follow (e.g. `Scrapped`), per column.
    pub date_prefixes: Vec<(String, String)>,
    pub strip_artifacts: bool,
    pub format: Delim,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        let owned = |cols: &[&str]| cols.iter().map(|c| s!(*c)).collect::<Vec<_>>();
        Self {
            dates: owned(DATE_COLS),
            lengths: owned(LENGTH_COLS),
            weights: owned(WEIGHT_COLS),
            speeds: owned(SPEED_COLS),
            identifiers: Some(IdentifierOptions::default()),
            date_prefixes: Vec::new(),
            strip_artifacts: true,
            format: Delim::Csv,
        }
    }
}

impl NormalizeOptions {
    /// Nothing selected; build up with `columns_mut`.
    pub fn empty() -> Self {
        Self {
            dates: Vec::new(),
            lengths: Vec::new(),
            weights: Vec::new(),
            speeds: Vec::new(),
            identifiers: None,
            date_prefixes: Vec::new(),
            strip_artifacts: false,
            format: Delim::Csv,
        }
    }

    pub fn columns(&self, domain: Domain) -> &[String] {
        match domain {
            Domain::Date => &self.dates,
            Domain::Length => &self.lengths,
            Domain::Weight => &self.weights,
            Domain::Speed => &self.speeds,
        }
    }

    pub fn columns_mut(&mut self, domain: Domain) -> &mut Vec<String> {
        match domain {
            Domain::Date => &mut self.dates,
            Domain::Length => &mut self.lengths,
            Domain::Weight => &mut self.weights,
            Domain::Speed => &mut self.speeds,
        }
    }

    /// Prefix registered for `column`, if any.
    pub fn date_prefix(&self, column: &str) -> Option<&str> {
        self.date_prefixes
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, p)| p.as_str())
    }
}
