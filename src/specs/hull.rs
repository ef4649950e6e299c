// src/specs/hull.rs
//! Hull classification + serial number, e.g. `DD-714` → (`DD`, `714`).
//!
//! Two sources, tried in order with the same fill-only-if-empty rule:
//! the infobox "Identification" row, then a fallback string (the article
//! URL or name, whose trailing parenthetical usually carries the symbol).

use std::sync::LazyLock;

use regex::Captures;
use tracing::debug;

use crate::engine::{self, Catalog, MatchCase, Reconstruct};
use crate::error::Result;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Identifier {
    /// Classification code (`DD`, `CV`, `PYc`, `AM(X)`); may be empty.
    pub kind: String,
    pub number: String,
}

impl Identifier {
    pub fn new(kind: impl Into<String>, number: impl Into<String>) -> Self {
        Self { kind: kind.into(), number: number.into() }
    }
}

/// Copies `ht` (type) and `hn` (number) verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HullPolicy;

impl Reconstruct for HullPolicy {
    type Output = Identifier;

    fn required_groups(&self) -> Vec<&'static str> {
        vec!["ht", "hn"]
    }

    fn apply(&self, caps: &Captures<'_>) -> Option<Identifier> {
        let kind = caps.name("ht").map_or("", |m| m.as_str());
        let number = caps.name("hn")?.as_str();
        Some(Identifier::new(kind, number))
    }
}

static FIELD: LazyLock<Catalog<HullPolicy>> = LazyLock::new(|| {
    Catalog::build(
        "hull_field",
        MatchCase::Sensitive,
        rules![
            "labelled" => r"Hull (?:symbol|name|number):(?: )*(?P<ht>[a-zA-Z]+)-?(?P<hn>\d+)(?: |$)", HullPolicy;
            "bare"     => r"(?P<ht>[a-zA-Z]+)-?(?P<hn>\d+)", HullPolicy;
        ],
    )
    .unwrap_or_else(|e| panic!("{e}"))
});

// Every fallback pattern is anchored at the end so an earlier
// parenthetical in the text cannot match.
static FALLBACK: LazyLock<Catalog<HullPolicy>> = LazyLock::new(|| {
    Catalog::build(
        "hull_fallback",
        MatchCase::Sensitive,
        rules![
            "(TYPE-N)"      => r"\((?P<ht>[a-zA-Z]+)-?(?P<hn>\d+)\)$", HullPolicy;
            "(YYYY)"        => r"\((?P<ht>)(?P<hn>\d{4})\)$", HullPolicy;
            "(TYPE(S)-N)"   => r"\((?P<ht>[a-zA-Z]+\(\w+\))-?(?P<hn>\d+)\)$", HullPolicy;
            "TYPE-N"        => r"(?P<ht>[a-zA-Z]+)-?(?P<hn>\d+)$", HullPolicy;
            "(TYPE-N-x)"    => r"\((?P<ht>[a-zA-Z]+)-?(?P<hn>\d+)-?\w+\)$", HullPolicy;
        ],
    )
    .unwrap_or_else(|e| panic!("{e}"))
});

pub fn field_catalog() -> &'static Catalog<HullPolicy> {
    &FIELD
}

pub fn fallback_catalog() -> &'static Catalog<HullPolicy> {
    &FALLBACK
}

/// Identification field first; the fallback only fills what is still empty.
pub fn extract<S, T>(field: &[Option<S>], fallback: &[Option<T>]) -> Result<Vec<Option<Identifier>>>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let mut out = engine::cascade(field, field_catalog());
    let from_field = out.iter().filter(|v| v.is_some()).count();
    let stats = engine::cascade_into(fallback, fallback_catalog(), &mut out)?;
    debug!(
        from_field,
        from_fallback = stats.newly_resolved(),
        unresolved = stats.unresolved,
        "hull identifiers"
    );
    Ok(out)
}
