// src/engine/types.rs
use std::fmt;

use regex::{Captures, Regex, RegexBuilder};
use thiserror::Error;

/// How a catalog's patterns treat letter case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchCase {
    /// Dates and measures: free text drifts in capitalization.
    Insensitive,
    /// Identifiers: type codes are all-caps by convention.
    Sensitive,
}

/// Turns one successful match into a canonical value.
///
/// `required_groups` lists every named group `apply` reads unconditionally;
/// catalog construction rejects a rule whose pattern lacks any of them.
/// Groups that are optional in the text (inches, tenths, thousands) may be
/// looked up with `caps.name(..)` without being listed.
pub trait Reconstruct {
    type Output;

    fn required_groups(&self) -> Vec<&'static str>;

    /// `None` means the match produced nothing usable; the row stays open.
    fn apply(&self, caps: &Captures<'_>) -> Option<Self::Output>;
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog `{catalog}` has no rules")]
    Empty { catalog: &'static str },

    #[error("catalog `{catalog}`, rule `{rule}`: pattern does not compile: {source}")]
    Pattern {
        catalog: &'static str,
        rule: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("catalog `{catalog}`, rule `{rule}`: policy reads group `{group}` missing from its pattern")]
    MissingGroup {
        catalog: &'static str,
        rule: &'static str,
        group: &'static str,
    },
}

/// Unbuilt rule: pattern text plus policy.
pub struct RuleSpec<P> {
    pub label: &'static str,
    pub pattern: String,
    pub policy: P,
}

impl<P> RuleSpec<P> {
    pub fn new(label: &'static str, pattern: impl Into<String>, policy: P) -> Self {
        Self { label, pattern: pattern.into(), policy }
    }
}

/// One compiled (pattern, reconstruction policy) pair.
pub struct Rule<P> {
    pub label: &'static str,
    pub regex: Regex,
    pub policy: P,
}

/// Ordered rules for one domain, most specific first. Only constructible
/// through [`Catalog::build`], so every instance has passed validation.
pub struct Catalog<P> {
    name: &'static str,
    case: MatchCase,
    rules: Vec<Rule<P>>,
}

impl<P: Reconstruct> Catalog<P> {
    pub fn build(
        name: &'static str,
        case: MatchCase,
        specs: Vec<RuleSpec<P>>,
    ) -> Result<Self, CatalogError> {
        if specs.is_empty() {
            return Err(CatalogError::Empty { catalog: name });
        }

        let mut rules = Vec::with_capacity(specs.len());
        for spec in specs {
            let regex = RegexBuilder::new(&spec.pattern)
                .case_insensitive(case == MatchCase::Insensitive)
                .build()
                .map_err(|source| CatalogError::Pattern { catalog: name, rule: spec.label, source })?;

            for group in spec.policy.required_groups() {
                if !regex.capture_names().flatten().any(|n| n == group) {
                    return Err(CatalogError::MissingGroup { catalog: name, rule: spec.label, group });
                }
            }

            rules.push(Rule { label: spec.label, regex, policy: spec.policy });
        }

        Ok(Self { name, case, rules })
    }
}

impl<P> Catalog<P> {
    pub fn name(&self) -> &'static str { self.name }
    pub fn case(&self) -> MatchCase { self.case }
    pub fn rules(&self) -> &[Rule<P>] { &self.rules }
    pub fn len(&self) -> usize { self.rules.len() }
    pub fn is_empty(&self) -> bool { self.rules.is_empty() }
}

impl<P> fmt::Debug for Catalog<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("name", &self.name)
            .field("case", &self.case)
            .field("rules", &self.rules.iter().map(|r| r.label).collect::<Vec<_>>())
            .finish()
    }
}

/// Outcome of one cascade run over one column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CascadeStats {
    /// (rule label, rows that rule resolved), in catalog order.
    pub hits: Vec<(&'static str, usize)>,
    /// Rows already resolved before the run.
    pub seeded: usize,
    pub resolved: usize,
    pub unresolved: usize,
}

impl CascadeStats {
    /// Rows resolved by this run (excludes seeded rows).
    pub fn newly_resolved(&self) -> usize {
        self.hits.iter().map(|(_, n)| n).sum()
    }
}
