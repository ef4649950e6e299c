// src/engine/engine.rs
use tracing::{debug, trace};

use crate::core::sanitize::nfkd;
use crate::engine::types::*;
use crate::error::{NormError, Result};

/// Run `catalog` over `column` from a blank state.
///
/// `None` cells are "not applicable" and never match.
pub fn cascade<S, P>(column: &[Option<S>], catalog: &Catalog<P>) -> Vec<Option<P::Output>>
where
    S: AsRef<str>,
    P: Reconstruct,
{
    let mut out: Vec<Option<P::Output>> = std::iter::repeat_with(|| None).take(column.len()).collect();
    fill(column, catalog, &mut out);
    out
}

/// Fill the still-empty slots of `out` from `column`, rule by rule.
///
/// Each rule sees every open row of the whole column before the next rule
/// runs. A slot that is `Some` (seeded or filled by an earlier rule) is
/// never looked at again.
pub fn cascade_into<S, P>(
    column: &[Option<S>],
    catalog: &Catalog<P>,
    out: &mut [Option<P::Output>],
) -> Result<CascadeStats>
where
    S: AsRef<str>,
    P: Reconstruct,
{
    if column.len() != out.len() {
        return Err(NormError::LengthMismatch { column: column.len(), out: out.len() });
    }
    Ok(fill(column, catalog, out))
}

/// Cascade body. `column` and `out` must have the same length.
fn fill<S, P>(column: &[Option<S>], catalog: &Catalog<P>, out: &mut [Option<P::Output>]) -> CascadeStats
where
    S: AsRef<str>,
    P: Reconstruct,
{
    debug_assert_eq!(column.len(), out.len());
    let seeded = out.iter().filter(|v| v.is_some()).count();

    // Normalize once, and only the rows that can still change.
    let text: Vec<Option<String>> = column
        .iter()
        .zip(out.iter())
        .map(|(cell, slot)| match (cell, slot) {
            (Some(s), None) => Some(nfkd(s.as_ref())),
            _ => None,
        })
        .collect();

    let mut open: Vec<usize> = (0..out.len()).filter(|&i| text[i].is_some()).collect();
    let mut hits = Vec::with_capacity(catalog.len());

    for rule in catalog.rules() {
        let mut n = 0usize;
        open.retain(|&i| {
            let Some(s) = text[i].as_deref() else { return false };
            let Some(caps) = rule.regex.captures(s) else { return true };
            match rule.policy.apply(&caps) {
                Some(v) => {
                    out[i] = Some(v);
                    n += 1;
                    false
                }
                None => {
                    trace!(catalog = catalog.name(), rule = rule.label, row = i, "matched without a value");
                    true
                }
            }
        });
        hits.push((rule.label, n));
        if open.is_empty() { break; }
    }

    // Rules never reached still get a zero entry.
    for rule in catalog.rules().iter().skip(hits.len()) {
        hits.push((rule.label, 0));
    }

    let resolved = out.iter().filter(|v| v.is_some()).count();
    let stats = CascadeStats {
        hits,
        seeded,
        resolved,
        unresolved: out.len() - resolved,
    };
    debug!(
        catalog = catalog.name(),
        seeded = stats.seeded,
        resolved = stats.resolved,
        unresolved = stats.unresolved,
        "cascade done"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Captures;

    /// Copies group `v` verbatim.
    struct Verbatim;
    impl Reconstruct for Verbatim {
        type Output = String;
        fn required_groups(&self) -> Vec<&'static str> { vec!["v"] }
        fn apply(&self, caps: &Captures<'_>) -> Option<String> {
            Some(caps["v"].to_string())
        }
    }

    /// Only yields a value for even numbers.
    struct Even;
    impl Reconstruct for Even {
        type Output = String;
        fn required_groups(&self) -> Vec<&'static str> { vec!["v"] }
        fn apply(&self, caps: &Captures<'_>) -> Option<String> {
            let n: u32 = caps["v"].parse().ok()?;
            (n % 2 == 0).then(|| format!("even {n}"))
        }
    }

    fn two_rules() -> Catalog<Verbatim> {
        Catalog::build(
            "test",
            MatchCase::Insensitive,
            vec![
                RuleSpec::new("word", r"(?P<v>[a-z]+)!", Verbatim),
                RuleSpec::new("digits", r"(?P<v>\d+)", Verbatim),
            ],
        )
        .unwrap()
    }

    #[test]
    fn first_matching_rule_wins() {
        let col = vec![Some("abc! 123"), Some("123"), Some("none"), None];
        let out = cascade(&col, &two_rules());
        assert_eq!(out, vec![Some("abc".into()), Some("123".into()), None, None]);
    }

    #[test]
    fn seeded_values_are_kept() {
        let col = vec![Some("abc!"), Some("456")];
        let mut out = vec![Some("seed".to_string()), None];
        let stats = cascade_into(&col, &two_rules(), &mut out).unwrap();
        assert_eq!(out, vec![Some("seed".into()), Some("456".into())]);
        assert_eq!(stats.seeded, 1);
        assert_eq!(stats.hits, vec![("word", 0), ("digits", 1)]);
        assert_eq!(stats.newly_resolved(), 1);
    }

    #[test]
    fn case_mode_is_applied() {
        let col = vec![Some("ABC!")];
        let strict = Catalog::build(
            "strict",
            MatchCase::Sensitive,
            vec![RuleSpec::new("word", r"(?P<v>[a-z]+)!", Verbatim)],
        )
        .unwrap();
        assert_eq!(cascade(&col, &strict), vec![None]);
        assert_eq!(cascade(&col, &two_rules()), vec![Some("ABC".into())]);
    }

    #[test]
    fn empty_reconstruction_leaves_row_open_for_later_rules() {
        let cat = Catalog::build(
            "even-then-copy",
            MatchCase::Insensitive,
            vec![
                RuleSpec::new("even", r"(?P<v>\d+)", Even),
                RuleSpec::new("again", r"(?P<v>\d+)", Even),
            ],
        )
        .unwrap();
        let out = cascade(&[Some("3"), Some("4")], &cat);
        assert_eq!(out, vec![None, Some("even 4".into())]);
    }

    #[test]
    fn input_is_normalized_before_matching() {
        // Fullwidth digits decompose to ASCII under NFKD.
        let out = cascade(&[Some("\u{FF11}\u{FF12}")], &two_rules());
        assert_eq!(out, vec![Some("12".into())]);
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let mut out: Vec<Option<String>> = vec![None];
        let err = cascade_into(&[Some("1"), Some("2")], &two_rules(), &mut out).unwrap_err();
        assert!(matches!(err, NormError::LengthMismatch { column: 2, out: 1 }));
    }

    #[test]
    fn missing_group_fails_at_build() {
        let err = Catalog::build(
            "broken",
            MatchCase::Insensitive,
            vec![RuleSpec::new("nogroup", r"(?P<w>\d+)", Verbatim)],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::MissingGroup { group: "v", .. }));
    }

    #[test]
    fn empty_and_bad_patterns_fail_at_build() {
        let err = Catalog::<Verbatim>::build("none", MatchCase::Sensitive, Vec::new()).unwrap_err();
        assert!(matches!(err, CatalogError::Empty { .. }));

        let err = Catalog::build(
            "bad",
            MatchCase::Sensitive,
            vec![RuleSpec::new("open", r"(?P<v>\d+", Verbatim)],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::Pattern { rule: "open", .. }));
    }
}
