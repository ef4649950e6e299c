// src/specs/dates.rs
//! Date spellings found in infobox rows → calendar dates.
//!
//! Every rule rebuilds the same "D Month YYYY" text, which is then parsed
//! once with chrono. A rule that matches an impossible date (31 February)
//! still claims the row, so no looser rule can reinterpret it; the parse
//! step then leaves it empty.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Captures;
use tracing::debug;

use crate::engine::{self, Catalog, CatalogError, MatchCase, Reconstruct, RuleSpec};

pub const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Where one date component comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Part {
    /// Copy this named group verbatim.
    Group(&'static str),
    /// Use a fixed number (day of month, month 1-12, or year).
    Fixed(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DatePolicy {
    pub day: Part,
    pub month: Part,
    pub year: Part,
}

impl DatePolicy {
    /// Day, month and year all captured.
    const DMY: Self = Self { day: Part::Group("day"), month: Part::Group("month"), year: Part::Group("year") };

    /// Month and year captured; first of the month.
    const MONTH_YEAR: Self = Self { day: Part::Fixed(1), month: Part::Group("month"), year: Part::Group("year") };

    /// Only the year is captured; day and month are implied by the wording.
    const fn year_only(day: u32, month: u32) -> Self {
        Self { day: Part::Fixed(day), month: Part::Fixed(month), year: Part::Group("year") }
    }
}

impl Reconstruct for DatePolicy {
    type Output = String;

    fn required_groups(&self) -> Vec<&'static str> {
        [self.day, self.month, self.year]
            .into_iter()
            .filter_map(|p| match p { Part::Group(g) => Some(g), Part::Fixed(_) => None })
            .collect()
    }

    fn apply(&self, caps: &Captures<'_>) -> Option<String> {
        let text = |p: Part| match p {
            Part::Group(g) => caps.name(g).map(|m| m.as_str().to_string()),
            Part::Fixed(n) => Some(n.to_string()),
        };

        let day = text(self.day)?;
        let month = match self.month {
            Part::Group(g) => {
                let tok = caps.name(g)?.as_str();
                // Unknown tokens pass through and fail the calendar parse.
                lengthen_month(tok).map_or_else(|| tok.to_string(), str::to_string)
            }
            Part::Fixed(n) => s!(month_name(n)?),
        };
        let year = text(self.year)?;

        Some(format!("{day} {month} {year}"))
    }
}

fn month_name(n: u32) -> Option<&'static str> {
    MONTHS.get((n as usize).checked_sub(1)?).copied()
}

/// Full English month name for a short, dotted, full or numeric token.
///
/// `"Jan"`, `"jan."`, `"January"`, `"Sept"` and `"1"`/`"01"` all give
/// `"January"`/`"September"`. Anything else gives `None`.
pub fn lengthen_month(tok: &str) -> Option<&'static str> {
    let tok = tok.trim().trim_end_matches('.');
    if !tok.is_empty() && tok.bytes().all(|b| b.is_ascii_digit()) {
        return month_name(tok.parse().ok()?);
    }
    if tok.len() < 3 {
        return None;
    }
    let lower = tok.to_ascii_lowercase();
    MONTHS
        .iter()
        .copied()
        .find(|m| m.to_ascii_lowercase().starts_with(&lower))
}

/// Parse a reconstructed "D Month YYYY" string.
pub fn parse_reconstructed(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%d %B %Y").ok()
}

const MONTH: &str = r"\b(?P<month>jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\b";
const FN: &str = r"(?:\[\d+\])*";
const YEAR: &str = r"\b(?P<year>\d{4})\b";

fn rule_specs(prefix: &str) -> Vec<RuleSpec<DatePolicy>> {
    let p = |parts: &[&str]| {
        let body = parts.concat();
        if prefix.is_empty() { body } else { format!("(?:{prefix}).*?{body}") }
    };

    rules![
        "d month yyyy"   => p(&[r"\b(?P<day>\d{1,2})", FN, r"\s+", MONTH, r"\.?", FN, r",?\s+", YEAR]), DatePolicy::DMY;
        "month d, yyyy"  => p(&[MONTH, r"\s+(?P<day>\d{1,2})(?:st|nd|rd|th)?", FN, r"(?:\s*,\s*|\s+)", YEAR]), DatePolicy::DMY;
        "mon. d, yyyy"   => p(&[r"\b(?P<month>jan|feb|mar|apr|jun|jul|aug|sept?|oct|nov|dec)\.\s*(?P<day>\d{1,2})", FN, r",?\s+", YEAR]), DatePolicy::DMY;
        "yyyy-mm-dd"     => p(&[r"\b", YEAR, r"-(?P<month>\d{1,2})-(?P<day>\d{1,2})\b"]), DatePolicy::DMY;
        "d/m/yyyy"       => p(&[r"\b(?P<day>\d{1,2})/(?P<month>\d{1,2})/", YEAR]), DatePolicy::DMY;
        "month yyyy"     => p(&[MONTH, r"\.?", FN, r"\s*(?:of\s+|,\s*)?", YEAR]), DatePolicy::MONTH_YEAR;
        "winter yyyy"    => p(&[r"\bwinter\s+(?:of\s+)?", YEAR]), DatePolicy::year_only(1, 1);
        "early yyyy"     => p(&[r"\bearly\s+(?:in\s+)?", YEAR]), DatePolicy::year_only(1, 2);
        "spring yyyy"    => p(&[r"\bspring\s+(?:of\s+)?", YEAR]), DatePolicy::year_only(1, 4);
        "mid yyyy"       => p(&[r"\bmid[-\s]?", YEAR]), DatePolicy::year_only(1, 7);
        "summer yyyy"    => p(&[r"\bsummer\s+(?:of\s+)?", YEAR]), DatePolicy::year_only(1, 7);
        "late yyyy"      => p(&[r"\blate\s+(?:in\s+)?", YEAR]), DatePolicy::year_only(1, 11);
        "end yyyy"       => p(&[r"\bend\s+(?:of\s+)?", YEAR]), DatePolicy::year_only(1, 12);
        "yyyy"           => p(&[YEAR]), DatePolicy::year_only(1, 1);
    ]
}

static DATES: LazyLock<Catalog<DatePolicy>> = LazyLock::new(|| {
    Catalog::build("dates", MatchCase::Insensitive, rule_specs(""))
        .unwrap_or_else(|e| panic!("{e}"))
});

pub fn catalog() -> &'static Catalog<DatePolicy> {
    &DATES
}

/// The same 14 rules, each required to follow `prefix` (a regex) somewhere
/// earlier in the text: `catalog_after("scrapped")` reads the date out of
/// "Struck 1 May 1970; scrapped 4 Nov 1975".
pub fn catalog_after(prefix: &str) -> Result<Catalog<DatePolicy>, CatalogError> {
    Catalog::build("dates_after", MatchCase::Insensitive, rule_specs(prefix))
}

/// Run the cascade and return the rebuilt "D Month YYYY" strings.
pub fn reconstruct<S: AsRef<str>>(column: &[Option<S>], catalog: &Catalog<DatePolicy>) -> Vec<Option<String>> {
    engine::cascade(column, catalog)
}

/// Calendar-parse reconstructed strings. Impossible dates become `None`.
pub fn parse_all(reconstructed: &[Option<String>]) -> Vec<Option<NaiveDate>> {
    let out: Vec<Option<NaiveDate>> = reconstructed
        .iter()
        .map(|r| r.as_deref().and_then(parse_reconstructed))
        .collect();

    let malformed = reconstructed
        .iter()
        .zip(&out)
        .filter(|(r, d)| r.is_some() && d.is_none())
        .count();
    if malformed > 0 {
        debug!(malformed, "matched dates failed calendar parsing");
    }
    out
}

pub fn to_dates<S: AsRef<str>>(column: &[Option<S>]) -> Vec<Option<NaiveDate>> {
    parse_all(&reconstruct(column, catalog()))
}

/// `YYYY-MM-DD` strings.
pub fn to_iso<S: AsRef<str>>(column: &[Option<S>]) -> Vec<Option<String>> {
    to_dates(column)
        .into_iter()
        .map(|d| d.map(|d| d.format("%Y-%m-%d").to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(s: &str) -> Option<String> {
        to_iso(&[Some(s)]).remove(0)
    }

    #[test]
    fn day_month_year_variants() {
        assert_eq!(one("4 Jan 1943").as_deref(), Some("1943-01-04"));
        assert_eq!(one("4 January 1943").as_deref(), Some("1943-01-04"));
        assert_eq!(one("12[1] Sept.[2] 1943").as_deref(), Some("1943-09-12"));
        assert_eq!(one("Laid down 27 june 1942, launched later").as_deref(), Some("1942-06-27"));
    }

    #[test]
    fn month_first_variants() {
        assert_eq!(one("June 27th, 1942").as_deref(), Some("1942-06-27"));
        assert_eq!(one("June 27 1942").as_deref(), Some("1942-06-27"));
        assert_eq!(one("Aug. 3, 1944").as_deref(), Some("1944-08-03"));
    }

    #[test]
    fn numeric_forms() {
        assert_eq!(one("1944-08-03").as_deref(), Some("1944-08-03"));
        assert_eq!(one("3/8/1944").as_deref(), Some("1944-08-03"));
    }

    #[test]
    fn month_year_forms() {
        assert_eq!(one("June 1944").as_deref(), Some("1944-06-01"));
        assert_eq!(one("June of 1944").as_deref(), Some("1944-06-01"));
        assert_eq!(one("Dec., 1944").as_deref(), Some("1944-12-01"));
    }

    #[test]
    fn seasons_and_partial_years() {
        assert_eq!(one("Winter 1944").as_deref(), Some("1944-01-01"));
        assert_eq!(one("early 1944").as_deref(), Some("1944-02-01"));
        assert_eq!(one("Spring 1944").as_deref(), Some("1944-04-01"));
        assert_eq!(one("mid-1944").as_deref(), Some("1944-07-01"));
        assert_eq!(one("Summer 1944").as_deref(), Some("1944-07-01"));
        assert_eq!(one("Late 1944").as_deref(), Some("1944-11-01"));
        assert_eq!(one("End of 1944").as_deref(), Some("1944-12-01"));
        assert_eq!(one("1945").as_deref(), Some("1945-01-01"));
    }

    #[test]
    fn impossible_date_resolves_empty() {
        // Matches "d month yyyy", so "month yyyy" never gets to see it.
        let rebuilt = reconstruct(&[Some("31 Feb 1942")], catalog());
        assert_eq!(rebuilt, vec![Some("31 February 1942".to_string())]);
        assert_eq!(one("31 Feb 1942"), None);
        assert_eq!(one("2019-13-01"), None);
    }

    #[test]
    fn unparseable_and_not_applicable() {
        let out = to_iso(&[Some("unknown"), None, Some("")]);
        assert_eq!(out, vec![None, None, None]);
    }

    #[test]
    fn iso_text_is_stable() {
        // Re-running on canonical output reproduces it.
        let first = one("4 Jan 1943").unwrap();
        assert_eq!(one(&first).as_deref(), Some("1943-01-04"));
    }

    #[test]
    fn year_must_stand_alone() {
        assert_eq!(one("Pennant 12345"), None);
        assert_eq!(one("19445"), None);
        assert_eq!(one("1944[3]").as_deref(), Some("1944-01-01"));
    }

    #[test]
    fn month_tokens() {
        assert_eq!(lengthen_month("Jan"), Some("January"));
        assert_eq!(lengthen_month("sept."), Some("September"));
        assert_eq!(lengthen_month("09"), Some("September"));
        assert_eq!(lengthen_month("13"), None);
        assert_eq!(lengthen_month("Ju"), None);
    }

    #[test]
    fn prefixed_catalog() {
        let cat = catalog_after("scrapped").unwrap();
        let col = [Some("Struck 1 May 1970; scrapped 4 Nov 1975"), Some("Sunk 1942")];
        let out = parse_all(&reconstruct(&col, &cat));
        assert_eq!(out[0], NaiveDate::from_ymd_opt(1975, 11, 4));
        assert_eq!(out[1], None);
    }

    #[test]
    fn bad_prefix_is_a_catalog_error() {
        assert!(matches!(catalog_after("(unclosed"), Err(CatalogError::Pattern { .. })));
    }
}
