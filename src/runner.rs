// src/runner.rs
use tracing::{info, warn};

use crate::{
    config::{Domain, IdentifierOptions, NormalizeOptions},
    core::sanitize::strip_parser_artifacts,
    engine::Catalog,
    error::Result,
    progress::{NullProgress, Progress},
    specs::{dates::{self, DatePolicy}, hull, lengths, speeds, weights},
    store::{ColumnMap, DataSet},
};

/// Outcome for one physical column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnReport {
    pub domain: Domain,
    pub canonical: String,
    pub column: String,
    pub rows: usize,
    /// `N/A` or missing cells; never counted as unresolved.
    pub not_applicable: usize,
    pub resolved: usize,
}

impl ColumnReport {
    pub fn unresolved(&self) -> usize {
        self.rows - self.not_applicable - self.resolved
    }
}

/// Summary of what was produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub columns: Vec<ColumnReport>,
    /// Configured canonical columns absent from the data set.
    pub missing: Vec<String>,
    /// Rows that received a hull identifier, when extraction ran.
    pub identified: Option<usize>,
}

impl RunSummary {
    pub fn report(&self, column: &str) -> Option<&ColumnReport> {
        self.columns.iter().find(|r| r.column == column)
    }
}

/// Normalize every configured column of `ds` in place.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn normalize(
    ds: &mut DataSet,
    opts: &NormalizeOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let mut null = NullProgress;
    let progress: &mut dyn Progress = match progress {
        Some(p) => p,
        None => &mut null,
    };

    let result = run_passes(ds, opts, &mut *progress);
    progress.finish();
    result
}

fn run_passes(
    ds: &mut DataSet,
    opts: &NormalizeOptions,
    progress: &mut dyn Progress,
) -> Result<RunSummary> {
    // Caller patterns compile before any cell is touched.
    let anchored = build_date_catalogs(opts)?;

    if opts.strip_artifacts {
        ds.map_cells(strip_parser_artifacts);
    }

    let headers = ds.headers.clone().unwrap_or_default();
    let maps: Vec<(Domain, ColumnMap)> = Domain::ALL
        .iter()
        .map(|&d| (d, ColumnMap::resolve(&headers, opts.columns(d))))
        .collect();

    let total = maps.iter().map(|(_, m)| m.alias_count()).sum::<usize>()
        + usize::from(opts.identifiers.is_some());
    progress.begin(total);

    let mut summary = RunSummary::default();

    for (domain, map) in &maps {
        for missing in map.missing() {
            warn!(column = missing, domain = domain.label(), "configured column not in data set");
            summary.missing.push(s!(missing));
        }

        for (canonical, aliases) in map.iter() {
            for alias in aliases {
                let report = normalize_column(ds, *domain, canonical, alias, &anchored)?;
                info!(
                    column = %alias,
                    domain = domain.label(),
                    resolved = report.resolved,
                    unresolved = report.unresolved(),
                    "normalized column"
                );
                progress.column_done(alias, report.resolved, report.rows);
                summary.columns.push(report);
            }
        }
    }

    if let Some(id_opts) = &opts.identifiers {
        let identified = append_identifiers(ds, id_opts)?;
        progress.log(&format!("{identified} of {} rows identified", ds.rows.len()));
        summary.identified = Some(identified);
    }

    Ok(summary)
}

/// One prefixed date catalog per `(column, prefix)` pair.
fn build_date_catalogs(opts: &NormalizeOptions) -> Result<Vec<(&str, Catalog<DatePolicy>)>> {
    opts.date_prefixes
        .iter()
        .map(|(column, prefix)| -> Result<_> { Ok((column.as_str(), dates::catalog_after(prefix)?)) })
        .collect()
}

fn normalize_column(
    ds: &mut DataSet,
    domain: Domain,
    canonical: &str,
    column: &str,
    anchored: &[(&str, Catalog<DatePolicy>)],
) -> Result<ColumnReport> {
    let (values, not_applicable) = {
        let cells = ds.column(column).unwrap_or_default();
        let not_applicable = cells.iter().filter(|c| c.is_none()).count();
        let values: Vec<Option<String>> = match domain {
            Domain::Date => {
                let catalog = match anchored.iter().find(|(c, _)| *c == canonical) {
                    Some((_, cat)) => cat,
                    None => dates::catalog(),
                };
                dates::parse_all(&dates::reconstruct(&cells, catalog))
                    .into_iter()
                    .map(|d| d.map(|d| d.format("%Y-%m-%d").to_string()))
                    .collect()
            }
            Domain::Length => display_all(lengths::to_metres(&cells)),
            Domain::Weight => display_all(weights::to_tonnes(&cells)),
            Domain::Speed => display_all(speeds::to_knots(&cells)),
        };
        (values, not_applicable)
    };

    let rows = values.len();
    let resolved = values.iter().filter(|v| v.is_some()).count();
    ds.set_column(column, values.into_iter().map(Option::unwrap_or_default).collect())?;

    Ok(ColumnReport {
        domain,
        canonical: s!(canonical),
        column: s!(column),
        rows,
        not_applicable,
        resolved,
    })
}

fn display_all(values: Vec<Option<f64>>) -> Vec<Option<String>> {
    values.into_iter().map(|v| v.map(|x| x.to_string())).collect()
}

/// Append (or overwrite) the type/number columns. Returns rows identified.
fn append_identifiers(ds: &mut DataSet, id: &IdentifierOptions) -> Result<usize> {
    let rows = ds.rows.len();
    let source = |name: &str| -> Vec<Option<String>> {
        match ds.column(name) {
            Some(cells) => cells.into_iter().map(|c| c.map(str::to_string)).collect(),
            None => {
                warn!(column = name, "identifier source column not in data set");
                vec![None; rows]
            }
        }
    };
    let field = source(&id.field_col);
    let fallback = source(&id.fallback_col);

    let found = hull::extract(&field, &fallback)?;
    let identified = found.iter().filter(|v| v.is_some()).count();
    let (kinds, numbers): (Vec<String>, Vec<String>) = found
        .into_iter()
        .map(|v| v.map(|i| (i.kind, i.number)).unwrap_or_default())
        .unzip();

    ds.put_column(&id.type_col, kinds)?;
    ds.put_column(&id.number_col, numbers)?;
    info!(identified, unresolved = rows - identified, "hull identifiers");
    Ok(identified)
}
