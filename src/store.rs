// src/store.rs
use std::{fs, path::Path};

use crate::config::{consts::DUP_SUFFIX_SEP, Delim};
use crate::core::sanitize::{applicable, normalize_ws};
use crate::csv::{self, parse_rows, split_header};
use crate::error::{NormError, Result};

/// Header + rows, as read from a scraped table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers: Some(headers), rows }
    }

    pub fn header_index(&self, name: &str) -> Option<usize> {
        self.headers.as_ref()?.iter().position(|h| h == name)
    }

    /// Cells of `name`, with `N/A` and cells missing from short rows as `None`.
    pub fn column(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let idx = self.header_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|r| r.get(idx).and_then(|c| applicable(c)))
                .collect(),
        )
    }

    /// Overwrite an existing column. Short rows are padded.
    pub fn set_column(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        let idx = self
            .header_index(name)
            .ok_or_else(|| NormError::UnknownColumn(s!(name)))?;
        if values.len() != self.rows.len() {
            return Err(NormError::LengthMismatch { column: values.len(), out: self.rows.len() });
        }
        for (row, v) in self.rows.iter_mut().zip(values) {
            if row.len() <= idx {
                row.resize(idx + 1, s!());
            }
            row[idx] = v;
        }
        Ok(())
    }

    /// Add a column at the right edge, or overwrite it if the name is taken.
    pub fn put_column(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        if self.header_index(name).is_some() {
            return self.set_column(name, values);
        }
        if values.len() != self.rows.len() {
            return Err(NormError::LengthMismatch { column: values.len(), out: self.rows.len() });
        }
        let headers = self.headers.get_or_insert_with(Vec::new);
        let width = headers.len();
        headers.push(s!(name));
        for (row, v) in self.rows.iter_mut().zip(values) {
            row.resize(width, s!());
            row.push(v);
        }
        Ok(())
    }

    /// Apply `f` to every data cell.
    pub fn map_cells(&mut self, mut f: impl FnMut(&str) -> String) {
        for cell in self.rows.iter_mut().flatten() {
            *cell = f(cell);
        }
    }
}

/* ---------------- Column aliases ---------------- */

/// Rename repeated headers `Name`, `Name_2`, `Name_3`, ... in place.
/// Whitespace inside header names is collapsed first.
pub fn increment_duplicate_headers(headers: &mut [String]) {
    let mut seen: Vec<(String, usize)> = Vec::new();
    for h in headers.iter_mut() {
        let base = normalize_ws(h);
        match seen.iter_mut().find(|(b, _)| *b == base) {
            Some((_, n)) => {
                *n += 1;
                *h = format!("{base}{DUP_SUFFIX_SEP}{n}");
            }
            None => {
                seen.push((base.clone(), 1));
                *h = base;
            }
        }
    }
}

/// True when `header` is `canonical` itself or `canonical_<n>` with n ≥ 2.
fn is_alias(header: &str, canonical: &str) -> bool {
    if header == canonical {
        return true;
    }
    header
        .strip_prefix(canonical)
        .and_then(|rest| rest.strip_prefix(DUP_SUFFIX_SEP))
        .and_then(|n| n.parse::<usize>().ok())
        .is_some_and(|n| n >= 2)
}

/// Canonical column name → physical headers carrying it, in header order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnMap {
    entries: Vec<(String, Vec<String>)>,
}

impl ColumnMap {
    pub fn resolve(headers: &[String], canonical: &[String]) -> Self {
        let entries = canonical
            .iter()
            .map(|c| {
                let aliases = headers.iter().filter(|h| is_alias(h, c)).cloned().collect();
                (c.clone(), aliases)
            })
            .collect();
        Self { entries }
    }

    pub fn aliases(&self, canonical: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(c, _)| c == canonical)
            .map_or(&[], |(_, a)| a.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(c, a)| (c.as_str(), a.as_slice()))
    }

    /// Canonical names with no physical column.
    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, a)| a.is_empty()).map(|(c, _)| c)
    }

    pub fn alias_count(&self) -> usize {
        self.entries.iter().map(|(_, a)| a.len()).sum()
    }
}

/* ---------------- Files ---------------- */

pub fn load_dataset(path: &Path, delim: Delim) -> Result<DataSet> {
    let text = fs::read_to_string(path)?;
    let (mut headers, rows) = split_header(parse_rows(&text, delim));
    if let Some(h) = headers.as_mut() {
        increment_duplicate_headers(h);
    }
    Ok(DataSet { headers, rows })
}

pub fn save_dataset(path: &Path, ds: &DataSet, delim: Delim) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    fs::write(path, csv::rows_to_string(&ds.headers, &ds.rows, delim))?;
    Ok(())
}

fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        let msg = format!("path exists but is not a directory: {}", dir.display());
        return Err(std::io::Error::new(std::io::ErrorKind::AlreadyExists, msg).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
