// src/error.rs
use std::io;

use thiserror::Error;

use crate::engine::types::CatalogError;

#[derive(Debug, Error)]
pub enum NormError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("column has {column} rows but output slots number {out}")]
    LengthMismatch { column: usize, out: usize },

    #[error("unknown column `{0}`")]
    UnknownColumn(String),
}

pub type Result<T> = std::result::Result<T, NormError>;
