// src/lib.rs
// #![allow(dead_code)]
// #![allow(unused)]

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod specs;

pub mod csv;
pub mod progress;
pub mod runner;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod log;

pub use config::{Delim, Domain, NormalizeOptions};
pub use error::{NormError, Result};
pub use runner::{normalize, RunSummary};
pub use store::{ColumnMap, DataSet};
