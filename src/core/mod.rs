// src/core/mod.rs

pub mod sanitize;

pub use sanitize::{applicable, nfkd};
