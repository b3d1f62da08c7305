#![doc = include_str!("../../README.md")]
//! Crate-specific API surface for `geomeasure-core`.

pub mod convert;
pub mod error;
pub mod functions;
pub mod geometry;
pub mod measures;
pub mod ops;
pub mod wkb;

pub use error::{GeomError, Result};
