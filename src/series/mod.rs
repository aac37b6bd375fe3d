// src/series/mod.rs

pub mod series;
pub mod functions;

pub use series::{GrSeries, SeriesCtx, SeriesError};
