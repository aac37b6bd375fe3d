// src/lib.rs

pub mod core;
pub mod backends;
pub mod config;
pub mod polynomial;
pub mod series;
