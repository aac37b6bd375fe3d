// src/core/mod.rs

pub mod status;
pub mod ring;
pub mod vector;
pub mod static_random;

pub use ring::{ElementaryFunction, Ring, SpecialFunction};
pub use status::{GrError, GrResult, Status, Truth};
