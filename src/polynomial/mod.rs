// src/polynomial/mod.rs

pub mod poly;
pub mod mul;
pub mod divrem;
pub mod inv_series;
pub mod sqrt_series;
pub mod elementary;
pub mod compose;
pub mod taylor_shift;
pub mod evaluate;
pub mod hgcd;
pub mod gcd;
pub mod squarefree;
pub mod pow;

pub use poly::GrPoly;
pub use hgcd::{HalfGcd, Mat2};
pub use gcd::Xgcd;
pub use squarefree::SquarefreeFactorization;
