// src/backends/mod.rs

pub mod integer_ring;
pub mod rational_ring;
pub mod nmod_ring;
pub mod real_ball_ring;

pub use integer_ring::IntegerRing;
pub use rational_ring::RationalRing;
pub use nmod_ring::NmodRing;
pub use real_ball_ring::{Ball, RealBallRing};
