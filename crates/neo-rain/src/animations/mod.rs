//! The two compositors and their building blocks.

pub mod column;
pub mod rain;
pub mod symbol;
pub mod vision;
