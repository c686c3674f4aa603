//! Structural patterns: how objects are composed and wrapped.

pub mod decorator;
pub mod monad;
