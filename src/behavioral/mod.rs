//! Behavioral patterns: how objects hand work and notifications around.

pub mod chain;
pub mod iterator;
pub mod observer;
