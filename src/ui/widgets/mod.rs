//! Reusable chart building blocks

pub mod bars;
