//! Wardo
pub mod catalog;
pub mod core;
pub mod geometry;
pub mod placement;
pub mod rendering;
pub mod systems;
#[cfg(test)]
mod tests;
