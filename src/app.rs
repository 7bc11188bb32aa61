//! Application module: the browse model used by the TUI and runtime.

mod facets;
mod model;

pub use model::*;

#[cfg(test)]
mod tests;
