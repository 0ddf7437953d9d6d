//! Utilities for plot views

pub mod colors;

// Re-export commonly used items
pub use colors::{categorical_color, categorical_rgb, to_color32, BAR_EDGE, BAR_FILL};
