//! Plot view implementations

pub mod bar;
pub mod pie;

// Utilities
pub mod utils;

// Re-exports
pub use bar::{BarChartView, BarChartConfig};
pub use pie::{PieChartView, PieChartConfig};
