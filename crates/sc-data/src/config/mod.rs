//! File loading configuration

pub mod file_config;
pub mod null_handling;

pub use file_config::FileConfig;
pub use null_handling::NullConfig;
