//! Run configuration: file format, discovery and validation.

pub mod loader;
pub mod model;

pub use loader::{CONFIG_FILE_NAME, LoadedConfig, find_config, load_config};
pub use model::{DocsmithConfig, LlmSection, ValidatedConfig};
