pub mod config;
pub mod error;

pub use config::{ChunkingConfig, Config, MetadataConfig, StorageConfig};
pub use error::*;
