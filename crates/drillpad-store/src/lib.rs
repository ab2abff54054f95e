//! drillpad-store — storage backends for drillpad.
//!
//! Implements the core storage traits for flat-file JSON (dev/production)
//! and an in-memory fake (tests), plus local media upload handling and
//! configuration loading.

pub mod config;
pub mod json;
pub mod media;
pub mod memory;

pub use config::{load_config, load_config_from, AppConfig};
pub use json::JsonStore;
pub use media::LocalMediaStore;
pub use memory::MemoryStore;
