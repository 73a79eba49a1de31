//! Paper Editor Core - configuration and shared services
//!
//! This crate provides the ambient pieces the question paper editor relies on:
//! configuration, the event bus, element ids and key/value storage.

pub mod config;
pub mod error;
pub mod events;
pub mod ids;
pub mod stash;
pub mod store;

pub use config::{AppConfig, EditMode, EditorSettings, StorageBackend, StorageConfig};
pub use error::{PaperError, Result};
pub use events::{Event, EventBus, EventSubscription};
pub use ids::ElementId;
pub use stash::{PaperDetailsStash, PAPER_DETAILS_KEY};
pub use store::{open_store, FileStore, KeyValueStore, MemoryStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "Paper Editor";
