//! Johnny Decimal index generation.
//!
//! This crate scans a directory tree laid out as areas, categories, optional
//! subcategories and items, and renders a flat Markdown index of it:
//! - Name classification against fixed per-level patterns
//! - An arena-backed entity tree with typed parent links
//! - Leading `key: value` metadata blocks read from notes
//! - Deterministic index rendering and writing

pub mod config;
pub mod entity;
pub mod error;
pub mod indexer;
pub mod metadata;
pub mod pattern;
pub mod render;
pub mod resolver;
pub mod types;

// Re-export main types
pub use config::{load_config, IndexerConfig};
pub use entity::{Entity, EntityId, EntityRecord, EntityTree, ItemParent};
pub use error::{JdexError, Result};
pub use indexer::{IndexReport, Indexer};
pub use metadata::Metadata;
pub use render::INDEX_FILE_NAME;
pub use resolver::{resolve, Resolver, Scan};
pub use types::{Backing, EntityKind};
