//! Scan-and-render pipeline.
//!
//! [`Indexer`] owns a [`Resolver`] for the configured root, renders every
//! scanned entity and writes the result to the index document.

use std::path::PathBuf;

use crate::config::IndexerConfig;
use crate::entity::{EntityId, EntityTree};
use crate::error::Result;
use crate::render::{render, write_document, INDEX_FILE_NAME};
use crate::resolver::{Resolver, Scan};

/// Areas whose index starts with this character hold the index document.
const INDEX_AREA_PREFIX: &str = "0";

/// Outcome of [`Indexer::run`].
#[derive(Debug, Clone)]
pub struct IndexReport {
    /// Every scanned entity, sorted by index.
    pub entities: Vec<EntityId>,
    /// Where the document was written.
    pub target: PathBuf,
    /// Number of lines written.
    pub lines: usize,
}

#[derive(Debug)]
pub struct Indexer {
    config: IndexerConfig,
    resolver: Resolver,
}

impl Indexer {
    pub fn new(config: IndexerConfig) -> Self {
        let resolver = Resolver::new(config.root_dir.clone());
        Self { config, resolver }
    }

    /// Entities from the last scan.
    pub fn tree(&self) -> Option<&EntityTree> {
        self.resolver.cached().map(|scan| &scan.tree)
    }

    /// Scans the root (reusing a cached scan unless `force`) and returns the
    /// rendered document without writing it.
    pub fn render_lines(&mut self, force: bool) -> Result<Vec<String>> {
        let scan = self.resolver.scan(force)?;
        Ok(render(&scan.tree, &scan.all_entities()))
    }

    /// Rescans the root, renders the index and replaces the target document.
    pub fn run(&mut self) -> Result<IndexReport> {
        let output_path = self.config.output_path.clone();
        let root = self.config.root_dir.clone();

        let scan = self.resolver.scan(true)?;
        let mut entities = scan.all_entities();
        scan.tree.sort_by_index(&mut entities);

        let lines = render(&scan.tree, &entities);
        let target = output_path.unwrap_or_else(|| default_target(scan, root));
        write_document(&target, &lines)?;

        Ok(IndexReport {
            entities,
            target,
            lines: lines.len(),
        })
    }
}

/// `00.00 - Index.md` inside the `0x` area, falling back to the root.
pub fn default_target(scan: &Scan, root: PathBuf) -> PathBuf {
    let directory = scan
        .find_area_by_index(INDEX_AREA_PREFIX)
        .map(|area| scan.tree.entity(area).path().to_path_buf())
        .unwrap_or(root);
    directory.join(INDEX_FILE_NAME)
}
