//! Directory-to-entity resolution.
//!
//! [`resolve`] turns the immediate children of one directory into entities of
//! a single kind. [`Resolver::scan`] drives it level by level from the root:
//!
//! 1. areas from the root directory
//! 2. categories inside each area
//! 3. subcategories inside each category
//! 4. items inside each subcategory, or directly inside the category when it
//!    has no subcategories
//!
//! Entries whose names do not fit the level's pattern are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use crate::entity::{EntityId, EntityRecord, EntityTree};
use crate::error::{JdexError, Result};
use crate::pattern::classify;
use crate::types::{Backing, EntityKind};

/// A directory child considered during resolution.
#[derive(Debug)]
struct Candidate {
    file_name: String,
    path: PathBuf,
    backing: Backing,
}

/// Lists the children of `directory` sorted by file name.
///
/// Names that are not valid UTF-8 cannot match any pattern and are dropped
/// here.
fn list_children(directory: &Path) -> Result<Vec<Candidate>> {
    if !directory.is_dir() {
        return Err(JdexError::NotFound(directory.to_path_buf()));
    }

    let read_dir = fs::read_dir(directory).map_err(|error| JdexError::io(directory, error))?;

    let mut children = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|error| JdexError::io(directory, error))?;
        let path = entry.path();
        let Ok(file_name) = entry.file_name().into_string() else {
            log::debug!("skipping non UTF-8 name {}", path.display());
            continue;
        };
        let Some(backing) = Backing::of(&path) else {
            log::debug!("skipping unreadable entry {}", path.display());
            continue;
        };
        children.push(Candidate {
            file_name,
            path,
            backing,
        });
    }

    // Sorted so that child lists, and ties in the index sort, are reproducible
    children.sort_unstable_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(children)
}

/// Resolves the children of `directory` into entities of `kind` owned by
/// `parent`, returned in ascending index order.
pub fn resolve(
    tree: &mut EntityTree,
    directory: &Path,
    kind: EntityKind,
    parent: Option<EntityId>,
) -> Result<Vec<EntityId>> {
    let mut ids = Vec::new();

    for candidate in list_children(directory)? {
        if !kind.accepts(candidate.backing) {
            continue;
        }
        let Some(matched) = classify(kind, &candidate.file_name, candidate.backing) else {
            log::trace!("{} is not a {kind}", candidate.path.display());
            continue;
        };

        let path = std::path::absolute(&candidate.path).unwrap_or(candidate.path);
        let record = EntityRecord::new(matched.index, matched.name, path, candidate.backing);
        let id = tree.insert(kind, record, parent)?;
        log::debug!("found {kind} {}", tree.entity(id).display_name());
        ids.push(id);
    }

    tree.sort_by_index(&mut ids);
    Ok(ids)
}

/// Result of a full scan. Every id list is sorted by index.
#[derive(Debug, Clone, Default)]
pub struct Scan {
    pub tree: EntityTree,
    pub areas: Vec<EntityId>,
    pub categories: Vec<EntityId>,
    pub sub_categories: Vec<EntityId>,
    pub items: Vec<EntityId>,
}

impl Scan {
    /// Areas, categories, subcategories, then items.
    pub fn all_entities(&self) -> Vec<EntityId> {
        self.areas
            .iter()
            .chain(&self.categories)
            .chain(&self.sub_categories)
            .chain(&self.items)
            .copied()
            .collect()
    }

    /// First area whose index starts with the same character as `index`.
    pub fn find_area_by_index(&self, index: &str) -> Option<EntityId> {
        let wanted = index.chars().next()?;
        self.areas
            .iter()
            .copied()
            .find(|id| self.tree.entity(*id).index().starts_with(wanted))
    }
}

/// Scans one root directory and keeps the last result.
#[derive(Debug)]
pub struct Resolver {
    root: PathBuf,
    cache: Option<Scan>,
}

impl Resolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: None,
        }
    }

    pub fn cached(&self) -> Option<&Scan> {
        self.cache.as_ref()
    }

    /// Returns the cached scan, building it first when there is none or when
    /// `force` is set. A failed scan leaves the previous result in place.
    pub fn scan(&mut self, force: bool) -> Result<&Scan> {
        if force || self.cache.is_none() {
            self.cache = Some(scan_tree(&self.root)?);
        }
        Ok(self.cache.as_ref().expect("cache populated above"))
    }
}

fn scan_tree(root: &Path) -> Result<Scan> {
    log::info!("scanning {}", root.display());
    let mut scan = Scan::default();
    let tree = &mut scan.tree;

    scan.areas = resolve(tree, root, EntityKind::Area, None)?;
    for &area in &scan.areas {
        let area_path = tree.entity(area).path().to_path_buf();
        let categories = resolve(tree, &area_path, EntityKind::Category, Some(area))?;

        for &category in &categories {
            let category_path = tree.entity(category).path().to_path_buf();
            let sub_categories =
                resolve(tree, &category_path, EntityKind::SubCategory, Some(category))?;

            if sub_categories.is_empty() {
                let items = resolve(tree, &category_path, EntityKind::Item, Some(category))?;
                scan.items.extend(items);
                continue;
            }
            for &sub in &sub_categories {
                let sub_path = tree.entity(sub).path().to_path_buf();
                let items = resolve(tree, &sub_path, EntityKind::Item, Some(sub))?;
                scan.items.extend(items);
            }
            scan.sub_categories.extend(sub_categories);
        }
        scan.categories.extend(categories);
    }

    tree.sort_by_index(&mut scan.categories);
    tree.sort_by_index(&mut scan.sub_categories);
    tree.sort_by_index(&mut scan.items);

    log::info!(
        "found {} areas, {} categories, {} subcategories, {} items",
        scan.areas.len(),
        scan.categories.len(),
        scan.sub_categories.len(),
        scan.items.len()
    );
    Ok(scan)
}
