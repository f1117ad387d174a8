//! Small shared enums used across the entity model and resolver.

use std::fmt;
use std::fs;
use std::path::Path;

/// The four levels of a Johnny Decimal tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Area,
    Category,
    SubCategory,
    Item,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Category => "category",
            Self::SubCategory => "subcategory",
            Self::Item => "item",
        }
    }

    /// Only items may be backed by plain files.
    pub fn accepts(self, backing: Backing) -> bool {
        match self {
            Self::Item => true,
            Self::Area | Self::Category | Self::SubCategory => backing == Backing::Directory,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an entity path points at on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backing {
    Directory,
    File,
}

impl Backing {
    /// Follows symlinks. Returns `None` for dangling links and entries that
    /// vanished since the directory was listed.
    pub fn of(path: &Path) -> Option<Self> {
        let metadata = fs::metadata(path).ok()?;
        Some(if metadata.is_dir() {
            Self::Directory
        } else {
            Self::File
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_items_accept_files() {
        assert!(EntityKind::Item.accepts(Backing::File));
        assert!(EntityKind::Item.accepts(Backing::Directory));
        assert!(!EntityKind::Area.accepts(Backing::File));
        assert!(!EntityKind::Category.accepts(Backing::File));
        assert!(!EntityKind::SubCategory.accepts(Backing::File));
    }
}
