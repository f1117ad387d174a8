//! Leading `key: value` blocks in notes.
//!
//! ```text
//! ---
//! indexNotes: call mom
//! ---
//! body text
//! ```
//!
//! Values are single-line strings. Lines inside the block that are not
//! `key: value` pairs are ignored.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::entity::{EntityId, EntityTree};
use crate::pattern::is_metadata_note;
use crate::types::{Backing, EntityKind};

const SEPARATOR: &str = "---";

/// Key under which a note supplies its annotation for the index document.
pub const INDEX_NOTES_KEY: &str = "indexNotes";

static PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_/ ]+):\s*(.*?)\s*$")
        .unwrap_or_else(|error| panic!("invalid property pattern: {error}"))
});

/// Properties read from a note's leading block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    properties: BTreeMap<String, String>,
}

impl Metadata {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn index_notes(&self) -> Option<&str> {
        self.get(INDEX_NOTES_KEY)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Parses the metadata block at the top of `content`.
///
/// Returns `None` when the first line is not `---` or the block holds no
/// usable pair. A block without a closing `---` runs to the end of the text.
pub fn parse(content: &str) -> Option<Metadata> {
    let mut lines = content.lines();

    let first = lines.next()?.trim_start_matches('\u{feff}').trim_end();
    if first != SEPARATOR {
        return None;
    }

    let mut properties = BTreeMap::new();
    for line in lines {
        if line.trim_end() == SEPARATOR {
            break;
        }
        let Some(captures) = PROPERTY.captures(line) else {
            log::trace!("ignoring metadata line {line:?}");
            continue;
        };
        properties.insert(captures[1].to_string(), captures[2].to_string());
    }

    if properties.is_empty() {
        return None;
    }
    Some(Metadata { properties })
}

/// Reads and parses the metadata block of the note at `path`.
///
/// A missing or unreadable note counts as having no metadata.
pub fn extract(path: &Path) -> Option<Metadata> {
    match fs::read_to_string(path) {
        Ok(content) => parse(&content),
        Err(error) => {
            log::warn!("unable to read metadata from {}: {error}", path.display());
            None
        }
    }
}

/// Locates the note holding metadata for a directory: the first file, in name
/// order, called `<index>.00*.md`.
pub fn find_metadata_note(directory: &Path, index: &str) -> Option<PathBuf> {
    let read_dir = match fs::read_dir(directory) {
        Ok(iter) => iter,
        Err(error) => {
            log::warn!("unable to list {}: {error}", directory.display());
            return None;
        }
    };

    let mut candidates: Vec<String> = read_dir
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| is_metadata_note(index, name))
        .collect();
    candidates.sort_unstable();

    candidates
        .into_iter()
        .next()
        .map(|name| directory.join(name))
}

/// Metadata for one entity. Only categories and items carry any.
pub fn for_entity(tree: &EntityTree, id: EntityId) -> Option<Metadata> {
    let entity = tree.get(id)?;
    match entity.kind() {
        EntityKind::Area | EntityKind::SubCategory => None,
        EntityKind::Category | EntityKind::Item => match entity.backing() {
            Backing::File => extract(entity.path()),
            Backing::Directory => {
                let note = find_metadata_note(entity.path(), entity.index())?;
                extract(&note)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityRecord;
    use std::fs;
    use tempfile::TempDir;

    fn write_note(path: &Path, notes: &str) {
        let content = format!("---\nindexNotes: {notes}\n---\n");
        fs::write(path, content).unwrap();
    }

    fn insert(
        tree: &mut EntityTree,
        kind: EntityKind,
        record: EntityRecord,
        parent: Option<EntityId>,
    ) -> EntityId {
        tree.insert(kind, record, parent).unwrap()
    }

    #[test]
    fn basic_block() {
        let metadata = parse("---\nindexNotes: call mom\n---\nbody text").unwrap();
        assert_eq!(metadata.index_notes(), Some("call mom"));
        assert_eq!(metadata.len(), 1);
    }

    #[test]
    fn no_leading_separator() {
        assert!(parse("# Title\n---\nindexNotes: x\n---\n").is_none());
        assert!(parse("").is_none());
    }

    #[test]
    fn opening_separator_may_have_trailing_whitespace() {
        let metadata = parse("--- \nindexNotes: x\n---\n").unwrap();
        assert_eq!(metadata.index_notes(), Some("x"));

        let metadata = parse("---\t\nindexNotes: y\n---\n").unwrap();
        assert_eq!(metadata.index_notes(), Some("y"));
    }

    #[test]
    fn empty_block() {
        assert!(parse("---\n---\nbody").is_none());
    }

    #[test]
    fn noise_lines_are_dropped() {
        let content = [
            "---",
            "tags:",
            "  - one",
            "source/url: https://example.com",
            "- stray",
            "snake_key: v",
            "---",
        ]
        .join("\n");
        let metadata = parse(&content).unwrap();
        assert_eq!(metadata.get("tags"), Some(""));
        assert_eq!(metadata.get("source/url"), Some("https://example.com"));
        assert_eq!(metadata.get("snake_key"), Some("v"));
        assert_eq!(metadata.len(), 3);
    }

    #[test]
    fn keys_with_digits_do_not_match() {
        assert!(parse("---\nkey1: value\n---\n").is_none());
    }

    #[test]
    fn stops_at_closing_separator() {
        let metadata = parse("---\na: 1\n---\nb: 2\n").unwrap();
        assert_eq!(metadata.get("a"), Some("1"));
        assert_eq!(metadata.get("b"), None);
    }

    #[test]
    fn unterminated_block_runs_to_end() {
        let metadata = parse("---\na: 1\nb: 2").unwrap();
        assert_eq!(metadata.len(), 2);
    }

    #[test]
    fn handles_bom_and_crlf() {
        let content = "\u{feff}---\r\nindexNotes: call mom\r\n---\r\n";
        let metadata = parse(content).unwrap();
        assert_eq!(metadata.index_notes(), Some("call mom"));
    }

    #[test]
    fn missing_file_is_no_metadata() {
        let temp = TempDir::new().unwrap();
        assert!(extract(&temp.path().join("absent.md")).is_none());
    }

    #[test]
    fn metadata_note_picks_first_by_name() {
        let temp = TempDir::new().unwrap();
        write_note(&temp.path().join("11.00b - Second.md"), "b");
        write_note(&temp.path().join("11.00a - First.md"), "a");
        write_note(&temp.path().join("11.01 - Other.md"), "c");

        let note = find_metadata_note(temp.path(), "11").unwrap();
        assert_eq!(note, temp.path().join("11.00a - First.md"));
    }

    #[test]
    fn entity_metadata_by_kind() {
        let temp = TempDir::new().unwrap();
        let category_dir = temp.path().join("11 Banking");
        fs::create_dir(&category_dir).unwrap();
        write_note(&category_dir.join("11.00 - Banking.md"), "all accounts");
        let item_file = category_dir.join("11.01 - Statements.md");
        write_note(&item_file, "monthly");
        let empty_dir = category_dir.join("11.02 - Scans");
        fs::create_dir(&empty_dir).unwrap();

        let mut tree = EntityTree::new();
        let record = EntityRecord::new("10 - 19", "Finance", temp.path(), Backing::Directory);
        let area = insert(&mut tree, EntityKind::Area, record, None);
        let record = EntityRecord::new("11", "Banking", &category_dir, Backing::Directory);
        let category = insert(&mut tree, EntityKind::Category, record, Some(area));
        let record = EntityRecord::new("11.01", "Statements", &item_file, Backing::File);
        let item = insert(&mut tree, EntityKind::Item, record, Some(category));
        let record = EntityRecord::new("11.02", "Scans", &empty_dir, Backing::Directory);
        let scans = insert(&mut tree, EntityKind::Item, record, Some(category));

        assert!(for_entity(&tree, area).is_none());
        assert_eq!(
            for_entity(&tree, category).unwrap().index_notes(),
            Some("all accounts")
        );
        assert_eq!(
            for_entity(&tree, item).unwrap().index_notes(),
            Some("monthly")
        );
        assert!(for_entity(&tree, scans).is_none());
    }
}
