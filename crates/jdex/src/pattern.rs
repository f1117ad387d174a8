//! File name classification.
//!
//! Each entity kind has one fixed pattern. Matching is a pure function: a name
//! either yields an index and a display name or it does not belong to that
//! level of the tree.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Backing, EntityKind};

/// `00 - 09 Admin`
static AREA: LazyLock<Regex> = LazyLock::new(|| compile(r"^(\d{2} - \d{2}) (.+)$"));

/// `10 Finance`
static CATEGORY: LazyLock<Regex> = LazyLock::new(|| compile(r"^(\d{2}) (.+)$"));

/// `11.1 Accounts`. The name may not open with a hyphen, which keeps item
/// directories such as `11.01 - Statements` out of this level.
static SUB_CATEGORY: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(\d{2}\.\d+) ([^\s-].*)$"));

/// `11.01 - Statements`, `11.1.01 - Checking`, `11.01.Statements`
static ITEM_DIRECTORY: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(\d{2}(?:\.\d+)*\.\d{2})(?: - |\.)(.+)$"));

/// Same as a directory item, with a mandatory `.md` suffix.
static ITEM_FILE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(\d{2}(?:\.\d+)*\.\d{2})(?: - |\.)(.+)\.md$"));

fn compile(pattern: &str) -> Regex {
    // Patterns are fixed literals covered by the tests below.
    Regex::new(pattern).unwrap_or_else(|error| panic!("invalid name pattern {pattern}: {error}"))
}

/// Index and name extracted from a matching file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMatch {
    pub index: String,
    pub name: String,
}

fn pattern_for(kind: EntityKind, backing: Backing) -> Option<&'static Regex> {
    if !kind.accepts(backing) {
        return None;
    }
    let regex = match (kind, backing) {
        (EntityKind::Area, _) => &*AREA,
        (EntityKind::Category, _) => &*CATEGORY,
        (EntityKind::SubCategory, _) => &*SUB_CATEGORY,
        (EntityKind::Item, Backing::Directory) => &*ITEM_DIRECTORY,
        (EntityKind::Item, Backing::File) => &*ITEM_FILE,
    };
    Some(regex)
}

/// Matches `file_name` against the pattern for `kind`.
///
/// Returns `None` when the name does not fit, or when the backing is not
/// allowed for the kind (only items may be files).
pub fn classify(kind: EntityKind, file_name: &str, backing: Backing) -> Option<NameMatch> {
    let captures = pattern_for(kind, backing)?.captures(file_name)?;
    Some(NameMatch {
        index: captures.get(1)?.as_str().to_string(),
        name: captures.get(2)?.as_str().to_string(),
    })
}

/// True for names of the form `<index>.00<anything>.md`: the note that carries
/// metadata for a directory-backed category or item.
pub fn is_metadata_note(index: &str, file_name: &str) -> bool {
    file_name
        .strip_prefix(index)
        .and_then(|rest| rest.strip_prefix(".00"))
        .is_some_and(|rest| rest.ends_with(".md"))
}
