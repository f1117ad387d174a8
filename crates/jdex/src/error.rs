use std::path::PathBuf;

use crate::types::EntityKind;

#[derive(Debug, thiserror::Error)]
pub enum JdexError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {0}")]
    NotFound(PathBuf),

    #[error("{kind} cannot be attached to {}", parent_label(.parent))]
    InvalidParent {
        kind: EntityKind,
        parent: Option<EntityKind>,
    },

    #[error("Failed to write index {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),
}

impl JdexError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn parent_label(parent: &Option<EntityKind>) -> &'static str {
    parent.map(EntityKind::as_str).unwrap_or("no parent")
}

pub type Result<T> = std::result::Result<T, JdexError>;
