//! Index document rendering.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::entity::{EntityId, EntityTree};
use crate::error::{JdexError, Result};
use crate::metadata;
use crate::types::EntityKind;

/// File name of the generated index inside the index area.
pub const INDEX_FILE_NAME: &str = "00.00 - Index.md";

/// Items at `NN.00`-style indices that hold media rather than notes.
fn is_media_placeholder(index: &str, name: &str) -> bool {
    index.ends_with("00") && name.contains("media")
}

/// Renders one line (two with an index note) per entity, in index order.
pub fn render(tree: &EntityTree, ids: &[EntityId]) -> Vec<String> {
    let mut sorted = ids.to_vec();
    tree.sort_by_index(&mut sorted);

    let mut lines = Vec::with_capacity(sorted.len());
    for id in sorted {
        let entity = tree.entity(id);
        let display = entity.display_name();

        match entity.kind() {
            EntityKind::Area => {
                if !entity.index().starts_with('0') {
                    lines.push(String::new());
                }
                lines.push(format!("# {display}"));
            }
            EntityKind::Category => {
                lines.push(format!("## {display}"));
                push_index_notes(&mut lines, tree, id);
            }
            EntityKind::SubCategory => lines.push(format!("### {display}")),
            EntityKind::Item => {
                if is_media_placeholder(entity.index(), entity.name()) {
                    log::debug!("leaving media bucket {display} out of the index");
                    continue;
                }
                lines.push(display);
                push_index_notes(&mut lines, tree, id);
            }
        }
    }
    lines
}

fn push_index_notes(lines: &mut Vec<String>, tree: &EntityTree, id: EntityId) {
    if let Some(notes) = metadata::for_entity(tree, id)
        .as_ref()
        .and_then(|metadata| metadata.index_notes())
    {
        lines.push(format!("\t- {notes}"));
    }
}

/// Replaces `path` with the rendered lines, one per line.
pub fn write_document(path: &Path, lines: &[String]) -> Result<()> {
    let write_error = |source| JdexError::Write {
        path: path.to_path_buf(),
        source,
    };

    if path.exists() {
        fs::remove_file(path).map_err(write_error)?;
    }
    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{line}").map_err(write_error)?;
    }
    writer.flush().map_err(write_error)?;

    log::info!("wrote {} lines to {}", lines.len(), path.display());
    Ok(())
}
