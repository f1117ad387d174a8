//! Entity model for a scanned Johnny Decimal tree.
//!
//! Entities are stored in an arena ([`EntityTree`]) and refer to each other by
//! [`EntityId`]. A child is appended to its parent's list at the moment it is
//! inserted, so a parent's children are always exactly the entities created
//! with it as owner, in creation order.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::error::{JdexError, Result};
use crate::types::{Backing, EntityKind};

/// Handle to an entity inside an [`EntityTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(usize);

/// Fields shared by every entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRecord {
    /// Sort key extracted from the file name, e.g. `10` or `10.01`.
    pub index: String,
    /// File name text after the index.
    pub name: String,
    /// Absolute path of the backing directory or file.
    pub path: PathBuf,
    pub backing: Backing,
}

impl EntityRecord {
    pub fn new(
        index: impl Into<String>,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        backing: Backing,
    ) -> Self {
        Self {
            index: index.into(),
            name: name.into(),
            path: path.into(),
            backing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemParent {
    Category(EntityId),
    SubCategory(EntityId),
}

impl ItemParent {
    pub fn id(self) -> EntityId {
        match self {
            Self::Category(id) | Self::SubCategory(id) => id,
        }
    }
}

#[derive(Debug, Clone)]
pub enum EntityLinks {
    Area {
        categories: Vec<EntityId>,
    },
    Category {
        area: EntityId,
        sub_categories: Vec<EntityId>,
        items: Vec<EntityId>,
    },
    SubCategory {
        category: EntityId,
        items: Vec<EntityId>,
    },
    Item {
        parent: ItemParent,
    },
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub record: EntityRecord,
    pub links: EntityLinks,
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self.links {
            EntityLinks::Area { .. } => EntityKind::Area,
            EntityLinks::Category { .. } => EntityKind::Category,
            EntityLinks::SubCategory { .. } => EntityKind::SubCategory,
            EntityLinks::Item { .. } => EntityKind::Item,
        }
    }

    pub fn index(&self) -> &str {
        &self.record.index
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn path(&self) -> &Path {
        &self.record.path
    }

    pub fn backing(&self) -> Backing {
        self.record.backing
    }

    pub fn parent(&self) -> Option<EntityId> {
        match &self.links {
            EntityLinks::Area { .. } => None,
            EntityLinks::Category { area, .. } => Some(*area),
            EntityLinks::SubCategory { category, .. } => Some(*category),
            EntityLinks::Item { parent } => Some(parent.id()),
        }
    }

    /// The form used when the entity is listed in the index document:
    /// directories by their own name, files as a `[[wiki link]]` to their stem.
    pub fn display_name(&self) -> String {
        match self.record.backing {
            Backing::Directory => self
                .record
                .path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.record.name.clone()),
            Backing::File => {
                let stem = self
                    .record
                    .path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_else(|| self.record.name.clone());
                format!("[[{stem}]]")
            }
        }
    }
}

/// Orders two entities by index string alone.
pub fn compare_by_index(a: &Entity, b: &Entity) -> Ordering {
    a.index().cmp(b.index())
}

/// Arena owning every entity found during one scan.
#[derive(Debug, Default, Clone)]
pub struct EntityTree {
    entities: Vec<Entity>,
}

impl EntityTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0)
    }

    /// Panics on an id from another tree; ids are only handed out by `insert`.
    pub fn entity(&self, id: EntityId) -> &Entity {
        &self.entities[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(index, entity)| (EntityId(index), entity))
    }

    /// Direct children of `id`. Categories list subcategories before items.
    pub fn children(&self, id: EntityId) -> Vec<EntityId> {
        match self.get(id).map(|entity| &entity.links) {
            Some(EntityLinks::Area { categories }) => categories.clone(),
            Some(EntityLinks::Category {
                sub_categories,
                items,
                ..
            }) => sub_categories.iter().chain(items).copied().collect(),
            Some(EntityLinks::SubCategory { items, .. }) => items.clone(),
            Some(EntityLinks::Item { .. }) | None => Vec::new(),
        }
    }

    /// Creates an entity of `kind` owned by `parent` and appends it to the
    /// parent's child list.
    pub fn insert(
        &mut self,
        kind: EntityKind,
        record: EntityRecord,
        parent: Option<EntityId>,
    ) -> Result<EntityId> {
        let invalid = |parent| JdexError::InvalidParent { kind, parent };
        let parent_kind = match parent {
            Some(parent_id) => match self.get(parent_id) {
                Some(entity) => Some(entity.kind()),
                None => return Err(invalid(None)),
            },
            None => None,
        };

        let links = match (kind, parent, parent_kind) {
            (EntityKind::Area, None, None) => EntityLinks::Area {
                categories: Vec::new(),
            },
            (EntityKind::Category, Some(area), Some(EntityKind::Area)) => EntityLinks::Category {
                area,
                sub_categories: Vec::new(),
                items: Vec::new(),
            },
            (EntityKind::SubCategory, Some(category), Some(EntityKind::Category)) => {
                EntityLinks::SubCategory {
                    category,
                    items: Vec::new(),
                }
            }
            (EntityKind::Item, Some(category), Some(EntityKind::Category)) => EntityLinks::Item {
                parent: ItemParent::Category(category),
            },
            (EntityKind::Item, Some(sub), Some(EntityKind::SubCategory)) => EntityLinks::Item {
                parent: ItemParent::SubCategory(sub),
            },
            _ => return Err(invalid(parent_kind)),
        };

        let id = EntityId(self.entities.len());
        self.entities.push(Entity { record, links });

        if let Some(parent_id) = parent {
            self.attach(parent_id, kind, id);
        }
        Ok(id)
    }

    fn attach(&mut self, parent: EntityId, kind: EntityKind, child: EntityId) {
        match (&mut self.entities[parent.0].links, kind) {
            (EntityLinks::Area { categories }, EntityKind::Category) => categories.push(child),
            (EntityLinks::Category { sub_categories, .. }, EntityKind::SubCategory) => {
                sub_categories.push(child)
            }
            (EntityLinks::Category { items, .. }, EntityKind::Item)
            | (EntityLinks::SubCategory { items, .. }, EntityKind::Item) => items.push(child),
            // insert() has already rejected every other pairing
            _ => {}
        }
    }

    /// Stable sort of `ids` by entity index.
    pub fn sort_by_index(&self, ids: &mut [EntityId]) {
        ids.sort_by(|a, b| compare_by_index(self.entity(*a), self.entity(*b)));
    }
}
