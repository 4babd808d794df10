//! Ordered, duplicate-free sets of selected entities.

use serde::{Deserialize, Serialize};

use crate::EntityRef;

/// Entities focused within a place.
///
/// Iteration order is insertion order; an entity appears at most once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<EntityRef>", into = "Vec<EntityRef>")]
pub struct Selection {
    entities: Vec<EntityRef>,
}

impl Selection {
    /// The zero-element selection.
    pub const EMPTY: Selection = Selection {
        entities: Vec::new(),
    };

    #[must_use]
    pub const fn empty() -> Self {
        Self::EMPTY
    }

    #[must_use]
    pub fn builder() -> SelectionBuilder {
        SelectionBuilder::default()
    }

    /// Selection holding a single entity.
    #[must_use]
    pub fn of(entity: EntityRef) -> Self {
        Self {
            entities: vec![entity],
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntityRef> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn first(&self) -> Option<&EntityRef> {
        self.entities.first()
    }

    pub fn contains(&self, entity: &EntityRef) -> bool {
        self.entities.contains(entity)
    }

    pub fn as_slice(&self) -> &[EntityRef] {
        &self.entities
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a EntityRef;
    type IntoIter = std::slice::Iter<'a, EntityRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

impl From<Vec<EntityRef>> for Selection {
    fn from(entities: Vec<EntityRef>) -> Self {
        entities
            .into_iter()
            .fold(Selection::builder(), SelectionBuilder::add)
            .build()
    }
}

impl From<Selection> for Vec<EntityRef> {
    fn from(selection: Selection) -> Self {
        selection.entities
    }
}

impl FromIterator<EntityRef> for Selection {
    fn from_iter<I: IntoIterator<Item = EntityRef>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Selection::builder(), SelectionBuilder::add)
            .build()
    }
}

/// Accumulates entities for a [`Selection`].
#[derive(Debug, Clone, Default)]
pub struct SelectionBuilder {
    entities: Vec<EntityRef>,
}

impl SelectionBuilder {
    /// Appends `entity` unless an equal entity was already added.
    #[must_use]
    pub fn add(mut self, entity: EntityRef) -> Self {
        if !self.entities.contains(&entity) {
            self.entities.push(entity);
        }
        self
    }

    #[must_use]
    pub fn build(self) -> Selection {
        Selection {
            entities: self.entities,
        }
    }
}
