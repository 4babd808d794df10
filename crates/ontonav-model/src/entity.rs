//! Ontology entity references.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Kind of ontology entity.
///
/// The set is closed; the variant names double as the wire tags used in
/// place fragments, so renaming a variant breaks every shared link.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum EntityType {
    Class,
    ObjectProperty,
    DataProperty,
    AnnotationProperty,
    NamedIndividual,
    Datatype,
}

impl EntityType {
    pub const ALL: [EntityType; 6] = [
        Self::Class,
        Self::ObjectProperty,
        Self::DataProperty,
        Self::AnnotationProperty,
        Self::NamedIndividual,
        Self::Datatype,
    ];

    /// Stable tag written into place tokens.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::ObjectProperty => "ObjectProperty",
            Self::DataProperty => "DataProperty",
            Self::AnnotationProperty => "AnnotationProperty",
            Self::NamedIndividual => "NamedIndividual",
            Self::Datatype => "Datatype",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::ObjectProperty => "Object property",
            Self::DataProperty => "Data property",
            Self::AnnotationProperty => "Annotation property",
            Self::NamedIndividual => "Individual",
            Self::Datatype => "Datatype",
        }
    }

    pub const fn is_property(&self) -> bool {
        matches!(
            self,
            Self::ObjectProperty | Self::DataProperty | Self::AnnotationProperty
        )
    }
}

impl FromStr for EntityType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|entity_type| entity_type.tag() == s)
            .ok_or_else(|| ModelError::UnknownEntityType(s.to_string()))
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One ontology entity, identified by its type and IRI.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawEntityRef")]
pub struct EntityRef {
    #[serde(rename = "type")]
    entity_type: EntityType,
    iri: String,
}

impl EntityRef {
    /// Creates a reference. The IRI is kept verbatim; only an empty IRI is rejected.
    pub fn new(entity_type: EntityType, iri: impl Into<String>) -> Result<Self, ModelError> {
        let iri = iri.into();
        if iri.is_empty() {
            return Err(ModelError::EmptyEntityIri);
        }
        Ok(Self { entity_type, iri })
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    pub fn iri(&self) -> &str {
        &self.iri
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(<{}>)", self.entity_type, self.iri)
    }
}

#[derive(Deserialize)]
struct RawEntityRef {
    #[serde(rename = "type")]
    entity_type: EntityType,
    iri: String,
}

impl TryFrom<RawEntityRef> for EntityRef {
    type Error = ModelError;

    fn try_from(raw: RawEntityRef) -> Result<Self, Self::Error> {
        Self::new(raw.entity_type, raw.iri)
    }
}
