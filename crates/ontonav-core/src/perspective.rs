//! Default perspective per entity type.

use std::collections::BTreeMap;

use ontonav_model::{EntityType, PerspectiveId};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Picks the perspective to open when navigating to an entity.
///
/// Resolution is total: a type without a mapping resolves to the default
/// perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerspectiveResolver {
    default: PerspectiveId,
    mappings: BTreeMap<EntityType, PerspectiveId>,
}

impl PerspectiveResolver {
    /// Resolver with no mappings; every type resolves to `default`.
    pub fn new(default: PerspectiveId) -> Self {
        Self {
            default,
            mappings: BTreeMap::new(),
        }
    }

    /// The stock mapping shipped with the editor.
    ///
    /// Every property type opens in "Properties", individuals in
    /// "Individuals", everything else in the default "Classes".
    pub fn standard() -> Self {
        let perspective = |name: &str| {
            PerspectiveId::new(name).unwrap_or_else(|_| PerspectiveId::default_perspective())
        };
        EntityType::ALL.into_iter().fold(
            Self::new(PerspectiveId::default_perspective()),
            |resolver, entity_type| {
                let name = if entity_type.is_property() {
                    "Properties"
                } else if entity_type == EntityType::NamedIndividual {
                    "Individuals"
                } else {
                    PerspectiveId::DEFAULT_NAME
                };
                resolver.with_mapping(entity_type, perspective(name))
            },
        )
    }

    #[must_use]
    pub fn with_mapping(mut self, entity_type: EntityType, perspective: PerspectiveId) -> Self {
        self.mappings.insert(entity_type, perspective);
        self
    }

    pub fn resolve(&self, entity_type: EntityType) -> PerspectiveId {
        self.mappings
            .get(&entity_type)
            .unwrap_or(&self.default)
            .clone()
    }

    pub fn default_perspective(&self) -> &PerspectiveId {
        &self.default
    }

    pub fn is_mapped(&self, entity_type: EntityType) -> bool {
        self.mappings.contains_key(&entity_type)
    }
}

impl Default for PerspectiveResolver {
    fn default() -> Self {
        Self::standard()
    }
}

/// `[perspectives]` section of the navigation settings.
///
/// ```toml
/// [perspectives]
/// default = "Classes"
///
/// [perspectives.mappings]
/// NamedIndividual = "Individuals"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerspectiveSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<PerspectiveId>,
    /// Entity type tag (e.g. `"NamedIndividual"`) to perspective name.
    #[serde(default)]
    pub mappings: BTreeMap<String, PerspectiveId>,
}

impl PerspectiveSettings {
    /// Builds the resolver described by these settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfiguration`] for a mapping keyed by an
    /// unknown entity type tag.
    pub fn resolver(&self) -> Result<PerspectiveResolver, ConfigError> {
        let default = self.default.clone().unwrap_or_default();
        self.mappings
            .iter()
            .try_fold(
                PerspectiveResolver::new(default),
                |resolver, (tag, perspective)| -> Result<_, ConfigError> {
                    let entity_type = tag.parse::<EntityType>().map_err(|_| {
                        ConfigError::invalid(format!(
                            "unknown entity type {tag:?} in [perspectives]"
                        ))
                    })?;
                    Ok(resolver.with_mapping(entity_type, perspective.clone()))
                },
            )
    }
}
