//! Absolute URLs for the application, projects and entities.

use ontonav_model::{EntityRef, PerspectiveId, Place, ProjectId, Selection};
use tracing::debug;
use url::Url;

use crate::ConfigError;
use crate::active::ActiveProjectProvider;
use crate::codec::PlaceCodec;
use crate::config::ApplicationConfig;
use crate::perspective::PerspectiveResolver;

/// Builds shareable URLs from a frozen [`ApplicationConfig`].
///
/// Construction validates the configuration; once built, every URL
/// operation is infallible.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    config: ApplicationConfig,
    resolver: PerspectiveResolver,
    codec: PlaceCodec,
    base: Url,
}

impl UrlBuilder {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfiguration`] when the host and path
    /// cannot form an absolute URL. Callers should treat this as fatal at
    /// startup.
    pub fn new(
        config: ApplicationConfig,
        resolver: PerspectiveResolver,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut base = Url::parse(&format!("{}://{}", config.scheme(), config.host()))
            .map_err(|e| {
                ConfigError::invalid(format!("host {:?} does not form a URL: {e}", config.host()))
            })?;
        if base.cannot_be_a_base() {
            return Err(ConfigError::invalid(format!(
                "host {:?} does not form a hierarchical URL",
                config.host()
            )));
        }
        base.set_path(config.path());
        debug!(
            host = config.host(),
            path = config.path(),
            base = %base,
            "url builder ready"
        );
        Ok(Self {
            config,
            resolver,
            codec: PlaceCodec::new(),
            base,
        })
    }

    pub fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    pub fn resolver(&self) -> &PerspectiveResolver {
        &self.resolver
    }

    /// Root URL of the application, without a fragment.
    pub fn application_url(&self) -> String {
        self.compose(None)
    }

    /// The application URL as an HTML link labelled with the display name.
    ///
    /// The display name is inserted verbatim and must come from trusted
    /// configuration.
    pub fn application_anchor(&self) -> String {
        format!(
            "<a href=\"{}\">{}</a>",
            self.application_url(),
            self.config.display_name()
        )
    }

    /// URL opening `project_id` in the default perspective with nothing selected.
    pub fn project_url(&self, project_id: &ProjectId) -> String {
        let place = Place::new(
            project_id.clone(),
            PerspectiveId::default_perspective(),
            Selection::empty(),
        );
        self.place_url(&place)
    }

    /// URL selecting `entity` in the perspective its type resolves to.
    pub fn entity_url(&self, project_id: &ProjectId, entity: &EntityRef) -> String {
        let place = Place::new(
            project_id.clone(),
            self.resolver.resolve(entity.entity_type()),
            Selection::of(entity.clone()),
        );
        self.place_url(&place)
    }

    pub fn place_url(&self, place: &Place) -> String {
        let fragment = self.codec.encode_fragment(place);
        self.compose(Some(&fragment))
    }

    /// Project URL for whatever project `provider` reports as active.
    pub fn active_project_url(&self, provider: &dyn ActiveProjectProvider) -> Option<String> {
        provider
            .active_project_id()
            .map(|project_id| self.project_url(&project_id))
    }

    fn compose(&self, fragment: Option<&str>) -> String {
        let mut url = self.base.clone();
        url.set_fragment(fragment);
        url.into()
    }
}
