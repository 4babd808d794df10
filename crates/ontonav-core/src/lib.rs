//! Navigation addressing for the ontology editor.
//!
//! [`PlaceCodec`] turns a [`Place`](ontonav_model::Place) into a URL fragment
//! and back, [`PerspectiveResolver`] picks the perspective for an entity type,
//! and [`UrlBuilder`] assembles absolute URLs from an [`ApplicationConfig`].

pub mod active;
pub mod codec;
pub mod config;
pub mod error;
pub mod perspective;
pub mod url_builder;

pub use active::{ActiveProjectProvider, FixedActiveProject};
pub use codec::{PLACE_KIND, PlaceCodec};
pub use config::{ApplicationConfig, NavigationSettings};
pub use error::{CodecError, ConfigError};
pub use perspective::{PerspectiveResolver, PerspectiveSettings};
pub use url_builder::UrlBuilder;
