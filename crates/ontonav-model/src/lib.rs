//! Value types describing where in the ontology editor a link points.

pub mod entity;
pub mod error;
pub mod ids;
pub mod place;
pub mod selection;

pub use entity::{EntityRef, EntityType};
pub use error::{ModelError, Result};
pub use ids::{PerspectiveId, ProjectId};
pub use place::Place;
pub use selection::{Selection, SelectionBuilder};
