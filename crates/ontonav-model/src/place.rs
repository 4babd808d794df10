use serde::{Deserialize, Serialize};

use crate::{PerspectiveId, ProjectId, Selection};

/// A navigable position in the application: which project, which
/// perspective, and what is selected.
///
/// Places are values. Changing any part produces a new place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Place {
    project_id: ProjectId,
    perspective_id: PerspectiveId,
    #[serde(default)]
    selection: Selection,
}

impl Place {
    pub fn new(project_id: ProjectId, perspective_id: PerspectiveId, selection: Selection) -> Self {
        Self {
            project_id,
            perspective_id,
            selection,
        }
    }

    /// Place for `project_id` in the default perspective with nothing selected.
    pub fn for_project(project_id: ProjectId) -> Self {
        Self::new(project_id, PerspectiveId::default(), Selection::empty())
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn perspective_id(&self) -> &PerspectiveId {
        &self.perspective_id
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn with_perspective(&self, perspective_id: PerspectiveId) -> Self {
        Self {
            perspective_id,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_selection(&self, selection: Selection) -> Self {
        Self {
            selection,
            ..self.clone()
        }
    }
}
