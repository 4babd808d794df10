use ontonav_model::ProjectId;

/// Source of the project the user is currently working in.
pub trait ActiveProjectProvider: Send + Sync {
    fn active_project_id(&self) -> Option<ProjectId>;
}

/// Provider that always reports the same project, or none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedActiveProject(Option<ProjectId>);

impl FixedActiveProject {
    pub fn new(project_id: ProjectId) -> Self {
        Self(Some(project_id))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl ActiveProjectProvider for FixedActiveProject {
    fn active_project_id(&self) -> Option<ProjectId> {
        self.0.clone()
    }
}
