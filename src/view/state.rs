use std::sync::Arc;

use crate::mars::PhotoRecord;

/// What the photo list screen should currently render.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Loading,
    Success(Vec<Arc<PhotoRecord>>),
    Error(String),
}

impl ViewState {
    pub fn success(photos: Vec<PhotoRecord>) -> Self {
        ViewState::Success(photos.into_iter().map(Arc::new).collect())
    }

    pub fn photos(&self) -> Option<&[Arc<PhotoRecord>]> {
        match self {
            ViewState::Success(photos) => Some(photos),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    /// Look up a photo by id in a Success state.
    pub fn find(&self, id: &str) -> Option<&Arc<PhotoRecord>> {
        self.photos()?.iter().find(|p| p.id == id)
    }
}
