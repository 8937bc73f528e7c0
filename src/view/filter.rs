use std::collections::BTreeSet;
use std::sync::Arc;

use crate::mars::PhotoRecord;

/// Camera filter option that matches every photo.
pub const ALL_CAMERAS: &str = "All";

/// Search box and camera chip selection for the photo grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoFilter {
    pub query: String,
    pub camera: String,
}

impl Default for PhotoFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            camera: ALL_CAMERAS.to_string(),
        }
    }
}

impl PhotoFilter {
    pub fn new(query: Option<&str>, camera: Option<&str>) -> Self {
        Self {
            query: query.unwrap_or_default().to_string(),
            camera: camera.unwrap_or(ALL_CAMERAS).to_string(),
        }
    }

    /// Case-insensitive id search combined with an exact camera name match.
    pub fn matches(&self, photo: &PhotoRecord) -> bool {
        let query_ok = self.query.is_empty()
            || photo
                .id
                .to_lowercase()
                .contains(&self.query.to_lowercase());
        let camera_ok = self.camera == ALL_CAMERAS || photo.camera.name == self.camera;
        query_ok && camera_ok
    }

    pub fn apply(&self, photos: &[Arc<PhotoRecord>]) -> Vec<Arc<PhotoRecord>> {
        photos.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

/// `All` followed by every distinct camera name, sorted.
pub fn camera_options(photos: &[Arc<PhotoRecord>]) -> Vec<String> {
    let names: BTreeSet<&str> = photos.iter().map(|p| p.camera.name.as_str()).collect();
    std::iter::once(ALL_CAMERAS.to_string())
        .chain(names.into_iter().map(str::to_string))
        .collect()
}

/// Label shown above the grid.
pub fn result_count_label(count: usize) -> String {
    if count == 0 {
        "No photos found".to_string()
    } else {
        format!("{count} photo(s) found")
    }
}
