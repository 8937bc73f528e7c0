use std::sync::Arc;

use super::model::PhotoViewModel;
use crate::mars::PhotoRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Splash,
    Home,
    Detail,
}

impl Route {
    pub fn as_str(&self) -> &str {
        match self {
            Route::Splash => "splash",
            Route::Home => "home",
            Route::Detail => "detail",
        }
    }
}

/// Back stack over the three destinations. Leaving the detail destination
/// clears the view model's selection.
#[derive(Debug)]
pub struct Navigator {
    stack: Vec<Route>,
    model: PhotoViewModel,
}

impl Navigator {
    pub fn new(model: PhotoViewModel) -> Self {
        Self {
            stack: vec![Route::Splash],
            model,
        }
    }

    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or(Route::Home)
    }

    pub fn model(&self) -> &PhotoViewModel {
        &self.model
    }

    /// Replace the splash destination with home; splash never stays on the
    /// back stack.
    pub fn finish_splash(&mut self) {
        if self.current() == Route::Splash {
            self.stack.pop();
            self.stack.push(Route::Home);
            tracing::debug!("Navigated splash -> home");
        }
    }

    pub fn open_detail(&mut self, photo: Arc<PhotoRecord>) {
        self.finish_splash();
        self.model.select(photo);
        if self.current() != Route::Detail {
            self.stack.push(Route::Detail);
        }
    }

    /// Pop one destination. Returns false at the root.
    pub fn back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        if self.stack.pop() == Some(Route::Detail) {
            self.model.clear_selection();
        }
        true
    }

    /// The photo to show on the detail destination. With nothing selected
    /// the detail destination pops itself and `None` is returned.
    pub fn detail_photo(&mut self) -> Option<Arc<PhotoRecord>> {
        if self.current() != Route::Detail {
            return None;
        }
        let selected = self.model.selected();
        if selected.is_none() {
            tracing::debug!("Detail opened without a selection, going back");
            self.back();
        }
        selected
    }
}
