//! View-side logic: the observable photo state, navigation, and the
//! gesture/filter helpers the screens are built from.

pub mod filter;
pub mod model;
pub mod nav;
pub mod pull;
pub mod state;
pub mod viewport;

pub use filter::{camera_options, result_count_label, PhotoFilter, ALL_CAMERAS};
pub use model::{PhotoViewModel, RefreshRequest, Snapshot};
pub use nav::{Navigator, Route};
pub use pull::PullToRefresh;
pub use state::ViewState;
pub use viewport::Viewport;
