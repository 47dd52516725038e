pub mod navigation;
pub mod sort;
pub mod tab;
pub mod view;

pub use navigation::NavigationHistory;
pub use sort::{SortKey, SortOptions, SortOrder};
pub use tab::{TabLifecycle, TabPage};
pub use view::{sort_changes, ViewField, ViewMode, ViewModeInfo, ViewState};
