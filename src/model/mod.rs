mod bookmark;
mod id;
mod location;

pub use bookmark::{Bookmark, BookmarkStore, FileBookmarks};
pub use id::{TabId, WindowId};
pub use location::Location;
