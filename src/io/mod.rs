pub mod directory;
pub mod vfs;
pub mod worker;

pub use directory::{read_directory, sort_entries, FileEntry};
pub use vfs::LocalVfs;
