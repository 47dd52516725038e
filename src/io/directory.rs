// Folder listing for the local filesystem
use crate::model::Location;
use crate::state::{SortKey, SortOptions, SortOrder};
use std::cmp::Ordering;
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

#[derive(Clone, Debug)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
    pub size: u64,
    pub modified: SystemTime,
    pub extension: String,
}

impl FileEntry {
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let symlink_meta = fs::symlink_metadata(&path).ok()?;
        let is_symlink = symlink_meta.is_symlink();

        let name = path.file_name()?.to_string_lossy().to_string();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        // follow links for the target's kind and size
        let metadata = fs::metadata(&path).ok();
        let is_dir = metadata.as_ref().is_some_and(|m| m.is_dir());
        let size = if is_dir {
            0
        } else {
            metadata.as_ref().map_or(0, |m| m.len())
        };
        let modified = metadata
            .as_ref()
            .and_then(|m| m.modified().ok())
            .or_else(|| symlink_meta.modified().ok())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        Some(Self {
            path,
            name,
            is_dir,
            is_symlink,
            size,
            modified,
            extension,
        })
    }

    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    pub fn location(&self) -> Location {
        Location::new(&self.path)
    }

    /// Short description used by the "type" column and the Type sort key.
    pub fn kind(&self) -> String {
        if self.is_dir {
            "folder".to_string()
        } else if self.extension.is_empty() {
            "file".to_string()
        } else {
            format!("{} file", self.extension)
        }
    }

    pub fn display_name(&self) -> String {
        if self.is_symlink {
            format!("{} \u{2192}", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// List a folder. Unreadable children are skipped.
pub fn read_directory(location: &Location, show_hidden: bool) -> std::io::Result<Vec<FileEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(location.path())?.flatten() {
        if let Some(file_entry) = FileEntry::from_path(entry.path()) {
            if show_hidden || !file_entry.is_hidden() {
                entries.push(file_entry);
            }
        }
    }
    Ok(entries)
}

pub fn sort_entries(entries: &mut [FileEntry], options: &SortOptions) {
    entries.sort_by(|a, b| compare_entries(a, b, options));
}

fn compare_entries(a: &FileEntry, b: &FileEntry, options: &SortOptions) -> Ordering {
    // folders stay on top regardless of the order
    if options.folders_first && a.is_dir != b.is_dir {
        return b.is_dir.cmp(&a.is_dir);
    }
    let by_name = || compare_names(&a.name, &b.name, options.case_sensitive);
    let ordering = match options.key {
        SortKey::Name => by_name(),
        SortKey::Size => a.size.cmp(&b.size).then_with(by_name),
        SortKey::Modified => a.modified.cmp(&b.modified).then_with(by_name),
        SortKey::Type => a.kind().cmp(&b.kind()).then_with(by_name),
        SortKey::Extension => a.extension.cmp(&b.extension).then_with(by_name),
    };
    match options.order {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    }
}

fn compare_names(a: &str, b: &str, case_sensitive: bool) -> Ordering {
    if case_sensitive {
        a.cmp(b)
    } else {
        a.to_lowercase().cmp(&b.to_lowercase())
    }
}
