// Bookmarks - named folders shown in the bookmarks menu
use super::Location;
use crate::error::{NavError, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq)]
pub struct Bookmark {
    pub name: String,
    pub location: Location,
}

impl Bookmark {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

/// Source of the bookmarks menu. Owners call
/// `WindowRegistry::notify_bookmarks_changed` after the list changes.
pub trait BookmarkStore {
    fn items(&self) -> Vec<Bookmark>;
    fn add(&mut self, bookmark: Bookmark) -> Result<()>;
}

/// Bookmarks kept in the GTK bookmarks file, one `file:///path Name` per line.
pub struct FileBookmarks {
    path: Option<PathBuf>,
    items: Vec<Bookmark>,
}

impl FileBookmarks {
    pub fn default_path() -> Option<PathBuf> {
        directories::BaseDirs::new().map(|dirs| dirs.config_dir().join("gtk-3.0").join("bookmarks"))
    }

    /// Load the user's bookmarks, or an empty list if the file is missing or unreadable.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(path),
            None => Self {
                path: None,
                items: Vec::new(),
            },
        }
    }

    pub fn load_from(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = match fs::read_to_string(&path) {
            Ok(contents) => parse_bookmarks(&contents),
            Err(e) => {
                if path.exists() {
                    log::warn!("Failed to read bookmarks {}: {}", path.display(), e);
                }
                Vec::new()
            }
        };
        Self {
            path: Some(path),
            items,
        }
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        write_bookmarks(path, &self.items)
    }
}

impl BookmarkStore for FileBookmarks {
    fn items(&self) -> Vec<Bookmark> {
        self.items.clone()
    }

    fn add(&mut self, bookmark: Bookmark) -> Result<()> {
        self.items.push(bookmark);
        self.save()
    }
}

fn parse_bookmarks(contents: &str) -> Vec<Bookmark> {
    contents
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            let (uri, name) = match line.split_once(' ') {
                Some((uri, name)) => (uri, Some(name.trim())),
                None => (line, None),
            };
            match Location::parse(uri) {
                Ok(location) => {
                    let name = name
                        .filter(|n| !n.is_empty())
                        .map(str::to_string)
                        .unwrap_or_else(|| location.display_name());
                    Some(Bookmark { name, location })
                }
                Err(e) => {
                    // Remote bookmarks (sftp://, smb://) are not browsable here.
                    log::debug!("Skipping bookmark {}: {}", uri, e);
                    None
                }
            }
        })
        .collect()
}

fn write_bookmarks(path: &Path, items: &[Bookmark]) -> Result<()> {
    let mut contents = String::new();
    for item in items {
        contents.push_str(&item.location.to_uri());
        contents.push(' ');
        contents.push_str(&item.name);
        contents.push('\n');
    }
    let io_err = |source| NavError::ConfigWriteFailed {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, contents).map_err(io_err)
}
