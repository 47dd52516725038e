use crate::error::{NavError, Result};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use url::Url;

/// A folder the browser can show.
///
/// Cheap to clone and immutable. Two locations are equal when their
/// normalised paths are equal, so `/a/./b/` and `/a/c/../b` are the same place.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location(Arc<Path>);

impl Location {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self(Arc::from(normalize(path.as_ref())))
    }

    /// Parse what a user typed into the location bar or what a bookmark file holds.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(NavError::InvalidLocation("empty location".to_string()));
        }

        if input == "~" || input.starts_with("~/") {
            let home = Self::home()
                .ok_or_else(|| NavError::InvalidLocation("home folder is unknown".to_string()))?;
            let rest = input.trim_start_matches('~').trim_start_matches('/');
            return Ok(if rest.is_empty() {
                home
            } else {
                Self::new(home.path().join(rest))
            });
        }

        if input.starts_with("file:") {
            let uri = Url::parse(input)
                .map_err(|e| NavError::InvalidLocation(format!("malformed uri {}: {}", input, e)))?;
            let path = uri
                .to_file_path()
                .map_err(|()| NavError::InvalidLocation(format!("not a local file: {}", input)))?;
            return Ok(Self::new(path));
        }

        if input.contains("://") {
            return Err(NavError::InvalidLocation(format!(
                "unsupported scheme: {}",
                input
            )));
        }

        Self::absolute(input)
    }

    fn absolute(input: &str) -> Result<Self> {
        let path = Path::new(input);
        if path.is_absolute() {
            Ok(Self::new(path))
        } else {
            Err(NavError::InvalidLocation(format!(
                "not an absolute path: {}",
                input
            )))
        }
    }

    pub fn home() -> Option<Self> {
        directories::UserDirs::new().map(|dirs| Self::new(dirs.home_dir()))
    }

    pub fn desktop() -> Option<Self> {
        directories::UserDirs::new()
            .and_then(|dirs| dirs.desktop_dir().map(Self::new))
    }

    /// The freedesktop trash folder of the current user.
    pub fn trash() -> Option<Self> {
        directories::BaseDirs::new().map(|dirs| Self::new(dirs.data_dir().join("Trash/files")))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn parent(&self) -> Option<Self> {
        self.0.parent().map(Self::new)
    }

    pub fn join(&self, name: &str) -> Self {
        Self::new(self.0.join(name))
    }

    pub fn display_name(&self) -> String {
        self.0
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "/".to_string())
    }

    /// Key used for the per-folder override table.
    pub fn key(&self) -> String {
        self.0.to_string_lossy().to_string()
    }

    pub fn to_uri(&self) -> String {
        match Url::from_file_path(&self.0) {
            Ok(uri) => uri.into(),
            Err(()) => format!("file://{}", self.key()),
        }
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location({})", self.0.display())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push("/");
    }
    out
}
