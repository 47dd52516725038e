//! Error type shared by the coordinator and its file-backed collaborators.

use crate::model::{TabId, WindowId};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavError {
    /// Back/forward past the end of the history, or a jump to a missing entry.
    /// Surfaced only as disabled controls.
    #[error("no history entry in that direction")]
    NoHistory,

    /// The requested location cannot be parsed or is not a browsable folder.
    #[error("invalid location: {0}")]
    InvalidLocation(String),

    /// The configuration snapshot could not be written to disk.
    #[error("failed to write config to '{path}': {source}")]
    ConfigWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode config: {0}")]
    ConfigEncode(#[from] toml::ser::Error),

    #[error("no such tab: {0}")]
    NoSuchTab(TabId),

    #[error("no such window: {0}")]
    NoSuchWindow(WindowId),
}

pub type Result<T> = std::result::Result<T, NavError>;
