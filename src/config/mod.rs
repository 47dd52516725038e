mod resolver;
mod store;

pub use resolver::ConfigResolver;
pub use store::{ConfigService, ConfigStore, SharedConfig};

use crate::collab::SidePanelMode;
use crate::state::{SortKey, SortOptions, SortOrder, ViewMode, ViewState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub view: ViewConfig,
    pub window: WindowConfig,
    /// Per-folder overrides, keyed by normalised folder path
    pub folders: BTreeMap<String, FolderConfig>,
}

/// Process-wide default view settings
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub case_sensitive: bool,
    /// Show directories first in sorting
    pub folders_first: bool,
    pub view_mode: ViewMode,
    /// Show hidden files by default
    pub show_hidden: bool,
    /// Global column layout of the detailed view
    pub columns: Vec<String>,
}

/// Window layout and behavior
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Width of the side panel (in pixels), shared by all tabs
    pub splitter_position: u32,
    /// Show the tab bar even with a single tab
    pub always_show_tabs: bool,
    pub side_panel_mode: SidePanelMode,
    pub side_panel_visible: bool,
    pub width: u32,
    pub height: u32,
    pub bookmark_open_method: OpenMethod,
}

/// Where activated bookmarks open
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OpenMethod {
    CurrentTab,
    NewTab,
    NewWindow,
}

/// A saved per-folder view
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FolderConfig {
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default = "default_true")]
    pub folders_first: bool,
    #[serde(default)]
    pub view_mode: ViewMode,
    #[serde(default)]
    pub show_hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
}

fn default_true() -> bool {
    true
}

pub fn default_columns() -> Vec<String> {
    ["name", "size", "type", "modified"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

impl Default for ViewConfig {
    fn default() -> Self {
        let sort = SortOptions::default();
        ViewConfig {
            sort_key: sort.key,
            sort_order: sort.order,
            case_sensitive: sort.case_sensitive,
            folders_first: sort.folders_first,
            view_mode: ViewMode::default(),
            show_hidden: false,
            columns: default_columns(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            splitter_position: 150,
            always_show_tabs: false,
            side_panel_mode: SidePanelMode::Places,
            side_panel_visible: true,
            width: 640,
            height: 480,
            bookmark_open_method: OpenMethod::CurrentTab,
        }
    }
}

impl ViewConfig {
    pub fn to_view_state(&self) -> ViewState {
        ViewState {
            sort: SortOptions {
                key: self.sort_key,
                order: self.sort_order,
                case_sensitive: self.case_sensitive,
                folders_first: self.folders_first,
            },
            view_mode: self.view_mode.clone(),
            show_hidden: self.show_hidden,
            owns_config: false,
            columns: None,
        }
    }
}

impl FolderConfig {
    pub fn from_view_state(state: &ViewState) -> Self {
        FolderConfig {
            sort_key: state.sort.key,
            sort_order: state.sort.order,
            case_sensitive: state.sort.case_sensitive,
            folders_first: state.sort.folders_first,
            view_mode: state.view_mode.clone(),
            show_hidden: state.show_hidden,
            columns: state.columns.clone(),
        }
    }

    pub fn to_view_state(&self) -> ViewState {
        ViewState {
            sort: SortOptions {
                key: self.sort_key,
                order: self.sort_order,
                case_sensitive: self.case_sensitive,
                folders_first: self.folders_first,
            },
            view_mode: self.view_mode.clone(),
            show_hidden: self.show_hidden,
            owns_config: true,
            columns: self.columns.clone(),
        }
    }
}

impl AppConfig {
    /// Get the path to the config file
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "kura")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from file, or return defaults if it is missing or broken
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return AppConfig::default();
        }
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<AppConfig>(&contents) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!(
                        "Failed to parse config file {}: {}; using defaults",
                        path.display(),
                        e
                    );
                    AppConfig::default()
                }
            },
            Err(e) => {
                log::warn!(
                    "Failed to read config file {}: {}; using defaults",
                    path.display(),
                    e
                );
                AppConfig::default()
            }
        }
    }

    pub fn to_toml(&self) -> crate::error::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
