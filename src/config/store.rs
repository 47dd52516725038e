use super::{AppConfig, FolderConfig, WindowConfig};
use crate::error::Result;
use crate::io::worker::{write_config, IoCommand, SaveWorker};
use crate::model::Location;
use crate::state::{ViewField, ViewState};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Global configuration as the coordinator sees it: the process-wide default
/// view, the per-folder override table and the window settings.
///
/// Setters return whether anything changed; only changes mark the store dirty.
pub trait ConfigStore {
    fn default_view_state(&self) -> ViewState;
    fn default_columns(&self) -> Vec<String>;
    fn set_default_field(&mut self, field: &ViewField) -> bool;

    fn get_override(&self, location: &Location) -> Option<ViewState>;
    fn set_override(&mut self, location: &Location, state: &ViewState) -> bool;
    fn clear_override(&mut self, location: &Location) -> bool;

    fn window_config(&self) -> WindowConfig;
    fn set_window_config(&mut self, config: WindowConfig) -> bool;

    /// Persist pending changes in the background. Never blocks.
    fn request_save(&mut self);
}

/// Handle shared by every window of the process (single UI thread).
pub type SharedConfig = Rc<RefCell<dyn ConfigStore>>;

pub struct ConfigService {
    config: AppConfig,
    path: Option<PathBuf>,
    worker: Option<SaveWorker>,
    dirty: bool,
    saves_requested: usize,
}

impl ConfigService {
    /// Load from the user's config dir, falling back to an unsaved in-memory config.
    pub fn load() -> Self {
        match AppConfig::config_path() {
            Some(path) => Self::open(path),
            None => {
                log::warn!("Could not determine config directory; settings will not be saved");
                Self::in_memory(AppConfig::default())
            }
        }
    }

    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let config = AppConfig::load_from(&path);
        Self {
            config,
            path: Some(path),
            worker: Some(SaveWorker::spawn()),
            dirty: false,
            saves_requested: 0,
        }
    }

    /// A store that only tracks changes and never touches the disk.
    pub fn in_memory(config: AppConfig) -> Self {
        Self {
            config,
            path: None,
            worker: None,
            dirty: false,
            saves_requested: 0,
        }
    }

    pub fn into_shared(self) -> SharedConfig {
        Rc::new(RefCell::new(self))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of save requests that found something to persist.
    pub fn saves_requested(&self) -> usize {
        self.saves_requested
    }

    /// Write synchronously, e.g. at shutdown.
    pub fn flush(&mut self) -> Result<()> {
        if let Some(path) = &self.path {
            write_config(path, &self.config.to_toml()?)?;
        }
        self.dirty = false;
        Ok(())
    }

    fn touch(&mut self, changed: bool) -> bool {
        self.dirty |= changed;
        changed
    }
}

impl ConfigStore for ConfigService {
    fn default_view_state(&self) -> ViewState {
        self.config.view.to_view_state()
    }

    fn default_columns(&self) -> Vec<String> {
        self.config.view.columns.clone()
    }

    fn set_default_field(&mut self, field: &ViewField) -> bool {
        let view = &mut self.config.view;
        let changed = match field {
            ViewField::Columns(columns) => {
                let changed = view.columns != *columns;
                view.columns = columns.clone();
                changed
            }
            _ => {
                let mut state = view.to_view_state();
                let changed = state.apply(field);
                view.sort_key = state.sort.key;
                view.sort_order = state.sort.order;
                view.case_sensitive = state.sort.case_sensitive;
                view.folders_first = state.sort.folders_first;
                view.view_mode = state.view_mode;
                view.show_hidden = state.show_hidden;
                changed
            }
        };
        self.touch(changed)
    }

    fn get_override(&self, location: &Location) -> Option<ViewState> {
        self.config
            .folders
            .get(&location.key())
            .map(FolderConfig::to_view_state)
    }

    fn set_override(&mut self, location: &Location, state: &ViewState) -> bool {
        let entry = FolderConfig::from_view_state(state);
        let changed = self.config.folders.get(&location.key()) != Some(&entry);
        if changed {
            self.config.folders.insert(location.key(), entry);
        }
        self.touch(changed)
    }

    fn clear_override(&mut self, location: &Location) -> bool {
        let changed = self.config.folders.remove(&location.key()).is_some();
        self.touch(changed)
    }

    fn window_config(&self) -> WindowConfig {
        self.config.window.clone()
    }

    fn set_window_config(&mut self, config: WindowConfig) -> bool {
        let changed = self.config.window != config;
        self.config.window = config;
        self.touch(changed)
    }

    fn request_save(&mut self) {
        if !self.dirty {
            return;
        }
        self.saves_requested += 1;
        self.dirty = false;

        let (Some(path), Some(worker)) = (&self.path, &self.worker) else {
            return;
        };
        match self.config.to_toml() {
            Ok(contents) => {
                if !worker.send(IoCommand::SaveConfig {
                    path: path.clone(),
                    contents,
                }) {
                    log::warn!("Config save worker is gone; {} not saved", path.display());
                }
            }
            Err(e) => log::warn!("{}", e),
        }
    }
}
