use crate::error::NavError;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Sender};
use std::thread::{self, JoinHandle};

pub enum IoCommand {
    SaveConfig { path: PathBuf, contents: String },
}

/// Background writer for configuration snapshots.
///
/// Sending never blocks. When several snapshots queue up only the newest one
/// is written. Dropping the worker waits for queued writes to finish.
pub struct SaveWorker {
    tx: Option<Sender<IoCommand>>,
    handle: Option<JoinHandle<()>>,
}

impl SaveWorker {
    pub fn spawn() -> Self {
        let (cmd_tx, cmd_rx) = channel::<IoCommand>();

        let handle = thread::Builder::new()
            .name("kura-config-save".to_string())
            .spawn(move || {
                while let Ok(mut cmd) = cmd_rx.recv() {
                    // coalesce: only the latest snapshot matters
                    while let Ok(newer) = cmd_rx.try_recv() {
                        cmd = newer;
                    }
                    match cmd {
                        IoCommand::SaveConfig { path, contents } => {
                            match write_config(&path, &contents) {
                                Ok(()) => log::debug!("Saved config to {}", path.display()),
                                Err(e) => log::warn!("{}", e),
                            }
                        }
                    }
                }
            });

        match handle {
            Ok(handle) => Self {
                tx: Some(cmd_tx),
                handle: Some(handle),
            },
            Err(e) => {
                log::error!("Failed to start config save thread: {}", e);
                Self {
                    tx: None,
                    handle: None,
                }
            }
        }
    }

    /// Queue a write. Returns false if the worker is gone.
    pub fn send(&self, cmd: IoCommand) -> bool {
        match &self.tx {
            Some(tx) => tx.send(cmd).is_ok(),
            None => false,
        }
    }
}

impl Drop for SaveWorker {
    fn drop(&mut self) {
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Config save thread panicked");
            }
        }
    }
}

pub fn write_config(path: &Path, contents: &str) -> Result<(), NavError> {
    let io_err = |source| NavError::ConfigWriteFailed {
        path: path.to_path_buf(),
        source,
    };
    // Create config directory if it doesn't exist
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, contents).map_err(io_err)
}
