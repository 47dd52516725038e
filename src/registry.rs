//! Every live main window of the process, most recently focused first.

use crate::error::{NavError, Result};
use crate::message::{Effect, Message};
use crate::model::{Location, WindowId};
use crate::task::DeferredTask;
use crate::window::{MainWindow, WindowContext};

pub struct WindowRegistry {
    ctx: WindowContext,
    windows: Vec<MainWindow>,
}

impl WindowRegistry {
    pub fn new(ctx: WindowContext) -> Self {
        Self {
            ctx,
            windows: Vec::new(),
        }
    }

    pub fn context(&self) -> &WindowContext {
        &self.ctx
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Windows in most-recently-focused order.
    pub fn windows(&self) -> impl Iterator<Item = &MainWindow> + '_ {
        self.windows.iter()
    }

    pub fn window(&self, id: WindowId) -> Option<&MainWindow> {
        self.windows.iter().find(|w| w.id() == id)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut MainWindow> {
        self.windows.iter_mut().find(|w| w.id() == id)
    }

    pub fn register(&mut self, window: MainWindow) {
        self.windows.insert(0, window);
    }

    pub fn unregister(&mut self, id: WindowId) -> Option<MainWindow> {
        let index = self.windows.iter().position(|w| w.id() == id)?;
        Some(self.windows.remove(index))
    }

    pub fn on_focus_gained(&mut self, id: WindowId) {
        if let Some(index) = self.windows.iter().position(|w| w.id() == id) {
            if index > 0 {
                let window = self.windows.remove(index);
                self.windows.insert(0, window);
            }
        }
    }

    pub fn most_recently_active(&self) -> Option<WindowId> {
        self.windows.first().map(MainWindow::id)
    }

    pub fn new_window(&mut self, location: &Location) -> Result<WindowId> {
        let mut window = MainWindow::new(self.ctx.clone(), location)?;
        window.present();
        let id = window.id();
        self.register(window);
        Ok(id)
    }

    /// Open `location` as a tab of the last active window, or in a new one.
    pub fn open_path_in_best_window(&mut self, location: &Location) -> Result<WindowId> {
        match self.windows.first_mut() {
            Some(window) => {
                window.add_tab(location, true)?;
                window.present();
                Ok(window.id())
            }
            None => self.new_window(location),
        }
    }

    /// Route a message to a window and carry out what it asks for.
    pub fn dispatch(&mut self, id: WindowId, message: Message) -> Result<()> {
        if matches!(message, Message::FocusGained) {
            self.on_focus_gained(id);
        }
        let window = self.window_mut(id).ok_or(NavError::NoSuchWindow(id))?;
        let effect = match window.update(message) {
            // a window torn down earlier still leaves the list
            _ if window.is_destroyed() => Effect::Destroyed,
            effect => effect,
        };
        match effect {
            Effect::None => {}
            Effect::OpenWindow(location) => {
                self.new_window(&location)?;
            }
            Effect::Destroyed => {
                self.unregister(id);
            }
            Effect::BookmarksChanged => self.notify_bookmarks_changed(),
        }
        Ok(())
    }

    /// Run the tasks deferred to idle time.
    pub fn run_idle(&mut self) {
        loop {
            let next = self.ctx.tasks.borrow_mut().pop();
            let Some((_, task)) = next else {
                break;
            };
            match task {
                DeferredTask::FocusContentView(id) => {
                    if let Some(window) = self.window_mut(id) {
                        window.run_deferred_focus();
                    }
                }
            }
        }
    }

    pub fn notify_bookmarks_changed(&mut self) {
        let ids: Vec<WindowId> = self.windows.iter().map(MainWindow::id).collect();
        for id in ids {
            if let Err(e) = self.dispatch(id, Message::BookmarksChanged) {
                log::warn!("Bookmarks not delivered to {}: {}", id, e);
            }
        }
    }

    /// Tear down every window.
    pub fn shutdown(&mut self) {
        log::info!("Shutting down {} window(s)", self.windows.len());
        for mut window in self.windows.drain(..) {
            window.destroy();
        }
    }
}
