//! The main window: an ordered set of tabs with exactly one active, and the
//! chrome that mirrors the active tab.
//!
//! Every programmatic write to a stateful control happens under the
//! `in_update` latch. Notifications produced by such a write are
//! dispatched right away and dropped by the handlers while the latch is
//! set, so a control push never turns into a second commit or chdir.

mod handlers;
mod sync;
#[cfg(test)]
mod tests;

use crate::collab::{ContentView, ControlSurface, Vfs, WidgetFactory};
use crate::config::{ConfigResolver, SharedConfig};
use crate::error::{NavError, Result};
use crate::model::{BookmarkStore, Location, TabId, WindowId};
use crate::state::{TabPage, ViewModeInfo};
use crate::task::{DeferredTask, Priority, SharedTasks, TaskHandle};
use std::cell::RefCell;
use std::rc::Rc;

/// Services shared by every window of the process.
#[derive(Clone)]
pub struct WindowContext {
    pub config: SharedConfig,
    pub factory: Rc<dyn WidgetFactory>,
    pub vfs: Rc<dyn Vfs>,
    pub bookmarks: Rc<RefCell<dyn BookmarkStore>>,
    pub tasks: SharedTasks,
}

pub struct MainWindow {
    id: WindowId,
    ctx: WindowContext,
    controls: Box<dyn ControlSurface>,
    tabs: Vec<TabPage>,
    active: Option<usize>,
    next_tab_id: u64,
    /// Side panel width, identical across tabs.
    splitter_position: u32,
    side_panel_visible: bool,
    /// Set while controls are written programmatically.
    in_update: bool,
    /// Set while a chdir is in flight; side-panel chdir requests are dropped.
    side_panel_blocked: bool,
    pending_focus: Option<TaskHandle>,
    view_modes: Vec<ViewModeInfo>,
    fullscreen: bool,
    size: (u32, u32),
    destroyed: bool,
}

impl MainWindow {
    /// Create a window with a single active tab at `location`.
    pub fn new(ctx: WindowContext, location: &Location) -> Result<Self> {
        let location = ctx.vfs.resolve(location)?;
        let id = WindowId::next();
        let window_config = ctx.config.borrow().window_config();
        let controls = ctx.factory.controls(id);

        let mut window = Self {
            id,
            ctx,
            controls,
            tabs: Vec::new(),
            active: None,
            next_tab_id: 1,
            splitter_position: window_config.splitter_position,
            side_panel_visible: window_config.side_panel_visible,
            in_update: false,
            side_panel_blocked: false,
            pending_focus: None,
            view_modes: Vec::new(),
            fullscreen: false,
            size: (window_config.width, window_config.height),
            destroyed: false,
        };
        log::info!("Created {} at {}", id, location);
        window.rebuild_bookmarks();
        window.add_tab(&location, true)?;
        Ok(window)
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn tabs(&self) -> &[TabPage] {
        &self.tabs
    }

    pub fn tab(&self, id: TabId) -> Option<&TabPage> {
        self.tabs.iter().find(|tab| tab.id() == id)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_tab(&self) -> Option<&TabPage> {
        self.active.and_then(|i| self.tabs.get(i))
    }

    pub fn splitter_position(&self) -> u32 {
        self.splitter_position
    }

    pub fn side_panel_visible(&self) -> bool {
        self.side_panel_visible
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn active_tab_mut(&mut self) -> Option<&mut TabPage> {
        let index = self.active?;
        self.tabs.get_mut(index)
    }

    fn active_location(&self) -> Result<Location> {
        self.active_tab()
            .map(|tab| tab.location().clone())
            .ok_or(NavError::NoSuchWindow(self.id))
    }

    fn index_of(&self, id: TabId) -> Result<usize> {
        self.tabs
            .iter()
            .position(|tab| tab.id() == id)
            .ok_or(NavError::NoSuchTab(id))
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.destroyed {
            return Err(NavError::NoSuchWindow(self.id));
        }
        Ok(())
    }

    /// Show `location` in the active tab and record it in the history.
    pub fn chdir(&mut self, location: &Location) -> Result<()> {
        self.side_panel_blocked = true;
        let result = self
            .resolve_location(location)
            .and_then(|location| self.load_location(location, true));
        self.side_panel_blocked = false;
        result
    }

    pub fn go_back(&mut self) -> Result<()> {
        let target = self
            .history_index()?
            .checked_sub(1)
            .ok_or(NavError::NoHistory)?;
        self.step_history(target)
    }

    pub fn go_forward(&mut self) -> Result<()> {
        let target = self.history_index()? + 1;
        self.step_history(target)
    }

    /// Show the history entry at `index` without changing the entries.
    pub fn jump_history(&mut self, index: usize) -> Result<()> {
        self.step_history(index)
    }

    fn history_index(&self) -> Result<usize> {
        self.active_tab()
            .map(|tab| tab.history().current_index())
            .ok_or(NavError::NoHistory)
    }

    /// Move to history entry `index`. The pointer only moves once the
    /// entry still resolves.
    fn step_history(&mut self, index: usize) -> Result<()> {
        self.ensure_alive()?;
        let target = self
            .active_tab()
            .and_then(|tab| tab.history().nth(index))
            .cloned()
            .ok_or(NavError::NoHistory)?;
        let location = self.resolve_location(&target)?;
        if let Some(tab) = self.active_tab_mut() {
            tab.history_mut().jump(index)?;
        }
        self.side_panel_blocked = true;
        let result = self.load_location(location, false);
        self.side_panel_blocked = false;
        result
    }

    fn resolve_location(&mut self, location: &Location) -> Result<Location> {
        self.ensure_alive()?;
        self.ctx.vfs.resolve(location).inspect_err(|e| {
            log::warn!("{}: {}", self.id, e);
            self.controls.show_notice(Some(&e.to_string()));
        })
    }

    /// Point the active tab at `location` and bring everything in line.
    fn load_location(&mut self, location: Location, record: bool) -> Result<()> {
        let view_state = ConfigResolver::resolve(&*self.ctx.config.borrow(), &location);
        let id = self.id;
        let tab = self.active_tab_mut().ok_or(NavError::NoSuchWindow(id))?;
        if record {
            tab.navigate(location.clone());
        } else {
            tab.set_location(location.clone());
        }
        tab.view_state = view_state;
        let tab_id = tab.id();
        let echo = tab.show();
        log::debug!("{} {} -> {}", self.id, tab_id, location);

        if let Some(event) = echo {
            self.on_side_panel_event(tab_id, event)?;
        }
        self.controls.show_notice(None);
        self.sync_view_controls();
        self.sync_history_controls();
        self.sync_title_and_location();
        Ok(())
    }

    /// Re-read the current folder without touching the history.
    pub fn reload(&mut self) -> Result<()> {
        self.ensure_alive()?;
        if let Some(view) = self.active_tab_mut().and_then(|tab| tab.content_view_mut()) {
            view.reload();
        }
        Ok(())
    }

    /// Add a tab at `location` after the last one.
    ///
    /// The tab becomes active only when `activate` is set or it is the
    /// window's only tab.
    pub fn add_tab(&mut self, location: &Location, activate: bool) -> Result<usize> {
        let location = self.resolve_location(location)?;
        let id = TabId(self.next_tab_id);
        self.next_tab_id += 1;

        let view_state = ConfigResolver::resolve(&*self.ctx.config.borrow(), &location);
        let side_panel_mode = self.ctx.config.borrow().window_config().side_panel_mode;
        let side_panel = self.ctx.factory.side_panel(self.id, id);
        let content_view = self.ctx.factory.content_view(self.id, id, &location);
        let mut tab = TabPage::new(
            id,
            self.id,
            location.clone(),
            view_state,
            side_panel,
            content_view,
            side_panel_mode,
        );
        tab.insert(self.splitter_position, self.side_panel_visible);
        self.tabs.push(tab);
        let index = self.tabs.len() - 1;
        log::info!("Added {} at {} to {}", id, location, self.id);

        self.sync_tabs_visible();
        if activate || self.tabs.len() == 1 {
            self.switch_active_tab(index)?;
        }
        Ok(index)
    }

    /// Make the tab at `index` the active one and resync the chrome.
    /// An index past the last tab is ignored.
    pub fn switch_active_tab(&mut self, index: usize) -> Result<()> {
        self.ensure_alive()?;
        let Some(id) = self.tabs.get(index).map(TabPage::id) else {
            log::debug!("{} has no tab at index {}", self.id, index);
            return Ok(());
        };
        if self.active == Some(index) {
            return Ok(());
        }
        if let Some(previous) = self.active.take() {
            if let Some(tab) = self.tabs.get_mut(previous) {
                tab.deactivate();
            }
        }
        self.tabs[index].activate();
        self.active = Some(index);
        self.refresh_inherited(index);
        log::debug!("{} switched to {}", self.id, id);

        // fixed order: later steps never overwrite what an earlier one wrote
        self.sync_selection_sensitivity();
        self.sync_history_controls();
        self.sync_view_controls();
        self.sync_title_and_location();
        self.sync_status();
        Ok(())
    }

    /// Bring a tab that mirrors the global default back in line with it.
    /// Returns whether its view state changed.
    fn refresh_inherited(&mut self, index: usize) -> bool {
        let Some(tab) = self.tabs.get_mut(index) else {
            return false;
        };
        if tab.view_state.owns_config {
            return false;
        }
        let state = ConfigResolver::resolve(&*self.ctx.config.borrow(), tab.location());
        if state == tab.view_state {
            return false;
        }
        tab.view_state = state;
        tab.apply_view_state();
        true
    }

    pub fn switch_tab(&mut self, id: TabId) -> Result<()> {
        let index = self.index_of(id)?;
        self.switch_active_tab(index)
    }

    /// Close a tab. Closing the last one tears the window down.
    pub fn close_tab(&mut self, id: TabId) -> Result<()> {
        self.ensure_alive()?;
        let index = self.index_of(id)?;
        let was_active = self.active == Some(index);
        if was_active {
            self.active = None;
        }
        let mut tab = self.tabs.remove(index);
        tab.destroy();
        log::info!("Closed {} of {}", id, self.id);

        if self.tabs.is_empty() {
            self.destroy();
            return Ok(());
        }
        match self.active {
            Some(active) if active > index => self.active = Some(active - 1),
            Some(_) => {}
            None => self.switch_active_tab(index.min(self.tabs.len() - 1))?,
        }
        self.sync_tabs_visible();
        Ok(())
    }

    pub fn close_active_tab(&mut self) -> Result<()> {
        let id = self.active_tab().map(TabPage::id).ok_or(NavError::NoSuchWindow(self.id))?;
        self.close_tab(id)
    }

    /// Apply a splitter drag in `origin` to every other tab and persist it.
    pub fn broadcast_splitter(&mut self, position: u32, origin: TabId) {
        self.splitter_position = position;
        for tab in &mut self.tabs {
            if tab.id() == origin {
                tab.record_splitter_position(position);
            } else {
                tab.set_splitter_position(position);
            }
        }
        let mut config = self.ctx.config.borrow_mut();
        let mut window_config = config.window_config();
        window_config.splitter_position = position;
        if config.set_window_config(window_config) {
            config.request_save();
        }
    }

    /// Install a content view for a tab that was created without one.
    pub fn attach_content_view(
        &mut self,
        id: TabId,
        view: Box<dyn ContentView>,
    ) -> Result<()> {
        let index = self.index_of(id)?;
        self.tabs[index].set_content_view(view);
        if self.active == Some(index) {
            self.sync_selection_sensitivity();
            self.sync_view_modes();
        }
        Ok(())
    }

    /// Files selected in the active tab, for copy-to and move-to.
    pub fn selected_paths(&self) -> Vec<Location> {
        self.active_tab()
            .and_then(TabPage::content_view)
            .map(|view| view.dup_selected_paths())
            .unwrap_or_default()
    }

    pub fn present(&mut self) {
        self.controls.present();
    }

    /// Queue the focus transfer to the content view, once.
    fn schedule_focus(&mut self) {
        let mut tasks = self.ctx.tasks.borrow_mut();
        if let Some(handle) = self.pending_focus {
            if tasks.is_pending(handle) {
                return;
            }
        }
        self.pending_focus =
            Some(tasks.schedule(Priority::Low, DeferredTask::FocusContentView(self.id)));
    }

    /// Run the deferred focus transfer. Safe to call when nothing is pending.
    pub fn run_deferred_focus(&mut self) {
        self.pending_focus = None;
        self.focus_content_view();
    }

    fn focus_content_view(&mut self) {
        if let Some(view) = self.active_tab_mut().and_then(|tab| tab.content_view_mut()) {
            view.grab_focus();
        }
    }

    /// Tear the window down for good.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        if let Some(handle) = self.pending_focus.take() {
            self.ctx.tasks.borrow_mut().cancel(handle);
        }
        self.active = None;
        for mut tab in self.tabs.drain(..) {
            tab.destroy();
        }
        if !self.fullscreen {
            let mut config = self.ctx.config.borrow_mut();
            let mut window_config = config.window_config();
            window_config.width = self.size.0;
            window_config.height = self.size.1;
            if config.set_window_config(window_config) {
                config.request_save();
            }
        }
        self.controls.close();
        self.destroyed = true;
        log::info!("Destroyed {}", self.id);
    }
}
