// Message dispatch for the main window
use super::MainWindow;
use crate::collab::{ControlValue, SidePanelMode, StatusSlot, Toggle};
use crate::config::{ConfigResolver, OpenMethod};
use crate::error::{NavError, Result};
use crate::message::{ClickKind, ClickedItem, Effect, Message, PointerButton, SidePanelEvent};
use crate::model::{Bookmark, Location, TabId};
use crate::state::{sort_changes, SortOptions, ViewField};

impl MainWindow {
    pub fn update(&mut self, message: Message) -> Effect {
        if self.destroyed {
            log::debug!("{} is gone, dropping {:?}", self.id, message);
            return Effect::None;
        }
        let effect = match self.handle(message) {
            Ok(effect) => effect,
            Err(NavError::NoHistory) => {
                // the buttons are disabled already; nothing to report
                self.sync_history_controls();
                Effect::None
            }
            Err(e) => {
                log::warn!("{}: {}", self.id, e);
                Effect::None
            }
        };
        if self.destroyed {
            Effect::Destroyed
        } else {
            effect
        }
    }

    fn handle(&mut self, message: Message) -> Result<Effect> {
        match message {
            Message::Chdir(location) => self.chdir(&location)?,
            Message::ChdirByName(name) => self.chdir_by_name(&name)?,
            Message::GoBack => self.go_back()?,
            Message::GoForward => self.go_forward()?,
            Message::GoUp => self.go_up()?,
            Message::GoHome => self.go_to(Location::home(), "home")?,
            Message::GoDesktop => self.go_to(Location::desktop(), "desktop")?,
            Message::GoTrash => self.go_to(Location::trash(), "trash")?,
            Message::Reload => self.reload()?,
            Message::JumpHistory(index) => self.jump_history(index)?,

            Message::LocationActivated(text) => self.activate_location(&text)?,
            Message::LocationEditCancelled => self.cancel_location_edit(),
            Message::FocusLocation(seed) => self.controls.focus_location(seed.as_deref()),

            Message::NewTab => {
                let location = self.active_location()?;
                self.add_tab(&location, true)?;
            }
            Message::NewWindow => return Ok(Effect::OpenWindow(self.active_location()?)),
            Message::CloseTab(id) => self.close_tab(id)?,
            Message::CloseActiveTab => self.close_active_tab()?,
            Message::SwitchTab(id) => self.switch_tab(id)?,
            Message::NextTab => self.step_tab(1)?,
            Message::PrevTab => self.step_tab(-1)?,
            Message::NthTab(index) => self.switch_active_tab(index)?,
            Message::CloseWindow => self.destroy(),
            Message::FocusGained => {}
            Message::Resized { width, height } => {
                if !self.fullscreen {
                    self.size = (width, height);
                }
            }
            Message::Fullscreen(on) => self.fullscreen = on,

            Message::Control(value) => self.on_control(value),

            Message::SelectionChanged { tab, count } => {
                if self.active_tab().is_some_and(|t| t.id() == tab) {
                    self.set_selection_sensitivity(count);
                }
            }
            Message::LocationClicked { tab, kind, item } => self.on_location_clicked(tab, kind, item)?,
            Message::SortChanged { tab, sort } => self.on_sort_changed(tab, sort)?,
            Message::HiddenChanged { tab, show_hidden } => {
                self.commit_field(tab, ViewField::ShowHidden(show_hidden))?
            }
            Message::ColumnsChanged { tab, columns } => {
                self.commit_field(tab, ViewField::Columns(columns))?
            }

            Message::SidePanel { tab, event } => self.on_side_panel_event(tab, event)?,

            Message::StatusText { tab, slot, text } => self.on_status_text(tab, slot, text)?,
            Message::SplitterMoved { tab, position } => self.broadcast_splitter(position, tab),

            Message::BookmarksChanged => self.rebuild_bookmarks(),
            Message::OpenBookmark(index) => return self.open_bookmark(index),
            Message::AddBookmark(name) => return self.add_bookmark(name),
        }
        Ok(Effect::None)
    }

    pub fn chdir_by_name(&mut self, name: &str) -> Result<()> {
        let location = self.parse_location(name)?;
        self.chdir(&location)
    }

    /// Parent folder; a no-op at the root.
    pub fn go_up(&mut self) -> Result<()> {
        match self.active_location()?.parent() {
            Some(parent) => self.chdir(&parent),
            None => Ok(()),
        }
    }

    fn go_to(&mut self, place: Option<Location>, name: &str) -> Result<()> {
        let location =
            place.ok_or_else(|| NavError::InvalidLocation(format!("no {} folder", name)))?;
        self.chdir(&location)
    }

    /// The user pressed Enter in the location bar.
    ///
    /// On failure the typed text stays in the field next to the notice.
    pub fn activate_location(&mut self, text: &str) -> Result<()> {
        let location = self.parse_location(text)?;
        self.chdir(&location)?;
        // let the location bar finish its own completion handling first
        self.schedule_focus();
        Ok(())
    }

    pub fn cancel_location_edit(&mut self) {
        self.controls.show_notice(None);
        if let Ok(location) = self.active_location() {
            self.controls.set_location_text(&location.to_string());
        }
    }

    fn parse_location(&mut self, text: &str) -> Result<Location> {
        Location::parse(text).inspect_err(|e| {
            log::warn!("{}: {}", self.id, e);
            self.controls.show_notice(Some(&e.to_string()));
        })
    }

    /// Move the active tab by `delta`, wrapping around.
    fn step_tab(&mut self, delta: isize) -> Result<()> {
        let count = self.tabs.len() as isize;
        let Some(active) = self.active else {
            return Ok(());
        };
        if count == 0 {
            return Ok(());
        }
        let next = (active as isize + delta).rem_euclid(count) as usize;
        self.switch_active_tab(next)
    }

    /// A user-driven change of a menu or toolbar control.
    pub(super) fn on_control(&mut self, value: ControlValue) {
        if self.in_update {
            log::trace!("{} ignored echo of {:?}", self.id, value);
            return;
        }
        let Some(tab) = self.active_tab().map(|t| t.id()) else {
            return;
        };
        let result = match value {
            ControlValue::Toggle(Toggle::ShowHidden, on) => {
                self.commit_field(tab, ViewField::ShowHidden(on))
            }
            ControlValue::Toggle(Toggle::SortIgnoreCase, on) => {
                self.commit_field(tab, ViewField::CaseSensitive(!on))
            }
            ControlValue::Toggle(Toggle::MingleFolders, on) => {
                self.commit_field(tab, ViewField::FoldersFirst(!on))
            }
            ControlValue::Toggle(Toggle::SavePerFolder, on) => self.set_save_per_folder(tab, on),
            ControlValue::Toggle(Toggle::ShowSidePanel, on) => {
                self.set_side_panel_visible(on);
                Ok(())
            }
            ControlValue::SortKey(key) => self.commit_field(tab, ViewField::SortKey(key)),
            ControlValue::SortOrder(order) => self.commit_field(tab, ViewField::SortOrder(order)),
            ControlValue::ViewMode(mode) => self.commit_field(tab, ViewField::ViewMode(mode)),
            ControlValue::SidePanelMode(mode) => self.set_side_panel_mode(mode),
        };
        if let Err(e) = result {
            log::warn!("{}: {}", self.id, e);
        }
    }

    /// Apply one field to a tab, persist it and mirror it into the chrome.
    fn commit_field(&mut self, id: TabId, field: ViewField) -> Result<()> {
        let index = self.index_of(id)?;
        let tab = &mut self.tabs[index];
        if tab.view_state.apply(&field) {
            tab.apply_view_state();
        }
        let location = tab.location().clone();
        let owned = tab.view_state.owns_config;
        let changed = ConfigResolver::commit(
            &mut *self.ctx.config.borrow_mut(),
            &location,
            &self.tabs[index].view_state,
            &field,
        );
        let mut resync = self.active == Some(index);
        if changed && !owned {
            // every other inheriting tab follows the new default
            for other in (0..self.tabs.len()).filter(|&i| i != index) {
                if self.refresh_inherited(other) && self.active == Some(other) {
                    resync = true;
                }
            }
        }
        if resync {
            self.sync_view_controls();
        }
        Ok(())
    }

    fn on_sort_changed(&mut self, id: TabId, sort: SortOptions) -> Result<()> {
        let index = self.index_of(id)?;
        let old = self.tabs[index].view_state.sort;
        for field in sort_changes(&old, &sort) {
            self.commit_field(id, field)?;
        }
        Ok(())
    }

    fn set_save_per_folder(&mut self, id: TabId, on: bool) -> Result<()> {
        let index = self.index_of(id)?;
        let tab = &mut self.tabs[index];
        let location = tab.location().clone();
        let mut config = self.ctx.config.borrow_mut();
        let changed = if on {
            ConfigResolver::enable_per_folder(&mut *config, &location, &mut tab.view_state)
        } else {
            ConfigResolver::disable_per_folder(&mut *config, &location, &mut tab.view_state)
        };
        drop(config);
        if changed {
            log::debug!("{} per-folder view for {}: {}", id, location, on);
            tab.apply_view_state();
            if self.active == Some(index) {
                self.sync_view_controls();
            }
        }
        Ok(())
    }

    fn set_side_panel_visible(&mut self, visible: bool) {
        self.side_panel_visible = visible;
        for tab in &mut self.tabs {
            tab.side_panel_mut().set_visible(visible);
        }
        {
            let mut config = self.ctx.config.borrow_mut();
            let mut window_config = config.window_config();
            window_config.side_panel_visible = visible;
            if config.set_window_config(window_config) {
                config.request_save();
            }
        }
        self.write_controls([ControlValue::Toggle(Toggle::ShowSidePanel, visible)]);
    }

    /// Switch every tab's side panel; the active one reports the change.
    fn set_side_panel_mode(&mut self, mode: SidePanelMode) -> Result<()> {
        let active = self.active;
        let mut reported = None;
        for (index, tab) in self.tabs.iter_mut().enumerate() {
            let event = tab.side_panel_mut().set_mode(mode);
            if Some(index) == active {
                reported = event.map(|event| (tab.id(), event));
            }
        }
        match reported {
            Some((tab, event)) => self.on_side_panel_event(tab, event),
            // panels that stay silent still need the mode recorded
            None => {
                self.store_side_panel_mode(mode);
                Ok(())
            }
        }
    }

    fn store_side_panel_mode(&mut self, mode: SidePanelMode) {
        let mut config = self.ctx.config.borrow_mut();
        let mut window_config = config.window_config();
        if window_config.side_panel_mode != mode {
            window_config.side_panel_mode = mode;
            config.set_window_config(window_config);
            config.request_save();
        }
    }

    pub(super) fn on_side_panel_event(&mut self, id: TabId, event: SidePanelEvent) -> Result<()> {
        if !self.active_tab().is_some_and(|t| t.id() == id) {
            log::debug!("{} ignored side panel event of background {}", self.id, id);
            return Ok(());
        }
        match event {
            SidePanelEvent::Chdir { button, location } => {
                if self.side_panel_blocked {
                    log::trace!("{} ignored side panel chdir to {}", self.id, location);
                    return Ok(());
                }
                match button {
                    PointerButton::Primary => self.chdir(&location)?,
                    PointerButton::Middle => {
                        self.add_tab(&location, false)?;
                    }
                }
                self.focus_content_view();
            }
            SidePanelEvent::ModeChanged(mode) => {
                self.write_controls([ControlValue::SidePanelMode(mode)]);
                self.store_side_panel_mode(mode);
            }
        }
        Ok(())
    }

    fn on_location_clicked(
        &mut self,
        id: TabId,
        kind: ClickKind,
        item: Option<ClickedItem>,
    ) -> Result<()> {
        if !self.active_tab().is_some_and(|t| t.id() == id) {
            return Ok(());
        }
        match (kind, item) {
            (ClickKind::Activated, Some(item)) if item.is_dir => self.chdir(&item.location),
            (ClickKind::MiddleClick, Some(item)) if item.is_dir => {
                self.add_tab(&item.location, false).map(|_| ())
            }
            (kind, item) => {
                log::trace!("{} left {:?} on {:?} to the view", self.id, kind, item);
                Ok(())
            }
        }
    }

    fn on_status_text(&mut self, id: TabId, slot: StatusSlot, text: Option<String>) -> Result<()> {
        let index = self.index_of(id)?;
        self.tabs[index].set_status(slot, text);
        if self.active == Some(index) {
            self.controls.set_status(slot, self.tabs[index].status(slot));
        }
        Ok(())
    }

    fn open_bookmark(&mut self, index: usize) -> Result<Effect> {
        let bookmark = self
            .ctx
            .bookmarks
            .borrow()
            .items()
            .into_iter()
            .nth(index)
            .ok_or_else(|| NavError::InvalidLocation(format!("no bookmark #{}", index)))?;
        let method = self.ctx.config.borrow().window_config().bookmark_open_method;
        match method {
            OpenMethod::CurrentTab => self.chdir(&bookmark.location)?,
            OpenMethod::NewTab => {
                self.add_tab(&bookmark.location, true)?;
            }
            OpenMethod::NewWindow => return Ok(Effect::OpenWindow(bookmark.location)),
        }
        Ok(Effect::None)
    }

    fn add_bookmark(&mut self, name: String) -> Result<Effect> {
        let location = self.active_location()?;
        let name = if name.trim().is_empty() {
            location.display_name()
        } else {
            name
        };
        self.ctx
            .bookmarks
            .borrow_mut()
            .add(Bookmark::new(name, location))?;
        Ok(Effect::BookmarksChanged)
    }
}
