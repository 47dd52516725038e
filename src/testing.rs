//! Recording collaborators for unit tests.
//!
//! Every mock is a cheap handle around shared state, so a test can keep a
//! clone and inspect what the coordinator did after handing the original
//! over.

use crate::collab::{
    Action, ContentView, ControlSurface, ControlValue, SidePanel, SidePanelMode, StatusSlot,
    Toggle, Vfs, WidgetFactory,
};
use crate::config::{AppConfig, ConfigService, SharedConfig};
use crate::error::{NavError, Result};
use crate::message::{PointerButton, SidePanelEvent};
use crate::model::{Bookmark, BookmarkStore, Location, TabId, WindowId};
use crate::state::{SortKey, SortOrder, ViewMode, ViewModeInfo, ViewState};
use crate::task::{SharedTasks, TaskQueue};
use crate::window::WindowContext;
use std::cell::{Ref, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct ViewLog {
    pub location: Option<Location>,
    pub view_state: Option<ViewState>,
    pub active: bool,
    pub selected: Vec<Location>,
    pub focus_grabs: usize,
    pub reloads: usize,
    pub detached: bool,
}

#[derive(Clone, Default)]
pub struct RecordingView(Rc<RefCell<ViewLog>>);

impl RecordingView {
    pub fn log(&self) -> Ref<'_, ViewLog> {
        self.0.borrow()
    }

    pub fn select(&self, paths: &[&str]) {
        self.0.borrow_mut().selected = paths.iter().map(Location::new).collect();
    }
}

impl ContentView for RecordingView {
    fn set_location(&mut self, location: &Location) {
        self.0.borrow_mut().location = Some(location.clone());
    }

    fn apply_view_state(&mut self, state: &ViewState) {
        self.0.borrow_mut().view_state = Some(state.clone());
    }

    fn reload(&mut self) {
        self.0.borrow_mut().reloads += 1;
    }

    fn selected_count(&self) -> usize {
        self.0.borrow().selected.len()
    }

    fn dup_selected_paths(&self) -> Vec<Location> {
        self.0.borrow().selected.clone()
    }

    fn set_active(&mut self, active: bool) {
        self.0.borrow_mut().active = active;
    }

    fn grab_focus(&mut self) {
        self.0.borrow_mut().focus_grabs += 1;
    }

    fn view_modes(&self) -> Vec<ViewModeInfo> {
        ["icon", "list"]
            .into_iter()
            .map(|id| ViewModeInfo {
                mode: ViewMode::new(id),
                label: id.to_string(),
            })
            .collect()
    }

    fn detach(&mut self) {
        self.0.borrow_mut().detached = true;
    }
}

#[derive(Debug, Default)]
pub struct PanelLog {
    pub location: Option<Location>,
    pub mode: Option<SidePanelMode>,
    pub visible: Option<bool>,
    pub position: Option<u32>,
    pub chdir_calls: usize,
    pub detached: bool,
}

/// Side panel that can answer programmatic changes with notifications.
#[derive(Clone, Default)]
pub struct RecordingPanel {
    log: Rc<RefCell<PanelLog>>,
    echo: bool,
}

impl RecordingPanel {
    pub fn echoing() -> Self {
        Self {
            log: Rc::default(),
            echo: true,
        }
    }

    pub fn log(&self) -> Ref<'_, PanelLog> {
        self.log.borrow()
    }
}

impl SidePanel for RecordingPanel {
    fn chdir(&mut self, location: &Location) -> Option<SidePanelEvent> {
        let mut log = self.log.borrow_mut();
        log.location = Some(location.clone());
        log.chdir_calls += 1;
        self.echo.then(|| SidePanelEvent::Chdir {
            button: PointerButton::Primary,
            location: location.clone(),
        })
    }

    fn set_mode(&mut self, mode: SidePanelMode) -> Option<SidePanelEvent> {
        self.log.borrow_mut().mode = Some(mode);
        self.echo.then_some(SidePanelEvent::ModeChanged(mode))
    }

    fn mode(&self) -> SidePanelMode {
        self.log.borrow().mode.unwrap_or(SidePanelMode::Places)
    }

    fn set_visible(&mut self, visible: bool) {
        self.log.borrow_mut().visible = Some(visible);
    }

    fn set_position(&mut self, position: u32) {
        self.log.borrow_mut().position = Some(position);
    }

    fn detach(&mut self) {
        self.log.borrow_mut().detached = true;
    }
}

/// What the user can see of a window's chrome.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ControlsState {
    pub toggles: HashMap<Toggle, bool>,
    pub sort_key: Option<SortKey>,
    pub sort_order: Option<SortOrder>,
    pub view_mode: Option<ViewMode>,
    pub side_panel_mode: Option<SidePanelMode>,
    pub sensitive: HashMap<Action, bool>,
    pub title: String,
    pub location_text: String,
    pub status: [Option<String>; 3],
    pub notice: Option<String>,
    pub tabs_visible: bool,
    pub view_modes: Vec<ViewModeInfo>,
    pub bookmarks: Vec<Bookmark>,
}

#[derive(Debug, Default)]
pub struct ControlsLog {
    pub state: ControlsState,
    pub writes: usize,
    pub focus_requests: Vec<Option<String>>,
    pub presented: usize,
    pub closed: bool,
}

impl ControlsLog {
    pub fn toggle(&self, toggle: Toggle) -> Option<bool> {
        self.state.toggles.get(&toggle).copied()
    }

    pub fn sensitive(&self, action: Action) -> Option<bool> {
        self.state.sensitive.get(&action).copied()
    }
}

/// Control surface that, like a real toolkit, reports every programmatic
/// write back as a change notification.
#[derive(Clone)]
pub struct RecordingControls {
    log: Rc<RefCell<ControlsLog>>,
    echo: bool,
}

impl RecordingControls {
    pub fn log(&self) -> Ref<'_, ControlsLog> {
        self.log.borrow()
    }
}

impl ControlSurface for RecordingControls {
    fn write(&mut self, value: ControlValue) -> Option<ControlValue> {
        let mut log = self.log.borrow_mut();
        log.writes += 1;
        let state = &mut log.state;
        match &value {
            ControlValue::Toggle(toggle, on) => {
                state.toggles.insert(*toggle, *on);
            }
            ControlValue::SortKey(key) => state.sort_key = Some(*key),
            ControlValue::SortOrder(order) => state.sort_order = Some(*order),
            ControlValue::ViewMode(mode) => state.view_mode = Some(mode.clone()),
            ControlValue::SidePanelMode(mode) => state.side_panel_mode = Some(*mode),
        }
        self.echo.then_some(value)
    }

    fn set_sensitive(&mut self, action: Action, sensitive: bool) {
        self.log.borrow_mut().state.sensitive.insert(action, sensitive);
    }

    fn set_title(&mut self, title: &str) {
        self.log.borrow_mut().state.title = title.to_string();
    }

    fn set_location_text(&mut self, text: &str) {
        self.log.borrow_mut().state.location_text = text.to_string();
    }

    fn focus_location(&mut self, seed: Option<&str>) {
        self.log
            .borrow_mut()
            .focus_requests
            .push(seed.map(str::to_string));
    }

    fn set_status(&mut self, slot: StatusSlot, text: Option<&str>) {
        self.log.borrow_mut().state.status[slot.index()] = text.map(str::to_string);
    }

    fn show_notice(&mut self, notice: Option<&str>) {
        self.log.borrow_mut().state.notice = notice.map(str::to_string);
    }

    fn set_tabs_visible(&mut self, visible: bool) {
        self.log.borrow_mut().state.tabs_visible = visible;
    }

    fn set_view_modes(&mut self, modes: &[ViewModeInfo]) {
        self.log.borrow_mut().state.view_modes = modes.to_vec();
    }

    fn set_bookmarks(&mut self, items: &[Bookmark]) {
        self.log.borrow_mut().state.bookmarks = items.to_vec();
    }

    fn present(&mut self) {
        self.log.borrow_mut().presented += 1;
    }

    fn close(&mut self) {
        self.log.borrow_mut().closed = true;
    }
}

/// Hands out recording widgets and keeps a handle to each of them.
pub struct RecordingFactory {
    pub views: RefCell<HashMap<(WindowId, TabId), RecordingView>>,
    pub panels: RefCell<HashMap<(WindowId, TabId), RecordingPanel>>,
    pub controls: RefCell<HashMap<WindowId, RecordingControls>>,
    /// When false, tabs start without a content view.
    pub create_views: bool,
    pub echo: bool,
}

impl Default for RecordingFactory {
    fn default() -> Self {
        Self {
            views: RefCell::default(),
            panels: RefCell::default(),
            controls: RefCell::default(),
            create_views: true,
            echo: true,
        }
    }
}

impl RecordingFactory {
    pub fn view(&self, window: WindowId, tab: TabId) -> RecordingView {
        self.views.borrow()[&(window, tab)].clone()
    }

    pub fn panel(&self, window: WindowId, tab: TabId) -> RecordingPanel {
        self.panels.borrow()[&(window, tab)].clone()
    }

    pub fn controls(&self, window: WindowId) -> RecordingControls {
        self.controls.borrow()[&window].clone()
    }
}

impl WidgetFactory for RecordingFactory {
    fn content_view(
        &self,
        window: WindowId,
        tab: TabId,
        _location: &Location,
    ) -> Option<Box<dyn ContentView>> {
        if !self.create_views {
            return None;
        }
        let view = RecordingView::default();
        self.views.borrow_mut().insert((window, tab), view.clone());
        Some(Box::new(view))
    }

    fn side_panel(&self, window: WindowId, tab: TabId) -> Box<dyn SidePanel> {
        let panel = RecordingPanel {
            log: Rc::default(),
            echo: self.echo,
        };
        self.panels.borrow_mut().insert((window, tab), panel.clone());
        Box::new(panel)
    }

    fn controls(&self, window: WindowId) -> Box<dyn ControlSurface> {
        let controls = RecordingControls {
            log: Rc::default(),
            echo: self.echo,
        };
        self.controls.borrow_mut().insert(window, controls.clone());
        Box::new(controls)
    }
}

/// Accepts every location except the ones marked missing.
#[derive(Default)]
pub struct TestVfs {
    pub missing: RefCell<HashSet<Location>>,
}

impl Vfs for TestVfs {
    fn resolve(&self, location: &Location) -> Result<Location> {
        if self.missing.borrow().contains(location) {
            return Err(NavError::InvalidLocation(location.to_string()));
        }
        Ok(location.clone())
    }
}

#[derive(Default)]
pub struct MemoryBookmarks {
    pub items: Vec<Bookmark>,
}

impl BookmarkStore for MemoryBookmarks {
    fn items(&self) -> Vec<Bookmark> {
        self.items.clone()
    }

    fn add(&mut self, bookmark: Bookmark) -> Result<()> {
        self.items.push(bookmark);
        Ok(())
    }
}

/// Shared services wired to recording collaborators.
pub struct Harness {
    pub config: Rc<RefCell<ConfigService>>,
    pub factory: Rc<RecordingFactory>,
    pub vfs: Rc<TestVfs>,
    pub bookmarks: Rc<RefCell<MemoryBookmarks>>,
    pub tasks: SharedTasks,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_factory(RecordingFactory::default())
    }

    pub fn with_factory(factory: RecordingFactory) -> Self {
        Self {
            config: Rc::new(RefCell::new(ConfigService::in_memory(AppConfig::default()))),
            factory: Rc::new(factory),
            vfs: Rc::new(TestVfs::default()),
            bookmarks: Rc::new(RefCell::new(MemoryBookmarks::default())),
            tasks: Rc::new(RefCell::new(TaskQueue::new())),
        }
    }

    pub fn context(&self) -> WindowContext {
        let config: SharedConfig = self.config.clone();
        WindowContext {
            config,
            factory: self.factory.clone(),
            vfs: self.vfs.clone(),
            bookmarks: self.bookmarks.clone(),
            tasks: self.tasks.clone(),
        }
    }

    pub fn saves_requested(&self) -> usize {
        self.config.borrow().saves_requested()
    }
}
