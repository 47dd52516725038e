//! Interfaces of the collaborators the coordinator drives.
//!
//! The folder view, the side panel and the window chrome belong to the
//! toolkit layer. The coordinator only calls the operations below and
//! receives their notifications as [`Message`](crate::message::Message)s.
//!
//! Toolkits commonly emit a change notification synchronously while a
//! control is being written programmatically. Writers that do so return
//! that notification from the write call, and the window dispatches it
//! on the spot, exactly as a signal handler would run.

use crate::error::Result;
use crate::message::SidePanelEvent;
use crate::model::{Bookmark, Location, TabId, WindowId};
use crate::state::{SortKey, SortOrder, ViewMode, ViewModeInfo, ViewState};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SidePanelMode {
    Places,
    DirTree,
}

impl SidePanelMode {
    pub const ALL: [SidePanelMode; 2] = [SidePanelMode::Places, SidePanelMode::DirTree];

    pub fn label(self) -> &'static str {
        match self {
            SidePanelMode::Places => "Places",
            SidePanelMode::DirTree => "Directory Tree",
        }
    }
}

/// Two-state menu items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Toggle {
    ShowHidden,
    SortIgnoreCase,
    MingleFolders,
    SavePerFolder,
    ShowSidePanel,
}

/// Actions whose sensitivity the window manages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Back,
    Forward,
    Cut,
    Copy,
    Delete,
    Rename,
    CopyTo,
    MoveTo,
}

impl Action {
    /// Actions that need at least one selected file.
    pub const SELECTION: [Action; 6] = [
        Action::Cut,
        Action::Copy,
        Action::Delete,
        Action::Rename,
        Action::CopyTo,
        Action::MoveTo,
    ];
}

/// State of a stateful control. Used both for programmatic writes and
/// for the change notifications those controls emit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlValue {
    Toggle(Toggle, bool),
    SortKey(SortKey),
    SortOrder(SortOrder),
    ViewMode(ViewMode),
    SidePanelMode(SidePanelMode),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusSlot {
    Normal,
    SelectedFiles,
    FsInfo,
}

impl StatusSlot {
    pub const ALL: [StatusSlot; 3] = [StatusSlot::Normal, StatusSlot::SelectedFiles, StatusSlot::FsInfo];

    pub fn index(self) -> usize {
        match self {
            StatusSlot::Normal => 0,
            StatusSlot::SelectedFiles => 1,
            StatusSlot::FsInfo => 2,
        }
    }
}

/// The folder-content widget of one tab.
pub trait ContentView {
    fn set_location(&mut self, location: &Location);
    fn apply_view_state(&mut self, state: &ViewState);
    /// Re-read the current folder.
    fn reload(&mut self);
    fn selected_count(&self) -> usize;
    fn dup_selected_paths(&self) -> Vec<Location>;
    /// Enable or disable input gestures and shortcuts.
    fn set_active(&mut self, active: bool);
    fn grab_focus(&mut self);
    fn view_modes(&self) -> Vec<ViewModeInfo>;
    /// Release external resources; the view is dropped right after.
    fn detach(&mut self);
}

/// The places / folder-tree panel of one tab.
pub trait SidePanel {
    fn chdir(&mut self, location: &Location) -> Option<SidePanelEvent>;
    fn set_mode(&mut self, mode: SidePanelMode) -> Option<SidePanelEvent>;
    fn mode(&self) -> SidePanelMode;
    fn set_visible(&mut self, visible: bool);
    /// Width of the panel, i.e. the splitter position of the tab.
    fn set_position(&mut self, position: u32);
    fn detach(&mut self);
}

/// Menus, toolbar, location bar, status bar and tab bar of one window.
pub trait ControlSurface {
    fn write(&mut self, value: ControlValue) -> Option<ControlValue>;
    fn set_sensitive(&mut self, action: Action, sensitive: bool);
    fn set_title(&mut self, title: &str);
    fn set_location_text(&mut self, text: &str);
    fn focus_location(&mut self, seed: Option<&str>);
    fn set_status(&mut self, slot: StatusSlot, text: Option<&str>);
    /// Non-fatal inline notice, e.g. for a location that cannot be opened.
    fn show_notice(&mut self, notice: Option<&str>);
    fn set_tabs_visible(&mut self, visible: bool);
    fn set_view_modes(&mut self, modes: &[ViewModeInfo]);
    fn set_bookmarks(&mut self, items: &[Bookmark]);
    fn present(&mut self);
    fn close(&mut self);
}

/// Builds the widgets of new windows and tabs.
pub trait WidgetFactory {
    /// `None` when the view cannot be created yet; see `MainWindow::attach_content_view`.
    fn content_view(
        &self,
        window: WindowId,
        tab: TabId,
        location: &Location,
    ) -> Option<Box<dyn ContentView>>;
    fn side_panel(&self, window: WindowId, tab: TabId) -> Box<dyn SidePanel>;
    fn controls(&self, window: WindowId) -> Box<dyn ControlSurface>;
}

/// Decides whether a location can be browsed.
pub trait Vfs {
    fn resolve(&self, location: &Location) -> Result<Location>;
}
