use crate::collab::{ControlValue, SidePanelMode, StatusSlot};
use crate::model::{Location, TabId};
use crate::state::SortOptions;

/// Every inbound event of a main window. Toolkit adapters translate their
/// callbacks into these and hand them to `MainWindow::update`.
#[derive(Debug, Clone)]
pub enum Message {
    // Navigation
    Chdir(Location),
    ChdirByName(String),
    GoBack,
    GoForward,
    GoUp,
    GoHome,
    GoDesktop,
    GoTrash,
    Reload,
    JumpHistory(usize),

    // Location bar
    LocationActivated(String),
    LocationEditCancelled,
    FocusLocation(Option<String>),

    // Tabs and windows
    NewTab,
    NewWindow,
    CloseTab(TabId),
    CloseActiveTab,
    SwitchTab(TabId),
    NextTab,
    PrevTab,
    NthTab(usize),
    CloseWindow,
    FocusGained,
    Resized { width: u32, height: u32 },
    Fullscreen(bool),

    // Menu and toolbar controls
    Control(ControlValue),

    // Content view
    SelectionChanged { tab: TabId, count: usize },
    LocationClicked {
        tab: TabId,
        kind: ClickKind,
        item: Option<ClickedItem>,
    },
    SortChanged { tab: TabId, sort: SortOptions },
    HiddenChanged { tab: TabId, show_hidden: bool },
    ColumnsChanged { tab: TabId, columns: Vec<String> },

    // Side panel
    SidePanel { tab: TabId, event: SidePanelEvent },

    // Tab page
    StatusText {
        tab: TabId,
        slot: StatusSlot,
        text: Option<String>,
    },
    SplitterMoved { tab: TabId, position: u32 },

    // Bookmarks
    BookmarksChanged,
    OpenBookmark(usize),
    AddBookmark(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    Activated,
    ContextMenu,
    MiddleClick,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClickedItem {
    pub location: Location,
    pub is_dir: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SidePanelEvent {
    Chdir {
        button: PointerButton,
        location: Location,
    },
    ModeChanged(SidePanelMode),
}

/// What a window asks of the registry after handling a message.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Effect {
    None,
    OpenWindow(Location),
    /// The bookmark store changed; every window must rebuild its menu.
    BookmarksChanged,
    /// The window tore itself down and must be unregistered.
    Destroyed,
}
