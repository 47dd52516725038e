// Tab page - one browsing context (location, history, view state) inside a window
use super::navigation::NavigationHistory;
use super::view::ViewState;
use crate::collab::{ContentView, SidePanel, SidePanelMode, StatusSlot};
use crate::model::{Location, TabId, WindowId};
use crate::message::SidePanelEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TabLifecycle {
    /// Constructed, not yet part of a window.
    Detached,
    Background,
    Active,
    Destroyed,
}

impl TabLifecycle {
    fn can_become(self, next: TabLifecycle) -> bool {
        use TabLifecycle::*;
        matches!(
            (self, next),
            (Detached, Background)
                | (Background, Active)
                | (Active, Background)
                | (Detached, Destroyed)
                | (Background, Destroyed)
                | (Active, Destroyed)
        )
    }
}

/// State for a single tab
pub struct TabPage {
    id: TabId,
    /// Owning window, for log context only.
    window: WindowId,
    pub label: String,
    location: Location,
    history: NavigationHistory,
    pub view_state: ViewState,
    content_view: Option<Box<dyn ContentView>>,
    side_panel: Box<dyn SidePanel>,
    lifecycle: TabLifecycle,
    wired: bool,
    splitter_position: u32,
    status: [Option<String>; 3],
}

impl TabPage {
    /// Build a detached tab showing `location`.
    ///
    /// Widgets are set up before the tab is wired, so whatever they emit in
    /// response is not a user action and is dropped.
    pub fn new(
        id: TabId,
        window: WindowId,
        location: Location,
        view_state: ViewState,
        mut side_panel: Box<dyn SidePanel>,
        content_view: Option<Box<dyn ContentView>>,
        side_panel_mode: SidePanelMode,
    ) -> Self {
        let mut history = NavigationHistory::new();
        history.push(location.clone());

        let dropped = [side_panel.set_mode(side_panel_mode), side_panel.chdir(&location)];
        for event in dropped.into_iter().flatten() {
            log::trace!("{} dropped setup event {:?}", id, event);
        }

        let mut tab = Self {
            id,
            window,
            label: location.display_name(),
            location,
            history,
            view_state,
            content_view: None,
            side_panel,
            lifecycle: TabLifecycle::Detached,
            wired: false,
            splitter_position: 0,
            status: Default::default(),
        };
        if let Some(view) = content_view {
            tab.set_content_view(view);
        }
        tab
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut NavigationHistory {
        &mut self.history
    }

    pub fn lifecycle(&self) -> TabLifecycle {
        self.lifecycle
    }

    /// Whether the tab's event sources reach the coordinator.
    pub fn is_wired(&self) -> bool {
        self.wired
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle == TabLifecycle::Active
    }

    pub fn splitter_position(&self) -> u32 {
        self.splitter_position
    }

    pub fn content_view(&self) -> Option<&dyn ContentView> {
        self.content_view.as_deref()
    }

    pub fn content_view_mut(&mut self) -> Option<&mut (dyn ContentView + 'static)> {
        self.content_view.as_deref_mut()
    }

    pub fn side_panel(&self) -> &dyn SidePanel {
        self.side_panel.as_ref()
    }

    pub fn side_panel_mut(&mut self) -> &mut dyn SidePanel {
        self.side_panel.as_mut()
    }

    /// Install the content view once the toolkit can provide it.
    pub fn set_content_view(&mut self, mut view: Box<dyn ContentView>) {
        view.set_location(&self.location);
        view.apply_view_state(&self.view_state);
        view.set_active(self.is_active());
        if let Some(mut old) = self.content_view.replace(view) {
            old.detach();
        }
    }

    /// Insert into the window: Detached -> Background.
    pub fn insert(&mut self, splitter_position: u32, side_panel_visible: bool) -> bool {
        if !self.transition(TabLifecycle::Background) {
            return false;
        }
        self.set_splitter_position(splitter_position);
        self.side_panel.set_visible(side_panel_visible);
        self.wired = true;
        true
    }

    pub fn activate(&mut self) -> bool {
        if !self.transition(TabLifecycle::Active) {
            return false;
        }
        if let Some(view) = self.content_view.as_mut() {
            view.set_active(true);
        }
        true
    }

    pub fn deactivate(&mut self) -> bool {
        if !self.transition(TabLifecycle::Background) {
            return false;
        }
        if let Some(view) = self.content_view.as_mut() {
            view.set_active(false);
        }
        true
    }

    /// Unwire and release the widgets' external resources.
    pub fn destroy(&mut self) {
        if !self.transition(TabLifecycle::Destroyed) {
            return;
        }
        self.wired = false;
        if let Some(mut view) = self.content_view.take() {
            view.detach();
        }
        self.side_panel.detach();
    }

    /// Record a visit and point the tab at it.
    pub fn navigate(&mut self, location: Location) {
        self.history.push(location.clone());
        self.set_location(location);
    }

    /// Point the tab at a location already in its history.
    pub fn set_location(&mut self, location: Location) {
        self.label = location.display_name();
        self.location = location;
    }

    /// Push location and view state into the content view. The side panel
    /// may answer with a notification of its own, which is returned.
    pub fn show(&mut self) -> Option<SidePanelEvent> {
        if let Some(view) = self.content_view.as_mut() {
            view.set_location(&self.location);
            view.apply_view_state(&self.view_state);
        }
        self.side_panel.chdir(&self.location)
    }

    pub fn apply_view_state(&mut self) {
        if let Some(view) = self.content_view.as_mut() {
            view.apply_view_state(&self.view_state);
        }
    }

    pub fn selected_count(&self) -> usize {
        self.content_view
            .as_ref()
            .map_or(0, |view| view.selected_count())
    }

    pub fn set_splitter_position(&mut self, position: u32) {
        self.splitter_position = position;
        self.side_panel.set_position(position);
    }

    /// The tab's own splitter was dragged; its widget already has the value.
    pub fn record_splitter_position(&mut self, position: u32) {
        self.splitter_position = position;
    }

    pub fn status(&self, slot: StatusSlot) -> Option<&str> {
        self.status[slot.index()].as_deref()
    }

    pub fn set_status(&mut self, slot: StatusSlot, text: Option<String>) {
        self.status[slot.index()] = text;
    }

    fn transition(&mut self, next: TabLifecycle) -> bool {
        if !self.lifecycle.can_become(next) {
            log::warn!(
                "{} of {}: invalid transition {:?} -> {:?}",
                self.id,
                self.window,
                self.lifecycle,
                next
            );
            return false;
        }
        self.lifecycle = next;
        true
    }
}
