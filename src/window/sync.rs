// Pushes the active tab's state into the window chrome
use super::MainWindow;
use crate::collab::{Action, ControlValue, StatusSlot, Toggle};

impl MainWindow {
    /// Write controls under the update latch. Whatever the controls report
    /// back is handled, and ignored, while the latch is still set.
    pub(super) fn write_controls(&mut self, values: impl IntoIterator<Item = ControlValue>) {
        let was_updating = std::mem::replace(&mut self.in_update, true);
        for value in values {
            if let Some(echo) = self.controls.write(value) {
                self.on_control(echo);
            }
        }
        self.in_update = was_updating;
    }

    pub(super) fn sync_view_controls(&mut self) {
        let Some(tab) = self.active_tab() else {
            return;
        };
        let state = &tab.view_state;
        let values = vec![
            ControlValue::SortKey(state.sort.key),
            ControlValue::SortOrder(state.sort.order),
            ControlValue::Toggle(Toggle::SortIgnoreCase, !state.sort.case_sensitive),
            ControlValue::Toggle(Toggle::MingleFolders, !state.sort.folders_first),
            ControlValue::ViewMode(state.view_mode.clone()),
            ControlValue::Toggle(Toggle::ShowHidden, state.show_hidden),
            ControlValue::Toggle(Toggle::SavePerFolder, state.owns_config),
            ControlValue::SidePanelMode(tab.side_panel().mode()),
            ControlValue::Toggle(Toggle::ShowSidePanel, self.side_panel_visible),
        ];
        self.write_controls(values);
        self.sync_view_modes();
    }

    /// Offer the view modes of the active content view, if it has any.
    pub(super) fn sync_view_modes(&mut self) {
        let Some(view) = self.active_tab().and_then(|tab| tab.content_view()) else {
            return;
        };
        let modes = view.view_modes();
        if modes != self.view_modes {
            self.controls.set_view_modes(&modes);
            self.view_modes = modes;
        }
    }

    pub(super) fn sync_history_controls(&mut self) {
        let (back, forward) = self.active_tab().map_or((false, false), |tab| {
            (tab.history().can_go_back(), tab.history().can_go_forward())
        });
        self.controls.set_sensitive(Action::Back, back);
        self.controls.set_sensitive(Action::Forward, forward);
    }

    /// Selection actions are disabled while the tab has no content view.
    pub(super) fn sync_selection_sensitivity(&mut self) {
        let count = self.active_tab().map_or(0, |tab| tab.selected_count());
        self.set_selection_sensitivity(count);
    }

    pub(super) fn set_selection_sensitivity(&mut self, count: usize) {
        for action in Action::SELECTION {
            self.controls.set_sensitive(action, count > 0);
        }
    }

    pub(super) fn sync_title_and_location(&mut self) {
        let Some(tab) = self.active_tab() else {
            return;
        };
        let title = tab.label.clone();
        let text = tab.location().to_string();
        self.controls.set_title(&title);
        self.controls.set_location_text(&text);
    }

    pub(super) fn sync_status(&mut self) {
        let Some(tab) = self.active_tab() else {
            return;
        };
        let texts: Vec<Option<String>> = StatusSlot::ALL
            .iter()
            .map(|slot| tab.status(*slot).map(str::to_string))
            .collect();
        for (slot, text) in StatusSlot::ALL.into_iter().zip(texts) {
            self.controls.set_status(slot, text.as_deref());
        }
    }

    pub(super) fn sync_tabs_visible(&mut self) {
        let always = self.ctx.config.borrow().window_config().always_show_tabs;
        self.controls.set_tabs_visible(always || self.tabs.len() > 1);
    }

    pub(super) fn rebuild_bookmarks(&mut self) {
        let items = self.ctx.bookmarks.borrow().items();
        self.controls.set_bookmarks(&items);
    }
}
