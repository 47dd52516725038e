// Window chrome - menus, toolbar, location bar, tab bar and status bar
use super::layout;
use super::widgets::{Outbox, Shared};
use eframe::egui;
use kura::collab::{Action, ControlSurface, ControlValue, SidePanelMode, StatusSlot, Toggle};
use kura::message::Message;
use kura::model::{Bookmark, TabId, WindowId};
use kura::state::{SortKey, SortOrder, ViewMode, ViewModeInfo};
use std::collections::{HashMap, HashSet};

/// One entry of the history drop-down.
pub struct HistoryItem {
    pub index: usize,
    pub label: String,
    pub current: bool,
}

/// One entry of the tab bar as the renderer sees it.
pub struct TabLabel {
    pub id: TabId,
    pub label: String,
    pub active: bool,
}

pub struct ChromeModel {
    toggles: HashMap<Toggle, bool>,
    sort_key: SortKey,
    sort_order: SortOrder,
    view_mode: ViewMode,
    side_panel_mode: SidePanelMode,
    insensitive: HashSet<Action>,
    pub title: String,
    location_text: String,
    /// Text being typed into the location bar; `None` while not editing.
    location_edit: Option<String>,
    focus_location: bool,
    status: [Option<String>; 3],
    notice: Option<String>,
    pub tabs_visible: bool,
    view_modes: Vec<ViewModeInfo>,
    pub bookmarks: Vec<Bookmark>,
    bookmark_name: String,
    pub present_requested: bool,
    pub closed: bool,
}

impl Default for ChromeModel {
    fn default() -> Self {
        Self {
            toggles: HashMap::new(),
            sort_key: SortKey::Name,
            sort_order: SortOrder::Ascending,
            view_mode: ViewMode::default(),
            side_panel_mode: SidePanelMode::Places,
            insensitive: HashSet::new(),
            title: String::new(),
            location_text: String::new(),
            location_edit: None,
            focus_location: false,
            status: [None, None, None],
            notice: None,
            tabs_visible: false,
            view_modes: Vec::new(),
            bookmarks: Vec::new(),
            bookmark_name: String::new(),
            present_requested: false,
            closed: false,
        }
    }
}

impl ChromeModel {
    pub fn toggle(&self, toggle: Toggle) -> bool {
        self.toggles.get(&toggle).copied().unwrap_or(false)
    }

    fn sensitive(&self, action: Action) -> bool {
        !self.insensitive.contains(&action)
    }

    fn control_toggle(&mut self, ui: &mut egui::Ui, toggle: Toggle, text: &str, send: &dyn Fn(Message)) {
        let mut on = self.toggle(toggle);
        if ui.checkbox(&mut on, text).changed() {
            self.toggles.insert(toggle, on);
            send(Message::Control(ControlValue::Toggle(toggle, on)));
        }
    }

    pub fn menu_bar(&mut self, ui: &mut egui::Ui, window: WindowId, outbox: &Outbox) {
        let send = |message: Message| outbox.borrow_mut().push((window, message));

        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New Window").clicked() {
                    send(Message::NewWindow);
                    ui.close();
                }
                if ui.button("New Tab").clicked() {
                    send(Message::NewTab);
                    ui.close();
                }
                ui.separator();
                if ui.button("Close Tab").clicked() {
                    send(Message::CloseActiveTab);
                    ui.close();
                }
                if ui.button("Close Window").clicked() {
                    send(Message::CloseWindow);
                    ui.close();
                }
            });

            ui.menu_button("Edit", |ui| {
                // selection-dependent actions are rendered for their sensitivity
                for (action, text) in [
                    (Action::Cut, "Cut"),
                    (Action::Copy, "Copy"),
                    (Action::Delete, "Move to Trash"),
                    (Action::Rename, "Rename"),
                    (Action::CopyTo, "Copy To..."),
                    (Action::MoveTo, "Move To..."),
                ] {
                    ui.add_enabled(self.sensitive(action), egui::Button::new(text));
                }
            });

            ui.menu_button("View", |ui| {
                self.control_toggle(ui, Toggle::ShowHidden, "Show Hidden", &send);
                self.control_toggle(ui, Toggle::ShowSidePanel, "Side Panel", &send);
                let mut side_panel_mode = self.side_panel_mode;
                ui.menu_button("Side Panel Mode", |ui| {
                    for mode in SidePanelMode::ALL {
                        ui.radio_value(&mut side_panel_mode, mode, mode.label());
                    }
                });
                if side_panel_mode != self.side_panel_mode {
                    self.side_panel_mode = side_panel_mode;
                    send(Message::Control(ControlValue::SidePanelMode(side_panel_mode)));
                }
                ui.separator();

                let mut view_mode = self.view_mode.clone();
                for info in &self.view_modes {
                    ui.radio_value(&mut view_mode, info.mode.clone(), info.label.as_str());
                }
                if view_mode != self.view_mode {
                    self.view_mode = view_mode.clone();
                    send(Message::Control(ControlValue::ViewMode(view_mode)));
                }
                ui.separator();

                let mut sort_key = self.sort_key;
                let mut sort_order = self.sort_order;
                ui.menu_button("Sort Files", |ui| {
                    ui.radio_value(&mut sort_order, SortOrder::Ascending, "Ascending");
                    ui.radio_value(&mut sort_order, SortOrder::Descending, "Descending");
                    ui.separator();
                    for key in SortKey::ALL {
                        ui.radio_value(&mut sort_key, key, key.label());
                    }
                    ui.separator();
                    self.control_toggle(ui, Toggle::SortIgnoreCase, "Ignore Name Case", &send);
                    self.control_toggle(ui, Toggle::MingleFolders, "Mingle Files and Folders", &send);
                });
                if sort_key != self.sort_key {
                    self.sort_key = sort_key;
                    send(Message::Control(ControlValue::SortKey(sort_key)));
                }
                if sort_order != self.sort_order {
                    self.sort_order = sort_order;
                    send(Message::Control(ControlValue::SortOrder(sort_order)));
                }
                ui.separator();
                self.control_toggle(ui, Toggle::SavePerFolder, "Preserve This Folder's Settings", &send);
                ui.separator();
                if ui.button("Reload").clicked() {
                    send(Message::Reload);
                    ui.close();
                }
            });

            ui.menu_button("Go", |ui| {
                for (enabled, text, message) in [
                    (self.sensitive(Action::Back), "Back", Message::GoBack),
                    (self.sensitive(Action::Forward), "Forward", Message::GoForward),
                    (true, "Parent Folder", Message::GoUp),
                    (true, "Home Folder", Message::GoHome),
                    (true, "Desktop", Message::GoDesktop),
                    (true, "Trash Can", Message::GoTrash),
                ] {
                    if ui.add_enabled(enabled, egui::Button::new(text)).clicked() {
                        send(message);
                        ui.close();
                    }
                }
            });

            ui.menu_button("Bookmarks", |ui| {
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.bookmark_name)
                            .hint_text("Name")
                            .desired_width(120.0),
                    );
                    if ui.button("Add to Bookmarks").clicked() {
                        send(Message::AddBookmark(std::mem::take(&mut self.bookmark_name)));
                        ui.close();
                    }
                });
                if !self.bookmarks.is_empty() {
                    ui.separator();
                }
                for (index, bookmark) in self.bookmarks.iter().enumerate() {
                    if ui
                        .button(bookmark.name.as_str())
                        .on_hover_text(bookmark.location.to_string())
                        .clicked()
                    {
                        send(Message::OpenBookmark(index));
                        ui.close();
                    }
                }
            });
        });
    }

    pub fn toolbar(
        &mut self,
        ui: &mut egui::Ui,
        window: WindowId,
        history: &[HistoryItem],
        outbox: &Outbox,
    ) {
        let send = |message: Message| outbox.borrow_mut().push((window, message));

        ui.horizontal(|ui| {
            if ui
                .add_enabled(self.sensitive(Action::Back), egui::Button::new("⬅"))
                .on_hover_text("Back")
                .clicked()
            {
                send(Message::GoBack);
            }
            ui.menu_button("⏷", |ui| {
                // newest first, like a browser's history list
                for item in history.iter().rev() {
                    if ui.radio(item.current, item.label.as_str()).clicked() {
                        send(Message::JumpHistory(item.index));
                        ui.close();
                    }
                }
            })
            .response
            .on_hover_text("History");
            if ui
                .add_enabled(self.sensitive(Action::Forward), egui::Button::new("➡"))
                .on_hover_text("Forward")
                .clicked()
            {
                send(Message::GoForward);
            }
            if ui.button("⬆").on_hover_text("Parent Folder").clicked() {
                send(Message::GoUp);
            }
            if ui.button("🏠").on_hover_text("Home Folder").clicked() {
                send(Message::GoHome);
            }
            if ui.button("⟳").on_hover_text("Reload").clicked() {
                send(Message::Reload);
            }

            let mut text = self
                .location_edit
                .clone()
                .unwrap_or_else(|| self.location_text.clone());
            let response = ui.add(
                egui::TextEdit::singleline(&mut text)
                    .id_salt(("location_bar", window.0))
                    .desired_width(f32::INFINITY),
            );
            if self.focus_location {
                self.focus_location = false;
                response.request_focus();
            }
            if response.changed() {
                self.location_edit = Some(text.clone());
            }
            if response.lost_focus() {
                let (enter, escape) =
                    ui.input(|i| (i.key_pressed(egui::Key::Enter), i.key_pressed(egui::Key::Escape)));
                if enter {
                    // kept until the window confirms the new location
                    self.location_edit = Some(text.clone());
                    send(Message::LocationActivated(text));
                } else {
                    self.location_edit = None;
                    if escape {
                        send(Message::LocationEditCancelled);
                    }
                }
            }
        });
    }

    pub fn tab_bar(&self, ui: &mut egui::Ui, window: WindowId, tabs: &[TabLabel], outbox: &Outbox) {
        if !self.tabs_visible {
            return;
        }
        let send = |message: Message| outbox.borrow_mut().push((window, message));

        egui::ScrollArea::horizontal()
            .id_salt(("tab_bar", window.0))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    for tab in tabs {
                        let response = ui
                            .add(
                                egui::Button::selectable(tab.active, tab.label.as_str()),
                            )
                            .on_hover_text(tab.label.as_str());
                        if response.clicked() {
                            send(Message::SwitchTab(tab.id));
                        } else if response.middle_clicked() {
                            send(Message::CloseTab(tab.id));
                        }
                        if ui.small_button("✖").on_hover_text("Close Tab").clicked() {
                            send(Message::CloseTab(tab.id));
                        }
                        ui.add_space(layout::TAB_SPACING);
                    }
                    if ui.button("+").on_hover_text("New Tab").clicked() {
                        send(Message::NewTab);
                    }
                });
            });
    }

    pub fn status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if let Some(notice) = &self.notice {
                ui.colored_label(ui.visuals().error_fg_color, notice);
                ui.separator();
            }
            for text in self.status.iter().flatten() {
                ui.label(text);
                ui.separator();
            }
        });
    }
}

/// The coordinator's handle on a chrome model.
pub struct Chrome {
    model: Shared<ChromeModel>,
}

impl Chrome {
    pub fn new(model: Shared<ChromeModel>) -> Self {
        Self { model }
    }
}

impl ControlSurface for Chrome {
    // immediate-mode widgets report nothing while being written
    fn write(&mut self, value: ControlValue) -> Option<ControlValue> {
        let mut model = self.model.borrow_mut();
        match value {
            ControlValue::Toggle(toggle, on) => {
                model.toggles.insert(toggle, on);
            }
            ControlValue::SortKey(key) => model.sort_key = key,
            ControlValue::SortOrder(order) => model.sort_order = order,
            ControlValue::ViewMode(mode) => model.view_mode = mode,
            ControlValue::SidePanelMode(mode) => model.side_panel_mode = mode,
        }
        None
    }

    fn set_sensitive(&mut self, action: Action, sensitive: bool) {
        let mut model = self.model.borrow_mut();
        if sensitive {
            model.insensitive.remove(&action);
        } else {
            model.insensitive.insert(action);
        }
    }

    fn set_title(&mut self, title: &str) {
        self.model.borrow_mut().title = title.to_string();
    }

    fn set_location_text(&mut self, text: &str) {
        let mut model = self.model.borrow_mut();
        model.location_text = text.to_string();
        model.location_edit = None;
    }

    fn focus_location(&mut self, seed: Option<&str>) {
        let mut model = self.model.borrow_mut();
        model.location_edit = seed.map(str::to_string);
        model.focus_location = true;
    }

    fn set_status(&mut self, slot: StatusSlot, text: Option<&str>) {
        self.model.borrow_mut().status[slot.index()] = text.map(str::to_string);
    }

    fn show_notice(&mut self, notice: Option<&str>) {
        self.model.borrow_mut().notice = notice.map(str::to_string);
    }

    fn set_tabs_visible(&mut self, visible: bool) {
        self.model.borrow_mut().tabs_visible = visible;
    }

    fn set_view_modes(&mut self, modes: &[ViewModeInfo]) {
        self.model.borrow_mut().view_modes = modes.to_vec();
    }

    fn set_bookmarks(&mut self, items: &[Bookmark]) {
        self.model.borrow_mut().bookmarks = items.to_vec();
    }

    fn present(&mut self) {
        self.model.borrow_mut().present_requested = true;
    }

    fn close(&mut self) {
        self.model.borrow_mut().closed = true;
    }
}
