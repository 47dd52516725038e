// Folder content view - icon, compact and detailed list of one folder
use super::layout;
use super::widgets::{Outbox, Shared};
use eframe::egui;
use kura::collab::{ContentView, StatusSlot};
use kura::io::{read_directory, sort_entries, FileEntry};
use kura::message::{ClickKind, ClickedItem, Message};
use kura::model::{Location, TabId, WindowId};
use kura::state::{SortKey, SortOptions, ViewMode, ViewModeInfo, ViewState};
use std::collections::HashSet;
use std::path::PathBuf;

pub struct FolderModel {
    window: WindowId,
    tab: TabId,
    location: Option<Location>,
    state: ViewState,
    entries: Vec<FileEntry>,
    selected: HashSet<PathBuf>,
    load_error: Option<String>,
    needs_reload: bool,
    pub active: bool,
    pub focus_requested: bool,
    pub detached: bool,
}

impl FolderModel {
    pub fn new(window: WindowId, tab: TabId) -> Self {
        Self {
            window,
            tab,
            location: None,
            state: ViewState::default(),
            entries: Vec::new(),
            selected: HashSet::new(),
            load_error: None,
            needs_reload: false,
            active: false,
            focus_requested: false,
            detached: false,
        }
    }

    fn send(&self, outbox: &Outbox, message: Message) {
        outbox.borrow_mut().push((self.window, message));
    }

    fn refresh(&mut self, outbox: &Outbox) {
        self.needs_reload = false;
        let Some(location) = self.location.clone() else {
            return;
        };
        match read_directory(&location, self.state.show_hidden) {
            Ok(mut entries) => {
                sort_entries(&mut entries, &self.state.sort);
                self.load_error = None;
                self.selected
                    .retain(|path| entries.iter().any(|e| &e.path == path));
                self.entries = entries;
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}", location, e);
                self.load_error = Some(e.to_string());
                self.entries.clear();
                self.selected.clear();
            }
        }
        let text = format!("{} items", self.entries.len());
        self.send(
            outbox,
            Message::StatusText {
                tab: self.tab,
                slot: StatusSlot::Normal,
                text: Some(text),
            },
        );
        self.send_selection(outbox);
    }

    fn send_selection(&self, outbox: &Outbox) {
        let count = self.selected.len();
        self.send(
            outbox,
            Message::SelectionChanged {
                tab: self.tab,
                count,
            },
        );
        let text = (count > 0).then(|| {
            let size: u64 = self
                .entries
                .iter()
                .filter(|e| self.selected.contains(&e.path))
                .map(|e| e.size)
                .sum();
            format!("{} items selected ({})", count, bytesize::ByteSize(size))
        });
        self.send(
            outbox,
            Message::StatusText {
                tab: self.tab,
                slot: StatusSlot::SelectedFiles,
                text,
            },
        );
    }

    fn select(&mut self, path: PathBuf, extend: bool, outbox: &Outbox) {
        if extend {
            if !self.selected.remove(&path) {
                self.selected.insert(path);
            }
        } else {
            self.selected.clear();
            self.selected.insert(path);
        }
        self.send_selection(outbox);
    }

    fn click(&self, kind: ClickKind, entry: Option<&FileEntry>, outbox: &Outbox) {
        let item = entry.map(|e| ClickedItem {
            location: e.location(),
            is_dir: e.is_dir,
        });
        self.send(
            outbox,
            Message::LocationClicked {
                tab: self.tab,
                kind,
                item,
            },
        );
    }

    fn activate(&self, entry: &FileEntry, outbox: &Outbox) {
        if entry.is_dir {
            self.click(ClickKind::Activated, Some(entry), outbox);
        } else if let Err(e) = open::that(&entry.path) {
            log::warn!("Failed to open {}: {}", entry.path.display(), e);
        }
    }

    /// Header click: same key flips the order, another key sorts by it.
    fn sort_by(&self, key: SortKey, outbox: &Outbox) {
        let mut sort = self.state.sort;
        if sort.key == key {
            sort.toggle_order();
        } else {
            sort = SortOptions { key, ..sort };
        }
        self.send(outbox, Message::SortChanged { tab: self.tab, sort });
    }

    fn columns(&self) -> Vec<String> {
        self.state
            .columns
            .clone()
            .unwrap_or_else(kura::config::default_columns)
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, outbox: &Outbox) {
        if self.needs_reload {
            self.refresh(outbox);
        }
        if let Some(error) = &self.load_error {
            ui.colored_label(ui.visuals().error_fg_color, error);
            return;
        }

        // registered before the entries so that they stay on top of it
        let background = ui.interact(
            ui.available_rect_before_wrap(),
            ui.id().with(("folder_background", self.tab.0)),
            egui::Sense::click(),
        );
        match self.state.view_mode.as_str() {
            "list" => self.list_ui(ui, outbox),
            "compact" => self.grid_ui(ui, outbox, false),
            _ => self.grid_ui(ui, outbox, true),
        }

        if background.clicked() && !self.selected.is_empty() {
            self.selected.clear();
            self.send_selection(outbox);
        }
        background.context_menu(|ui| {
            if ui.button("Reload").clicked() {
                self.send(outbox, Message::Reload);
                ui.close();
            }
            let mut show_hidden = self.state.show_hidden;
            if ui.checkbox(&mut show_hidden, "Show Hidden").changed() {
                self.send(
                    outbox,
                    Message::HiddenChanged {
                        tab: self.tab,
                        show_hidden,
                    },
                );
                ui.close();
            }
        });
        if self.focus_requested {
            self.focus_requested = false;
            background.request_focus();
        }
        if self.active
            && background.has_focus()
            && ui.input(|i| i.key_pressed(egui::Key::Enter))
        {
            let selected: Vec<FileEntry> = self
                .entries
                .iter()
                .filter(|e| self.selected.contains(&e.path))
                .cloned()
                .collect();
            for entry in &selected {
                self.activate(entry, outbox);
            }
        }
    }

    fn grid_ui(&mut self, ui: &mut egui::Ui, outbox: &Outbox, large: bool) {
        let width = if large {
            layout::ICON_CELL_WIDTH
        } else {
            layout::COMPACT_CELL_WIDTH
        };
        let mut pending: Option<(usize, egui::Response)> = None;
        egui::ScrollArea::vertical()
            .id_salt(("folder_grid", self.tab.0))
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for (index, entry) in self.entries.iter().enumerate() {
                        let icon = if entry.is_dir { "🗀" } else { "🗋" };
                        let text = if large {
                            format!("{}\n{}", icon, entry.display_name())
                        } else {
                            format!("{} {}", icon, entry.display_name())
                        };
                        let selected = self.selected.contains(&entry.path);
                        let response = ui.add_sized(
                            [width, if large { layout::ICON_CELL_HEIGHT } else { layout::ROW_HEIGHT }],
                            egui::Button::selectable(selected, text),
                        );
                        if response.clicked()
                            || response.double_clicked()
                            || response.middle_clicked()
                            || response.secondary_clicked()
                        {
                            pending = Some((index, response));
                        }
                    }
                });
            });
        if let Some((index, response)) = pending {
            self.entry_response(index, &response, ui, outbox);
        }
    }

    fn list_ui(&mut self, ui: &mut egui::Ui, outbox: &Outbox) {
        use egui_extras::{Column, TableBuilder};

        let columns = self.columns();
        let mut pending: Option<(usize, egui::Response)> = None;
        let mut header_click: Option<SortKey> = None;
        let mut column_toggle: Option<Vec<String>> = None;

        let mut table = TableBuilder::new(ui)
            .id_salt(("folder_list", self.tab.0))
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::initial(layout::ICON_COL_WIDTH));
        for column in &columns {
            table = match column.as_str() {
                "name" => table.column(Column::remainder().at_least(120.0).clip(true)),
                _ => table.column(Column::initial(100.0).clip(true)),
            };
        }

        table
            .header(layout::HEADER_HEIGHT, |mut header| {
                header.col(|ui| {
                    ui.label("");
                });
                for column in &columns {
                    header.col(|ui| {
                        let key = column_sort_key(column);
                        let mut title = column_title(column).to_string();
                        if key == Some(self.state.sort.key) {
                            title.push_str(if self.state.sort.is_ascending() { " ⏶" } else { " ⏷" });
                        }
                        let response = ui.add(egui::Label::new(title).sense(egui::Sense::click()));
                        if response.clicked() {
                            header_click = key;
                        }
                        response.context_menu(|ui| {
                            for name in kura::config::default_columns() {
                                let mut shown = columns.contains(&name);
                                let locked = name == "name";
                                let toggle = ui.add_enabled(
                                    !locked,
                                    egui::Checkbox::new(&mut shown, column_title(&name)),
                                );
                                if toggle.changed() {
                                    let mut next = columns.clone();
                                    if shown {
                                        next.push(name);
                                    } else {
                                        next.retain(|c| *c != name);
                                    }
                                    column_toggle = Some(next);
                                    ui.close();
                                }
                            }
                        });
                    });
                }
            })
            .body(|body| {
                body.rows(layout::ROW_HEIGHT, self.entries.len(), |mut row| {
                    let index = row.index();
                    let entry = &self.entries[index];
                    row.set_selected(self.selected.contains(&entry.path));
                    row.col(|ui| {
                        ui.label(
                            egui::RichText::new(if entry.is_dir { "🗀" } else { "🗋" })
                                .size(layout::ICON_SIZE),
                        );
                    });
                    for column in &columns {
                        row.col(|ui| {
                            let text = match column.as_str() {
                                "name" => {
                                    let text = egui::RichText::new(entry.display_name());
                                    if entry.is_dir {
                                        text.color(egui::Color32::from_rgb(120, 180, 255))
                                    } else {
                                        text
                                    }
                                }
                                "size" if entry.is_dir => egui::RichText::new(""),
                                "size" => egui::RichText::new(bytesize::ByteSize(entry.size).to_string()),
                                "type" => egui::RichText::new(entry.kind()),
                                "modified" => egui::RichText::new(
                                    chrono::DateTime::<chrono::Local>::from(entry.modified)
                                        .format("%Y-%m-%d %H:%M")
                                        .to_string(),
                                ),
                                _ => egui::RichText::new(""),
                            };
                            let response = layout::truncated_label_with_sense(
                                ui,
                                text,
                                egui::Sense::click(),
                            );
                            if response.clicked()
                                || response.double_clicked()
                                || response.middle_clicked()
                                || response.secondary_clicked()
                            {
                                pending = Some((index, response));
                            }
                        });
                    }
                });
            });

        if let Some(key) = header_click {
            self.sort_by(key, outbox);
        }
        if let Some(columns) = column_toggle {
            self.send(
                outbox,
                Message::ColumnsChanged {
                    tab: self.tab,
                    columns,
                },
            );
        }
        if let Some((index, response)) = pending {
            self.entry_response(index, &response, ui, outbox);
        }
    }

    fn entry_response(
        &mut self,
        index: usize,
        response: &egui::Response,
        ui: &egui::Ui,
        outbox: &Outbox,
    ) {
        let Some(entry) = self.entries.get(index).cloned() else {
            return;
        };
        if response.double_clicked() {
            self.activate(&entry, outbox);
        } else if response.middle_clicked() {
            self.click(ClickKind::MiddleClick, Some(&entry), outbox);
        } else if response.secondary_clicked() {
            if !self.selected.contains(&entry.path) {
                self.select(entry.path.clone(), false, outbox);
            }
            self.click(ClickKind::ContextMenu, Some(&entry), outbox);
        } else if response.clicked() {
            let extend = ui.input(|i| i.modifiers.command);
            self.select(entry.path.clone(), extend, outbox);
        }
    }
}

fn column_title(column: &str) -> &str {
    match column {
        "name" => "Name",
        "size" => "Size",
        "type" => "Type",
        "modified" => "Modified",
        other => other,
    }
}

fn column_sort_key(column: &str) -> Option<SortKey> {
    match column {
        "name" => Some(SortKey::Name),
        "size" => Some(SortKey::Size),
        "type" => Some(SortKey::Type),
        "modified" => Some(SortKey::Modified),
        _ => None,
    }
}

/// The coordinator's handle on a folder model.
pub struct FolderView {
    model: Shared<FolderModel>,
}

impl FolderView {
    pub fn new(model: Shared<FolderModel>) -> Self {
        Self { model }
    }
}

impl ContentView for FolderView {
    fn set_location(&mut self, location: &Location) {
        let mut model = self.model.borrow_mut();
        if model.location.as_ref() != Some(location) {
            model.location = Some(location.clone());
            model.selected.clear();
            model.needs_reload = true;
        }
    }

    fn apply_view_state(&mut self, state: &ViewState) {
        let mut model = self.model.borrow_mut();
        if model.state.show_hidden != state.show_hidden {
            model.needs_reload = true;
        } else if model.state.sort != state.sort {
            let sort = state.sort;
            sort_entries(&mut model.entries, &sort);
        }
        model.state = state.clone();
    }

    fn reload(&mut self) {
        self.model.borrow_mut().needs_reload = true;
    }

    fn selected_count(&self) -> usize {
        self.model.borrow().selected.len()
    }

    fn dup_selected_paths(&self) -> Vec<Location> {
        let model = self.model.borrow();
        model
            .entries
            .iter()
            .filter(|e| model.selected.contains(&e.path))
            .map(FileEntry::location)
            .collect()
    }

    fn set_active(&mut self, active: bool) {
        self.model.borrow_mut().active = active;
    }

    fn grab_focus(&mut self) {
        self.model.borrow_mut().focus_requested = true;
    }

    fn view_modes(&self) -> Vec<ViewModeInfo> {
        [("icon", "Icon View"), ("compact", "Compact View"), ("list", "Detailed List View")]
            .into_iter()
            .map(|(id, label)| ViewModeInfo {
                mode: ViewMode::new(id),
                label: label.to_string(),
            })
            .collect()
    }

    fn detach(&mut self) {
        let mut model = self.model.borrow_mut();
        model.detached = true;
        model.entries.clear();
        model.selected.clear();
    }
}
