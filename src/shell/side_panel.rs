// Side panel - places list or directory tree next to the folder view
use super::widgets::{Outbox, Shared};
use eframe::egui;
use kura::collab::{SidePanel, SidePanelMode};
use kura::io::read_directory;
use kura::message::{Message, PointerButton, SidePanelEvent};
use kura::model::{Bookmark, Location, TabId, WindowId};

pub struct PanelModel {
    pub mode: SidePanelMode,
    pub location: Option<Location>,
    pub visible: bool,
    pub position: u32,
    /// Set when the position was written programmatically and not yet applied.
    pub position_pending: bool,
    pub detached: bool,
    children: Vec<Location>,
}

impl Default for PanelModel {
    fn default() -> Self {
        Self {
            mode: SidePanelMode::Places,
            location: None,
            visible: true,
            position: 150,
            position_pending: true,
            detached: false,
            children: Vec::new(),
        }
    }
}

impl PanelModel {
    fn reload_children(&mut self) {
        self.children.clear();
        if self.mode != SidePanelMode::DirTree {
            return;
        }
        let Some(location) = &self.location else {
            return;
        };
        match read_directory(location, false) {
            Ok(entries) => {
                let mut children: Vec<Location> = entries
                    .iter()
                    .filter(|e| e.is_dir)
                    .map(|e| e.location())
                    .collect();
                children.sort_by_key(|l| l.display_name().to_lowercase());
                self.children = children;
            }
            Err(e) => log::debug!("Directory tree cannot list {}: {}", location, e),
        }
    }

    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        window: WindowId,
        tab: TabId,
        bookmarks: &[Bookmark],
        outbox: &Outbox,
    ) {
        let send = |event: SidePanelEvent| {
            outbox
                .borrow_mut()
                .push((window, Message::SidePanel { tab, event }));
        };

        let mut mode = self.mode;
        egui::ComboBox::from_id_salt(("side_panel_mode", tab.0))
            .selected_text(mode.label())
            .show_ui(ui, |ui| {
                for candidate in SidePanelMode::ALL {
                    ui.selectable_value(&mut mode, candidate, candidate.label());
                }
            });
        if mode != self.mode {
            self.mode = mode;
            self.reload_children();
            send(SidePanelEvent::ModeChanged(mode));
        }
        ui.separator();

        let mut clicked: Option<(PointerButton, Location)> = None;
        egui::ScrollArea::vertical()
            .id_salt(("side_panel_scroll", tab.0))
            .auto_shrink([false, false])
            .show(ui, |ui| match self.mode {
                SidePanelMode::Places => {
                    let places = [
                        ("🏠 Home", Location::home()),
                        ("🖥 Desktop", Location::desktop()),
                        ("🗑 Trash", Location::trash()),
                        ("💻 File System", Some(Location::new("/"))),
                    ];
                    for (label, location) in places {
                        if let Some(location) = location {
                            if let Some(button) = place_row(ui, label, &location, &self.location) {
                                clicked = Some((button, location));
                            }
                        }
                    }
                    if !bookmarks.is_empty() {
                        ui.separator();
                        for bookmark in bookmarks {
                            let label = format!("🔖 {}", bookmark.name);
                            if let Some(button) =
                                place_row(ui, &label, &bookmark.location, &self.location)
                            {
                                clicked = Some((button, bookmark.location.clone()));
                            }
                        }
                    }
                }
                SidePanelMode::DirTree => {
                    let mut ancestors: Vec<Location> = Vec::new();
                    let mut cursor = self.location.clone();
                    while let Some(location) = cursor {
                        cursor = location.parent();
                        ancestors.push(location);
                    }
                    ancestors.reverse();
                    let depth = ancestors.len();
                    for (level, location) in ancestors.iter().enumerate() {
                        let label = format!(
                            "{}🗁 {}",
                            "  ".repeat(level),
                            location.display_name()
                        );
                        if let Some(button) = place_row(ui, &label, location, &self.location) {
                            clicked = Some((button, location.clone()));
                        }
                    }
                    for child in &self.children {
                        let label = format!("{}🗀 {}", "  ".repeat(depth), child.display_name());
                        if let Some(button) = place_row(ui, &label, child, &self.location) {
                            clicked = Some((button, child.clone()));
                        }
                    }
                }
            });

        if let Some((button, location)) = clicked {
            send(SidePanelEvent::Chdir { button, location });
        }
    }
}

fn place_row(
    ui: &mut egui::Ui,
    label: &str,
    location: &Location,
    current: &Option<Location>,
) -> Option<PointerButton> {
    let selected = current.as_ref() == Some(location);
    let response = ui
        .add(egui::Button::selectable(selected, label))
        .on_hover_text(location.to_string());
    if response.middle_clicked() {
        Some(PointerButton::Middle)
    } else if response.clicked() {
        Some(PointerButton::Primary)
    } else {
        None
    }
}

/// The coordinator's handle on a side panel model.
pub struct PlacesPanel {
    model: Shared<PanelModel>,
}

impl PlacesPanel {
    pub fn new(model: Shared<PanelModel>) -> Self {
        Self { model }
    }
}

impl SidePanel for PlacesPanel {
    fn chdir(&mut self, location: &Location) -> Option<SidePanelEvent> {
        let mut model = self.model.borrow_mut();
        if model.location.as_ref() != Some(location) {
            model.location = Some(location.clone());
            model.reload_children();
        }
        None
    }

    fn set_mode(&mut self, mode: SidePanelMode) -> Option<SidePanelEvent> {
        let mut model = self.model.borrow_mut();
        if model.mode != mode {
            model.mode = mode;
            model.reload_children();
        }
        None
    }

    fn mode(&self) -> SidePanelMode {
        self.model.borrow().mode
    }

    fn set_visible(&mut self, visible: bool) {
        self.model.borrow_mut().visible = visible;
    }

    fn set_position(&mut self, position: u32) {
        let mut model = self.model.borrow_mut();
        model.position = position;
        model.position_pending = true;
    }

    fn detach(&mut self) {
        let mut model = self.model.borrow_mut();
        model.detached = true;
        model.children.clear();
    }
}
