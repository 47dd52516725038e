// egui front end: renders every main window and feeds user input back as messages
mod chrome;
mod folder_view;
mod keyboard;
mod layout;
mod side_panel;
mod widgets;

pub use widgets::ShellWidgets;

use chrome::{HistoryItem, TabLabel};
use eframe::egui;
use kura::collab::Toggle;
use kura::message::Message;
use kura::model::{TabId, WindowId};
use kura::registry::WindowRegistry;
use std::collections::HashMap;
use std::rc::Rc;

pub struct KuraApp {
    registry: WindowRegistry,
    widgets: Rc<ShellWidgets>,
    /// Last size seen per window, to report resizes.
    sizes: HashMap<WindowId, (u32, u32)>,
    fullscreen: bool,
    title: String,
}

impl KuraApp {
    pub fn new(registry: WindowRegistry, widgets: Rc<ShellWidgets>) -> Self {
        Self {
            registry,
            widgets,
            sizes: HashMap::new(),
            fullscreen: false,
            title: String::new(),
        }
    }

    fn send(&self, window: WindowId, message: Message) {
        self.widgets.outbox.borrow_mut().push((window, message));
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::F11)) {
            self.fullscreen = !self.fullscreen;
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(self.fullscreen));
            let ids: Vec<WindowId> = self.registry.windows().map(|w| w.id()).collect();
            for id in ids {
                self.send(id, Message::Fullscreen(self.fullscreen));
            }
        }

        let Some(focused) = self.registry.most_recently_active() else {
            return;
        };
        let show_hidden = match self.widgets.chrome(focused) {
            Some(chrome) => chrome.borrow().toggle(Toggle::ShowHidden),
            None => false,
        };
        for message in keyboard::shortcuts(ctx, show_hidden) {
            self.send(focused, message);
        }
    }

    fn window_ui(&mut self, ctx: &egui::Context, id: WindowId) {
        let Some(window) = self.registry.window(id) else {
            return;
        };
        let Some(chrome) = self.widgets.chrome(id) else {
            return;
        };
        let tabs: Vec<TabLabel> = window
            .tabs()
            .iter()
            .map(|tab| TabLabel {
                id: tab.id(),
                label: tab.label.clone(),
                active: tab.is_active(),
            })
            .collect();
        let active: Option<TabId> = window.active_tab().map(|tab| tab.id());
        let history: Vec<HistoryItem> = window
            .active_tab()
            .map(|tab| {
                tab.history()
                    .entries()
                    .map(|(index, location, current)| HistoryItem {
                        index,
                        label: location.to_string(),
                        current,
                    })
                    .collect()
            })
            .unwrap_or_default();
        let (width, height) = window.size();
        let outbox = self.widgets.outbox.clone();
        let widgets = self.widgets.clone();

        let mut open = true;
        let mut chrome = chrome.borrow_mut();
        let title = if chrome.title.is_empty() {
            "kura".to_string()
        } else {
            chrome.title.clone()
        };
        let shown = egui::Window::new(title)
            .id(egui::Id::new(("kura_window", id.0)))
            .open(&mut open)
            .default_size([width as f32, height as f32])
            .collapsible(false)
            .resizable(true)
            .show(ctx, |ui| {
                let content_size = ui.available_size();
                egui::TopBottomPanel::top(egui::Id::new(("chrome_top", id.0))).show_inside(ui, |ui| {
                    chrome.menu_bar(ui, id, &outbox);
                    chrome.toolbar(ui, id, &history, &outbox);
                    chrome.tab_bar(ui, id, &tabs, &outbox);
                });
                egui::TopBottomPanel::bottom(egui::Id::new(("chrome_bottom", id.0)))
                    .show_inside(ui, |ui| chrome.status_bar(ui));

                let Some(tab) = active else {
                    return content_size;
                };
                if let Some(panel) = widgets.panel(id, tab) {
                    let mut panel = panel.borrow_mut();
                    if panel.visible {
                        let pending = std::mem::take(&mut panel.position_pending);
                        let mut side = egui::SidePanel::left(egui::Id::new(("side_panel", id.0)))
                            .resizable(true)
                            .width_range(layout::SIDE_PANEL_MIN..=layout::SIDE_PANEL_MAX);
                        if pending {
                            side = side.exact_width(panel.position as f32);
                        }
                        let bookmarks = chrome.bookmarks.clone();
                        let shown = side.show_inside(ui, |ui| {
                            panel.ui(ui, id, tab, &bookmarks, &outbox);
                        });
                        let position = shown.response.rect.width().round() as u32;
                        if !pending && position != panel.position {
                            panel.position = position;
                            outbox
                                .borrow_mut()
                                .push((id, Message::SplitterMoved { tab, position }));
                        }
                    }
                }
                egui::CentralPanel::default().show_inside(ui, |ui| {
                    if let Some(folder) = widgets.folder(id, tab) {
                        folder.borrow_mut().ui(ui, &outbox);
                    }
                });
                content_size
            });

        let Some(shown) = shown else {
            return;
        };
        let rect = shown.response.rect;
        if std::mem::take(&mut chrome.present_requested) {
            ctx.move_to_top(shown.response.layer_id);
            ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
        }
        drop(chrome);

        if !open {
            self.send(id, Message::CloseWindow);
            return;
        }
        let pressed_inside = ctx.input(|i| {
            i.pointer.any_pressed() && i.pointer.interact_pos().is_some_and(|pos| rect.contains(pos))
        });
        if pressed_inside && self.registry.most_recently_active() != Some(id) {
            self.send(id, Message::FocusGained);
        }
        let Some(content_size) = shown.inner else {
            return;
        };
        let size = (
            content_size.x.round() as u32,
            content_size.y.round() as u32,
        );
        if let Some(previous) = self.sizes.insert(id, size) {
            if previous != size {
                self.send(
                    id,
                    Message::Resized {
                        width: size.0,
                        height: size.1,
                    },
                );
            }
        }
    }

    /// Hand everything the widgets raised to the windows, then run idle work.
    fn deliver(&mut self) {
        loop {
            let pending = self.widgets.drain_outbox();
            if pending.is_empty() {
                break;
            }
            for (id, message) in pending {
                if let Err(e) = self.registry.dispatch(id, message) {
                    log::debug!("Dropped message for {}: {}", id, e);
                }
            }
        }
        self.registry.run_idle();
        self.widgets.collect_garbage();
        self.sizes.retain(|id, _| self.registry.window(*id).is_some());
    }
}

impl eframe::App for KuraApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        egui::CentralPanel::default().show(ctx, |_ui| {});
        // oldest first so the focused window is drawn last
        let ids: Vec<WindowId> = self.registry.windows().map(|w| w.id()).collect();
        for id in ids.into_iter().rev() {
            self.window_ui(ctx, id);
        }

        self.deliver();

        if self.registry.is_empty() {
            log::info!("Last window closed");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }
        if let Some(chrome) = self
            .registry
            .most_recently_active()
            .and_then(|id| self.widgets.chrome(id))
        {
            let title = chrome.borrow().title.clone();
            if title != self.title {
                ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!("{} - kura", title)));
                self.title = title;
            }
        }
    }
}

impl Drop for KuraApp {
    fn drop(&mut self) {
        self.registry.shutdown();
    }
}
