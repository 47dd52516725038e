// Keyboard and mouse shortcuts of the focused window
use eframe::egui;
use kura::collab::{ControlValue, Toggle};
use kura::message::Message;

/// Translate this frame's shortcuts into window messages.
pub fn shortcuts(ctx: &egui::Context, show_hidden: bool) -> Vec<Message> {
    let mut messages = Vec::new();

    // Tabs
    if ctx.input(|i| i.key_pressed(egui::Key::T) && i.modifiers.ctrl) {
        messages.push(Message::NewTab);
    }
    if ctx.input(|i| i.key_pressed(egui::Key::W) && i.modifiers.ctrl) {
        messages.push(Message::CloseActiveTab);
    }
    if ctx.input(|i| i.key_pressed(egui::Key::N) && i.modifiers.ctrl) {
        messages.push(Message::NewWindow);
    }
    if ctx.input(|i| {
        i.modifiers.ctrl
            && ((i.key_pressed(egui::Key::Tab) && !i.modifiers.shift)
                || i.key_pressed(egui::Key::PageDown))
    }) {
        messages.push(Message::NextTab);
    }
    if ctx.input(|i| {
        i.modifiers.ctrl
            && ((i.key_pressed(egui::Key::Tab) && i.modifiers.shift)
                || i.key_pressed(egui::Key::PageUp))
    }) {
        messages.push(Message::PrevTab);
    }

    // Alt+1..9 picks the nth tab, Alt+0 the tenth
    for digit in 0..=9u8 {
        let key_name = digit.to_string();
        if let Some(key) = egui::Key::from_name(&key_name) {
            if ctx.input(|input| input.modifiers.alt && input.key_pressed(key)) {
                let index = if digit == 0 { 9 } else { usize::from(digit) - 1 };
                messages.push(Message::NthTab(index));
            }
        }
    }

    // History and navigation
    if ctx.input(|i| i.modifiers.alt && i.key_pressed(egui::Key::ArrowLeft))
        || ctx.input(|i| i.pointer.button_pressed(egui::PointerButton::Extra1))
    {
        messages.push(Message::GoBack);
    }
    if ctx.input(|i| i.modifiers.alt && i.key_pressed(egui::Key::ArrowRight))
        || ctx.input(|i| i.pointer.button_pressed(egui::PointerButton::Extra2))
    {
        messages.push(Message::GoForward);
    }
    if ctx.input(|i| i.modifiers.alt && i.key_pressed(egui::Key::ArrowUp)) {
        messages.push(Message::GoUp);
    }
    if ctx.input(|i| i.modifiers.alt && i.key_pressed(egui::Key::Home)) {
        messages.push(Message::GoHome);
    }
    if ctx.input(|i| i.key_pressed(egui::Key::F5) || (i.modifiers.ctrl && i.key_pressed(egui::Key::R))) {
        messages.push(Message::Reload);
    }
    if ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::L)) {
        messages.push(Message::FocusLocation(None));
    }
    if ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::H)) {
        messages.push(Message::Control(ControlValue::Toggle(
            Toggle::ShowHidden,
            !show_hidden,
        )));
    }

    // Plain keys only while no text field has focus
    if !ctx.wants_keyboard_input() {
        if ctx.input(|i| i.key_pressed(egui::Key::Backspace) && i.modifiers.is_none()) {
            messages.push(Message::GoUp);
        }
        let seed = ctx.input(|i| {
            i.events.iter().find_map(|event| match event {
                egui::Event::Text(text) if text == "/" || text == "~" => Some(text.clone()),
                _ => None,
            })
        });
        if let Some(seed) = seed {
            messages.push(Message::FocusLocation(Some(seed)));
        }
    }

    messages
}
