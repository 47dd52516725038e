mod shell;

use eframe::egui;
use kura::config::{ConfigService, ConfigStore};
use kura::io::LocalVfs;
use kura::model::{FileBookmarks, Location};
use kura::registry::WindowRegistry;
use kura::task::TaskQueue;
use kura::window::WindowContext;
use shell::{KuraApp, ShellWidgets};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// Folders named on the command line; the current folder when there are none.
fn startup_locations() -> Vec<Location> {
    let cwd = std::env::current_dir().ok();
    let mut locations: Vec<Location> = std::env::args()
        .skip(1)
        .filter_map(|arg| {
            let parsed = if arg.contains("://") || arg.starts_with('~') || Path::new(&arg).is_absolute() {
                Location::parse(&arg)
            } else {
                cwd.as_ref()
                    .map(|cwd| Location::new(cwd.join(&arg)))
                    .ok_or_else(|| kura::NavError::InvalidLocation(arg.clone()))
            };
            parsed
                .inspect_err(|e| log::warn!("Ignoring argument {:?}: {}", arg, e))
                .ok()
        })
        .collect();
    if locations.is_empty() {
        locations.extend(cwd.map(Location::new).or_else(Location::home));
    }
    locations
}

fn build_registry(widgets: Rc<ShellWidgets>) -> (WindowRegistry, (u32, u32)) {
    let config = ConfigService::load().into_shared();
    let window_config = config.borrow().window_config();
    let ctx = WindowContext {
        config,
        factory: widgets,
        vfs: Rc::new(LocalVfs),
        bookmarks: Rc::new(RefCell::new(FileBookmarks::load())),
        tasks: Rc::new(RefCell::new(TaskQueue::new())),
    };
    let mut registry = WindowRegistry::new(ctx);

    let mut locations = startup_locations().into_iter();
    if let Some(first) = locations.next() {
        let opened = registry.new_window(&first).or_else(|e| {
            log::warn!("Cannot open {}: {}", first, e);
            let home = Location::home().ok_or(e)?;
            registry.new_window(&home)
        });
        if let Err(e) = opened {
            log::error!("No folder could be opened: {}", e);
        }
    }
    // remaining arguments become tabs of the first window
    for location in locations {
        if let Err(e) = registry.open_path_in_best_window(&location) {
            log::warn!("Cannot open {}: {}", location, e);
        }
    }
    (registry, (window_config.width, window_config.height))
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::new()
        .filter_level(if cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .init();

    let widgets = Rc::new(ShellWidgets::default());
    let (registry, (width, height)) = build_registry(widgets.clone());
    if registry.is_empty() {
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width as f32 + 40.0, height as f32 + 60.0])
            .with_title("kura"),
        ..Default::default()
    };

    eframe::run_native(
        "kura",
        options,
        Box::new(move |_cc| Ok(Box::new(KuraApp::new(registry, widgets)))),
    )
}
