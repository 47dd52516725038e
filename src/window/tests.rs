use super::MainWindow;
use crate::collab::{Action, ControlValue, SidePanelMode, StatusSlot, Toggle};
use crate::config::{ConfigStore, OpenMethod};
use crate::message::{ClickKind, ClickedItem, Effect, Message, PointerButton, SidePanelEvent};
use crate::model::{Bookmark, Location, TabId};
use crate::state::{SortKey, SortOptions, SortOrder, ViewField};
use crate::testing::{Harness, RecordingFactory};

fn loc(path: &str) -> Location {
    Location::new(path)
}

fn open(h: &Harness, path: &str) -> MainWindow {
    MainWindow::new(h.context(), &loc(path)).unwrap()
}

fn active_location(win: &MainWindow) -> Location {
    win.active_tab().unwrap().location().clone()
}

#[test]
fn test_new_window_has_one_active_tab() {
    let h = Harness::new();
    h.bookmarks
        .borrow_mut()
        .items
        .push(Bookmark::new("Music", loc("/home/u/Music")));
    let win = open(&h, "/home/u");

    assert_eq!(win.tabs().len(), 1);
    assert_eq!(win.active_index(), Some(0));
    assert!(win.tabs()[0].is_active());

    let controls = h.factory.controls(win.id());
    let log = controls.log();
    assert_eq!(log.state.title, "u");
    assert_eq!(log.state.location_text, "/home/u");
    assert_eq!(log.sensitive(Action::Back), Some(false));
    assert_eq!(log.sensitive(Action::Cut), Some(false));
    assert!(!log.state.tabs_visible);
    assert_eq!(log.state.bookmarks.len(), 1);
    assert_eq!(log.state.view_modes.len(), 2);
}

#[test]
fn test_chdir_records_history_and_syncs_controls() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    win.chdir(&loc("/a/b")).unwrap();

    let tab = win.active_tab().unwrap();
    assert_eq!(tab.history().len(), 2);
    assert_eq!(tab.location(), &loc("/a/b"));

    let view = h.factory.view(win.id(), TabId(1));
    assert_eq!(view.log().location, Some(loc("/a/b")));

    let controls = h.factory.controls(win.id());
    assert_eq!(controls.log().sensitive(Action::Back), Some(true));
    assert_eq!(controls.log().sensitive(Action::Forward), Some(false));
    assert_eq!(controls.log().state.title, "b");
}

#[test]
fn test_side_panel_echo_does_not_reenter_chdir() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    win.chdir(&loc("/b")).unwrap();

    // the echoing panel answered the programmatic chdir; it must be dropped
    let panel = h.factory.panel(win.id(), TabId(1));
    assert_eq!(panel.log().chdir_calls, 2);
    assert_eq!(win.active_tab().unwrap().history().len(), 2);

    // the block is lifted afterwards: a real click navigates
    let effect = win.update(Message::SidePanel {
        tab: TabId(1),
        event: SidePanelEvent::Chdir {
            button: PointerButton::Primary,
            location: loc("/c"),
        },
    });
    assert_eq!(effect, Effect::None);
    assert_eq!(active_location(&win), loc("/c"));
    assert_eq!(win.active_tab().unwrap().history().len(), 3);
    assert_eq!(h.factory.view(win.id(), TabId(1)).log().focus_grabs, 1);
}

#[test]
fn test_programmatic_control_push_never_commits() {
    let h = Harness::new();
    let folder = loc("/photos");
    let mut own = h.config.borrow().default_view_state();
    own.owns_config = true;
    own.sort.key = SortKey::Modified;
    own.show_hidden = true;
    h.config.borrow_mut().set_override(&folder, &own);
    let before = h.config.borrow().config().clone();
    let saves = h.saves_requested();

    let mut win = open(&h, "/home");
    win.chdir(&folder).unwrap();
    win.go_back().unwrap();
    win.go_forward().unwrap();

    let controls = h.factory.controls(win.id());
    assert!(controls.log().writes > 0);
    assert_eq!(controls.log().state.sort_key, Some(SortKey::Modified));
    assert_eq!(controls.log().toggle(Toggle::ShowHidden), Some(true));
    assert_eq!(h.saves_requested(), saves);
    assert_eq!(h.config.borrow().config(), &before);
}

#[test]
fn test_user_toggle_commits_to_global_default_once() {
    let h = Harness::new();
    let mut win = open(&h, "/f");
    let show_hidden = Message::Control(ControlValue::Toggle(Toggle::ShowHidden, true));
    let _ = win.update(show_hidden.clone());
    let _ = win.update(show_hidden);

    assert!(h.config.borrow().default_view_state().show_hidden);
    assert_eq!(h.config.borrow().get_override(&loc("/f")), None);
    assert_eq!(h.saves_requested(), 1);

    let view = h.factory.view(win.id(), TabId(1));
    assert!(view.log().view_state.as_ref().unwrap().show_hidden);

    // a tab opened later inherits the new default
    win.add_tab(&loc("/g"), true).unwrap();
    assert!(win.active_tab().unwrap().view_state.show_hidden);
}

#[test]
fn test_per_folder_toggle_owns_then_releases_config() {
    let h = Harness::new();
    let mut win = open(&h, "/f");
    let _ = win.update(Message::Control(ControlValue::Toggle(Toggle::SavePerFolder, true)));
    let _ = win.update(Message::Control(ControlValue::SortKey(SortKey::Size)));

    let stored = h.config.borrow().get_override(&loc("/f")).unwrap();
    assert_eq!(stored.sort.key, SortKey::Size);
    assert!(stored.columns.is_some());
    assert_eq!(h.config.borrow().default_view_state().sort.key, SortKey::Name);

    let _ = win.update(Message::Control(ControlValue::Toggle(Toggle::SavePerFolder, false)));
    assert_eq!(h.config.borrow().get_override(&loc("/f")), None);
    assert_eq!(
        win.active_tab().unwrap().view_state,
        h.config.borrow().default_view_state()
    );
    let controls = h.factory.controls(win.id());
    assert_eq!(controls.log().state.sort_key, Some(SortKey::Name));
    assert_eq!(controls.log().toggle(Toggle::SavePerFolder), Some(false));
}

#[test]
fn test_switching_tabs_round_trip_restores_chrome() {
    let h = Harness::new();
    let mut own = h.config.borrow().default_view_state();
    own.owns_config = true;
    own.sort.key = SortKey::Size;
    own.sort.order = SortOrder::Descending;
    h.config.borrow_mut().set_override(&loc("/a"), &own);

    let mut win = open(&h, "/b");
    win.chdir(&loc("/a")).unwrap();
    win.add_tab(&loc("/c"), false).unwrap();
    let _ = win.update(Message::StatusText {
        tab: TabId(1),
        slot: StatusSlot::Normal,
        text: Some("3 items".into()),
    });

    let controls = h.factory.controls(win.id());
    let before = controls.log().state.clone();

    win.switch_tab(TabId(2)).unwrap();
    {
        let log = controls.log();
        assert_eq!(log.state.sort_key, Some(SortKey::Name));
        assert_eq!(log.state.title, "c");
        assert_eq!(log.sensitive(Action::Back), Some(false));
        assert_eq!(log.state.status[0], None);
    }

    win.switch_tab(TabId(1)).unwrap();
    assert_eq!(controls.log().state, before);
    assert_eq!(
        win.tabs().iter().filter(|tab| tab.is_active()).count(),
        1
    );
}

#[test]
fn test_add_tab_activates_only_on_request() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    let index = win.add_tab(&loc("/b"), false).unwrap();
    assert_eq!(index, 1);
    assert_eq!(win.active_index(), Some(0));
    assert!(!h.factory.view(win.id(), TabId(2)).log().active);
    assert!(h.factory.controls(win.id()).log().state.tabs_visible);

    win.add_tab(&loc("/c"), true).unwrap();
    assert_eq!(win.active_index(), Some(2));
    assert!(h.factory.view(win.id(), TabId(3)).log().active);
    assert!(!h.factory.view(win.id(), TabId(1)).log().active);
}

#[test]
fn test_always_show_tabs_setting() {
    let h = Harness::new();
    let mut window_config = h.config.borrow().window_config();
    window_config.always_show_tabs = true;
    h.config.borrow_mut().set_window_config(window_config);

    let win = open(&h, "/a");
    assert!(h.factory.controls(win.id()).log().state.tabs_visible);
}

#[test]
fn test_closing_only_tab_destroys_window() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    let effect = win.update(Message::CloseTab(TabId(1)));

    assert_eq!(effect, Effect::Destroyed);
    assert!(win.is_destroyed());
    assert!(win.tabs().is_empty());
    assert_eq!(win.active_index(), None);
    assert!(h.factory.controls(win.id()).log().closed);
    assert!(h.factory.view(win.id(), TabId(1)).log().detached);
    assert!(h.factory.panel(win.id(), TabId(1)).log().detached);

    // later messages are dropped
    assert_eq!(win.update(Message::GoHome), Effect::None);
}

#[test]
fn test_closing_one_of_many_tabs_keeps_valid_active_tab() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    win.add_tab(&loc("/b"), false).unwrap();
    win.add_tab(&loc("/c"), true).unwrap();

    // the active last tab closes: its predecessor takes over
    assert_eq!(win.update(Message::CloseActiveTab), Effect::None);
    assert_eq!(win.tabs().len(), 2);
    assert_eq!(active_location(&win), loc("/b"));
    assert!(h.factory.view(win.id(), TabId(2)).log().active);

    // a background tab before the active one closes: the active tab stays
    win.close_tab(TabId(1)).unwrap();
    assert_eq!(win.tabs().len(), 1);
    assert_eq!(win.active_index(), Some(0));
    assert_eq!(active_location(&win), loc("/b"));
    assert!(!h.factory.controls(win.id()).log().state.tabs_visible);
}

#[test]
fn test_closing_middle_active_tab_selects_same_index() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    win.add_tab(&loc("/b"), true).unwrap();
    win.add_tab(&loc("/c"), false).unwrap();

    win.close_tab(TabId(2)).unwrap();
    assert_eq!(active_location(&win), loc("/c"));
    assert_eq!(h.factory.controls(win.id()).log().state.title, "c");
}

#[test]
fn test_back_and_forward_restore_location() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    win.chdir(&loc("/b")).unwrap();
    win.go_back().unwrap();
    assert_eq!(active_location(&win), loc("/a"));
    assert_eq!(win.active_tab().unwrap().history().current_index(), 0);
    assert_eq!(
        h.factory.controls(win.id()).log().sensitive(Action::Forward),
        Some(true)
    );

    win.go_forward().unwrap();
    assert_eq!(active_location(&win), loc("/b"));
    assert_eq!(win.active_tab().unwrap().history().current_index(), 1);
    assert_eq!(win.active_tab().unwrap().history().len(), 2);

    // past the end is a quiet no-op
    assert_eq!(win.update(Message::GoForward), Effect::None);
    assert_eq!(active_location(&win), loc("/b"));
}

#[test]
fn test_jump_history_and_reload_keep_entries() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    win.chdir(&loc("/b")).unwrap();
    win.chdir(&loc("/c")).unwrap();

    let _ = win.update(Message::JumpHistory(0));
    assert_eq!(active_location(&win), loc("/a"));
    assert_eq!(win.active_tab().unwrap().history().len(), 3);

    let _ = win.update(Message::Reload);
    assert_eq!(win.active_tab().unwrap().history().len(), 3);
    assert_eq!(h.factory.view(win.id(), TabId(1)).log().reloads, 1);
}

#[test]
fn test_go_up_stops_at_root() {
    let h = Harness::new();
    let mut win = open(&h, "/usr/share");
    let _ = win.update(Message::GoUp);
    assert_eq!(active_location(&win), loc("/usr"));
    let _ = win.update(Message::GoUp);
    let _ = win.update(Message::GoUp);
    assert_eq!(active_location(&win), loc("/"));
    assert_eq!(win.active_tab().unwrap().history().len(), 3);
}

#[test]
fn test_invalid_location_keeps_state() {
    let h = Harness::new();
    h.vfs.missing.borrow_mut().insert(loc("/gone"));
    let mut win = open(&h, "/a");

    assert_eq!(
        win.update(Message::LocationActivated("/gone".into())),
        Effect::None
    );
    assert_eq!(active_location(&win), loc("/a"));
    assert_eq!(win.active_tab().unwrap().history().len(), 1);
    assert!(h.tasks.borrow().is_empty());
    let controls = h.factory.controls(win.id());
    assert!(controls.log().state.notice.is_some());

    let _ = win.update(Message::LocationActivated("not/absolute".into()));
    assert_eq!(active_location(&win), loc("/a"));

    // a successful chdir clears the notice
    let _ = win.update(Message::LocationActivated("/b".into()));
    assert_eq!(controls.log().state.notice, None);
}

#[test]
fn test_cancel_location_edit_restores_text() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    let _ = win.update(Message::FocusLocation(Some("/".into())));
    let _ = win.update(Message::LocationEditCancelled);

    let controls = h.factory.controls(win.id());
    assert_eq!(controls.log().focus_requests, vec![Some("/".to_string())]);
    assert_eq!(controls.log().state.location_text, "/a");
}

#[test]
fn test_location_activation_defers_focus_once() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    let _ = win.update(Message::LocationActivated("/b".into()));
    let _ = win.update(Message::LocationActivated("/c".into()));

    let view = h.factory.view(win.id(), TabId(1));
    assert_eq!(view.log().focus_grabs, 0);

    let mut pending = 0;
    while h.tasks.borrow_mut().pop().is_some() {
        pending += 1;
    }
    assert_eq!(pending, 1);

    win.run_deferred_focus();
    assert_eq!(view.log().focus_grabs, 1);
}

#[test]
fn test_teardown_cancels_deferred_focus() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    let _ = win.update(Message::LocationActivated("/b".into()));
    assert!(!h.tasks.borrow().is_empty());

    assert_eq!(win.update(Message::CloseWindow), Effect::Destroyed);
    assert!(h.tasks.borrow().is_empty());
    // running it anyway is harmless
    win.run_deferred_focus();
}

#[test]
fn test_tab_without_content_view_is_tolerated() {
    let h = Harness::with_factory(RecordingFactory {
        create_views: false,
        ..RecordingFactory::default()
    });
    let mut win = open(&h, "/a");
    let controls = h.factory.controls(win.id());
    assert_eq!(controls.log().sensitive(Action::Copy), Some(false));
    assert!(win.selected_paths().is_empty());
    win.chdir(&loc("/b")).unwrap();
    win.run_deferred_focus();

    let view = crate::testing::RecordingView::default();
    view.select(&["/b/x", "/b/y"]);
    win.attach_content_view(TabId(1), Box::new(view.clone())).unwrap();

    assert_eq!(view.log().location, Some(loc("/b")));
    assert!(view.log().active);
    assert_eq!(controls.log().sensitive(Action::Copy), Some(true));
    assert_eq!(win.selected_paths(), vec![loc("/b/x"), loc("/b/y")]);
}

#[test]
fn test_selection_change_of_active_tab_updates_sensitivity() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    win.add_tab(&loc("/b"), false).unwrap();
    let controls = h.factory.controls(win.id());

    let _ = win.update(Message::SelectionChanged { tab: TabId(2), count: 4 });
    assert_eq!(controls.log().sensitive(Action::Delete), Some(false));

    let _ = win.update(Message::SelectionChanged { tab: TabId(1), count: 4 });
    for action in Action::SELECTION {
        assert_eq!(controls.log().sensitive(action), Some(true));
    }
}

#[test]
fn test_splitter_drag_broadcasts_to_other_tabs() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    win.add_tab(&loc("/b"), false).unwrap();

    let _ = win.update(Message::SplitterMoved {
        tab: TabId(1),
        position: 300,
    });
    assert_eq!(win.splitter_position(), 300);
    assert!(win.tabs().iter().all(|tab| tab.splitter_position() == 300));
    assert_eq!(h.factory.panel(win.id(), TabId(2)).log().position, Some(300));
    assert_eq!(h.factory.panel(win.id(), TabId(1)).log().position, Some(150));
    assert_eq!(h.config.borrow().window_config().splitter_position, 300);
    assert_eq!(h.saves_requested(), 1);

    // new tabs pick up the shared position
    win.add_tab(&loc("/c"), false).unwrap();
    assert_eq!(h.factory.panel(win.id(), TabId(3)).log().position, Some(300));
}

#[test]
fn test_middle_clicks_open_background_tabs() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    let _ = win.update(Message::LocationClicked {
        tab: TabId(1),
        kind: ClickKind::MiddleClick,
        item: Some(ClickedItem {
            location: loc("/a/sub"),
            is_dir: true,
        }),
    });
    let _ = win.update(Message::SidePanel {
        tab: TabId(1),
        event: SidePanelEvent::Chdir {
            button: PointerButton::Middle,
            location: loc("/data"),
        },
    });

    assert_eq!(win.tabs().len(), 3);
    assert_eq!(win.active_index(), Some(0));
    assert_eq!(win.tabs()[1].location(), &loc("/a/sub"));
    assert_eq!(win.tabs()[2].location(), &loc("/data"));
}

#[test]
fn test_activated_folder_navigates_and_files_are_ignored() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    let _ = win.update(Message::LocationClicked {
        tab: TabId(1),
        kind: ClickKind::Activated,
        item: Some(ClickedItem {
            location: loc("/a/readme.txt"),
            is_dir: false,
        }),
    });
    assert_eq!(active_location(&win), loc("/a"));

    let _ = win.update(Message::LocationClicked {
        tab: TabId(1),
        kind: ClickKind::Activated,
        item: Some(ClickedItem {
            location: loc("/a/docs"),
            is_dir: true,
        }),
    });
    assert_eq!(active_location(&win), loc("/a/docs"));
}

#[test]
fn test_sort_change_from_view_is_committed_and_mirrored() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    let sort = SortOptions {
        key: SortKey::Modified,
        order: SortOrder::Descending,
        ..SortOptions::default()
    };
    let _ = win.update(Message::SortChanged { tab: TabId(1), sort });

    let default = h.config.borrow().default_view_state();
    assert_eq!(default.sort.key, SortKey::Modified);
    assert_eq!(default.sort.order, SortOrder::Descending);
    let controls = h.factory.controls(win.id());
    assert_eq!(controls.log().state.sort_key, Some(SortKey::Modified));
    assert_eq!(controls.log().state.sort_order, Some(SortOrder::Descending));

    let _ = win.update(Message::HiddenChanged {
        tab: TabId(1),
        show_hidden: true,
    });
    assert!(h.config.borrow().default_view_state().show_hidden);
    assert_eq!(controls.log().toggle(Toggle::ShowHidden), Some(true));
}

#[test]
fn test_columns_follow_ownership() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    let columns = vec!["name".to_string(), "size".to_string()];
    let _ = win.update(Message::ColumnsChanged {
        tab: TabId(1),
        columns: columns.clone(),
    });
    assert_eq!(h.config.borrow().default_columns(), columns);
    assert_eq!(win.active_tab().unwrap().view_state.columns, None);

    let _ = win.update(Message::Control(ControlValue::Toggle(Toggle::SavePerFolder, true)));
    let _ = win.update(Message::ColumnsChanged {
        tab: TabId(1),
        columns: vec!["name".to_string()],
    });
    assert_eq!(h.config.borrow().default_columns(), columns);
    assert_eq!(
        h.config.borrow().get_override(&loc("/a")).unwrap().columns,
        Some(vec!["name".to_string()])
    );
}

#[test]
fn test_side_panel_mode_and_visibility() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    win.add_tab(&loc("/b"), false).unwrap();

    let _ = win.update(Message::Control(ControlValue::SidePanelMode(
        SidePanelMode::DirTree,
    )));
    assert_eq!(
        h.factory.panel(win.id(), TabId(2)).log().mode,
        Some(SidePanelMode::DirTree)
    );
    assert_eq!(
        h.config.borrow().window_config().side_panel_mode,
        SidePanelMode::DirTree
    );
    let controls = h.factory.controls(win.id());
    assert_eq!(controls.log().state.side_panel_mode, Some(SidePanelMode::DirTree));

    let _ = win.update(Message::Control(ControlValue::Toggle(
        Toggle::ShowSidePanel,
        false,
    )));
    assert!(!win.side_panel_visible());
    assert_eq!(h.factory.panel(win.id(), TabId(1)).log().visible, Some(false));
    assert!(!h.config.borrow().window_config().side_panel_visible);
}

#[test]
fn test_status_reaches_bar_only_for_active_tab() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    win.add_tab(&loc("/b"), false).unwrap();
    let controls = h.factory.controls(win.id());

    let _ = win.update(Message::StatusText {
        tab: TabId(2),
        slot: StatusSlot::FsInfo,
        text: Some("Free space: 2 GB".into()),
    });
    assert_eq!(controls.log().state.status[2], None);

    win.switch_tab(TabId(2)).unwrap();
    assert_eq!(
        controls.log().state.status[2].as_deref(),
        Some("Free space: 2 GB")
    );
}

#[test]
fn test_tab_navigation_wraps() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    win.add_tab(&loc("/b"), false).unwrap();
    win.add_tab(&loc("/c"), true).unwrap();

    let _ = win.update(Message::NextTab);
    assert_eq!(win.active_index(), Some(0));
    let _ = win.update(Message::PrevTab);
    assert_eq!(win.active_index(), Some(2));
    let _ = win.update(Message::NthTab(1));
    assert_eq!(win.active_index(), Some(1));
    let _ = win.update(Message::NthTab(9));
    assert_eq!(win.active_index(), Some(1));
}

#[test]
fn test_new_tab_and_new_window_start_at_current_folder() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    assert_eq!(win.update(Message::NewTab), Effect::None);
    assert_eq!(win.active_index(), Some(1));
    assert_eq!(active_location(&win), loc("/a"));
    assert_eq!(
        win.update(Message::NewWindow),
        Effect::OpenWindow(loc("/a"))
    );
}

#[test]
fn test_bookmarks_open_method_and_add() {
    let h = Harness::new();
    h.bookmarks
        .borrow_mut()
        .items
        .push(Bookmark::new("Docs", loc("/docs")));
    let mut win = open(&h, "/a");

    let _ = win.update(Message::OpenBookmark(0));
    assert_eq!(active_location(&win), loc("/docs"));

    let mut window_config = h.config.borrow().window_config();
    window_config.bookmark_open_method = OpenMethod::NewWindow;
    h.config.borrow_mut().set_window_config(window_config);
    assert_eq!(
        win.update(Message::OpenBookmark(0)),
        Effect::OpenWindow(loc("/docs"))
    );
    assert_eq!(win.update(Message::OpenBookmark(5)), Effect::None);

    assert_eq!(
        win.update(Message::AddBookmark(String::new())),
        Effect::BookmarksChanged
    );
    assert_eq!(h.bookmarks.borrow().items[1].name, "docs");

    let _ = win.update(Message::BookmarksChanged);
    assert_eq!(h.factory.controls(win.id()).log().state.bookmarks.len(), 2);
}

#[test]
fn test_teardown_records_window_size() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    let _ = win.update(Message::Resized {
        width: 800,
        height: 600,
    });
    let _ = win.update(Message::Fullscreen(true));
    let _ = win.update(Message::Resized {
        width: 1920,
        height: 1080,
    });
    let _ = win.update(Message::Fullscreen(false));
    let _ = win.update(Message::CloseWindow);

    let window_config = h.config.borrow().window_config();
    assert_eq!((window_config.width, window_config.height), (800, 600));
}

#[test]
fn test_fullscreen_teardown_keeps_stored_size() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    let _ = win.update(Message::Fullscreen(true));
    let _ = win.update(Message::CloseWindow);
    assert_eq!(h.saves_requested(), 0);
}

#[test]
fn test_background_tab_commit_leaves_chrome_alone() {
    let h = Harness::new();
    let mut own = h.config.borrow().default_view_state();
    own.owns_config = true;
    h.config.borrow_mut().set_override(&loc("/a"), &own);
    let mut win = open(&h, "/a");
    win.add_tab(&loc("/b"), false).unwrap();
    let controls = h.factory.controls(win.id());
    let writes = controls.log().writes;

    let _ = win.update(Message::SortChanged {
        tab: TabId(2),
        sort: SortOptions {
            key: SortKey::Extension,
            ..SortOptions::default()
        },
    });
    assert_eq!(controls.log().writes, writes);
    assert_eq!(
        win.tab(TabId(2)).unwrap().view_state.get(&ViewField::SortKey(SortKey::Name)),
        ViewField::SortKey(SortKey::Extension)
    );
}

#[test]
fn test_inheriting_tabs_follow_global_changes() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    win.add_tab(&loc("/b"), false).unwrap();

    let _ = win.update(Message::Control(ControlValue::SortKey(SortKey::Size)));
    assert_eq!(h.config.borrow().default_view_state().sort.key, SortKey::Size);
    assert_eq!(win.tab(TabId(2)).unwrap().view_state.sort.key, SortKey::Size);
    let view = h.factory.view(win.id(), TabId(2));
    assert_eq!(view.log().view_state.as_ref().unwrap().sort.key, SortKey::Size);

    win.switch_tab(TabId(2)).unwrap();
    let controls = h.factory.controls(win.id());
    assert_eq!(controls.log().state.sort_key, Some(SortKey::Size));

    let _ = win.update(Message::Control(ControlValue::Toggle(Toggle::SavePerFolder, true)));
    let stored = h.config.borrow().get_override(&loc("/b")).unwrap();
    assert_eq!(stored.sort.key, SortKey::Size);
}

#[test]
fn test_switching_picks_up_default_changed_elsewhere() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    win.add_tab(&loc("/b"), false).unwrap();
    let mut other = open(&h, "/c");

    let _ = other.update(Message::Control(ControlValue::Toggle(Toggle::ShowHidden, true)));
    assert!(!win.tab(TabId(2)).unwrap().view_state.show_hidden);

    win.switch_tab(TabId(2)).unwrap();
    assert!(win.active_tab().unwrap().view_state.show_hidden);
    let controls = h.factory.controls(win.id());
    assert_eq!(controls.log().toggle(Toggle::ShowHidden), Some(true));

    let _ = win.update(Message::Control(ControlValue::Toggle(Toggle::SavePerFolder, true)));
    assert!(h.config.borrow().get_override(&loc("/b")).unwrap().show_hidden);
}

#[test]
fn test_history_step_into_vanished_folder_keeps_state() {
    let h = Harness::new();
    let mut win = open(&h, "/a");
    win.chdir(&loc("/b")).unwrap();
    win.chdir(&loc("/c")).unwrap();
    h.vfs.missing.borrow_mut().insert(loc("/a"));
    h.vfs.missing.borrow_mut().insert(loc("/b"));

    assert!(win.go_back().is_err());
    assert_eq!(active_location(&win), loc("/c"));
    assert_eq!(win.active_tab().unwrap().history().current_index(), 2);
    let controls = h.factory.controls(win.id());
    assert!(controls.log().state.notice.is_some());

    assert_eq!(win.update(Message::JumpHistory(0)), Effect::None);
    assert_eq!(active_location(&win), loc("/c"));
    assert_eq!(win.active_tab().unwrap().history().current_index(), 2);
    assert_eq!(controls.log().sensitive(Action::Forward), Some(false));

    // once the folder is back the step goes through
    h.vfs.missing.borrow_mut().clear();
    win.go_back().unwrap();
    assert_eq!(active_location(&win), loc("/b"));
    assert_eq!(win.active_tab().unwrap().history().len(), 3);
    assert_eq!(controls.log().state.notice, None);
}
