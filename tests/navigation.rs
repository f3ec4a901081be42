mod common;

use common::{FakeSite, Harness, record};
use crossterm::event::KeyCode;
use lazywp::app::{Focus, Mode};
use lazywp::commands::{Plugins, Themes};
use lazywp::content::ContentLine;
use lazywp::dialog::DialogKind;
use lazywp::registry::Registry;

const PLUGINS: usize = 1;
const THEMES: usize = 2;

#[test]
fn starts_on_dashboard_without_touching_the_site() {
    let h = Harness::new(FakeSite::default(), 100, 30);
    assert_eq!(h.app.state().active, 0);
    assert_eq!(h.app.mode(), Mode::ContentFocused);
    assert!(h.site.calls().is_empty());
    let screen = h.screen();
    assert!(screen.contains("Welcome to lazywp"));
    assert!(screen.contains(" LazyWP "));
    assert!(screen.contains("tab: switch pane | ?: help | q: quit"));
}

#[test]
fn tab_then_second_menu_entry_opens_plugins() {
    let site = FakeSite::with_plugins(&["akismet", "hello-dolly"]);
    let mut h = Harness::new(site, 100, 30);

    h.press(KeyCode::Tab);
    assert_eq!(h.app.mode(), Mode::MenuFocused);
    h.press(KeyCode::Down);
    h.press(KeyCode::Enter);

    let state = h.app.state();
    assert_eq!(state.active, PLUGINS);
    assert_eq!(state.focus, Focus::Content);
    assert_eq!((state.cursor, state.scroll), (0, 0));
    assert_eq!(h.app.content().entry_count(), 2);

    let screen = h.screen();
    assert!(screen.contains(" Plugins "));
    assert!(screen.contains("Name"));
    assert!(screen.contains("Update Available"));
    assert!(screen.contains("akismet"));
    assert!(screen.contains("a: activate | d: deactivate"));
}

#[test]
fn second_menu_entry_of_plugins_and_themes_is_themes() {
    let registry = Registry::new().with(Plugins).unwrap().with(Themes).unwrap();
    let site = FakeSite::with_plugins(&["akismet", "jetpack"]);
    let mut h = Harness::with_registry(registry, site, 100, 30);
    h.press(KeyCode::Down);
    assert_eq!(h.app.state().cursor, 1);

    h.open_module(1);
    assert_eq!(h.app.state().active, 1);
    assert_eq!(h.app.state().cursor, 0);
    assert!(h.screen().contains(" Themes "));
    assert!(h.site.calls().contains(&"theme list".to_string()));
}

#[test]
fn empty_plugin_list_shows_placeholder_and_ignores_actions() {
    let mut h = Harness::new(FakeSite::default(), 100, 30);
    h.open_module(PLUGINS);
    assert_eq!(
        h.app.content().lines,
        vec![ContentLine::plain("No plugins found.")]
    );

    let before = *h.app.state();
    for key in ['a', 'd', 'r', 'u', 't', 'v'] {
        h.press(KeyCode::Char(key));
        assert_eq!(*h.app.state(), before, "key {key}");
        assert!(h.app.dialog().is_none(), "key {key}");
    }
    assert!(h.site.mutations().is_empty());
    assert!(h.screen().contains("No plugins found."));
}

#[test]
fn empty_theme_list_shows_its_own_placeholder() {
    let mut h = Harness::new(FakeSite::default(), 100, 30);
    h.open_module(THEMES);
    assert_eq!(h.app.state().active, THEMES);
    assert!(h.screen().contains("No themes found."));
}

#[test]
fn deleting_the_last_row_clamps_the_cursor() {
    let site = FakeSite::with_plugins(&["a1", "b2", "c3", "d4", "e5"]);
    let mut h = Harness::new(site, 100, 30);
    h.open_module(PLUGINS);
    for _ in 0..4 {
        h.press(KeyCode::Down);
    }
    assert_eq!(h.app.state().cursor, 4);

    h.press(KeyCode::Char('r'));
    assert_eq!(h.app.mode(), Mode::DialogOpen);
    assert_eq!(
        h.app.dialog().unwrap().lines,
        vec!["Are you sure you want to delete e5?".to_string()]
    );
    h.press(KeyCode::Enter);

    assert!(h.app.dialog().is_none());
    assert_eq!(h.site.mutations(), vec!["plugin delete e5"]);
    assert_eq!(h.app.content().entry_count(), 4);
    assert_eq!(h.app.state().cursor, 3);
    assert!(!h.app.state().reload);
}

#[test]
fn declining_the_confirm_leaves_the_site_alone() {
    let site = FakeSite::with_plugins(&["akismet"]);
    let mut h = Harness::new(site, 100, 30);
    h.open_module(PLUGINS);
    h.press(KeyCode::Char('r'));
    h.press(KeyCode::Right);
    h.press(KeyCode::Enter);
    assert!(h.app.dialog().is_none());
    assert!(h.site.mutations().is_empty());
    assert_eq!(h.app.content().entry_count(), 1);
}

#[test]
fn scroll_offset_stays_within_content() {
    let names: Vec<String> = (0..30).map(|i| format!("plugin-{i:02}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let mut h = Harness::new(FakeSite::with_plugins(&refs), 80, 12);
    h.open_module(PLUGINS);

    // 32 lines (header, rule, 30 rows) in a 9-row viewport
    let max_offset = 32 - 9;
    for _ in 0..10 {
        h.press(KeyCode::PageDown);
        assert!(h.app.state().scroll <= max_offset);
    }
    assert_eq!(h.app.state().cursor, 29);
    assert_eq!(h.app.state().scroll, max_offset);
    assert!(h.screen().contains("plugin-29"));

    for _ in 0..10 {
        h.press(KeyCode::PageUp);
    }
    assert_eq!((h.app.state().cursor, h.app.state().scroll), (0, 0));

    h.press(KeyCode::PageDown);
    h.press(KeyCode::PageDown);
    h.terminal.backend_mut().resize(80, 40);
    h.tick();
    assert_eq!(h.app.state().scroll, 0);
}

#[test]
fn resize_under_open_dialog_reclamps_scroll() {
    let names: Vec<String> = (0..30).map(|i| format!("plugin-{i:02}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let mut h = Harness::new(FakeSite::with_plugins(&refs), 80, 12);
    h.open_module(PLUGINS);
    for _ in 0..10 {
        h.press(KeyCode::PageDown);
    }
    assert_eq!(h.app.state().scroll, 32 - 9);

    h.press(KeyCode::Char('?'));
    assert_eq!(h.app.mode(), Mode::DialogOpen);
    let lists = h.site.calls().len();

    h.terminal.backend_mut().resize(80, 40);
    h.tick();
    assert_eq!(h.app.mode(), Mode::DialogOpen);
    assert_eq!(h.site.calls().len(), lists);
    assert_eq!(h.app.state().cursor, 29);
    assert_eq!(h.app.state().scroll, 0);

    h.press(KeyCode::Esc);
    assert!(h.app.dialog().is_none());
    assert_eq!(h.app.state().scroll, 0);
    assert!(h.screen().contains("plugin-00"));
}

#[test]
fn list_failure_is_reported_once_and_quit_still_works() {
    let site = FakeSite::with_plugins(&["akismet", "jetpack"]);
    let mut h = Harness::new(site.clone(), 100, 30);
    h.open_module(PLUGINS);
    h.press(KeyCode::Down);
    let before = *h.app.state();

    site.0.borrow_mut().fail_lists = true;
    h.tick();
    let dialog = h.app.dialog().expect("error dialog");
    assert!(matches!(dialog.kind, DialogKind::Message));
    assert!(dialog.lines[0].contains("plugin list"));
    assert_eq!(*h.app.state(), before);
    assert_eq!(h.app.content().entry_count(), 2);

    h.press(KeyCode::Char('x'));
    assert!(h.app.dialog().is_none());
    assert!(h.app.last_error().is_some());

    h.press(KeyCode::Char('q'));
    assert!(!h.app.is_running());
}

#[test]
fn failed_action_leaves_navigation_untouched() {
    let site = FakeSite::with_plugins(&["akismet", "jetpack"]);
    let mut h = Harness::new(site.clone(), 100, 30);
    h.open_module(PLUGINS);
    h.press(KeyCode::Down);
    let before = *h.app.state();

    site.0.borrow_mut().fail_mutations = true;
    h.press(KeyCode::Char('a'));
    assert_eq!(*h.app.state(), before);
    let dialog = h.app.dialog().expect("error dialog");
    assert!(dialog.lines[0].contains("plugin activate jetpack"));
}

#[test]
fn activation_reloads_and_keeps_cursor() {
    let site = FakeSite::with_plugins(&["akismet", "jetpack"]);
    let mut h = Harness::new(site.clone(), 100, 30);
    h.open_module(PLUGINS);
    h.press(KeyCode::Down);
    h.press(KeyCode::Char('a'));
    assert_eq!(h.site.mutations(), vec!["plugin activate jetpack"]);
    assert!(h.app.content().records[1].is_active());
    assert_eq!(h.app.state().cursor, 1);
}

#[test]
fn install_goes_through_input_dialog() {
    let mut h = Harness::new(FakeSite::default(), 100, 30);
    h.open_module(PLUGINS);
    h.press(KeyCode::Char('i'));
    assert!(matches!(h.app.dialog().unwrap().kind, DialogKind::Input(_)));
    h.type_text("hello-dolly");
    h.press(KeyCode::Enter);
    assert!(h.app.dialog().is_none());
    assert_eq!(h.site.mutations(), vec!["plugin install hello-dolly"]);
    assert_eq!(h.app.content().entry_count(), 1);
    assert!(h.screen().contains("hello-dolly"));
}

#[test]
fn module_keys_are_ignored_while_the_menu_has_focus() {
    let site = FakeSite::with_plugins(&["akismet"]);
    let mut h = Harness::new(site, 100, 30);
    h.open_module(PLUGINS);
    h.press(KeyCode::Tab);
    h.press(KeyCode::Char('r'));
    assert!(h.app.dialog().is_none());
    assert_eq!(h.app.mode(), Mode::MenuFocused);
}

#[test]
fn help_lists_bindings_and_any_key_closes_it() {
    let site = FakeSite::with_plugins(&["akismet"]);
    let mut h = Harness::new(site, 100, 40);
    h.open_module(PLUGINS);
    h.press(KeyCode::Char('?'));
    let dialog = h.app.dialog().expect("help");
    assert!(dialog.lines.iter().any(|l| l == "a: activate plugin"));
    assert!(h.screen().contains("v: verify checksums"));
    h.press(KeyCode::Esc);
    assert!(h.app.dialog().is_none());
    assert!(h.app.is_running());
}

#[test]
fn update_marks_rows_and_runs_only_when_available() {
    let site = FakeSite::default();
    site.0.borrow_mut().plugins = vec![
        record("akismet", "active", "none"),
        record("jetpack", "active", "available"),
    ];
    let mut h = Harness::new(site, 100, 30);
    h.open_module(PLUGINS);
    h.press(KeyCode::Char('u'));
    assert!(h.site.mutations().is_empty());
    h.press(KeyCode::Down);
    h.press(KeyCode::Char('u'));
    assert_eq!(h.site.mutations(), vec!["plugin update jetpack"]);
}
