use glint_core::config::Config;
use glint_core::dispatch::WindowState;
use glint_core::runtime::LauncherController;
use glint_core::shell::RecordingShell;
use glint_core::usage_store::UsageStore;

fn test_controller() -> LauncherController<RecordingShell> {
    let mut config = Config::default();
    config.search_roots = Vec::new();
    LauncherController::new(
        config,
        RecordingShell::default(),
        UsageStore::open_memory().unwrap(),
    )
}

#[test]
fn activation_resets_before_showing() {
    let mut controller = test_controller();
    controller.on_activation();

    assert_eq!(controller.machine().state(), WindowState::Visible);
    // The session reset must land before the window becomes visible.
    assert_eq!(controller.shell().effects, vec!["reset", "show"]);
}

#[test]
fn three_rapid_activations_apply_all_three_toggles() {
    let mut controller = test_controller();
    controller.on_activation();
    controller.on_activation();
    controller.on_activation();

    assert_eq!(controller.machine().state(), WindowState::Visible);
    assert_eq!(
        controller.shell().effects,
        vec!["reset", "show", "hide", "reset", "show"]
    );
}

#[test]
fn classified_query_presents_an_action_immediately() {
    let mut controller = test_controller();
    controller.on_activation();
    controller.on_query_changed("2+2");

    let effects = &controller.shell().effects;
    assert_eq!(effects.last().unwrap(), "action:calculation");
}

#[test]
fn empty_query_clears_results() {
    let mut controller = test_controller();
    controller.on_activation();
    controller.on_query_changed("   ");

    let effects = &controller.shell().effects;
    assert!(effects.contains(&"results:0".to_string()));
}
