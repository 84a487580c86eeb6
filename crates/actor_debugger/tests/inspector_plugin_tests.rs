use std::time::Duration;

use actor_debugger::{
    release_inspector, select_instance, ActorDebuggerPlugin, AssetClassifierResource, Inspect,
    InspectorCloseRequested, InspectorRefreshed, InspectorSettings, InspectorState, NodePath,
    ObjectHandle, ObjectKind, ObjectTable, SelectInstance, WalkerConfig, NO_ACTOR_SELECTED,
};
use bevy::ecs::message::Messages;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

#[derive(Inspect)]
struct Hero {
    #[inspect(visible)]
    level: u32,
    #[inspect(visible)]
    backpack: Option<ObjectHandle>,
    #[inspect(visible)]
    rival: Option<ObjectHandle>,
}

#[derive(Inspect)]
struct Backpack {
    #[inspect(visible)]
    slots: u32,
}

struct Fixture {
    table: ObjectTable,
    hero: ObjectHandle,
    rival: ObjectHandle,
}

fn populate() -> Fixture {
    let mut table = ObjectTable::new();
    let backpack = table.spawn("Backpack", ObjectKind::Object, Backpack { slots: 12 });
    let rival = table.spawn(
        "Rival",
        ObjectKind::Actor,
        Hero {
            level: 3,
            backpack: None,
            rival: None,
        },
    );
    let hero = table.spawn(
        "Hero",
        ObjectKind::Actor,
        Hero {
            level: 7,
            backpack: Some(backpack),
            rival: Some(rival),
        },
    );
    Fixture { table, hero, rival }
}

// Helper function to create a test app driven by a fixed 250ms frame time
fn create_test_app(table: ObjectTable) -> App {
    create_paced_app(table, Duration::from_millis(250), None)
}

// Same as above with a custom frame time and, optionally, settings inserted
// before the plugin is added
fn create_paced_app(table: ObjectTable, frame_time: Duration, settings: Option<InspectorSettings>) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(frame_time));
    app.insert_resource(table);
    if let Some(settings) = settings {
        app.insert_resource(settings);
    }
    app.add_plugins(ActorDebuggerPlugin::<ObjectTable>::default());
    app
}

#[derive(Default)]
struct Collected {
    refreshed: Vec<InspectorRefreshed>,
    close_requested: Vec<InspectorCloseRequested>,
}

fn run_frames(app: &mut App, frames: usize) -> Collected {
    let mut collected = Collected::default();
    for _ in 0..frames {
        app.update();
        let world = app.world_mut();
        collected
            .refreshed
            .extend(world.resource_mut::<Messages<InspectorRefreshed>>().drain());
        collected
            .close_requested
            .extend(world.resource_mut::<Messages<InspectorCloseRequested>>().drain());
    }
    collected
}

fn state(app: &App) -> &InspectorState {
    app.world().resource::<InspectorState>()
}

#[test]
fn test_plugin_installs_default_settings() {
    let app = create_test_app(ObjectTable::new());

    let settings = app.world().resource::<InspectorSettings>();
    assert_eq!(settings.refresh_interval, Duration::from_millis(250));
    assert_eq!(settings.walker, WalkerConfig::default());
    assert!(app.world().get_resource::<InspectorState>().is_none());
}

#[test]
fn test_refresh_runs_every_quarter_second() {
    let Fixture { table, hero, .. } = populate();
    let mut app = create_paced_app(table, Duration::from_millis(50), None);
    select_instance::<ObjectTable>(app.world_mut(), Some(hero));

    // The first frame advances no time; the next 20 cover one second.
    let collected = run_frames(&mut app, 21);

    assert_eq!(collected.refreshed.len(), 4);
    assert!(collected.refreshed.iter().all(|m| m.target == hero));
}

#[test]
fn test_settings_inserted_before_plugin_are_respected() {
    let Fixture { table, hero, .. } = populate();
    let settings = InspectorSettings {
        refresh_interval: Duration::from_secs(1),
        ..default()
    };
    let mut app = create_paced_app(table, Duration::from_millis(250), Some(settings));
    assert_eq!(
        app.world().resource::<InspectorSettings>().refresh_interval,
        Duration::from_secs(1)
    );
    select_instance::<ObjectTable>(app.world_mut(), Some(hero));

    let collected = run_frames(&mut app, 9);

    assert_eq!(collected.refreshed.len(), 2);
}

#[test]
fn test_select_message_opens_inspector_and_refreshes() {
    let Fixture { table, hero, .. } = populate();
    let mut app = create_test_app(table);

    app.world_mut().write_message(SelectInstance { handle: Some(hero) });
    let collected = run_frames(&mut app, 4);

    let inspector = &state(&app).inspector;
    assert_eq!(inspector.target(), Some(hero));
    assert_eq!(inspector.header().object_name, "Hero");
    assert_eq!(inspector.header().class_name, "Hero");

    assert!(!collected.refreshed.is_empty());
    assert!(collected.refreshed.iter().all(|m| m.target == hero));
    assert!(collected.close_requested.is_empty());
    assert_eq!(
        collected.refreshed.last().map(|m| m.revision),
        Some(inspector.tree().revision())
    );
}

#[test]
fn test_refresh_picks_up_value_changes() {
    let Fixture { table, hero, .. } = populate();
    let mut app = create_test_app(table);
    assert!(select_instance::<ObjectTable>(app.world_mut(), Some(hero)));
    run_frames(&mut app, 2);

    app.world_mut()
        .resource_mut::<ObjectTable>()
        .get_mut::<Hero>(hero)
        .unwrap()
        .level = 8;
    run_frames(&mut app, 2);

    let world = app.world();
    let table = world.resource::<ObjectTable>();
    let rows = state(&app).inspector.tree().visible_rows(table);
    let level = rows.iter().find(|r| r.path == NodePath::from("level")).unwrap();
    assert_eq!(level.row.value, "8");
}

#[test]
fn test_walk_stops_at_actors_and_expands_plain_objects() {
    let Fixture { table, hero, .. } = populate();
    let mut app = create_test_app(table);
    select_instance::<ObjectTable>(app.world_mut(), Some(hero));

    let tree = state(&app).inspector.tree();
    let backpack = tree.node(&NodePath::from("backpack")).unwrap();
    let rival = tree.node(&NodePath::from("rival")).unwrap();
    assert_eq!(backpack.children.len(), 1);
    assert!(rival.children.is_empty());
}

#[test]
fn test_custom_classifier_is_used() {
    let Fixture { table, hero, .. } = populate();
    let mut app = create_test_app(table);
    app.insert_resource(AssetClassifierResource::from_fn(|_, _| true));

    select_instance::<ObjectTable>(app.world_mut(), Some(hero));

    let tree = state(&app).inspector.tree();
    assert!(tree.node(&NodePath::from("backpack")).unwrap().children.is_empty());
}

#[test]
fn test_second_selection_retargets_in_place() {
    let Fixture { table, hero, rival } = populate();
    let mut app = create_test_app(table);

    app.world_mut().write_message(SelectInstance { handle: Some(hero) });
    run_frames(&mut app, 2);
    app.world_mut().write_message(SelectInstance { handle: Some(rival) });
    let collected = run_frames(&mut app, 3);

    let inspector = &state(&app).inspector;
    assert_eq!(inspector.target(), Some(rival));
    assert_eq!(inspector.header().object_name, "Rival");
    assert!(collected.refreshed.iter().any(|m| m.target == rival));
}

#[test]
fn test_destroyed_target_requests_close_once() {
    let Fixture { table, hero, .. } = populate();
    let mut app = create_test_app(table);
    select_instance::<ObjectTable>(app.world_mut(), Some(hero));
    run_frames(&mut app, 2);

    app.world_mut().resource_mut::<ObjectTable>().destroy(hero).unwrap();
    let collected = run_frames(&mut app, 6);

    assert_eq!(
        collected.close_requested,
        vec![InspectorCloseRequested { target: Some(hero) }]
    );
    assert!(collected.refreshed.is_empty());
    assert!(state(&app).inspector.is_close_requested());

    assert!(release_inspector(app.world_mut()));
    assert!(app.world().get_resource::<InspectorState>().is_none());
    assert!(!release_inspector(app.world_mut()));
}

#[test]
fn test_reselect_after_close_request_resumes_refresh() {
    let Fixture { table, hero, rival } = populate();
    let mut app = create_test_app(table);
    select_instance::<ObjectTable>(app.world_mut(), Some(hero));
    app.world_mut().resource_mut::<ObjectTable>().destroy(hero).unwrap();
    let collected = run_frames(&mut app, 3);
    assert_eq!(collected.close_requested.len(), 1);

    select_instance::<ObjectTable>(app.world_mut(), Some(rival));
    let collected = run_frames(&mut app, 3);

    assert!(collected.close_requested.is_empty());
    assert!(collected.refreshed.iter().all(|m| m.target == rival));
    assert!(!collected.refreshed.is_empty());
}

#[test]
fn test_selecting_nothing_shows_placeholder_then_requests_close() {
    let Fixture { table, .. } = populate();
    let mut app = create_test_app(table);

    assert!(select_instance::<ObjectTable>(app.world_mut(), None));
    assert_eq!(state(&app).inspector.header().object_name, NO_ACTOR_SELECTED);

    let collected = run_frames(&mut app, 3);
    assert_eq!(
        collected.close_requested,
        vec![InspectorCloseRequested { target: None }]
    );
}

#[test]
fn test_select_without_host_is_rejected() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(ActorDebuggerPlugin::<ObjectTable>::default());

    assert!(!select_instance::<ObjectTable>(
        app.world_mut(),
        Some(ObjectHandle::new(0, 0))
    ));
    assert!(app.world().get_resource::<InspectorState>().is_none());
}
