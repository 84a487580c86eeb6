use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use actor_debugger_common::ObjectHandle;
use bevy::prelude::*;

use crate::classify::{classifier_from_fn, AssetClassifier, FlagHeuristicClassifier};
use crate::host::ReflectionHost;
use crate::inspector::{Inspector, TickOutcome};
use crate::walker::WalkerConfig;

/// Tunables for the inspector refresh loop.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectorSettings {
    /// Period between tree rebuilds.
    pub refresh_interval: Duration,
    pub walker: WalkerConfig,
}

impl Default for InspectorSettings {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_millis(250),
            walker: WalkerConfig::default(),
        }
    }
}

/// Global asset classification policy.
///
/// The flag heuristic is used unless the application inserts its own.
#[derive(Resource, Clone)]
pub struct AssetClassifierResource {
    pub inner: Arc<dyn AssetClassifier>,
}

impl AssetClassifierResource {
    /// Construct a classifier from a closure returning `true` for assets.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(ObjectHandle, actor_debugger_common::ObjectFlags) -> bool + Send + Sync + 'static,
    {
        Self {
            inner: classifier_from_fn(f),
        }
    }

    pub fn heuristic() -> Self {
        Self {
            inner: Arc::new(FlagHeuristicClassifier),
        }
    }
}

impl Default for AssetClassifierResource {
    fn default() -> Self {
        Self::heuristic()
    }
}

/// The single inspector instance. Present only while an inspector is open.
#[derive(Resource)]
pub struct InspectorState {
    pub inspector: Inspector,
    refresh_timer: Timer,
}

impl InspectorState {
    fn new(settings: &InspectorSettings, classifier: Arc<dyn AssetClassifier>) -> Self {
        Self {
            inspector: Inspector::new(settings.walker, classifier),
            refresh_timer: Timer::new(settings.refresh_interval, TimerMode::Repeating),
        }
    }
}

/// Request to inspect `handle`, opening the inspector if needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Message)]
pub struct SelectInstance {
    pub handle: Option<ObjectHandle>,
}

/// The inspected object stopped being valid; the window should close.
///
/// Written once per selection. Answer it with [`release_inspector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Message)]
pub struct InspectorCloseRequested {
    pub target: Option<ObjectHandle>,
}

/// The property tree was rebuilt and should be redrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Message)]
pub struct InspectorRefreshed {
    pub target: ObjectHandle,
    pub revision: u64,
}

/// System sets so applications can order their UI around the inspector.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActorDebuggerSystems {
    /// Applies [`SelectInstance`] requests.
    Inbound,
    /// Ticks the refresh timer and rebuilds the tree.
    Refresh,
}

/// Installs the inspector against the host object graph stored in resource `H`.
pub struct ActorDebuggerPlugin<H> {
    _marker: PhantomData<fn() -> H>,
}

impl<H> Default for ActorDebuggerPlugin<H> {
    fn default() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<H: ReflectionHost + Resource> Plugin for ActorDebuggerPlugin<H> {
    fn build(&self, app: &mut App) {
        app.init_resource::<InspectorSettings>()
            .add_message::<SelectInstance>()
            .add_message::<InspectorCloseRequested>()
            .add_message::<InspectorRefreshed>();

        app.configure_sets(
            Update,
            (ActorDebuggerSystems::Inbound, ActorDebuggerSystems::Refresh).chain(),
        )
        .add_systems(
            Update,
            handle_select_instance::<H>.in_set(ActorDebuggerSystems::Inbound),
        )
        .add_systems(Update, tick_inspector::<H>.in_set(ActorDebuggerSystems::Refresh));

        info!("[ActorDebuggerPlugin::build] installed");
    }
}

/// Point the inspector at `handle`, creating it on first use.
///
/// There is at most one inspector: a later selection retargets it in place.
/// Returns `false` when the host resource `H` is missing.
pub fn select_instance<H: ReflectionHost + Resource>(world: &mut World, handle: Option<ObjectHandle>) -> bool {
    if !world.contains_resource::<H>() {
        warn!("[select_instance] host resource is missing, ignoring selection of {:?}", handle);
        return false;
    }

    if !world.contains_resource::<InspectorState>() {
        let settings = world.get_resource::<InspectorSettings>().copied().unwrap_or_default();
        let classifier = world
            .get_resource::<AssetClassifierResource>()
            .cloned()
            .unwrap_or_default();
        world.insert_resource(InspectorState::new(&settings, classifier.inner));
        info!("[select_instance] opened inspector");
    }

    world.resource_scope(|world, mut state: Mut<InspectorState>| {
        let host = world.resource::<H>();
        state.inspector.set_target(host, handle);
        state.refresh_timer.reset();
    });

    debug!("[select_instance] inspecting {:?}", handle);
    true
}

/// Tear down the inspector. Returns `false` if none was open.
pub fn release_inspector(world: &mut World) -> bool {
    let released = world.remove_resource::<InspectorState>().is_some();
    if released {
        info!("[release_inspector] inspector closed");
    }
    released
}

fn handle_select_instance<H: ReflectionHost + Resource>(
    mut requests: MessageReader<SelectInstance>,
    mut commands: Commands,
) {
    for request in requests.read() {
        let handle = request.handle;
        commands.queue(move |world: &mut World| {
            select_instance::<H>(world, handle);
        });
    }
}

fn tick_inspector<H: ReflectionHost + Resource>(
    state: Option<ResMut<InspectorState>>,
    host: Option<Res<H>>,
    time: Res<Time>,
    mut refreshed: MessageWriter<InspectorRefreshed>,
    mut close_requests: MessageWriter<InspectorCloseRequested>,
) {
    let (Some(mut state), Some(host)) = (state, host) else {
        return;
    };

    state.refresh_timer.tick(time.delta());
    if !state.refresh_timer.just_finished() {
        return;
    }

    let target = state.inspector.target();
    match state.inspector.tick(&*host) {
        TickOutcome::Refreshed => {
            if let Some(target) = target {
                refreshed.write(InspectorRefreshed {
                    target,
                    revision: state.inspector.tree().revision(),
                });
            }
        }
        TickOutcome::CloseRequested => {
            info!("[tick_inspector] {:?} became invalid, requesting close", target);
            close_requests.write(InspectorCloseRequested { target });
        }
        TickOutcome::Closed => {}
    }
}
