//! Recursion-eligibility classification of referenced objects.

use std::sync::Arc;

use actor_debugger_common::{ObjectFlags, ObjectHandle, ObjectKind};

use crate::host::ReflectionHost;

/// How the walker treats a referenced object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectClass {
    /// Same broad category as a top-level inspection target; never expanded.
    Actor,
    /// Shared, persistent resource; never expanded.
    Asset,
    /// Embedded data object; expanded.
    Plain,
}

/// Pluggable predicate deciding whether an object is an asset.
///
/// Hosts that know authoritatively which objects are assets should install
/// their own classifier; the default [`FlagHeuristicClassifier`] only guesses
/// from lifecycle flags.
pub trait AssetClassifier: Send + Sync + 'static {
    fn is_asset(&self, object: ObjectHandle, flags: ObjectFlags) -> bool;
}

/// Best-effort asset heuristic over lifecycle markers.
///
/// The host offers no "is this an asset" capability, so an object counts as an
/// asset when it carries every [`ObjectFlags::PERSISTENT_MARKERS`] flag and
/// none of the [`ObjectFlags::TEMPLATE_MARKERS`]. False positives and false
/// negatives are accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlagHeuristicClassifier;

impl AssetClassifier for FlagHeuristicClassifier {
    fn is_asset(&self, _object: ObjectHandle, flags: ObjectFlags) -> bool {
        flags.contains(ObjectFlags::PERSISTENT_MARKERS)
            && !flags.intersects(ObjectFlags::TEMPLATE_MARKERS)
    }
}

/// Build a classifier from a closure.
pub fn classifier_from_fn<F>(f: F) -> Arc<dyn AssetClassifier>
where
    F: Fn(ObjectHandle, ObjectFlags) -> bool + Send + Sync + 'static,
{
    struct ClosureClassifier<F>(F);

    impl<F> AssetClassifier for ClosureClassifier<F>
    where
        F: Fn(ObjectHandle, ObjectFlags) -> bool + Send + Sync + 'static,
    {
        fn is_asset(&self, object: ObjectHandle, flags: ObjectFlags) -> bool {
            (self.0)(object, flags)
        }
    }

    Arc::new(ClosureClassifier(f))
}

/// Classify a live object. Returns `None` for dead handles.
pub fn classify<H>(host: &H, classifier: &dyn AssetClassifier, object: ObjectHandle) -> Option<ObjectClass>
where
    H: ReflectionHost + ?Sized,
{
    let class = match host.kind(object)? {
        ObjectKind::Actor => ObjectClass::Actor,
        ObjectKind::Object if classifier.is_asset(object, host.flags(object)) => ObjectClass::Asset,
        ObjectKind::Object => ObjectClass::Plain,
    };
    Some(class)
}
