//! The inspector: one inspection target, its property tree, and the
//! per-tick refresh/lifecycle logic.

use std::sync::Arc;

use actor_debugger_common::ObjectHandle;
use serde::Serialize;

use crate::classify::{AssetClassifier, FlagHeuristicClassifier};
use crate::host::ReflectionHost;
use crate::tree::PropertyTree;
use crate::walker::{ReflectionWalker, WalkerConfig};

/// Header name shown when there is no live target.
pub const NO_ACTOR_SELECTED: &str = "No Actor Selected";
/// Header class shown when there is no live target.
pub const NOT_AVAILABLE: &str = "N/A";

/// Name and class line displayed above the property table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectorHeader {
    pub object_name: String,
    pub class_name: String,
}

impl Default for InspectorHeader {
    fn default() -> Self {
        Self {
            object_name: NO_ACTOR_SELECTED.to_string(),
            class_name: NOT_AVAILABLE.to_string(),
        }
    }
}

/// What a refresh tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The target is live; the tree was rebuilt and should be redrawn.
    Refreshed,
    /// The target just became invalid. Emitted once per selection.
    CloseRequested,
    /// A close was already requested; nothing was done.
    Closed,
}

/// State of a single inspector instance.
pub struct Inspector {
    target: Option<ObjectHandle>,
    header: InspectorHeader,
    tree: PropertyTree,
    walker_config: WalkerConfig,
    classifier: Arc<dyn AssetClassifier>,
    close_requested: bool,
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new(WalkerConfig::default(), Arc::new(FlagHeuristicClassifier))
    }
}

impl Inspector {
    pub fn new(walker_config: WalkerConfig, classifier: Arc<dyn AssetClassifier>) -> Self {
        Self {
            target: None,
            header: InspectorHeader::default(),
            tree: PropertyTree::new(),
            walker_config,
            classifier,
            close_requested: false,
        }
    }

    pub fn target(&self) -> Option<ObjectHandle> {
        self.target
    }

    pub fn header(&self) -> &InspectorHeader {
        &self.header
    }

    pub fn tree(&self) -> &PropertyTree {
        &self.tree
    }

    /// Mutable view state (expansion, selection).
    pub fn tree_mut(&mut self) -> &mut PropertyTree {
        &mut self.tree
    }

    pub fn is_close_requested(&self) -> bool {
        self.close_requested
    }

    /// Point the inspector at `target`, replacing any previous target in place.
    ///
    /// A live target is walked immediately; a missing or dead one clears the
    /// tree and shows the "no selection" header. The next tick decides
    /// whether to request closing.
    pub fn set_target<H>(&mut self, host: &H, target: Option<ObjectHandle>)
    where
        H: ReflectionHost + ?Sized,
    {
        if self.target != target {
            self.tree.clear();
        }
        self.target = target;
        self.close_requested = false;

        if self.target_is_valid(host) {
            self.rebuild(host);
        } else {
            self.header = InspectorHeader::default();
            self.tree.clear();
        }
    }

    /// One refresh-loop iteration.
    pub fn tick<H>(&mut self, host: &H) -> TickOutcome
    where
        H: ReflectionHost + ?Sized,
    {
        if self.close_requested {
            return TickOutcome::Closed;
        }

        if !self.target_is_valid(host) {
            log::info!("[Inspector] target {:?} is no longer valid, requesting close", self.target);
            self.close_requested = true;
            return TickOutcome::CloseRequested;
        }

        self.rebuild(host);
        TickOutcome::Refreshed
    }

    fn target_is_valid<H>(&self, host: &H) -> bool
    where
        H: ReflectionHost + ?Sized,
    {
        self.target.is_some_and(|target| host.is_valid(target))
    }

    fn rebuild<H>(&mut self, host: &H)
    where
        H: ReflectionHost + ?Sized,
    {
        let roots = ReflectionWalker::new(host, self.classifier.as_ref())
            .with_config(self.walker_config)
            .walk(self.target);

        if let Some(target) = self.target {
            self.header = InspectorHeader {
                object_name: host.object_name(target).unwrap_or_else(|| NO_ACTOR_SELECTED.to_string()),
                class_name: host.type_name(target).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            };
        }

        self.tree.set_roots(roots);
    }
}
