//! actor_debugger
//!
//! Live, read-only inspector for an object's externally visible fields.
//!
//! Given a selected object, the inspector walks its fields through a
//! [`ReflectionHost`], expands references to embedded data objects, stops at
//! actor and asset boundaries, and re-reads every displayed value on each
//! refresh. It exposes:
//!
//! - [`ReflectionWalker`]: object graph -> [`PropertyNode`] tree.
//! - [`format_node`]: current value of a node as display text.
//! - [`PropertyTree`]: two-column, expandable row model for any tree widget.
//! - [`Inspector`]: target, header, and the refresh/close lifecycle.
//! - [`ObjectTable`]: a generational [`ReflectionHost`] for
//!   [`Inspect`](actor_debugger_common::Inspect) types.
//! - `ActorDebuggerPlugin` (feature `runtime`): drives the refresh loop on a
//!   Bevy timer and speaks [`SelectInstance`] / [`InspectorCloseRequested`].
//!
//! ```rust,ignore
//! use actor_debugger::{ActorDebuggerPlugin, ObjectTable, SelectInstance};
//!
//! app.insert_resource(ObjectTable::new())
//!    .add_plugins(ActorDebuggerPlugin::<ObjectTable>::default());
//!
//! // Later, from any system:
//! selections.write(SelectInstance { handle: Some(hero) });
//! ```

pub mod classify;
pub mod format;
pub mod host;
pub mod inspector;
pub mod node;
pub mod object_table;
pub mod tree;
pub mod walker;

#[cfg(feature = "runtime")]
mod plugin;

pub use classify::{classifier_from_fn, classify, AssetClassifier, FlagHeuristicClassifier, ObjectClass};
pub use format::{format_node, try_format_node, FormatError, INVALID_PROPERTY, PROPERTY_NOT_FOUND};
pub use host::ReflectionHost;
pub use inspector::{Inspector, InspectorHeader, TickOutcome, NOT_AVAILABLE, NO_ACTOR_SELECTED};
pub use node::{NodePath, PropertyNode};
pub use object_table::{ObjectTable, ObjectTableError};
pub use tree::{
    children_of, is_expandable, row_for, ColumnSpec, FlatRow, PropertyRow, PropertyTree, COLUMNS,
    NAME_COLUMN, VALUE_COLUMN,
};
pub use walker::{ReflectionWalker, WalkerConfig};

#[cfg(feature = "runtime")]
pub use plugin::{
    release_inspector, select_instance, ActorDebuggerPlugin, ActorDebuggerSystems,
    AssetClassifierResource, InspectorCloseRequested, InspectorRefreshed, InspectorSettings,
    InspectorState, SelectInstance,
};

pub use actor_debugger_common::{
    FieldDescriptor, FieldFlags, Inspect, ObjectFlags, ObjectHandle, ObjectKind,
    ToValue, Value,
};
