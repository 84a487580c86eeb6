//! actor_debugger_common
//!
//! Types shared between the inspector core and the hosts that feed it:
//!
//! - [`ObjectHandle`]: non-owning, generation-checked reference into an
//!   externally owned object table.
//! - [`Value`] / [`ToValue`]: the reflected value model and its debug text export.
//! - [`FieldDescriptor`], [`FieldFlags`], [`ObjectFlags`], [`ObjectKind`]:
//!   field and lifecycle metadata consulted by the reflection walker.
//! - [`Inspect`]: implemented (usually via `#[derive(Inspect)]`) by objects
//!   that expose their fields to the inspector.

// Lets `#[derive(Inspect)]` expand to `::actor_debugger_common::...` inside this crate too.
extern crate self as actor_debugger_common;

pub mod flags;
pub mod value;

pub use flags::{FieldFlags, ObjectFlags};
pub use value::{ToValue, Value, export_text};

pub use actor_debugger_macros::Inspect;

use serde::{Deserialize, Serialize};

use std::any::Any;
use std::fmt::Display;

#[derive(Serialize, Deserialize, Hash, PartialEq, Eq, Clone, Copy, Debug, PartialOrd, Ord)]
/// An [`ObjectHandle`] refers to a single object slot in a host's object table.
///
/// The handle never keeps the object alive. A slot that is destroyed and later
/// reused gets a new `generation`, so stale handles stop resolving instead of
/// aliasing the new occupant.
pub struct ObjectHandle {
    /// Slot index inside the owning table.
    pub index: u32,
    /// Generation of the slot at the time the handle was issued.
    pub generation: u32,
}

impl ObjectHandle {
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl Display for ObjectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Broad category of a live object, as reported by the host.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ObjectKind {
    /// Top-level, independently alive entity. Actors routinely reference each
    /// other, so the walker never expands an actor reference.
    Actor,
    /// Any other reflectable object (embedded data objects, components, assets).
    #[default]
    Object,
}

/// Metadata describing one declared field of an [`Inspect`] type.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub flags: FieldFlags,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, flags: FieldFlags) -> Self {
        Self {
            name: name.into(),
            flags,
        }
    }

    /// Whether the field carries the externally-visible capability marker.
    pub fn is_visible(&self) -> bool {
        self.flags.contains(FieldFlags::VISIBLE)
    }
}

/// An object whose fields can be enumerated and read by name.
///
/// Fields are reported in declaration order. Implementations must not mutate
/// `self` while answering these queries.
///
/// # Example
///
/// ```rust
/// use actor_debugger_common::{Inspect, Value};
///
/// #[derive(Inspect)]
/// struct Inventory {
///     #[inspect(visible)]
///     count: u32,
///     capacity: u32,
/// }
///
/// let inventory = Inventory { count: 5, capacity: 10 };
/// assert_eq!(inventory.fields().len(), 2);
/// assert_eq!(inventory.field_value("count"), Some(Value::UInt(5)));
/// ```
pub trait Inspect: Any + Send + Sync {
    /// Short type name (struct name, no module path).
    fn type_name(&self) -> &'static str;

    /// All declared fields, in declaration order, including hidden ones.
    fn fields(&self) -> Vec<FieldDescriptor>;

    /// Current value of the field called `name`, or `None` if the type
    /// declares no such field.
    fn field_value(&self, name: &str) -> Option<Value>;
}
