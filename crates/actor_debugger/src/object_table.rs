//! Generational object table: a ready-made [`ReflectionHost`].

use std::any::Any;

use actor_debugger_common::{
    FieldDescriptor, Inspect, ObjectFlags, ObjectHandle, ObjectKind, Value,
};
use thiserror::Error;

use crate::host::ReflectionHost;

/// Errors returned by [`ObjectTable`] operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ObjectTableError {
    /// The handle's slot was destroyed (and possibly reused) since the handle
    /// was issued.
    #[error("object handle {0} does not refer to a live object")]
    StaleHandle(ObjectHandle),
}

struct ObjectEntry {
    name: String,
    kind: ObjectKind,
    flags: ObjectFlags,
    object: Box<dyn Inspect>,
}

#[derive(Default)]
struct Slot {
    generation: u32,
    entry: Option<ObjectEntry>,
}

/// Owns a set of [`Inspect`] objects and hands out [`ObjectHandle`]s to them.
///
/// Destroying an object bumps its slot generation, so every handle issued for
/// it (including the ones held by property nodes) stops resolving at once.
#[cfg_attr(feature = "runtime", derive(bevy::prelude::Resource))]
#[derive(Default)]
pub struct ObjectTable {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `object` and return its handle.
    pub fn spawn(
        &mut self,
        name: impl Into<String>,
        kind: ObjectKind,
        object: impl Inspect,
    ) -> ObjectHandle {
        let entry = ObjectEntry {
            name: name.into(),
            kind,
            flags: ObjectFlags::empty(),
            object: Box::new(object),
        };

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entry = Some(entry);
            return ObjectHandle::new(index, slot.generation);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            entry: Some(entry),
        });
        ObjectHandle::new(index, 0)
    }

    /// Insert `object` with lifecycle `flags` already set.
    pub fn spawn_with_flags(
        &mut self,
        name: impl Into<String>,
        kind: ObjectKind,
        flags: ObjectFlags,
        object: impl Inspect,
    ) -> ObjectHandle {
        let handle = self.spawn(name, kind, object);
        if let Some(entry) = self.entry_mut(handle) {
            entry.flags = flags;
        }
        handle
    }

    /// Destroy the object behind `handle`. The slot may be reused later under
    /// a new generation.
    pub fn destroy(&mut self, handle: ObjectHandle) -> Result<(), ObjectTableError> {
        let slot = self
            .slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation && slot.entry.is_some())
            .ok_or(ObjectTableError::StaleHandle(handle))?;

        slot.entry = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        log::debug!("[ObjectTable] destroyed {}", handle);
        Ok(())
    }

    pub fn set_flags(
        &mut self,
        handle: ObjectHandle,
        flags: ObjectFlags,
    ) -> Result<(), ObjectTableError> {
        let entry = self
            .entry_mut(handle)
            .ok_or(ObjectTableError::StaleHandle(handle))?;
        entry.flags = flags;
        Ok(())
    }

    pub fn rename(
        &mut self,
        handle: ObjectHandle,
        name: impl Into<String>,
    ) -> Result<(), ObjectTableError> {
        let entry = self
            .entry_mut(handle)
            .ok_or(ObjectTableError::StaleHandle(handle))?;
        entry.name = name.into();
        Ok(())
    }

    /// Mutable access to the object behind `handle` as its concrete type.
    pub fn get_mut<T: Inspect>(&mut self, handle: ObjectHandle) -> Option<&mut T> {
        let entry = self.entry_mut(handle)?;
        let object: &mut dyn Any = &mut *entry.object;
        object.downcast_mut::<T>()
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.entry.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry(&self, handle: ObjectHandle) -> Option<&ObjectEntry> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entry.as_ref())
    }

    fn entry_mut(&mut self, handle: ObjectHandle) -> Option<&mut ObjectEntry> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entry.as_mut())
    }
}

impl ReflectionHost for ObjectTable {
    fn is_valid(&self, object: ObjectHandle) -> bool {
        self.entry(object).is_some()
    }

    fn kind(&self, object: ObjectHandle) -> Option<ObjectKind> {
        self.entry(object).map(|entry| entry.kind)
    }

    fn flags(&self, object: ObjectHandle) -> ObjectFlags {
        self.entry(object)
            .map(|entry| entry.flags)
            .unwrap_or_default()
    }

    fn type_name(&self, object: ObjectHandle) -> Option<String> {
        self.entry(object)
            .map(|entry| entry.object.type_name().to_string())
    }

    fn object_name(&self, object: ObjectHandle) -> Option<String> {
        self.entry(object).map(|entry| entry.name.clone())
    }

    fn fields(&self, object: ObjectHandle) -> Vec<FieldDescriptor> {
        self.entry(object)
            .map(|entry| entry.object.fields())
            .unwrap_or_default()
    }

    fn field_value(&self, object: ObjectHandle, name: &str) -> Option<Value> {
        self.entry(object)?.object.field_value(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_debugger_common::Inspect;

    #[derive(Inspect)]
    struct Crate {
        #[inspect(visible)]
        count: u32,
    }

    #[test]
    fn test_spawn_and_read_back() {
        let mut table = ObjectTable::new();
        let handle = table.spawn("Crate_0", ObjectKind::Object, Crate { count: 3 });

        assert!(table.is_valid(handle));
        assert_eq!(table.object_name(handle).as_deref(), Some("Crate_0"));
        assert_eq!(table.type_name(handle).as_deref(), Some("Crate"));
        assert_eq!(table.field_value(handle, "count"), Some(Value::UInt(3)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_destroy_invalidates_handle() {
        let mut table = ObjectTable::new();
        let handle = table.spawn("Crate_0", ObjectKind::Object, Crate { count: 3 });

        table.destroy(handle).unwrap();

        assert!(!table.is_valid(handle));
        assert_eq!(table.field_value(handle, "count"), None);
        assert!(table.fields(handle).is_empty());
        assert_eq!(table.destroy(handle), Err(ObjectTableError::StaleHandle(handle)));
        assert!(table.is_empty());
    }

    #[test]
    fn test_reused_slot_does_not_alias_stale_handle() {
        let mut table = ObjectTable::new();
        let old = table.spawn("Crate_0", ObjectKind::Object, Crate { count: 1 });
        table.destroy(old).unwrap();

        let new = table.spawn("Crate_1", ObjectKind::Object, Crate { count: 2 });

        assert_eq!(new.index, old.index);
        assert_ne!(new.generation, old.generation);
        assert!(!table.is_valid(old));
        assert_eq!(table.field_value(new, "count"), Some(Value::UInt(2)));
    }

    #[test]
    fn test_get_mut_downcasts_to_concrete_type() {
        let mut table = ObjectTable::new();
        let handle = table.spawn("Crate_0", ObjectKind::Object, Crate { count: 1 });

        table.get_mut::<Crate>(handle).unwrap().count = 9;

        assert_eq!(table.field_value(handle, "count"), Some(Value::UInt(9)));
    }

    #[test]
    fn test_flags_and_rename() {
        let mut table = ObjectTable::new();
        let handle = table.spawn_with_flags(
            "Mesh",
            ObjectKind::Object,
            ObjectFlags::PUBLIC,
            Crate { count: 0 },
        );
        assert_eq!(table.flags(handle), ObjectFlags::PUBLIC);

        table.set_flags(handle, ObjectFlags::PERSISTENT_MARKERS).unwrap();
        table.rename(handle, "Mesh_Renamed").unwrap();

        assert_eq!(table.flags(handle), ObjectFlags::PERSISTENT_MARKERS);
        assert_eq!(table.object_name(handle).as_deref(), Some("Mesh_Renamed"));
    }
}
