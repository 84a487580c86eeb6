//! Capability interface onto the host's object graph.

use actor_debugger_common::{
    export_text, FieldDescriptor, ObjectFlags, ObjectHandle, ObjectKind, Value,
};

/// Everything the inspector needs to know about live objects.
///
/// The inspector never owns objects; it only holds [`ObjectHandle`]s and asks
/// the host about them. Every query must tolerate handles to objects that
/// have since been destroyed: [`is_valid`](Self::is_valid) returns `false` and
/// the other queries return `None` / empty results.
pub trait ReflectionHost {
    /// Whether `object` still refers to a live, non-destroyed object.
    fn is_valid(&self, object: ObjectHandle) -> bool;

    /// Broad category of `object`, or `None` if it is no longer live.
    fn kind(&self, object: ObjectHandle) -> Option<ObjectKind>;

    /// Lifecycle markers of `object`. Empty for dead objects.
    fn flags(&self, object: ObjectHandle) -> ObjectFlags;

    /// Short type name of `object`.
    fn type_name(&self, object: ObjectHandle) -> Option<String>;

    /// Instance name of `object`.
    fn object_name(&self, object: ObjectHandle) -> Option<String>;

    /// Declared fields of `object`'s current type, in declaration order,
    /// including fields that are not externally visible.
    fn fields(&self, object: ObjectHandle) -> Vec<FieldDescriptor>;

    /// Current value of the field `name` on `object`, or `None` if the object
    /// is dead or its type declares no such field.
    fn field_value(&self, object: ObjectHandle, name: &str) -> Option<Value>;

    /// Declared fields carrying the externally-visible marker.
    fn visible_fields(&self, object: ObjectHandle) -> Vec<FieldDescriptor> {
        self.fields(object)
            .into_iter()
            .filter(FieldDescriptor::is_visible)
            .collect()
    }

    /// Render `value` as display text, or `None` if it cannot be exported.
    ///
    /// The default resolves object references through
    /// [`object_name`](Self::object_name).
    fn export_text(&self, value: &Value) -> Option<String> {
        export_text(value, &|handle| self.object_name(handle))
    }
}
