//! Reflected value model and human-readable text export.

use serde::{Deserialize, Serialize};

use crate::ObjectHandle;

/// The current value of a reflected field.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Value {
    /// Empty optional or null reference.
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    /// Reference to another object in the host's table.
    Object(ObjectHandle),
    List(Vec<Value>),
    /// Inline (non-object) struct, fields in declaration order.
    Struct(Vec<(String, Value)>),
    /// A value the host knows about but cannot render; carries its type name.
    Opaque(String),
}

impl Value {
    /// The referenced object, if this value is a non-null object reference.
    pub fn as_object(&self) -> Option<ObjectHandle> {
        match self {
            Value::Object(handle) => Some(*handle),
            _ => None,
        }
    }
}

/// Export `value` as display text.
///
/// Strings are unquoted, floats rounded to three decimals, and object
/// references shown by name. `object_name` resolves a reference and returns
/// `None` when the handle no longer refers to a live object; such references
/// render as `None`, the same as a null reference.
///
/// Returns `None` if the value, or anything nested in it, is [`Value::Opaque`].
pub fn export_text(value: &Value, object_name: &dyn Fn(ObjectHandle) -> Option<String>) -> Option<String> {
    let text = match value {
        Value::Null => "None".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::UInt(u) => u.to_string(),
        Value::Float(f) => format!("{:.3}", f),
        Value::Text(s) => s.clone(),
        Value::Object(handle) => object_name(*handle).unwrap_or_else(|| "None".to_string()),
        Value::List(items) => {
            let parts = items
                .iter()
                .map(|item| export_text(item, object_name))
                .collect::<Option<Vec<_>>>()?;
            format!("({})", parts.join(","))
        }
        Value::Struct(fields) => {
            let parts = fields
                .iter()
                .map(|(name, item)| export_text(item, object_name).map(|text| format!("{name}={text}")))
                .collect::<Option<Vec<_>>>()?;
            format!("({})", parts.join(","))
        }
        Value::Opaque(_) => return None,
    };
    Some(text)
}

/// Conversion of a field's Rust value into a reflected [`Value`].
///
/// `#[derive(Inspect)]` requires this for every field that is not
/// `#[inspect(skip)]`.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

macro_rules! impl_to_value {
    ($variant:ident as $target:ty: $($t:ty),*) => {
        $(
            impl ToValue for $t {
                fn to_value(&self) -> Value {
                    Value::$variant(*self as $target)
                }
            }
        )*
    };
}

impl_to_value!(Int as i64: i8, i16, i32, i64, isize);
impl_to_value!(UInt as u64: u8, u16, u32, u64, usize);
impl_to_value!(Float as f64: f32, f64);

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl ToValue for &'static str {
    fn to_value(&self) -> Value {
        Value::Text((*self).to_string())
    }
}

impl ToValue for ObjectHandle {
    fn to_value(&self) -> Value {
        Value::Object(*self)
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}
