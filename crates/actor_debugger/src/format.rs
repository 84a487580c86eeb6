//! Value formatting for property nodes.

use thiserror::Error;

use crate::host::ReflectionHost;
use crate::node::PropertyNode;

/// Displayed when a node is missing, names no field, or its owner is gone.
pub const INVALID_PROPERTY: &str = "Invalid Property";

/// Displayed when the owner is live but the field cannot be resolved or
/// exported.
pub const PROPERTY_NOT_FOUND: &str = "Property not found";

/// Why a node's value could not be rendered. `Display` yields the sentinel
/// text shown in place of the value.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    #[error("{}", INVALID_PROPERTY)]
    InvalidNode,
    #[error("{}", PROPERTY_NOT_FOUND)]
    PropertyNotFound,
}

/// Resolve the node's field on its owner *now* and export it as display text.
pub fn try_format_node<H>(host: &H, node: Option<&PropertyNode>) -> Result<String, FormatError>
where
    H: ReflectionHost + ?Sized,
{
    let node = node
        .filter(|node| node.is_valid(host))
        .ok_or(FormatError::InvalidNode)?;

    let value = host
        .field_value(node.owner, &node.field_name)
        .ok_or(FormatError::PropertyNotFound)?;

    host.export_text(&value)
        .ok_or(FormatError::PropertyNotFound)
}

/// Like [`try_format_node`], with failures rendered as their sentinel text.
pub fn format_node<H>(host: &H, node: Option<&PropertyNode>) -> String
where
    H: ReflectionHost + ?Sized,
{
    try_format_node(host, node).unwrap_or_else(|err| err.to_string())
}
