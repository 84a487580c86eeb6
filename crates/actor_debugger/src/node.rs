use std::fmt;

use actor_debugger_common::ObjectHandle;
use serde::{Deserialize, Serialize};

use crate::host::ReflectionHost;

/// One discovered field on some owning object, plus the fields discovered
/// beneath it.
///
/// A node only records *where* the value lives (`owner` + `field_name`); the
/// value itself is re-read on every render. Nodes are rebuilt from scratch on
/// every walk and never keep the owner alive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyNode {
    /// Object declaring the field. Non-owning.
    pub owner: ObjectHandle,
    pub field_name: String,
    /// Child nodes in field enumeration order; empty for leaves.
    pub children: Vec<PropertyNode>,
}

impl PropertyNode {
    pub fn new(owner: ObjectHandle, field_name: impl Into<String>) -> Self {
        Self {
            owner,
            field_name: field_name.into(),
            children: Vec::new(),
        }
    }

    /// A node is valid while its owner is live and it names a field.
    ///
    /// Must be re-checked before every read: the owner can be destroyed
    /// between the walk and the render.
    pub fn is_valid<H>(&self, host: &H) -> bool
    where
        H: ReflectionHost + ?Sized,
    {
        !self.field_name.is_empty() && host.is_valid(self.owner)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Field-name path from a root node down to a node.
///
/// Paths, unlike nodes, survive tree rebuilds, so expansion and selection
/// state is keyed by them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodePath(Vec<String>);

impl NodePath {
    pub fn root(field_name: impl Into<String>) -> Self {
        Self(vec![field_name.into()])
    }

    pub fn child(&self, field_name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(field_name.into());
        Self(segments)
    }

    /// Zero for a root node.
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Resolve this path against a root sequence.
    pub fn resolve<'a>(&self, roots: &'a [PropertyNode]) -> Option<&'a PropertyNode> {
        let (first, rest) = self.0.split_first()?;
        let mut node = roots.iter().find(|node| &node.field_name == first)?;
        for segment in rest {
            node = node.children.iter().find(|child| &child.field_name == segment)?;
        }
        Some(node)
    }
}

impl From<&str> for NodePath {
    /// Parse a dotted path such as `"Inventory.Count"`.
    fn from(dotted: &str) -> Self {
        Self(dotted.split('.').map(str::to_string).collect())
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}
