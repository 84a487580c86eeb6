//! Tree presentation adapter: maps [`PropertyNode`]s onto an expandable,
//! two-column row model that any tree/table widget can render.

use std::collections::HashSet;

use serde::Serialize;

use crate::format::{format_node, INVALID_PROPERTY};
use crate::host::ReflectionHost;
use crate::node::{NodePath, PropertyNode};

/// Layout hint for one column of the property table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnSpec {
    pub id: &'static str,
    pub label: &'static str,
    /// Share of the available width.
    pub fill_width: f32,
}

pub const NAME_COLUMN: ColumnSpec = ColumnSpec {
    id: "PropertyName",
    label: "Name",
    fill_width: 0.1,
};

pub const VALUE_COLUMN: ColumnSpec = ColumnSpec {
    id: "PropertyValue",
    label: "Value",
    fill_width: 0.9,
};

pub const COLUMNS: [ColumnSpec; 2] = [NAME_COLUMN, VALUE_COLUMN];

/// Rendered text of one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyRow {
    pub name: String,
    pub value: String,
}

/// A row in the flattened, currently visible part of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatRow {
    pub path: NodePath,
    /// Zero for root rows.
    pub depth: usize,
    pub row: PropertyRow,
    pub expandable: bool,
    pub expanded: bool,
}

/// Build the two-column row for `node`.
pub fn row_for<H>(host: &H, node: &PropertyNode) -> PropertyRow
where
    H: ReflectionHost + ?Sized,
{
    let name = if node.is_valid(host) {
        node.field_name.clone()
    } else {
        INVALID_PROPERTY.to_string()
    };
    PropertyRow {
        name,
        value: format_node(host, Some(node)),
    }
}

pub fn children_of(node: &PropertyNode) -> &[PropertyNode] {
    &node.children
}

pub fn is_expandable(node: &PropertyNode) -> bool {
    node.has_children()
}

/// The displayed root sequence plus per-path expansion and selection state.
///
/// The roots are replaced wholesale on every refresh; expansion and
/// selection are keyed by [`NodePath`] so they carry over to the new tree.
#[derive(Debug, Default)]
pub struct PropertyTree {
    roots: Vec<PropertyNode>,
    expanded: HashSet<NodePath>,
    selected: Option<NodePath>,
    revision: u64,
}

impl PropertyTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roots(&self) -> &[PropertyNode] {
        &self.roots
    }

    /// Number of times the roots have been replaced. Renderers redraw when
    /// this changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Re-point the adapter at a freshly built tree.
    ///
    /// Selection whose path no longer resolves is cleared. Expansion state is
    /// kept, so a field that temporarily loses its children reopens when they
    /// come back.
    pub fn set_roots(&mut self, roots: Vec<PropertyNode>) {
        self.roots = roots;
        self.revision += 1;

        if let Some(selected) = &self.selected {
            if selected.resolve(&self.roots).is_none() {
                log::debug!("[PropertyTree] selection {} vanished after rebuild", selected);
                self.selected = None;
            }
        }
    }

    /// Drop the displayed tree and all view state.
    pub fn clear(&mut self) {
        self.set_roots(Vec::new());
        self.expanded.clear();
    }

    pub fn node(&self, path: &NodePath) -> Option<&PropertyNode> {
        path.resolve(&self.roots)
    }

    pub fn is_expanded(&self, path: &NodePath) -> bool {
        self.expanded.contains(path)
    }

    /// Expand or collapse the node at `path`. Returns `false` if there is no
    /// expandable node there.
    pub fn set_expanded(&mut self, path: &NodePath, expanded: bool) -> bool {
        if !self.node(path).is_some_and(is_expandable) {
            return false;
        }
        if expanded {
            self.expanded.insert(path.clone());
        } else {
            self.expanded.remove(path);
        }
        true
    }

    pub fn toggle_expanded(&mut self, path: &NodePath) -> bool {
        let expanded = self.is_expanded(path);
        self.set_expanded(path, !expanded)
    }

    /// Select the row at `path`. Returns `false` if no node lives there.
    pub fn select(&mut self, path: NodePath) -> bool {
        if self.node(&path).is_none() {
            return false;
        }
        self.selected = Some(path);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_path(&self) -> Option<&NodePath> {
        self.selected.as_ref()
    }

    pub fn selected_row<H>(&self, host: &H) -> Option<PropertyRow>
    where
        H: ReflectionHost + ?Sized,
    {
        let path = self.selected.as_ref()?;
        self.node(path).map(|node| row_for(host, node))
    }

    /// Rows currently visible: every root, plus the children of every
    /// expanded node, in pre-order. Values are formatted only for these rows.
    pub fn visible_rows<H>(&self, host: &H) -> Vec<FlatRow>
    where
        H: ReflectionHost + ?Sized,
    {
        let mut rows = Vec::new();
        for root in &self.roots {
            self.flatten_visible(host, root, NodePath::root(root.field_name.clone()), &mut rows);
        }
        rows
    }

    fn flatten_visible<H>(&self, host: &H, node: &PropertyNode, path: NodePath, rows: &mut Vec<FlatRow>)
    where
        H: ReflectionHost + ?Sized,
    {
        let expandable = is_expandable(node);
        let expanded = expandable && self.is_expanded(&path);

        rows.push(FlatRow {
            path: path.clone(),
            depth: path.depth(),
            row: row_for(host, node),
            expandable,
            expanded,
        });

        if expanded {
            for child in children_of(node) {
                self.flatten_visible(host, child, path.child(child.field_name.clone()), rows);
            }
        }
    }
}
