//! Reflection walk: object graph -> [`PropertyNode`] tree.

use actor_debugger_common::ObjectHandle;

use crate::classify::{classify, AssetClassifier, ObjectClass};
use crate::host::ReflectionHost;
use crate::node::PropertyNode;

/// Limits applied while walking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkerConfig {
    /// Deepest nesting level that may be produced below the root nodes
    /// (roots are level 0). `None` disables the cap.
    pub max_depth: Option<usize>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(32),
        }
    }
}

/// Walks an object's visible fields, expanding references to plain
/// sub-objects and stopping at actor and asset boundaries.
///
/// The walk is a pure function of the object graph at call time.
pub struct ReflectionWalker<'a, H: ReflectionHost + ?Sized> {
    host: &'a H,
    classifier: &'a dyn AssetClassifier,
    config: WalkerConfig,
}

impl<'a, H: ReflectionHost + ?Sized> ReflectionWalker<'a, H> {
    pub fn new(host: &'a H, classifier: &'a dyn AssetClassifier) -> Self {
        Self {
            host,
            classifier,
            config: WalkerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: WalkerConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the property tree of `object`.
    ///
    /// Returns an empty sequence for `None` or a dead object.
    pub fn walk(&self, object: Option<ObjectHandle>) -> Vec<PropertyNode> {
        let Some(object) = object else {
            return Vec::new();
        };
        let mut ancestors = Vec::new();
        self.walk_object(object, 0, &mut ancestors)
    }

    fn walk_object(
        &self,
        object: ObjectHandle,
        level: usize,
        ancestors: &mut Vec<ObjectHandle>,
    ) -> Vec<PropertyNode> {
        if !self.host.is_valid(object) {
            return Vec::new();
        }

        ancestors.push(object);

        let mut nodes = Vec::new();
        for field in self.host.visible_fields(object) {
            let mut node = PropertyNode::new(object, field.name);

            let referenced = self
                .host
                .field_value(object, &node.field_name)
                .and_then(|value| value.as_object());
            if let Some(child) = referenced {
                if self.should_expand(child, level, ancestors) {
                    node.children = self.walk_object(child, level + 1, ancestors);
                }
            }

            nodes.push(node);
        }

        ancestors.pop();
        nodes
    }

    /// Recursion-eligibility policy for a referenced object.
    fn should_expand(&self, child: ObjectHandle, level: usize, ancestors: &[ObjectHandle]) -> bool {
        match classify(self.host, self.classifier, child) {
            None | Some(ObjectClass::Actor) | Some(ObjectClass::Asset) => false,
            Some(ObjectClass::Plain) => {
                if ancestors.contains(&child) {
                    log::debug!("[ReflectionWalker] {} already on the walk path, not expanding", child);
                    return false;
                }
                if self.config.max_depth.is_some_and(|max| level + 1 > max) {
                    log::debug!(
                        "[ReflectionWalker] depth cap {:?} reached at {}, not expanding",
                        self.config.max_depth,
                        child
                    );
                    return false;
                }
                true
            }
        }
    }
}
