//! Field and object metadata flags.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Capability markers carried by a field's metadata.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct FieldFlags: u32 {
        /// Field is marked as externally visible. The walker skips every
        /// field without this marker.
        const VISIBLE = 1 << 0;
    }
}

bitflags! {
    /// Lifecycle markers carried by a live object.
    ///
    /// The asset heuristic combines these; see the classifier in the
    /// `actor_debugger` crate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ObjectFlags: u32 {
        /// Object is visible outside the package that owns it.
        const PUBLIC = 1 << 0;
        /// Object is kept alive even when unreferenced.
        const STANDALONE = 1 << 1;
        /// Object is never persisted.
        const TRANSIENT = 1 << 2;
        /// Object is a template for other instances.
        const ARCHETYPE = 1 << 3;
        /// Object is the class default instance.
        const CLASS_DEFAULT = 1 << 4;
    }
}

impl Default for FieldFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl Default for ObjectFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl ObjectFlags {
    /// Markers typical of shared, persistent resources.
    pub const PERSISTENT_MARKERS: Self = Self::PUBLIC.union(Self::STANDALONE);

    /// Markers that rule out a persistent resource.
    pub const TEMPLATE_MARKERS: Self = Self::TRANSIENT
        .union(Self::ARCHETYPE)
        .union(Self::CLASS_DEFAULT);
}
