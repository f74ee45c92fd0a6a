//! Selectable item handles.
//!
//! An [`Item`] is a cheap, clonable handle for one plugin card. Clones refer
//! to the same card: equality and hashing are by identity ([`ItemId`]), not
//! by content, so two cards showing the same plugin are still distinct items.
//!
//! Each item carries a tri-state [`SelectionMarker`]. The marker is readable
//! by anyone (renderers use it to paint the card) but only the
//! [`SelectionModel`](super::SelectionModel) writes it.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};

/// Visual selection state of a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionMarker {
    /// Not selected and not under the pointer.
    #[default]
    None,
    /// Under the pointer but not selected.
    Hover,
    /// Part of the current selection.
    Selected,
}

impl fmt::Display for SelectionMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Hover => write!(f, "hover"),
            Self::Selected => write!(f, "selected"),
        }
    }
}

/// Process-unique identity of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl ItemId {
    fn next() -> Self {
        static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric value.
    pub fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The plugin shown by a card.
///
/// Only the fields the panel itself needs are kept here: identity and
/// labels for copy/announce, and the state flags that decide which bulk
/// actions apply.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PluginDescriptor {
    /// Stable plugin identifier (e.g. `org.example.markdown`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Installed or offered version.
    pub version: String,
    /// Whether the plugin is currently enabled.
    pub enabled: bool,
    /// Bundled plugins cannot be uninstalled.
    pub bundled: bool,
    /// Whether a newer version is available.
    pub update_available: bool,
}

impl PluginDescriptor {
    /// Create an enabled, non-bundled descriptor.
    pub fn new(id: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            enabled: true,
            bundled: false,
            update_available: false,
        }
    }

    /// Set the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the bundled flag.
    pub fn with_bundled(mut self, bundled: bool) -> Self {
        self.bundled = bundled;
        self
    }

    /// Set the update-available flag.
    pub fn with_update_available(mut self, update_available: bool) -> Self {
        self.update_available = update_available;
        self
    }
}

struct ItemInner {
    id: ItemId,
    descriptor: RwLock<PluginDescriptor>,
    marker: Mutex<SelectionMarker>,
}

/// Handle to one selectable plugin card.
#[derive(Clone)]
pub struct Item {
    inner: Arc<ItemInner>,
}

impl Item {
    /// Create a new, unselected item for `descriptor`.
    pub fn new(descriptor: PluginDescriptor) -> Self {
        Self {
            inner: Arc::new(ItemInner {
                id: ItemId::next(),
                descriptor: RwLock::new(descriptor),
                marker: Mutex::new(SelectionMarker::None),
            }),
        }
    }

    /// The identity of this item.
    pub fn id(&self) -> ItemId {
        self.inner.id
    }

    /// A snapshot of the plugin descriptor.
    pub fn descriptor(&self) -> PluginDescriptor {
        self.inner.descriptor.read().clone()
    }

    /// The plugin identifier.
    pub fn plugin_id(&self) -> String {
        self.inner.descriptor.read().id.clone()
    }

    /// Read the descriptor without cloning it.
    pub fn with_descriptor<R>(&self, f: impl FnOnce(&PluginDescriptor) -> R) -> R {
        f(&self.inner.descriptor.read())
    }

    /// Update the descriptor in place (e.g. after enabling the plugin).
    pub fn update_descriptor(&self, f: impl FnOnce(&mut PluginDescriptor)) {
        f(&mut self.inner.descriptor.write());
    }

    /// The current selection marker.
    pub fn marker(&self) -> SelectionMarker {
        *self.inner.marker.lock()
    }

    /// Shorthand for `marker() == SelectionMarker::Selected`.
    pub fn is_selected(&self) -> bool {
        self.marker() == SelectionMarker::Selected
    }

    /// Write the marker. Returns `true` if it changed.
    pub(crate) fn set_marker(&self, marker: SelectionMarker) -> bool {
        let mut current = self.inner.marker.lock();
        if *current == marker {
            return false;
        }
        *current = marker;
        true
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("id", &self.inner.id)
            .field("plugin", &self.inner.descriptor.read().id)
            .field("marker", &self.marker())
            .finish()
    }
}

static_assertions::assert_impl_all!(Item: Send, Sync);
