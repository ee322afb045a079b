//! Abstract rendering surface.
//!
//! The renderer, the site info population and the interaction layer only talk
//! to this trait. Operations on a node that no longer exists are no-ops.

use std::fmt;
use std::sync::Arc;

/// Opaque handle to an element owned by a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// User input events a listener can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiEvent {
    Click,
    PointerEnter,
    PointerLeave,
}

/// Callback invoked when an event is dispatched to a node.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Capabilities the core needs from a UI surface.
pub trait UiSink: Send + Sync {
    /// Attached element with the given `id` attribute.
    fn slot(&self, id: &str) -> Option<NodeId>;

    /// Root element that transient overlays are appended to.
    fn body(&self) -> NodeId;

    /// First descendant of `root` carrying `class`.
    fn find_by_class(&self, root: NodeId, class: &str) -> Option<NodeId>;

    fn create_element(&self, tag: &str) -> NodeId;

    /// Replace the node's content with plain text.
    fn set_text(&self, node: NodeId, text: &str);

    fn set_attribute(&self, node: NodeId, name: &str, value: &str);

    fn add_class(&self, node: NodeId, class: &str);

    fn remove_class(&self, node: NodeId, class: &str);

    fn set_style(&self, node: NodeId, property: &str, value: &str);

    /// Drop every descendant of `node`, listeners included.
    fn clear_children(&self, node: NodeId);

    fn append_child(&self, parent: NodeId, child: NodeId);

    /// Detach and drop `node` with its subtree.
    fn remove(&self, node: NodeId);

    /// Set the page title.
    fn set_title(&self, title: &str);

    fn add_listener(&self, node: NodeId, event: UiEvent, listener: Listener);
}
