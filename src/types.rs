//! Core types for spark-dom.
//!
//! These types are shared by the document, the element builder and the mount
//! pipeline.

use std::fmt;

// =============================================================================
// Cleanup
// =============================================================================

/// Cleanup function returned by subscriptions and effects.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Node handle
// =============================================================================

/// Handle to a node in a [`Document`](crate::dom::Document).
///
/// Nodes live in an index-addressed arena and released slots are reused. The
/// generation tells a reused slot apart from the node that held it before, so
/// a stale handle never addresses a newer node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl NodeId {
    /// Arena slot of the node.
    pub fn index(self) -> usize {
        self.index
    }

    /// How many times the slot was released before this node took it.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.generation == 0 {
            write!(f, "#{}", self.index)
        } else {
            write!(f, "#{}v{}", self.index, self.generation)
        }
    }
}

// =============================================================================
// Output events (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Native events an element type can expose as output streams.
    ///
    /// Combine with bitwise OR: `Events::CLICK | Events::DBLCLICK`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Events: u16 {
        const CLICK = 1 << 0;
        const DBLCLICK = 1 << 1;
        const INPUT = 1 << 2;
        const CHANGE = 1 << 3;
        const KEYDOWN = 1 << 4;
        const KEYUP = 1 << 5;
        const FOCUS = 1 << 6;
        const BLUR = 1 << 7;
        const MOUSEENTER = 1 << 8;
        const MOUSELEAVE = 1 << 9;
        const SUBMIT = 1 << 10;
    }
}

/// DOM event name of each flag, in declaration order.
const EVENT_NAMES: &[(Events, &str)] = &[
    (Events::CLICK, "click"),
    (Events::DBLCLICK, "dblclick"),
    (Events::INPUT, "input"),
    (Events::CHANGE, "change"),
    (Events::KEYDOWN, "keydown"),
    (Events::KEYUP, "keyup"),
    (Events::FOCUS, "focus"),
    (Events::BLUR, "blur"),
    (Events::MOUSEENTER, "mouseenter"),
    (Events::MOUSELEAVE, "mouseleave"),
    (Events::SUBMIT, "submit"),
];

impl Events {
    /// DOM event names of the set flags, in declaration order.
    pub fn event_names(self) -> Vec<&'static str> {
        EVENT_NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }

    /// Flag for a DOM event name.
    pub fn from_event_name(name: &str) -> Option<Events> {
        EVENT_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(flag, _)| *flag)
    }
}

// =============================================================================
// DOM event
// =============================================================================

/// An event delivered to listeners and forwarded into output streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    /// Event type (`"click"`, `"input"`, ...).
    pub kind: String,
    /// Node the event was dispatched on.
    pub target: NodeId,
    /// Node whose listener is running (differs from `target` while bubbling).
    pub current_target: NodeId,
    /// Optional payload, e.g. the new value for `input` events.
    pub detail: Option<String>,
    /// Dispatch sequence number, unique per document.
    pub seq: u64,
}
