//! Document - headless DOM used as the element creation context.
//!
//! Nodes are indices into an arena (the same slot-reuse scheme as a component
//! registry: released indices go to a free list). Each slot carries a
//! generation bumped on release, so handles to released nodes stay dead even
//! after their slot is reused.
//!
//! A [`Document`] is a cheap, cloneable handle; clones share one tree.
//!
//! The mount pipeline takes the document as an explicit parameter, so tests
//! and embedders can run several independent documents side by side.
//!
//! # Example
//!
//! ```ignore
//! let doc = Document::new();
//! let root = doc.create_element("div")?;
//! let span = doc.create_element("span")?;
//! doc.append_child(root, span);
//! doc.set_style(span, "backgroundColor", "red");
//!
//! assert_eq!(doc.tag_name(span).as_deref(), Some("SPAN"));
//! assert_eq!(doc.style(span, "background-color").as_deref(), Some("red"));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::node::{NodeData, NodeKind};
use super::style::to_css_property;
use super::tags::TagPolicy;
use crate::config::ConfigValue;
use crate::error::{DomError, Result};
use crate::types::{DomEvent, NodeId};

/// Event listener callback (Rc so dispatch can call it without holding a borrow).
pub type EventHandler = Rc<dyn Fn(&DomEvent)>;

/// Handle for removing a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

/// Document-level settings.
#[derive(Debug, Clone, Default)]
pub struct DocumentConfig {
    /// Which tag names `create_element` accepts.
    pub tag_policy: TagPolicy,
}

struct Listener {
    id: ListenerId,
    kind: String,
    handler: EventHandler,
}

/// One arena slot. `generation` counts releases of this slot.
struct Slot {
    generation: u32,
    data: Option<NodeData>,
}

struct DocumentState {
    config: DocumentConfig,
    nodes: Vec<Slot>,
    free: Vec<usize>,
    listeners: HashMap<NodeId, Vec<Listener>>,
    listener_nodes: HashMap<ListenerId, NodeId>,
    next_listener: usize,
    next_seq: u64,
}

impl DocumentState {
    fn new(config: DocumentConfig) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            free: Vec::new(),
            listeners: HashMap::new(),
            listener_nodes: HashMap::new(),
            next_listener: 0,
            next_seq: 0,
        }
    }

    fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.data.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.data.as_mut())
    }

    fn allocate(&mut self, data: NodeData) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.nodes[index];
            slot.data = Some(data);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            self.nodes.push(Slot {
                generation: 0,
                data: Some(data),
            });
            NodeId {
                index: self.nodes.len() - 1,
                generation: 0,
            }
        }
    }

    fn detach(&mut self, node: NodeId) {
        let parent = self.node_mut(node).and_then(|n| n.parent.take());
        if let Some(parent) = parent {
            if let Some(parent_data) = self.node_mut(parent) {
                parent_data.children.retain(|&c| c != node);
            }
        }
    }

    /// Release a node and its whole subtree, dropping their listeners.
    fn release(&mut self, node: NodeId) {
        self.detach(node);
        self.release_subtree(node);
    }

    fn release_subtree(&mut self, node: NodeId) {
        let Some(data) = self
            .nodes
            .get_mut(node.index)
            .filter(|slot| slot.generation == node.generation)
            .and_then(|slot| slot.data.take())
        else {
            return;
        };
        for child in data.children {
            self.release_subtree(child);
        }
        if let Some(listeners) = self.listeners.remove(&node) {
            for listener in listeners {
                self.listener_nodes.remove(&listener.id);
            }
        }
        if let Some(slot) = self.nodes.get_mut(node.index) {
            slot.generation = slot.generation.wrapping_add(1);
        }
        self.free.push(node.index);
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.node(id).and_then(|n| n.parent);
        }
        false
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let Some(data) = self.node(node) else { return };
        match &data.kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element { .. } => {
                for &child in &data.children {
                    self.collect_text(child, out);
                }
            }
        }
    }
}

/// Headless document handle.
#[derive(Clone)]
pub struct Document {
    state: Rc<RefCell<DocumentState>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_config(DocumentConfig::default())
    }

    pub fn with_config(config: DocumentConfig) -> Self {
        Self {
            state: Rc::new(RefCell::new(DocumentState::new(config))),
        }
    }

    pub fn config(&self) -> DocumentConfig {
        self.state.borrow().config.clone()
    }

    /// Whether two handles share the same tree.
    pub fn same_document(&self, other: &Document) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    // =========================================================================
    // Creation & lifetime
    // =========================================================================

    /// Create a detached element. The tag must pass the document's tag policy.
    pub fn create_element(&self, tag: &str) -> Result<NodeId> {
        let mut state = self.state.borrow_mut();
        state
            .config
            .tag_policy
            .check(tag)
            .map_err(|reason| DomError::ElementCreation {
                tag: tag.to_string(),
                reason,
            })?;
        let node = state.allocate(NodeData::element(tag.to_ascii_lowercase()));
        log::trace!("create_element: <{tag}> -> {node}");
        Ok(node)
    }

    /// Create a detached text node.
    pub fn create_text_node(&self, text: &str) -> NodeId {
        self.state.borrow_mut().allocate(NodeData::text(text.to_string()))
    }

    pub fn is_alive(&self, node: NodeId) -> bool {
        self.state.borrow().node(node).is_some()
    }

    /// Number of live nodes (attached or not).
    pub fn node_count(&self) -> usize {
        self.state.borrow().nodes.iter().filter(|slot| slot.data.is_some()).count()
    }

    /// Release a node and its subtree. Removes their listeners.
    pub fn release(&self, node: NodeId) {
        self.state.borrow_mut().release(node);
    }

    // =========================================================================
    // Tree
    // =========================================================================

    /// Append `child` as the last child of `parent`, moving it if attached
    /// elsewhere. Returns false (and changes nothing) if either node is dead,
    /// `parent` is a text node, or the move would create a cycle.
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> bool {
        let mut state = self.state.borrow_mut();
        let parent_ok = state.node(parent).is_some_and(NodeData::is_element);
        if !parent_ok || state.node(child).is_none() || state.is_ancestor_or_self(child, parent) {
            log::debug!("append_child: rejected {child} -> {parent}");
            return false;
        }
        state.detach(child);
        if let Some(data) = state.node_mut(child) {
            data.parent = Some(parent);
        }
        if let Some(data) = state.node_mut(parent) {
            data.children.push(child);
        }
        true
    }

    /// Remove a node from its parent without releasing it.
    pub fn detach(&self, node: NodeId) {
        self.state.borrow_mut().detach(node);
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.state.borrow().node(node).and_then(|n| n.parent)
    }

    /// All child nodes, text included.
    pub fn child_nodes(&self, node: NodeId) -> Vec<NodeId> {
        self.state
            .borrow()
            .node(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Element children only (the DOM `children` collection).
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        let state = self.state.borrow();
        let Some(data) = state.node(node) else {
            return Vec::new();
        };
        data.children
            .iter()
            .copied()
            .filter(|&c| state.node(c).is_some_and(NodeData::is_element))
            .collect()
    }

    pub fn first_element_child(&self, node: NodeId) -> Option<NodeId> {
        self.children(node).first().copied()
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.state.borrow().node(node).is_some_and(NodeData::is_element)
    }

    /// Upper-case tag name (`"SPAN"`), as the DOM reports it for HTML elements.
    pub fn tag_name(&self, node: NodeId) -> Option<String> {
        self.local_name(node).map(|name| name.to_ascii_uppercase())
    }

    /// Lower-case tag name (`"span"`).
    pub fn local_name(&self, node: NodeId) -> Option<String> {
        self.state
            .borrow()
            .node(node)
            .and_then(|n| n.local_name().map(str::to_string))
    }

    // =========================================================================
    // Id & classes
    // =========================================================================

    pub fn id(&self, node: NodeId) -> Option<String> {
        self.state.borrow().node(node).and_then(|n| n.id.clone())
    }

    pub fn set_id(&self, node: NodeId, id: &str) {
        if let Some(data) = self.state.borrow_mut().node_mut(node) {
            data.id = Some(id.to_string());
        }
    }

    /// Class names in insertion order.
    pub fn class_list(&self, node: NodeId) -> Vec<String> {
        self.state
            .borrow()
            .node(node)
            .map(|n| n.classes.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Space-joined class list (`classList.toString()`).
    pub fn class_name(&self, node: NodeId) -> String {
        self.class_list(node).join(" ")
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.state
            .borrow()
            .node(node)
            .is_some_and(|n| n.classes.contains(class))
    }

    pub fn add_class(&self, node: NodeId, class: &str) {
        if let Some(data) = self.state.borrow_mut().node_mut(node) {
            data.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&self, node: NodeId, class: &str) {
        if let Some(data) = self.state.borrow_mut().node_mut(node) {
            data.classes.shift_remove(class);
        }
    }

    // =========================================================================
    // Style
    // =========================================================================

    /// Inline style value; `property` may be camelCase or kebab-case.
    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        let property = to_css_property(property);
        self.state
            .borrow()
            .node(node)
            .and_then(|n| n.style.get(&property).cloned())
    }

    pub fn set_style(&self, node: NodeId, property: &str, value: &str) {
        let property = to_css_property(property);
        if let Some(data) = self.state.borrow_mut().node_mut(node) {
            if value.is_empty() {
                data.style.shift_remove(&property);
            } else {
                data.style.insert(property, value.to_string());
            }
        }
    }

    /// Inline style serialized as CSS text (`"color: red; margin: 0"`).
    pub fn style_text(&self, node: NodeId) -> String {
        self.state
            .borrow()
            .node(node)
            .map(|n| {
                n.style
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect::<Vec<_>>()
                    .join("; ")
            })
            .unwrap_or_default()
    }

    // =========================================================================
    // Attributes & properties
    // =========================================================================

    /// Attribute value. `id` and `class` reflect the element's id and class list.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        match name {
            "id" => self.id(node),
            "class" => {
                let classes = self.class_name(node);
                (!classes.is_empty()).then_some(classes)
            }
            "style" => {
                let text = self.style_text(node);
                (!text.is_empty()).then_some(text)
            }
            _ => self
                .state
                .borrow()
                .node(node)
                .and_then(|n| n.attributes.get(name).cloned()),
        }
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        match name {
            "id" => self.set_id(node, value),
            "class" => {
                if let Some(data) = self.state.borrow_mut().node_mut(node) {
                    data.classes = value.split_whitespace().map(str::to_string).collect();
                }
            }
            "style" => {
                for declaration in value.split(';') {
                    if let Some((property, val)) = declaration.split_once(':') {
                        self.set_style(node, property.trim(), val.trim());
                    }
                }
            }
            _ => {
                if let Some(data) = self.state.borrow_mut().node_mut(node) {
                    data.attributes.insert(name.to_string(), value.to_string());
                }
            }
        }
    }

    pub fn remove_attribute(&self, node: NodeId, name: &str) {
        if let Some(data) = self.state.borrow_mut().node_mut(node) {
            match name {
                "id" => data.id = None,
                "class" => data.classes.clear(),
                "style" => data.style.clear(),
                _ => {
                    data.attributes.shift_remove(name);
                }
            }
        }
    }

    /// DOM property value. `id`, `className` and `textContent` reflect element state.
    pub fn property(&self, node: NodeId, name: &str) -> Option<ConfigValue> {
        match name {
            "id" => self.id(node).map(ConfigValue::Text),
            "className" => Some(ConfigValue::Text(self.class_name(node))),
            "textContent" => Some(ConfigValue::Text(self.text_content(node))),
            _ => self
                .state
                .borrow()
                .node(node)
                .and_then(|n| n.properties.get(name).cloned()),
        }
    }

    pub fn set_property(&self, node: NodeId, name: &str, value: ConfigValue) {
        match name {
            "id" | "className" | "textContent" => {
                let text = value.as_text().unwrap_or_default();
                match name {
                    "id" => self.set_id(node, &text),
                    "className" => self.set_attribute(node, "class", &text),
                    _ => self.set_text_content(node, &text),
                }
            }
            _ => {
                if let Some(data) = self.state.borrow_mut().node_mut(node) {
                    data.properties.insert(name.to_string(), value);
                }
            }
        }
    }

    // =========================================================================
    // Text
    // =========================================================================

    /// Concatenated text of the node's descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.state.borrow().collect_text(node, &mut out);
        out
    }

    /// Replace all children with a single text node (none for empty text).
    pub fn set_text_content(&self, node: NodeId, text: &str) {
        let mut state = self.state.borrow_mut();
        let Some(data) = state.node_mut(node) else { return };
        if let NodeKind::Text(content) = &mut data.kind {
            *content = text.to_string();
            return;
        }
        let children = std::mem::take(&mut data.children);
        for child in children {
            if let Some(child_data) = state.node_mut(child) {
                child_data.parent = None;
            }
            state.release_subtree(child);
        }
        if !text.is_empty() {
            let text_node = state.allocate(NodeData::text(text.to_string()));
            if let Some(data) = state.node_mut(text_node) {
                data.parent = Some(node);
            }
            if let Some(data) = state.node_mut(node) {
                data.children.push(text_node);
            }
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Register a listener for `kind` events on `node`.
    ///
    /// Listeners on released nodes are never registered; the returned id is
    /// already removed.
    pub fn add_event_listener(
        &self,
        node: NodeId,
        kind: &str,
        handler: impl Fn(&DomEvent) + 'static,
    ) -> ListenerId {
        let mut state = self.state.borrow_mut();
        let id = ListenerId(state.next_listener);
        state.next_listener += 1;
        if state.node(node).is_none() {
            log::debug!("add_event_listener: {node} is not alive, `{kind}` listener dropped");
            return id;
        }
        state.listeners.entry(node).or_default().push(Listener {
            id,
            kind: kind.to_string(),
            handler: Rc::new(handler),
        });
        state.listener_nodes.insert(id, node);
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(node) = state.listener_nodes.remove(&id) else {
            return false;
        };
        if let Some(listeners) = state.listeners.get_mut(&node) {
            listeners.retain(|l| l.id != id);
            if listeners.is_empty() {
                state.listeners.remove(&node);
            }
        }
        true
    }

    pub fn listener_count(&self, node: NodeId) -> usize {
        self.state
            .borrow()
            .listeners
            .get(&node)
            .map_or(0, Vec::len)
    }

    /// Dispatch an event on `target`, bubbling to ancestors for bubbling kinds.
    ///
    /// Handlers run without any document borrow held, so they may mutate the
    /// document. Returns the number of handlers invoked.
    pub fn dispatch_event(&self, target: NodeId, kind: &str, detail: Option<String>) -> usize {
        let (path, seq) = {
            let mut state = self.state.borrow_mut();
            if state.node(target).is_none() {
                return 0;
            }
            let seq = state.next_seq;
            state.next_seq += 1;

            let mut path = vec![target];
            if bubbles(kind) {
                let mut current = state.node(target).and_then(|n| n.parent);
                while let Some(id) = current {
                    path.push(id);
                    current = state.node(id).and_then(|n| n.parent);
                }
            }
            (path, seq)
        };

        let mut invoked = 0;
        for current in path {
            let handlers: Vec<EventHandler> = {
                let state = self.state.borrow();
                state
                    .listeners
                    .get(&current)
                    .map(|ls| {
                        ls.iter()
                            .filter(|l| l.kind == kind)
                            .map(|l| Rc::clone(&l.handler))
                            .collect()
                    })
                    .unwrap_or_default()
            };
            if handlers.is_empty() {
                continue;
            }
            let event = DomEvent {
                kind: kind.to_string(),
                target,
                current_target: current,
                detail: detail.clone(),
                seq,
            };
            for handler in handlers {
                handler(&event);
                invoked += 1;
            }
        }
        log::trace!("dispatch_event: {kind} on {target} reached {invoked} handler(s)");
        invoked
    }

    /// Dispatch a `click` on `node`.
    pub fn click(&self, node: NodeId) -> usize {
        self.dispatch_event(node, "click", None)
    }
}

/// Focus and hover transitions do not bubble.
fn bubbles(kind: &str) -> bool {
    !matches!(kind, "focus" | "blur" | "mouseenter" | "mouseleave")
}
