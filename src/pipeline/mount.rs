//! Mount API - execute a component against a document.
//!
//! # Example
//!
//! ```ignore
//! use spark_dom::{Document, ElementConfig, elements::button, run_component};
//!
//! let doc = Document::new();
//! let root = doc.create_element("div")?;
//!
//! let handle = run_component(
//!     &doc,
//!     root,
//!     &button().with(ElementConfig::new().name("click", "save"), "Save"),
//! )?;
//!
//! let _unsubscribe = handle.output("save").unwrap().subscribe(|_| println!("saved"));
//! doc.click(handle.node());
//!
//! handle.dispose();
//! ```

use std::cell::{Cell, RefCell};

use indexmap::IndexMap;
use spark_signals::effect;

use super::bridge::event_stream;
use crate::config::{CLASS, CLASS_NAME, class_union, merge};
use crate::dom::Document;
use crate::element::{Children, Component, ComponentKind, ElementSpec, Outputs, apply_naming};
use crate::error::{DomError, Result};
use crate::stream::Stream;
use crate::types::{Cleanup, DomEvent, NodeId};

// =============================================================================
// Mount Handle
// =============================================================================

/// A mounted node plus everything it owns.
///
/// Owns:
/// - The node (and through it, its subtree)
/// - Handles of mounted child components
/// - Listener, stream and effect cleanups
///
/// Nothing is torn down on drop. Call [`dispose`](Self::dispose).
pub struct MountHandle {
    document: Document,
    node: NodeId,
    outputs: Outputs,
    children: RefCell<Vec<MountHandle>>,
    cleanups: RefCell<Vec<Cleanup>>,
    disposed: Cell<bool>,
}

impl MountHandle {
    fn new(document: &Document, node: NodeId) -> Self {
        Self {
            document: document.clone(),
            node,
            outputs: Outputs::default(),
            children: RefCell::new(Vec::new()),
            cleanups: RefCell::new(Vec::new()),
            disposed: Cell::new(false),
        }
    }

    /// The mounted node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Named output streams of this element (children's outputs are not included).
    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    pub fn output(&self, name: &str) -> Option<&Stream<DomEvent>> {
        self.outputs.get(name)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// Tear the mount down. Idempotent.
    ///
    /// 1. Dispose child mounts (deepest first)
    /// 2. Remove listeners, close output streams, stop effects
    /// 3. Detach and release the node's subtree
    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        for child in self.children.take() {
            child.dispose();
        }
        for cleanup in self.cleanups.take() {
            cleanup();
        }
        self.document.release(self.node);
        log::trace!("dispose: released {}", self.node);
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Mount `component` as the last child of `parent`.
///
/// On error nothing of the component remains attached to `parent`.
pub fn mount(document: &Document, parent: NodeId, component: &Component) -> Result<MountHandle> {
    match component.kind() {
        ComponentKind::Text(text) => mount_text(document, parent, text),
        ComponentKind::Element(spec) => mount_element(document, parent, spec),
    }
}

/// Runtime entry point: mount and hand back the outputs synchronously.
pub fn run_component(
    document: &Document,
    parent: NodeId,
    component: &Component,
) -> Result<MountHandle> {
    let handle = mount(document, parent, component)?;
    log::debug!(
        "run_component: mounted {} under {} with {} output(s)",
        handle.node(),
        parent,
        handle.outputs().len()
    );
    Ok(handle)
}

fn mount_text(document: &Document, parent: NodeId, text: &str) -> Result<MountHandle> {
    let node = document.create_text_node(text);
    if !document.append_child(parent, node) {
        document.release(node);
        return Err(rejected_by_parent("#text", parent));
    }
    Ok(MountHandle::new(document, node))
}

fn mount_element(document: &Document, parent: NodeId, spec: &ElementSpec) -> Result<MountHandle> {
    // Resolve before touching the document so a bad config creates nothing
    let config = merge(&spec.defaults, &spec.overrides)?;
    let selector = &spec.selector;

    // 1. Create
    let node = document.create_element(selector.tag_name())?;
    log::trace!("mount: <{}> as {node}", selector.tag_name());
    let mut handle = MountHandle::new(document, node);

    // 2. Id
    if let Some(id) = selector.id() {
        document.set_id(node, id);
    }

    // 3. Classes: selector, then config tokens, then toggles
    for class in class_union(selector.class_names(), &config) {
        document.add_class(node, &class);
    }
    for (class, on) in config.class_toggles() {
        if on {
            document.add_class(node, class);
        } else {
            document.remove_class(node, class);
        }
    }

    // 4. Style
    for (property, value) in config.style_entries() {
        document.set_style(node, property, value);
    }

    // 5. Attributes, then plain properties (class spellings were unioned in 3)
    for (name, value) in config.attribute_entries() {
        if name != CLASS {
            document.set_attribute(node, name, value);
        }
    }
    for (key, value) in config.properties() {
        if key != CLASS_NAME {
            document.set_property(node, key, value.clone());
        }
    }

    // 6. Content
    match &spec.children {
        Children::None => {}
        Children::Text(text) => document.set_text_content(node, text),
        Children::Dynamic(text) => {
            let doc = document.clone();
            let text = text.clone();
            let stop = effect(move || {
                let current = text.get();
                log::trace!("mount: text of {node} -> {current:?}");
                doc.set_text_content(node, &current);
            });
            handle.cleanups.get_mut().push(Box::new(stop));
        }
        Children::Components(components) => {
            for child in components {
                match mount(document, node, child) {
                    Ok(child_handle) => handle.children.get_mut().push(child_handle),
                    Err(err) => {
                        handle.dispose();
                        return Err(err);
                    }
                }
            }
        }
    }

    // 7. Attach
    if !document.append_child(parent, node) {
        handle.dispose();
        return Err(rejected_by_parent(selector.tag_name(), parent));
    }

    // 8. Outputs
    let mut streams: IndexMap<String, Stream<DomEvent>> = IndexMap::new();
    for kind in spec.events.event_names() {
        let (stream, cleanup) = event_stream(document, node, kind);
        handle.cleanups.get_mut().push(cleanup);
        streams.insert(kind.to_string(), stream);
    }

    // 9. Naming
    let streams = match config.naming() {
        Some(table) => apply_naming(streams, table),
        None => streams,
    };
    handle.outputs = Outputs::new(streams);

    Ok(handle)
}

fn rejected_by_parent(tag: &str, parent: NodeId) -> DomError {
    DomError::ElementCreation {
        tag: tag.to_string(),
        reason: format!("parent {parent} cannot accept children"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ElementConfig;
    use crate::element::{e, e_with};
    use crate::types::Events;
    use spark_signals::signal;
    use std::rc::Rc;

    fn setup() -> (Document, NodeId) {
        let doc = Document::new();
        let root = doc.create_element("div").unwrap();
        (doc, root)
    }

    #[test]
    fn test_mount_applies_selector() {
        let (doc, root) = setup();
        let handle = mount(&doc, root, &e("span.a.b#x").unwrap().build()).unwrap();
        let node = handle.node();

        assert_eq!(doc.tag_name(node).as_deref(), Some("SPAN"));
        assert_eq!(doc.id(node).as_deref(), Some("x"));
        assert_eq!(doc.class_name(node), "a b");
        assert_eq!(doc.parent(node), Some(root));
        assert!(handle.outputs().is_empty());
    }

    #[test]
    fn test_mount_applies_config() {
        let (doc, root) = setup();
        let fac = e_with(
            "input.field",
            ElementConfig::new()
                .style("backgroundColor", "red")
                .class("wide")
                .attr("placeholder", "Name")
                .prop("value", "abc"),
        )
        .unwrap();
        let handle = mount(
            &doc,
            root,
            &fac.config(ElementConfig::new().style("backgroundColor", "green").class("wide big")),
        )
        .unwrap();
        let node = handle.node();

        assert_eq!(doc.style(node, "backgroundColor").as_deref(), Some("green"));
        assert_eq!(doc.class_list(node), vec!["field", "wide", "big"]);
        assert_eq!(doc.attribute(node, "placeholder").as_deref(), Some("Name"));
        assert_eq!(doc.property(node, "value").and_then(|v| v.as_text()).as_deref(), Some("abc"));
    }

    #[test]
    fn test_class_toggles() {
        let (doc, root) = setup();
        let fac = e("li.item.done").unwrap();
        let cfg = ElementConfig::new().class_toggle("active", true).class_toggle("done", false);
        let handle = mount(&doc, root, &fac.config(cfg)).unwrap();

        assert_eq!(doc.class_list(handle.node()), vec!["item", "active"]);
    }

    #[test]
    fn test_class_spellings_keep_selector_classes() {
        let (doc, root) = setup();
        let fac = e_with("span.a", ElementConfig::new().class("b")).unwrap();
        let cfg = ElementConfig::new()
            .prop("className", "c")
            .attr("class", "d")
            .attr("title", "t");
        let handle = mount(&doc, root, &fac.config(cfg)).unwrap();
        let node = handle.node();

        assert_eq!(doc.class_list(node), vec!["a", "b", "c", "d"]);
        assert_eq!(doc.attribute(node, "class").as_deref(), Some("a b c d"));
        assert_eq!(doc.attribute(node, "title").as_deref(), Some("t"));
    }

    #[test]
    fn test_text_children() {
        let (doc, root) = setup();
        let handle = mount(&doc, root, &e("p").unwrap().children("Hello")).unwrap();
        assert_eq!(doc.text_content(handle.node()), "Hello");
    }

    #[test]
    fn test_nested_children_mount_in_order() {
        let (doc, root) = setup();
        let li = e("li").unwrap();
        let list = e("ul").unwrap().children(vec![
            li.children("one"),
            Component::text(" - "),
            li.children("two"),
        ]);
        let handle = mount(&doc, root, &list).unwrap();

        assert_eq!(doc.child_nodes(handle.node()).len(), 3);
        assert_eq!(doc.children(handle.node()).len(), 2);
        assert_eq!(doc.text_content(handle.node()), "one - two");
    }

    #[test]
    fn test_dynamic_text_follows_signal() {
        let (doc, root) = setup();
        let label = signal(String::from("zero"));
        let handle = mount(&doc, root, &e("span").unwrap().children(label.clone())).unwrap();
        assert_eq!(doc.text_content(handle.node()), "zero");

        label.set(String::from("one"));
        assert_eq!(doc.text_content(handle.node()), "one");

        handle.dispose();
        label.set(String::from("two"));
        assert!(!doc.is_alive(handle.node()));
    }

    #[test]
    fn test_outputs_follow_events() {
        let (doc, root) = setup();
        let fac = e("button").unwrap().with_outputs(Events::CLICK | Events::FOCUS);
        let handle = mount(&doc, root, &fac.build()).unwrap();

        let names: Vec<&str> = handle.outputs().names().collect();
        assert_eq!(names, vec!["click", "focus"]);

        doc.click(handle.node());
        assert_eq!(handle.output("click").unwrap().emit_count(), 1);
        assert_eq!(handle.output("focus").unwrap().emit_count(), 0);
    }

    #[test]
    fn test_naming_renames_outputs() {
        let (doc, root) = setup();
        let fac = e("button").unwrap().with_outputs(Events::CLICK);
        let handle = mount(
            &doc,
            root,
            &fac.with(ElementConfig::new().name("click", "foobar"), "Click"),
        )
        .unwrap();

        assert!(handle.output("click").is_none());
        let clicks = handle.output("foobar").unwrap();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let _unsubscribe = clicks.subscribe(move |_| c.set(c.get() + 1));

        doc.click(handle.node());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_child_outputs_not_exposed() {
        let (doc, root) = setup();
        let button = e("button").unwrap().with_outputs(Events::CLICK);
        let handle = mount(&doc, root, &e("div").unwrap().children(button.build())).unwrap();

        assert!(handle.outputs().is_empty());
        // The child's listener stays alive
        let child = doc.first_element_child(handle.node()).unwrap();
        assert_eq!(doc.listener_count(child), 1);
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let (doc, root) = setup();
        let button = e("button").unwrap().with_outputs(Events::CLICK);
        let handle = mount(&doc, root, &e("div").unwrap().children(button.build())).unwrap();
        let child = doc.first_element_child(handle.node()).unwrap();
        let before = doc.node_count();

        handle.dispose();
        assert!(handle.is_disposed());
        assert!(!doc.is_alive(handle.node()));
        assert!(!doc.is_alive(child));
        assert!(doc.child_nodes(root).is_empty());
        assert!(doc.node_count() < before);

        handle.dispose();
        assert!(doc.is_alive(root));
    }

    #[test]
    fn test_stale_handle_leaves_reused_slot_alone() {
        let (doc, root) = setup();
        let label = signal(String::from("a"));
        let first = mount(&doc, root, &e("span").unwrap().children(label.clone())).unwrap();

        // Clearing the container frees the first mount behind its handle's back
        doc.set_text_content(root, "");
        assert!(!doc.is_alive(first.node()));

        let button = e("button").unwrap().with_outputs(Events::CLICK);
        let second = mount(&doc, root, &button.children("B")).unwrap();
        assert_eq!(second.node().index(), first.node().index());

        label.set(String::from("changed"));
        first.dispose();

        assert!(doc.is_alive(second.node()));
        assert_eq!(doc.parent(second.node()), Some(root));
        assert_eq!(doc.text_content(second.node()), "B");
        assert_eq!(doc.listener_count(second.node()), 1);
    }

    #[test]
    fn test_dispose_closes_outputs() {
        let (doc, root) = setup();
        let fac = e("button").unwrap().with_outputs(Events::CLICK);
        let handle = mount(&doc, root, &fac.build()).unwrap();
        let clicks = handle.output("click").unwrap().clone();

        handle.dispose();
        assert!(clicks.is_closed());
    }

    #[test]
    fn test_unknown_tag_fails() {
        let (doc, root) = setup();
        let err = mount(&doc, root, &e("blink").unwrap().build()).err().unwrap();
        assert!(matches!(err, DomError::ElementCreation { ref tag, .. } if tag == "blink"));
        assert!(doc.child_nodes(root).is_empty());
    }

    #[test]
    fn test_failing_child_leaves_nothing_attached() {
        let (doc, root) = setup();
        let before = doc.node_count();
        let tree = e("div").unwrap().children(vec![
            e("span").unwrap().children("ok"),
            e("blink").unwrap().build(),
        ]);

        assert!(mount(&doc, root, &tree).is_err());
        assert!(doc.child_nodes(root).is_empty());
        assert_eq!(doc.node_count(), before);
    }

    #[test]
    fn test_invalid_config_fails_before_creation() {
        let (doc, root) = setup();
        let before = doc.node_count();
        let fac = e("div").unwrap();
        let err = mount(&doc, root, &fac.config(ElementConfig::new().set("style", "color: red")))
            .err()
            .unwrap();

        assert!(matches!(err, DomError::ConfigMerge { .. }));
        assert_eq!(doc.node_count(), before);
    }

    #[test]
    fn test_text_parent_is_rejected() {
        let doc = Document::new();
        let text = doc.create_text_node("leaf");
        let err = mount(&doc, text, &e("span").unwrap().build()).err().unwrap();
        assert_eq!(err.stable_code(), crate::error::ERROR_ELEMENT_CREATION);
        assert_eq!(doc.node_count(), 1);
    }

    #[test]
    fn test_same_component_mounts_twice() {
        let (doc, root) = setup();
        let component = e("button").unwrap().with_outputs(Events::CLICK).children("Go");
        let first = mount(&doc, root, &component).unwrap();
        let second = mount(&doc, root, &component).unwrap();

        assert_ne!(first.node(), second.node());
        doc.click(first.node());
        assert_eq!(first.output("click").unwrap().emit_count(), 1);
        assert_eq!(second.output("click").unwrap().emit_count(), 0);
    }
}
