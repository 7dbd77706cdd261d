//! Component - an unexecuted description of a DOM subtree.
//!
//! Components are values. Building one never touches a document; the mount
//! pipeline executes it. The same component can be mounted any number of
//! times, each mount producing its own nodes and output streams.

use std::rc::Rc;

use spark_signals::Signal;

use crate::config::{ElementConfig, merge};
use crate::error::Result;
use crate::selector::Selector;
use crate::types::Events;

// =============================================================================
// Children
// =============================================================================

/// Content of an element, supplied at invocation time.
#[derive(Clone, Default)]
pub enum Children {
    /// No content.
    #[default]
    None,
    /// Static text content.
    Text(String),
    /// Text content bound to a signal; follows every change while mounted.
    Dynamic(Signal<String>),
    /// Child components, mounted in order.
    Components(Vec<Component>),
}

impl Children {
    pub fn is_none(&self) -> bool {
        matches!(self, Children::None)
    }
}

impl From<&str> for Children {
    fn from(text: &str) -> Self {
        Children::Text(text.to_string())
    }
}

impl From<String> for Children {
    fn from(text: String) -> Self {
        Children::Text(text)
    }
}

impl From<Signal<String>> for Children {
    fn from(signal: Signal<String>) -> Self {
        Children::Dynamic(signal)
    }
}

impl From<Component> for Children {
    fn from(component: Component) -> Self {
        Children::Components(vec![component])
    }
}

impl From<Vec<Component>> for Children {
    fn from(components: Vec<Component>) -> Self {
        Children::Components(components)
    }
}

impl<const N: usize> From<[Component; N]> for Children {
    fn from(components: [Component; N]) -> Self {
        Children::Components(components.into())
    }
}

// =============================================================================
// Component
// =============================================================================

/// Everything needed to mount one element.
pub(crate) struct ElementSpec {
    pub selector: Rc<Selector>,
    pub defaults: Rc<ElementConfig>,
    pub overrides: ElementConfig,
    pub children: Children,
    pub events: Events,
}

#[derive(Clone)]
pub(crate) enum ComponentKind {
    Element(Rc<ElementSpec>),
    Text(String),
}

/// A mountable description of a DOM subtree.
#[derive(Clone)]
pub struct Component {
    kind: ComponentKind,
}

impl Component {
    pub(crate) fn element(spec: ElementSpec) -> Self {
        Self {
            kind: ComponentKind::Element(Rc::new(spec)),
        }
    }

    /// A bare text node, for mixing text between element children.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: ComponentKind::Text(content.into()),
        }
    }

    pub(crate) fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ComponentKind::Text(_))
    }

    /// Selector of an element component.
    pub fn selector(&self) -> Option<&Selector> {
        match &self.kind {
            ComponentKind::Element(spec) => Some(&spec.selector),
            ComponentKind::Text(_) => None,
        }
    }

    /// Output events the element will expose before renaming.
    pub fn outputs(&self) -> Events {
        match &self.kind {
            ComponentKind::Element(spec) => spec.events,
            ComponentKind::Text(_) => Events::empty(),
        }
    }

    /// Resolve the config the element will be rendered with.
    ///
    /// Mounting does this itself; calling it early surfaces config errors
    /// without touching a document.
    pub fn resolved_config(&self) -> Result<ElementConfig> {
        match &self.kind {
            ComponentKind::Element(spec) => merge(&spec.defaults, &spec.overrides),
            ComponentKind::Text(_) => Ok(ElementConfig::new()),
        }
    }

    pub fn children(&self) -> Option<&Children> {
        match &self.kind {
            ComponentKind::Element(spec) => Some(&spec.children),
            ComponentKind::Text(_) => None,
        }
    }
}
