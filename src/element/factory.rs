//! Element Factory - bind a selector and default config, produce components.
//!
//! Two phases:
//!
//! ```ignore
//! // Definition: parse once, never touches a document
//! let title = e_with("h1.title", ElementConfig::new().style("color", "red"))?;
//!
//! // Invocation: any number of components, each with its own overrides
//! let plain = title.build();                                  // factory()
//! let text = title.children("Hello");                        // factory(children)
//! let green = title.config(ElementConfig::new().style("color", "green")); // factory(config)
//! let both = title.with(ElementConfig::new().class("big"), "Hi"); // factory(config, children)
//! ```
//!
//! Factories hold no default children: content is purely an invocation-time
//! concept.

use std::rc::Rc;

use spark_signals::Signal;

use super::component::{Children, Component, ElementSpec};
use crate::config::ElementConfig;
use crate::error::Result;
use crate::selector::Selector;
use crate::types::Events;

// =============================================================================
// Invocation shapes
// =============================================================================

/// First positional argument of a factory call: a config or children.
#[derive(Clone)]
pub enum FactoryArg {
    Config(ElementConfig),
    Children(Children),
}

impl From<ElementConfig> for FactoryArg {
    fn from(config: ElementConfig) -> Self {
        FactoryArg::Config(config)
    }
}

impl From<Children> for FactoryArg {
    fn from(children: Children) -> Self {
        FactoryArg::Children(children)
    }
}

impl From<&str> for FactoryArg {
    fn from(text: &str) -> Self {
        FactoryArg::Children(text.into())
    }
}

impl From<String> for FactoryArg {
    fn from(text: String) -> Self {
        FactoryArg::Children(text.into())
    }
}

impl From<Signal<String>> for FactoryArg {
    fn from(signal: Signal<String>) -> Self {
        FactoryArg::Children(signal.into())
    }
}

impl From<Component> for FactoryArg {
    fn from(component: Component) -> Self {
        FactoryArg::Children(component.into())
    }
}

impl From<Vec<Component>> for FactoryArg {
    fn from(components: Vec<Component>) -> Self {
        FactoryArg::Children(components.into())
    }
}

/// The four supported call shapes.
#[derive(Clone, Default)]
pub enum Invocation {
    /// `factory()`
    #[default]
    Empty,
    /// `factory(children)`
    Children(Children),
    /// `factory(config)`
    Config(ElementConfig),
    /// `factory(config, children)`
    ConfigAndChildren(ElementConfig, Children),
}

impl Invocation {
    /// Classify positional arguments.
    ///
    /// The first argument is inspected once: a config makes `second` the
    /// children; children are taken as-is and `second` is ignored.
    pub fn from_args(first: Option<FactoryArg>, second: Option<Children>) -> Self {
        match (first, second) {
            (None, None) => Invocation::Empty,
            (None, Some(children)) => Invocation::Children(children),
            (Some(FactoryArg::Config(config)), None) => Invocation::Config(config),
            (Some(FactoryArg::Config(config)), Some(children)) => {
                Invocation::ConfigAndChildren(config, children)
            }
            (Some(FactoryArg::Children(children)), second) => {
                if second.is_some() {
                    log::debug!("factory called with children first; second argument ignored");
                }
                Invocation::Children(children)
            }
        }
    }

    fn into_parts(self) -> (ElementConfig, Children) {
        match self {
            Invocation::Empty => (ElementConfig::new(), Children::None),
            Invocation::Children(children) => (ElementConfig::new(), children),
            Invocation::Config(config) => (config, Children::None),
            Invocation::ConfigAndChildren(config, children) => (config, children),
        }
    }
}

// =============================================================================
// Factory
// =============================================================================

/// A reusable selector + default config binding.
#[derive(Clone)]
pub struct ElementFactory {
    selector: Rc<Selector>,
    defaults: Rc<ElementConfig>,
    events: Events,
}

/// Define a factory from a selector string (`"span.a.b#id"`).
///
/// Fails with [`DomError::InvalidSelector`](crate::DomError::InvalidSelector)
/// immediately, not at mount time.
pub fn e(selector: &str) -> Result<ElementFactory> {
    e_with(selector, ElementConfig::new())
}

/// Define a factory with a default config.
pub fn e_with(selector: &str, defaults: ElementConfig) -> Result<ElementFactory> {
    let selector = Selector::parse(selector)?;
    Ok(ElementFactory::new(selector, defaults))
}

impl ElementFactory {
    pub fn new(selector: Selector, defaults: ElementConfig) -> Self {
        Self {
            selector: Rc::new(selector),
            defaults: Rc::new(defaults),
            events: Events::empty(),
        }
    }

    /// Predeclare the native events this element exposes as outputs.
    pub fn with_outputs(mut self, events: Events) -> Self {
        self.events = events;
        self
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn default_config(&self) -> &ElementConfig {
        &self.defaults
    }

    pub fn outputs(&self) -> Events {
        self.events
    }

    /// Produce a component for one call shape.
    pub fn invoke(&self, invocation: Invocation) -> Component {
        let (overrides, children) = invocation.into_parts();
        Component::element(ElementSpec {
            selector: Rc::clone(&self.selector),
            defaults: Rc::clone(&self.defaults),
            overrides,
            children,
            events: self.events,
        })
    }

    /// `factory()`
    pub fn build(&self) -> Component {
        self.invoke(Invocation::Empty)
    }

    /// `factory(children)`
    pub fn children(&self, children: impl Into<Children>) -> Component {
        self.invoke(Invocation::Children(children.into()))
    }

    /// `factory(config)`
    pub fn config(&self, config: ElementConfig) -> Component {
        self.invoke(Invocation::Config(config))
    }

    /// `factory(config, children)`
    pub fn with(&self, config: ElementConfig, children: impl Into<Children>) -> Component {
        self.invoke(Invocation::ConfigAndChildren(config, children.into()))
    }

    /// `factory(arg)` where `arg` is either a config or children.
    pub fn call(&self, arg: impl Into<FactoryArg>) -> Component {
        self.invoke(Invocation::from_args(Some(arg.into()), None))
    }
}
