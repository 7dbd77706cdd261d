//! # spark-dom
//!
//! Declarative DOM element builder with reactive output streams.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity.
//!
//! ## Architecture
//!
//! An element is described in two phases. A factory binds a selector and a
//! default config once; invoking it yields a [`Component`], a plain value that
//! can be mounted any number of times:
//!
//! ```text
//! e("h1.title")  ─►  ElementFactory  ─invoke─►  Component  ─mount─►  MountHandle
//!   selector            + defaults         + overrides/children      node + named outputs
//! ```
//!
//! Mounting creates the node in a [`Document`], applies id, classes, style,
//! attributes and properties, mounts children, appends to the parent and
//! bridges native events into [`Stream`]s keyed by (optionally renamed)
//! output names.
//!
//! ## Example
//!
//! ```ignore
//! use spark_dom::{Document, ElementConfig, elements::button, run_component};
//!
//! let doc = Document::new();
//! let root = doc.create_element("div")?;
//!
//! let save = button().with(ElementConfig::new().name("click", "save"), "Save");
//! let handle = run_component(&doc, root, &save)?;
//! let _unsubscribe = handle.output("save").unwrap().subscribe(|e| println!("{e:?}"));
//! ```
//!
//! ## Modules
//!
//! - [`selector`] - `tag.class#id` parsing
//! - [`config`] - element configs and merge policy
//! - [`element`] - factories, components, output naming
//! - [`elements`] - ready-made tag wrappers
//! - [`pipeline`] - mount execution and teardown
//! - [`dom`] - headless document used as creation context
//! - [`stream`] - output streams

pub mod config;
pub mod dom;
pub mod element;
pub mod elements;
pub mod error;
pub mod pipeline;
pub mod selector;
pub mod stream;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{ConfigValue, ElementConfig, MergeStrategy, ValueShape, merge};

pub use dom::{Document, DocumentConfig, TagPolicy};

pub use element::{
    Children, Component, ElementFactory, FactoryArg, Invocation, Outputs, apply_naming, e, e_with,
};

pub use error::{DomError, Result};

pub use pipeline::{MountHandle, event_stream, mount, run_component};

pub use selector::Selector;

pub use stream::{Sink, Stream, channel};
