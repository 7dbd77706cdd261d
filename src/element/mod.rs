//! Element builder - factories, components and output naming.
//!
//! ```text
//! e("span.a#x")  ─►  ElementFactory  ─(config?, children?)─►  Component  ─mount─►  MountHandle
//!                     selector + defaults                      description          node + outputs
//! ```

mod component;
mod factory;
mod naming;

pub use component::{Children, Component};
pub(crate) use component::{ComponentKind, ElementSpec};
pub use factory::{ElementFactory, FactoryArg, Invocation, e, e_with};
pub use naming::{Outputs, apply_naming};
