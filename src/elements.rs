//! Tag wrappers - ready-made factories for common HTML elements.
//!
//! Each wrapper fixes the tag and predeclares the native events the element
//! exposes as outputs:
//!
//! | Wrapper | Outputs |
//! |---------|---------|
//! | `button`, `a` | `click` |
//! | `input`, `textarea` | `input`, `change`, `keydown`, `keyup`, `focus`, `blur` |
//! | `select` | `change`, `focus`, `blur` |
//! | `checkbox` | `click`, `change` |
//! | `form` | `submit` |
//! | everything else | none |
//!
//! ```ignore
//! let save = button().with(ElementConfig::new().name("click", "save"), "Save");
//! ```

use crate::config::ElementConfig;
use crate::element::ElementFactory;
use crate::selector::Selector;
use crate::types::Events;

const TEXT_ENTRY: Events = Events::INPUT
    .union(Events::CHANGE)
    .union(Events::KEYDOWN)
    .union(Events::KEYUP)
    .union(Events::FOCUS)
    .union(Events::BLUR);

fn tag(name: &'static str, events: Events) -> ElementFactory {
    ElementFactory::new(Selector::from_tag(name), ElementConfig::new()).with_outputs(events)
}

/// Define `pub fn <tag>() -> ElementFactory` wrappers.
macro_rules! tag_fns {
    ($($name:ident => $tag:literal, $events:expr;)*) => {
        $(
            #[doc = concat!("`<", $tag, ">` factory.")]
            pub fn $name() -> ElementFactory {
                tag($tag, $events)
            }
        )*
    };
}

tag_fns! {
    // Interactive
    button => "button", Events::CLICK;
    a => "a", Events::CLICK;
    input => "input", TEXT_ENTRY;
    textarea => "textarea", TEXT_ENTRY;
    select => "select", Events::CHANGE.union(Events::FOCUS).union(Events::BLUR);
    form => "form", Events::SUBMIT;

    // Structure
    div => "div", Events::empty();
    span => "span", Events::empty();
    p => "p", Events::empty();
    section => "section", Events::empty();
    header => "header", Events::empty();
    footer => "footer", Events::empty();
    nav => "nav", Events::empty();
    article => "article", Events::empty();
    aside => "aside", Events::empty();
    label => "label", Events::empty();

    // Headings
    h1 => "h1", Events::empty();
    h2 => "h2", Events::empty();
    h3 => "h3", Events::empty();
    h4 => "h4", Events::empty();
    h5 => "h5", Events::empty();
    h6 => "h6", Events::empty();

    // Text
    strong => "strong", Events::empty();
    em => "em", Events::empty();

    // Lists and tables
    ul => "ul", Events::empty();
    ol => "ol", Events::empty();
    li => "li", Events::empty();
    table => "table", Events::empty();
    tr => "tr", Events::empty();
    td => "td", Events::empty();
    th => "th", Events::empty();

    img => "img", Events::empty();
}

/// `<input type="checkbox">` factory.
pub fn checkbox() -> ElementFactory {
    ElementFactory::new(
        Selector::from_tag("input"),
        ElementConfig::new().attr("type", "checkbox"),
    )
    .with_outputs(Events::CLICK | Events::CHANGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::pipeline::mount;

    #[test]
    fn test_button_outputs_click() {
        assert_eq!(button().outputs(), Events::CLICK);
        assert_eq!(button().selector().tag_name(), "button");
    }

    #[test]
    fn test_input_outputs() {
        let names = input().outputs().event_names();
        assert_eq!(names, vec!["input", "change", "keydown", "keyup", "focus", "blur"]);
    }

    #[test]
    fn test_structural_tags_have_no_outputs() {
        for fac in [div(), span(), h1(), li(), table()] {
            assert!(fac.outputs().is_empty());
        }
    }

    #[test]
    fn test_checkbox_sets_type() {
        let doc = Document::new();
        let root = doc.create_element("form").unwrap();
        let handle = mount(&doc, root, &checkbox().build()).unwrap();

        assert_eq!(doc.attribute(handle.node(), "type").as_deref(), Some("checkbox"));
        let names: Vec<&str> = handle.outputs().names().collect();
        assert_eq!(names, vec!["click", "change"]);
    }

    #[test]
    fn test_wrapper_tags_pass_default_policy() {
        let doc = Document::new();
        for fac in [a(), textarea(), select(), nav(), strong(), img(), th()] {
            assert!(doc.create_element(fac.selector().tag_name()).is_ok());
        }
    }
}
