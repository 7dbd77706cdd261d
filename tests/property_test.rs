use proptest::collection::vec;
use proptest::prelude::*;

use spark_dom::config::class_union;
use spark_dom::{Document, ElementConfig, Selector, e, e_with, merge, run_component};

fn tag_strategy() -> BoxedStrategy<String> {
    prop_oneof![
        Just("div"),
        Just("span"),
        Just("h1"),
        Just("button"),
        Just("li"),
        Just("my-widget"),
    ]
    .prop_map(str::to_string)
    .boxed()
}

fn name_strategy() -> BoxedStrategy<String> {
    "[a-zA-Z][a-zA-Z0-9_-]{0,7}".boxed()
}

fn css_property_strategy() -> BoxedStrategy<String> {
    prop_oneof![
        Just("color"),
        Just("backgroundColor"),
        Just("fontSize"),
        Just("margin"),
        Just("borderTopWidth"),
    ]
    .prop_map(str::to_string)
    .boxed()
}

#[derive(Debug, Clone)]
enum Token {
    Class(String),
    Id(String),
}

fn token_strategy() -> BoxedStrategy<Token> {
    prop_oneof![
        3 => name_strategy().prop_map(Token::Class),
        1 => name_strategy().prop_map(Token::Id),
    ]
    .boxed()
}

fn config_strategy() -> BoxedStrategy<ElementConfig> {
    (
        vec((css_property_strategy(), name_strategy()), 0..4),
        vec(name_strategy(), 0..4),
        vec((name_strategy().prop_map(|n| format!("data-{n}")), name_strategy()), 0..3),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(styles, classes, attrs, disabled)| {
            let mut cfg = ElementConfig::new();
            for (property, value) in styles {
                cfg = cfg.style(property, value);
            }
            if !classes.is_empty() {
                cfg = cfg.class(&classes.join(" "));
            }
            for (name, value) in attrs {
                cfg = cfg.attr(name, value);
            }
            if let Some(disabled) = disabled {
                cfg = cfg.prop("disabled", disabled);
            }
            cfg
        })
        .boxed()
}

fn render(tag: &str, tokens: &[Token]) -> String {
    let mut out = tag.to_string();
    for token in tokens {
        match token {
            Token::Class(name) => {
                out.push('.');
                out.push_str(name);
            }
            Token::Id(name) => {
                out.push('#');
                out.push_str(name);
            }
        }
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn selector_parse_is_order_independent(tag in tag_strategy(), tokens in vec(token_strategy(), 0..8)) {
        let selector = Selector::parse(&render(&tag, &tokens)).unwrap();

        let mut expected_classes: Vec<&str> = Vec::new();
        let mut expected_id = None;
        for token in &tokens {
            match token {
                Token::Class(name) => {
                    if !expected_classes.contains(&name.as_str()) {
                        expected_classes.push(name);
                    }
                }
                Token::Id(name) => expected_id = Some(name.as_str()),
            }
        }

        prop_assert_eq!(selector.tag_name(), tag.as_str());
        prop_assert_eq!(selector.class_names().collect::<Vec<_>>(), expected_classes);
        prop_assert_eq!(selector.id(), expected_id);

        // Canonical form parses back to the same selector
        let canonical: Selector = selector.to_string().parse().unwrap();
        prop_assert_eq!(canonical, selector);
    }

    #[test]
    fn selector_rejects_leading_marker(name in name_strategy(), marker in prop_oneof![Just('.'), Just('#')]) {
        let selector = format!("{marker}{name}");
        prop_assert!(Selector::parse(&selector).is_err());
    }

    #[test]
    fn merge_has_empty_identity(cfg in config_strategy()) {
        let empty = ElementConfig::new();
        prop_assert_eq!(merge(&cfg, &empty).unwrap(), cfg.clone());
        prop_assert_eq!(merge(&empty, &cfg).unwrap(), cfg);
    }

    #[test]
    fn merge_style_override_is_isolated(base in config_strategy(), over in config_strategy()) {
        let resolved = merge(&base, &over).unwrap();
        let resolved_style = resolved.style_entries();

        for (property, value) in over.style_entries() {
            prop_assert!(resolved_style.contains(&(property, value)));
        }
        for (property, value) in base.style_entries() {
            if !over.style_entries().iter().any(|(p, _)| *p == property) {
                prop_assert!(resolved_style.contains(&(property, value)));
            }
        }
    }

    #[test]
    fn class_union_keeps_every_class_once(
        selector_classes in vec(name_strategy(), 0..4),
        base in config_strategy(),
        over in config_strategy(),
    ) {
        let resolved = merge(&base, &over).unwrap();
        let classes = class_union(selector_classes.iter().map(String::as_str), &resolved);

        for class in selector_classes.iter().chain(base.class_tokens().iter()).chain(over.class_tokens().iter()) {
            prop_assert_eq!(classes.iter().filter(|c| *c == class).count(), 1);
        }
        prop_assert_eq!(
            classes.len(),
            classes.iter().collect::<std::collections::HashSet<_>>().len()
        );
    }

    #[test]
    fn mounted_element_reflects_resolved_config(defaults in config_strategy(), over in config_strategy()) {
        let doc = Document::new();
        let root = doc.create_element("div").unwrap();
        let handle = run_component(&doc, root, &e_with("span", defaults.clone()).unwrap().config(over.clone())).unwrap();

        let resolved = merge(&defaults, &over).unwrap();
        for (property, value) in resolved.style_entries() {
            prop_assert_eq!(doc.style(handle.node(), property), Some(value.to_string()));
        }
        for class in resolved.class_tokens() {
            prop_assert!(doc.has_class(handle.node(), &class));
        }
        handle.dispose();
        prop_assert_eq!(doc.node_count(), 1);
    }

    #[test]
    fn invocations_never_share_children(text in "[a-z ]{0,12}") {
        let doc = Document::new();
        let root = doc.create_element("div").unwrap();
        let span = e("span").unwrap();

        let first = run_component(&doc, root, &span.children(text.clone())).unwrap();
        let second = run_component(&doc, root, &span.build()).unwrap();
        prop_assert_eq!(doc.text_content(first.node()), text);
        prop_assert_eq!(doc.text_content(second.node()), "");
    }
}
