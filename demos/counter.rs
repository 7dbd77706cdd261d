//! Counter Example - factories, outputs and reactive text
//!
//! This example demonstrates:
//! - Defining factories with selectors and default styles
//! - Renaming a button's `click` output
//! - Driving text content from a signal
//!
//! Run with: cargo run --example counter

use spark_dom::elements::{button, div, h1};
use spark_dom::{Document, DomError, ElementConfig, NodeId, e_with, run_component};
use spark_signals::signal;

fn dump(doc: &Document, node: NodeId, depth: usize) {
    let indent = "  ".repeat(depth);
    match doc.local_name(node) {
        Some(tag) => {
            let mut line = format!("{indent}<{tag}");
            if let Some(id) = doc.id(node) {
                line.push_str(&format!(" id=\"{id}\""));
            }
            let classes = doc.class_name(node);
            if !classes.is_empty() {
                line.push_str(&format!(" class=\"{classes}\""));
            }
            let style = doc.style_text(node);
            if !style.is_empty() {
                line.push_str(&format!(" style=\"{style}\""));
            }
            println!("{line}>");
            for child in doc.child_nodes(node) {
                dump(doc, child, depth + 1);
            }
        }
        None => println!("{indent}{:?}", doc.text_content(node)),
    }
}

fn main() -> Result<(), DomError> {
    println!("=== spark-dom Counter Example ===\n");

    let doc = Document::new();
    let body = doc.create_element("body")?;

    let count = signal(0i32);
    let label = signal(String::from("Clicked 0 times"));

    let value = e_with("span.value", ElementConfig::new().style("fontWeight", "bold"))?;
    let app = div().with(
        ElementConfig::new().class("counter"),
        vec![h1().children("Counter"), value.children(label.clone())],
    );
    let app_handle = run_component(&doc, body, &app)?;

    let increment = button().with(
        ElementConfig::new()
            .class("primary")
            .name("click", "increment"),
        "+1",
    );
    let button_handle = run_component(&doc, app_handle.node(), &increment)?;

    let Some(clicks) = button_handle.output("increment") else {
        return Ok(());
    };
    let count_clone = count.clone();
    let label_clone = label.clone();
    let _unsubscribe = clicks.subscribe(move |_| {
        let next = count_clone.get() + 1;
        count_clone.set(next);
        label_clone.set(format!("Clicked {next} times"));
    });

    println!("Initial tree:");
    dump(&doc, body, 1);

    for _ in 0..3 {
        doc.click(button_handle.node());
    }

    println!("\nAfter three clicks:");
    dump(&doc, body, 1);
    println!("\nclick events seen: {}", clicks.emit_count());

    button_handle.dispose();
    app_handle.dispose();
    println!("\nAfter dispose: {} node(s) left", doc.node_count());
    Ok(())
}
