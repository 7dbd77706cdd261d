//! Inline style property names.
//!
//! Configs use camelCase (`backgroundColor`) like the DOM style object; the
//! document stores kebab-case (`background-color`) like CSS text. Either form
//! addresses the same property.

/// Normalize a style property name to kebab-case.
///
/// Custom properties (`--accent`) are kept as written.
pub fn to_css_property(name: &str) -> String {
    if name.starts_with("--") || !name.bytes().any(|b| b.is_ascii_uppercase()) {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len() + 4);
    // A leading capital yields a vendor prefix: `WebkitTransition` -> `-webkit-transition`
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
