//! Tag policy - which element names a document agrees to create.

/// HTML elements the default policy accepts.
pub const HTML_TAGS: &[&str] = &[
    "a", "abbr", "address", "area", "article", "aside", "audio", "b", "base", "bdi", "bdo",
    "blockquote", "body", "br", "button", "canvas", "caption", "cite", "code", "col",
    "colgroup", "data", "datalist", "dd", "del", "details", "dfn", "dialog", "div", "dl", "dt",
    "em", "embed", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4",
    "h5", "h6", "head", "header", "hgroup", "hr", "html", "i", "iframe", "img", "input", "ins",
    "kbd", "label", "legend", "li", "link", "main", "map", "mark", "menu", "meta", "meter",
    "nav", "noscript", "object", "ol", "optgroup", "option", "output", "p", "picture", "pre",
    "progress", "q", "rp", "rt", "ruby", "s", "samp", "script", "search", "section", "select",
    "slot", "small", "source", "span", "strong", "style", "sub", "summary", "sup", "table",
    "tbody", "td", "template", "textarea", "tfoot", "th", "thead", "time", "title", "tr",
    "track", "u", "ul", "var", "video", "wbr",
];

/// Which tag names a [`Document`](super::Document) accepts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagPolicy {
    /// Known HTML elements plus custom elements (names containing `-`).
    #[default]
    Html,
    /// Any syntactically valid tag name.
    Any,
    /// Explicit allow-list of lower-case tag names.
    Only(Vec<String>),
}

impl TagPolicy {
    /// Check a tag name, returning the rejection reason on failure.
    pub fn check(&self, tag: &str) -> Result<(), String> {
        if !is_valid_tag_name(tag) {
            return Err("not a valid tag name".to_string());
        }
        let tag = tag.to_ascii_lowercase();
        match self {
            TagPolicy::Any => Ok(()),
            TagPolicy::Html => {
                if HTML_TAGS.contains(&tag.as_str()) || is_custom_element_name(&tag) {
                    Ok(())
                } else {
                    Err("unknown HTML element".to_string())
                }
            }
            TagPolicy::Only(allowed) => {
                if allowed.iter().any(|a| *a == tag) {
                    Ok(())
                } else {
                    Err("tag is not in the allow-list".to_string())
                }
            }
        }
    }
}

/// ASCII letter followed by letters, digits or `-`.
pub fn is_valid_tag_name(tag: &str) -> bool {
    let mut bytes = tag.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// Custom element names start with a letter and contain a hyphen.
pub fn is_custom_element_name(tag: &str) -> bool {
    is_valid_tag_name(tag) && tag.contains('-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_policy() {
        let policy = TagPolicy::Html;
        assert!(policy.check("span").is_ok());
        assert!(policy.check("H1").is_ok());
        assert!(policy.check("my-widget").is_ok());
        assert!(policy.check("blink").is_err());
        assert!(policy.check("").is_err());
    }

    #[test]
    fn test_any_policy() {
        assert!(TagPolicy::Any.check("blink").is_ok());
        assert!(TagPolicy::Any.check("9lives").is_err());
        assert!(TagPolicy::Any.check("a b").is_err());
    }

    #[test]
    fn test_only_policy() {
        let policy = TagPolicy::Only(vec!["div".to_string()]);
        assert!(policy.check("div").is_ok());
        assert!(policy.check("span").is_err());
    }
}
