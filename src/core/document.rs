//! In-memory resource document tree.
//!
//! A [`Document`] wraps the root element of a resource file (normally
//! `<resources>`). Its `<string name="...">` children are the entries; every
//! other node is carried along untouched so a load/save cycle does not lose
//! plurals, arrays, comments, or CDATA blocks.

use crate::core::key::EntryKey;
use serde::Serialize;

/// Name of the root element of a string resource file.
pub const ROOT_ELEMENT: &str = "resources";

/// Name of an entry element.
pub const ENTRY_ELEMENT: &str = "string";

/// Name of a value inside `<string-array>`, `<plurals>` or `<style>`.
pub const ITEM_ELEMENT: &str = "item";

const VALUE_ELEMENTS: &[&str] = &[ENTRY_ELEMENT, ITEM_ELEMENT];

/// Attribute holding an entry's key.
pub const KEY_ATTRIBUTE: &str = "name";

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element.
    Element(Element),
    /// Unescaped character data.
    Text(String),
    /// Raw content of a `<![CDATA[...]]>` section.
    CData(String),
    /// Raw content of a `<!--...-->` comment.
    Comment(String),
}

impl Node {
    /// Returns true for text nodes made only of whitespace.
    #[must_use]
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Self::Text(t) if t.trim().is_empty())
    }
}

/// An XML element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name.
    pub name: String,
    /// Attributes in document order, values unescaped.
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an element with no attributes or children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds an attribute (builder style).
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Adds a text child (builder style). Empty text is skipped.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.children.push(Node::Text(text));
        }
        self
    }

    /// Returns the value of the named attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over the direct child elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Concatenated text and CDATA content of this element and its
    /// descendants, in document order.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(t) | Node::CData(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
                Node::Comment(_) => {}
            }
        }
    }

    /// Returns true for elements whose whole content is a value: entries
    /// and the `<item>` children of arrays, plurals and styles.
    #[must_use]
    pub fn is_value(&self) -> bool {
        VALUE_ELEMENTS.contains(&self.name.as_str())
    }

    /// Returns true when the direct content is structural only: at least
    /// one element or comment child, and no text apart from whitespace.
    #[must_use]
    pub fn holds_only_structure(&self) -> bool {
        let mut has_structure = false;
        for node in &self.children {
            match node {
                Node::Element(_) | Node::Comment(_) => has_structure = true,
                Node::CData(_) => return false,
                Node::Text(t) if !t.trim().is_empty() => return false,
                Node::Text(_) => {}
            }
        }
        has_structure
    }

    /// Returns true when the element is a container that may be laid out
    /// one child per line.
    ///
    /// Values are never containers, whatever markup they hold. Any other
    /// element qualifies when it holds only structure and every child
    /// element is a value, empty, or itself a container. Everything else
    /// is written inline so its content is reproduced exactly.
    #[must_use]
    pub fn is_block(&self) -> bool {
        !self.is_value()
            && self.holds_only_structure()
            && self
                .child_elements()
                .all(|child| child.is_value() || child.children.is_empty() || child.is_block())
    }
}

/// A `(key, value)` view of one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Entry name (the `name` attribute).
    pub key: String,
    /// Entry text content.
    pub value: String,
}

/// Result of [`Document::add_entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AddOutcome {
    /// The entry was appended.
    Added,
    /// An entry with the same key already existed; nothing changed.
    Duplicate,
}

/// A parsed resource document.
///
/// # Examples
///
/// ```
/// use string_res::core::{AddOutcome, Document, EntryKey};
///
/// let mut doc = Document::empty();
/// let key = EntryKey::sanitized("app name");
/// assert_eq!(doc.add_entry(&key, "Demo"), AddOutcome::Added);
/// assert_eq!(doc.add_entry(&key, "Other"), AddOutcome::Duplicate);
/// assert_eq!(doc.get("app_name").as_deref(), Some("Demo"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    prolog: Vec<String>,
    root: Element,
    epilog: Vec<String>,
}

impl Document {
    /// Wraps a root element.
    #[must_use]
    pub const fn new(root: Element) -> Self {
        Self::from_parts(Vec::new(), root, Vec::new())
    }

    /// Builds a document from its root and the comments placed before and
    /// after it.
    #[must_use]
    pub const fn from_parts(prolog: Vec<String>, root: Element, epilog: Vec<String>) -> Self {
        Self {
            prolog,
            root,
            epilog,
        }
    }

    /// Comments that precede the root element.
    #[must_use]
    pub fn prolog(&self) -> &[String] {
        &self.prolog
    }

    /// Comments that follow the root element.
    #[must_use]
    pub fn epilog(&self) -> &[String] {
        &self.epilog
    }

    /// Creates a document with an empty `<resources>` root.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Element::new(ROOT_ELEMENT))
    }

    /// Returns the root element.
    #[must_use]
    pub const fn root(&self) -> &Element {
        &self.root
    }

    fn entry_elements(&self) -> impl Iterator<Item = &Element> {
        self.root
            .child_elements()
            .filter(|e| e.name == ENTRY_ELEMENT)
    }

    /// Returns the entries in document order.
    ///
    /// `<string>` elements without a `name` attribute are skipped.
    #[must_use]
    pub fn entries(&self) -> Vec<Entry> {
        self.entry_elements()
            .filter_map(|e| {
                e.attribute(KEY_ATTRIBUTE).map(|key| Entry {
                    key: key.to_string(),
                    value: e.text(),
                })
            })
            .collect()
    }

    /// Returns true if an entry named `key` exists (exact match).
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entry_elements()
            .any(|e| e.attribute(KEY_ATTRIBUTE) == Some(key))
    }

    /// Returns the value of the entry named `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.entry_elements()
            .find(|e| e.attribute(KEY_ATTRIBUTE) == Some(key))
            .map(Element::text)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Returns true if the document has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends `<string name="key">value</string>` unless `key` exists.
    ///
    /// Matching is exact and case-sensitive. An existing entry is never
    /// modified.
    pub fn add_entry(&mut self, key: &EntryKey, value: &str) -> AddOutcome {
        if self.contains_key(key.as_str()) {
            return AddOutcome::Duplicate;
        }

        let entry = Element::new(ENTRY_ELEMENT)
            .with_attribute(KEY_ATTRIBUTE, key.as_str())
            .with_text(value);
        self.root.children.push(Node::Element(entry));
        AddOutcome::Added
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> EntryKey {
        EntryKey::parse(s).unwrap()
    }

    fn doc_with_hello() -> Document {
        let mut root = Element::new(ROOT_ELEMENT);
        root.children.push(Node::Text("\n    ".to_string()));
        root.children.push(Node::Element(
            Element::new(ENTRY_ELEMENT)
                .with_attribute(KEY_ATTRIBUTE, "hello")
                .with_text("Hi"),
        ));
        root.children.push(Node::Text("\n".to_string()));
        Document::new(root)
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::empty();
        assert_eq!(doc.root().name, "resources");
        assert!(doc.is_empty());
        assert!(doc.entries().is_empty());
    }

    #[test]
    fn test_add_new_entry_appends() {
        let mut doc = doc_with_hello();
        assert_eq!(doc.len(), 1);

        let outcome = doc.add_entry(&key("bye"), "See you");
        assert_eq!(outcome, AddOutcome::Added);
        assert_eq!(doc.len(), 2);

        let entries = doc.entries();
        assert_eq!(entries[0].key, "hello");
        assert_eq!(entries[1].key, "bye");
        assert_eq!(entries[1].value, "See you");
    }

    #[test]
    fn test_add_duplicate_is_noop() {
        let mut doc = doc_with_hello();
        let before = doc.clone();

        let outcome = doc.add_entry(&key("hello"), "Changed");
        assert_eq!(outcome, AddOutcome::Duplicate);
        assert_eq!(doc, before);
        assert_eq!(doc.get("hello").as_deref(), Some("Hi"));
    }

    #[test]
    fn test_add_twice_yields_single_entry() {
        let mut doc = Document::empty();
        doc.add_entry(&key("title"), "Title");
        doc.add_entry(&key("title"), "Title");

        let count = doc.entries().iter().filter(|e| e.key == "title").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_duplicate_match_is_case_sensitive() {
        let mut doc = doc_with_hello();
        assert_eq!(doc.add_entry(&key("Hello"), "Hi"), AddOutcome::Added);
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_empty_value_has_no_text_child() {
        let mut doc = Document::empty();
        doc.add_entry(&key("blank"), "");
        assert_eq!(doc.get("blank").as_deref(), Some(""));
        let entry = doc.root().child_elements().next().unwrap();
        assert!(entry.children.is_empty());
    }

    #[test]
    fn test_non_entry_children_ignored() {
        let mut root = Element::new(ROOT_ELEMENT);
        root.children.push(Node::Element(
            Element::new("plurals").with_attribute(KEY_ATTRIBUTE, "items"),
        ));
        root.children.push(Node::Element(Element::new(ENTRY_ELEMENT).with_text("anon")));
        let mut doc = Document::new(root);

        assert!(doc.is_empty());
        assert!(!doc.contains_key("items"));
        assert_eq!(doc.add_entry(&key("items"), "x"), AddOutcome::Added);
    }

    #[test]
    fn test_text_collects_nested_content() {
        let mut e = Element::new(ENTRY_ELEMENT).with_text("Hello ");
        e.children.push(Node::Element(Element::new("b").with_text("World")));
        e.children.push(Node::Comment(" note ".to_string()));
        e.children.push(Node::CData("!".to_string()));
        assert_eq!(e.text(), "Hello World!");
    }

    #[test]
    fn test_is_block() {
        assert!(!Element::new("empty").is_block());
        assert!(!Element::new("s").with_text("Hi").is_block());
        assert!(doc_with_hello().root().is_block());

        let mut mixed = Element::new("s").with_text("a");
        mixed.children.push(Node::Element(Element::new("b")));
        assert!(!mixed.is_block());

        let mut cdata = Element::new("s");
        cdata.children.push(Node::CData("<b>x</b>".to_string()));
        assert!(!cdata.is_block());
    }

    #[test]
    fn test_markup_only_values_are_inline() {
        let mut bold = Element::new(ENTRY_ELEMENT).with_attribute(KEY_ATTRIBUTE, "bold");
        bold.children.push(Node::Element(Element::new("b").with_text("Bold")));
        assert!(bold.holds_only_structure());
        assert!(!bold.is_block());

        let mut item = Element::new(ITEM_ELEMENT);
        item.children.push(Node::Text("\n  ".to_string()));
        item.children.push(Node::Element(Element::new("i").with_text("x")));
        assert!(!item.is_block());

        let mut wrapper = Element::new("wrapper");
        wrapper.children.push(Node::Element(Element::new("b").with_text("x")));
        assert!(!wrapper.is_block());
    }

    #[test]
    fn test_containers_are_blocks() {
        let mut array = Element::new("string-array");
        array.children.push(Node::Element(Element::new(ITEM_ELEMENT).with_text("A")));
        array.children.push(Node::Comment(" more ".to_string()));
        assert!(array.is_block());

        let mut attr = Element::new("attr");
        attr.children.push(Node::Element(Element::new("enum")));
        let mut styleable = Element::new("declare-styleable");
        styleable.children.push(Node::Element(attr));
        assert!(styleable.is_block());

        let mut root = Element::new(ROOT_ELEMENT);
        root.children.push(Node::Element(array));
        root.children.push(Node::Element(styleable));
        assert!(root.is_block());
    }
}
