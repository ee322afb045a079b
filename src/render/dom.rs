//! In-memory document tree implementing [`UiSink`].
//!
//! Holds elements in an arena keyed by [`NodeId`], dispatches events to
//! attached listeners and serializes the attached tree to HTML.

use std::collections::HashMap;
use std::fmt::Write as _;

use parking_lot::Mutex;
use tracing::debug;

use super::sink::{Listener, NodeId, UiEvent, UiSink};
use super::slots;
use crate::site::ContactKind;
use crate::utils::{attr_escape, html_escape};

struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    styles: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    listeners: Vec<(UiEvent, Listener)>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            attributes: Vec::new(),
            styles: Vec::new(),
            text: None,
            children: Vec::new(),
            parent: None,
            listeners: Vec::new(),
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

struct Tree {
    next_id: u64,
    nodes: HashMap<NodeId, Element>,
    body: NodeId,
    title: String,
}

impl Tree {
    fn alloc(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Element::new(tag));
        id
    }

    /// Pre-order walk of the attached tree starting at `root`.
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(el) = self.nodes.get(&id) {
                out.push(id);
                stack.extend(el.children.iter().rev().copied());
            }
        }
        out
    }

    fn drop_subtree(&mut self, root: NodeId) {
        for id in self.descendants(root) {
            self.nodes.remove(&id);
        }
    }

    fn detach(&mut self, node: NodeId) {
        let parent = self.nodes.get_mut(&node).and_then(|el| el.parent.take());
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|child| *child != node);
        }
    }

    fn clear_children(&mut self, node: NodeId) {
        let children = match self.nodes.get_mut(&node) {
            Some(el) => std::mem::take(&mut el.children),
            None => return,
        };
        for child in children {
            self.drop_subtree(child);
        }
    }

    fn is_ancestor(&self, candidate: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.nodes.get(&id).and_then(|el| el.parent);
        }
        false
    }

    fn write_html(&self, node: NodeId, depth: usize, out: &mut String) {
        let Some(el) = self.nodes.get(&node) else {
            return;
        };
        let indent = "  ".repeat(depth);

        let _ = write!(out, "{indent}<{}", el.tag);
        if let Some(id) = el.attribute("id") {
            let _ = write!(out, " id=\"{}\"", attr_escape(id));
        }
        if !el.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", attr_escape(&el.classes.join(" ")));
        }
        for (name, value) in el.attributes.iter().filter(|(name, _)| name != "id") {
            let _ = write!(out, " {name}=\"{}\"", attr_escape(value));
        }
        if !el.styles.is_empty() {
            let style = el
                .styles
                .iter()
                .map(|(prop, value)| format!("{prop}: {value}"))
                .collect::<Vec<_>>()
                .join("; ");
            let _ = write!(out, " style=\"{}\"", attr_escape(&style));
        }
        out.push('>');

        if let Some(text) = &el.text {
            out.push_str(&html_escape(text));
        }
        if el.children.is_empty() {
            let _ = writeln!(out, "</{}>", el.tag);
            return;
        }
        out.push('\n');
        for child in &el.children {
            self.write_html(*child, depth + 1, out);
        }
        let _ = writeln!(out, "{indent}</{}>", el.tag);
    }
}

/// Thread-safe document tree.
pub struct Document {
    tree: Mutex<Tree>,
}

impl Document {
    /// Create an empty document with only a `body` root.
    pub fn new() -> Self {
        let mut tree = Tree {
            next_id: 0,
            nodes: HashMap::new(),
            body: NodeId(0),
            title: String::new(),
        };
        tree.body = tree.alloc("body");
        Self {
            tree: Mutex::new(tree),
        }
    }

    /// Create the landing page skeleton with every named slot in place.
    ///
    /// Header and footer slots carry placeholder text until site info is
    /// populated. `contactSections` holds a loading indicator.
    pub fn landing_page() -> Self {
        let doc = Self::new();
        let body = doc.body();

        let header = doc.element("header", &["hero"]);
        let title = doc.element("h1", &["site-title"]);
        doc.set_attribute(title, "id", slots::TITLE);
        doc.set_text(title, "Contact Hub");
        let tagline = doc.element("p", &["site-tagline"]);
        doc.set_attribute(tagline, "id", slots::TAGLINE);
        let subtitle = doc.element("h2", &["site-subtitle"]);
        doc.set_attribute(subtitle, "id", slots::SUBTITLE);
        let glitch = doc.element("span", &[slots::SUBTITLE_TEXT_CLASS]);
        doc.append_child(subtitle, glitch);
        for node in [title, tagline, subtitle] {
            doc.append_child(header, node);
        }
        doc.append_child(body, header);

        let main = doc.element("main", &[]);
        let sections = doc.element("div", &["contact-sections"]);
        doc.set_attribute(sections, "id", slots::CONTACT_SECTIONS);
        let loading = doc.element("div", &["loading"]);
        doc.set_text(loading, "Memuat kontak...");
        doc.append_child(sections, loading);
        doc.append_child(main, sections);
        doc.append_child(body, main);

        let footer = doc.element("footer", &[]);
        let copyright = doc.element("p", &[]);
        doc.set_attribute(copyright, "id", slots::COPYRIGHT);
        doc.append_child(footer, copyright);
        doc.append_child(body, footer);

        for kind in [
            ContactKind::WhatsApp,
            ContactKind::Telegram,
            ContactKind::Email,
            ContactKind::WhatsAppGroup,
            ContactKind::TelegramGroup,
        ] {
            let Some(slot) = kind.notification_slot() else {
                continue;
            };
            let toast = doc.element("div", &["notification"]);
            doc.set_attribute(toast, "id", slot);
            let text = doc.element("div", &["notification-text"]);
            doc.set_text(text, &format!("Membuka {}...", kind.label()));
            doc.append_child(toast, text);
            doc.append_child(body, toast);
        }

        doc
    }

    fn element(&self, tag: &str, classes: &[&str]) -> NodeId {
        let node = self.create_element(tag);
        for class in classes {
            self.add_class(node, class);
        }
        node
    }

    /// Invoke every listener registered for `event` on `node`.
    ///
    /// Listeners run outside the tree lock so they can mutate the document.
    /// Returns how many listeners ran.
    pub fn dispatch(&self, node: NodeId, event: UiEvent) -> usize {
        let listeners: Vec<Listener> = {
            let tree = self.tree.lock();
            match tree.nodes.get(&node) {
                Some(el) => el
                    .listeners
                    .iter()
                    .filter(|(kind, _)| *kind == event)
                    .map(|(_, listener)| Listener::clone(listener))
                    .collect(),
                None => Vec::new(),
            }
        };
        debug!("dispatch {:?} to {}: {} listener(s)", event, node, listeners.len());
        for listener in &listeners {
            listener();
        }
        listeners.len()
    }

    /// Page title.
    #[allow(dead_code)]
    pub fn title(&self) -> String {
        self.tree.lock().title.clone()
    }

    /// Whether `node` still exists (attached or not).
    #[allow(dead_code)]
    pub fn contains(&self, node: NodeId) -> bool {
        self.tree.lock().nodes.contains_key(&node)
    }

    #[allow(dead_code)]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree
            .lock()
            .nodes
            .get(&node)
            .map(|el| el.children.clone())
            .unwrap_or_default()
    }

    #[allow(dead_code)]
    pub fn text(&self, node: NodeId) -> Option<String> {
        self.tree.lock().nodes.get(&node).and_then(|el| el.text.clone())
    }

    #[allow(dead_code)]
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.tree
            .lock()
            .nodes
            .get(&node)
            .and_then(|el| el.attribute(name).map(str::to_string))
    }

    #[allow(dead_code)]
    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.tree.lock().nodes.get(&node).and_then(|el| {
            el.styles
                .iter()
                .find(|(prop, _)| prop == property)
                .map(|(_, value)| value.clone())
        })
    }

    #[allow(dead_code)]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.tree
            .lock()
            .nodes
            .get(&node)
            .is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    /// Every descendant of `root` (inclusive) carrying `class`, in document order.
    pub fn find_all_by_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        let tree = self.tree.lock();
        tree.descendants(root)
            .into_iter()
            .filter(|id| {
                tree.nodes
                    .get(id)
                    .is_some_and(|el| el.classes.iter().any(|c| c == class))
            })
            .collect()
    }

    /// Number of live nodes, detached ones included.
    #[allow(dead_code)]
    pub fn node_count(&self) -> usize {
        self.tree.lock().nodes.len()
    }

    /// Number of listeners across all live nodes.
    #[allow(dead_code)]
    pub fn listener_count(&self) -> usize {
        self.tree
            .lock()
            .nodes
            .values()
            .map(|el| el.listeners.len())
            .sum()
    }

    /// Serialize one subtree.
    #[allow(dead_code)]
    pub fn render_node(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.tree.lock().write_html(node, 0, &mut out);
        out
    }

    /// Serialize the whole page.
    pub fn to_html(&self) -> String {
        let tree = self.tree.lock();
        let mut out = String::from("<!DOCTYPE html>\n<html>\n<head>\n");
        out.push_str("  <meta charset=\"utf-8\">\n");
        let _ = writeln!(out, "  <title>{}</title>", html_escape(&tree.title));
        out.push_str("</head>\n");
        tree.write_html(tree.body, 0, &mut out);
        out.push_str("</html>\n");
        out
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tree = self.tree.lock();
        f.debug_struct("Document")
            .field("title", &tree.title)
            .field("node_count", &tree.nodes.len())
            .finish()
    }
}

impl UiSink for Document {
    fn slot(&self, id: &str) -> Option<NodeId> {
        let tree = self.tree.lock();
        tree.descendants(tree.body)
            .into_iter()
            .find(|node| {
                tree.nodes
                    .get(node)
                    .is_some_and(|el| el.attribute("id") == Some(id))
            })
    }

    fn body(&self) -> NodeId {
        self.tree.lock().body
    }

    fn find_by_class(&self, root: NodeId, class: &str) -> Option<NodeId> {
        self.find_all_by_class(root, class)
            .into_iter()
            .find(|node| *node != root)
    }

    fn create_element(&self, tag: &str) -> NodeId {
        self.tree.lock().alloc(tag)
    }

    fn set_text(&self, node: NodeId, text: &str) {
        let mut tree = self.tree.lock();
        if !tree.nodes.contains_key(&node) {
            return;
        }
        tree.clear_children(node);
        if let Some(el) = tree.nodes.get_mut(&node) {
            el.text = Some(text.to_string());
        }
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        if let Some(el) = self.tree.lock().nodes.get_mut(&node) {
            match el.attributes.iter_mut().find(|(key, _)| key == name) {
                Some((_, existing)) => *existing = value.to_string(),
                None => el.attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn add_class(&self, node: NodeId, class: &str) {
        if let Some(el) = self.tree.lock().nodes.get_mut(&node) {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&self, node: NodeId, class: &str) {
        if let Some(el) = self.tree.lock().nodes.get_mut(&node) {
            el.classes.retain(|c| c != class);
        }
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) {
        if let Some(el) = self.tree.lock().nodes.get_mut(&node) {
            match el.styles.iter_mut().find(|(prop, _)| prop == property) {
                Some((_, existing)) => *existing = value.to_string(),
                None => el.styles.push((property.to_string(), value.to_string())),
            }
        }
    }

    fn clear_children(&self, node: NodeId) {
        self.tree.lock().clear_children(node);
    }

    fn append_child(&self, parent: NodeId, child: NodeId) {
        let mut tree = self.tree.lock();
        if !tree.nodes.contains_key(&parent) || !tree.nodes.contains_key(&child) {
            return;
        }
        // Refuse to create a cycle.
        if tree.is_ancestor(child, parent) {
            return;
        }
        tree.detach(child);
        if let Some(el) = tree.nodes.get_mut(&child) {
            el.parent = Some(parent);
        }
        if let Some(el) = tree.nodes.get_mut(&parent) {
            el.children.push(child);
        }
    }

    fn remove(&self, node: NodeId) {
        let mut tree = self.tree.lock();
        if node == tree.body {
            return;
        }
        tree.detach(node);
        tree.drop_subtree(node);
    }

    fn set_title(&self, title: &str) {
        self.tree.lock().title = title.to_string();
    }

    fn add_listener(&self, node: NodeId, event: UiEvent, listener: Listener) {
        if let Some(el) = self.tree.lock().nodes.get_mut(&node) {
            el.listeners.push((event, listener));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_landing_page_slots() {
        let doc = Document::landing_page();
        for id in [
            slots::TITLE,
            slots::TAGLINE,
            slots::SUBTITLE,
            slots::COPYRIGHT,
            slots::CONTACT_SECTIONS,
            "whatsappNotif",
            "telegramGroupNotif",
        ] {
            assert!(doc.slot(id).is_some(), "missing slot {id}");
        }
        let subtitle = doc.slot(slots::SUBTITLE).unwrap();
        assert!(doc.find_by_class(subtitle, slots::SUBTITLE_TEXT_CLASS).is_some());
    }

    #[test]
    fn test_detached_node_is_not_a_slot() {
        let doc = Document::new();
        let node = doc.create_element("div");
        doc.set_attribute(node, "id", "floating");
        assert!(doc.slot("floating").is_none());

        doc.append_child(doc.body(), node);
        assert_eq!(doc.slot("floating"), Some(node));
    }

    #[test]
    fn test_clear_children_drops_subtree_and_listeners() {
        let doc = Document::new();
        let parent = doc.create_element("div");
        let child = doc.create_element("div");
        let grandchild = doc.create_element("span");
        doc.append_child(doc.body(), parent);
        doc.append_child(parent, child);
        doc.append_child(child, grandchild);
        doc.add_listener(child, UiEvent::Click, Arc::new(|| {}));

        doc.clear_children(parent);

        assert!(!doc.contains(child));
        assert!(!doc.contains(grandchild));
        assert_eq!(doc.listener_count(), 0);
        assert!(doc.children(parent).is_empty());
        assert_eq!(doc.dispatch(child, UiEvent::Click), 0);
    }

    #[test]
    fn test_dispatch_runs_matching_listeners() {
        let doc = Document::new();
        let node = doc.create_element("div");
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        doc.add_listener(
            node,
            UiEvent::Click,
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert_eq!(doc.dispatch(node, UiEvent::PointerEnter), 0);
        assert_eq!(doc.dispatch(node, UiEvent::Click), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listener_may_mutate_document() {
        let doc = Arc::new(Document::new());
        let node = doc.create_element("div");
        let handle = Arc::clone(&doc);
        doc.add_listener(
            node,
            UiEvent::PointerEnter,
            Arc::new(move || handle.set_style(node, "transform", "translateY(-8px)")),
        );

        doc.dispatch(node, UiEvent::PointerEnter);
        assert_eq!(doc.style(node, "transform").as_deref(), Some("translateY(-8px)"));
    }

    #[test]
    fn test_set_text_replaces_children() {
        let doc = Document::new();
        let node = doc.create_element("div");
        let child = doc.create_element("span");
        doc.append_child(node, child);

        doc.set_text(node, "hello");

        assert!(!doc.contains(child));
        assert_eq!(doc.text(node).as_deref(), Some("hello"));
    }

    #[test]
    fn test_append_refuses_cycles() {
        let doc = Document::new();
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        doc.append_child(a, b);
        doc.append_child(b, a);
        assert_eq!(doc.children(a), vec![b]);
        assert!(doc.children(b).is_empty());
    }

    #[test]
    fn test_html_serialization() {
        let doc = Document::new();
        doc.set_title("A & B");
        let card = doc.create_element("div");
        doc.add_class(card, "contact-card");
        doc.add_class(card, "email");
        doc.set_style(card, "animation-delay", "0.1s");
        doc.set_attribute(card, "data-kind", "e\"mail");
        let title = doc.create_element("div");
        doc.set_text(title, "<Email>");
        doc.append_child(card, title);
        doc.append_child(doc.body(), card);

        assert_eq!(
            doc.render_node(card),
            "<div class=\"contact-card email\" data-kind=\"e&quot;mail\" style=\"animation-delay: 0.1s\">\n  <div>&lt;Email&gt;</div>\n</div>\n"
        );
        assert!(doc.to_html().contains("<title>A &amp; B</title>"));
    }

    #[test]
    fn test_body_cannot_be_removed() {
        let doc = Document::new();
        let body = doc.body();
        doc.remove(body);
        assert!(doc.contains(body));
    }
}
