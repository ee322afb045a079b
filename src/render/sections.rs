//! Contact section rendering.
//!
//! One `section` per group, one card per enabled item. A group with exactly
//! three enabled items gets the `grid-3` layout (two on top, one centered).

use std::sync::{Arc, Weak};

use tracing::{info, warn};

use super::sink::{NodeId, UiEvent, UiSink};
use super::slots;
use crate::interaction::ActivationHandler;
use crate::site::{ContactGroup, ContactItem, SiteConfig};
use crate::utils::stagger_delay;

/// Layout class for groups with exactly three enabled items.
pub const THREE_UP_CLASS: &str = "grid-3";

const GROUP_STAGGER_MS: u64 = 200;
const CARD_STAGGER_MS: u64 = 100;

/// Card rendered for one enabled item.
#[derive(Debug, Clone)]
pub struct RenderedCard {
    pub item_id: String,
    pub node: NodeId,
}

/// Section rendered for one group.
#[derive(Debug, Clone)]
pub struct RenderedSection {
    pub group_id: String,
    pub node: NodeId,
    #[allow(dead_code)]
    pub grid: NodeId,
    #[allow(dead_code)]
    pub three_up: bool,
    pub cards: Vec<RenderedCard>,
}

/// What the last render produced, in document order.
#[derive(Debug, Clone, Default)]
pub struct RenderSummary {
    pub sections: Vec<RenderedSection>,
}

impl RenderSummary {
    /// Total number of cards across all sections.
    pub fn card_count(&self) -> usize {
        self.sections.iter().map(|s| s.cards.len()).sum()
    }

    /// Card for `group_id`/`item_id`, if it was rendered.
    pub fn find_card(&self, group_id: &str, item_id: &str) -> Option<&RenderedCard> {
        self.sections
            .iter()
            .filter(|s| s.group_id == group_id)
            .flat_map(|s| s.cards.iter())
            .find(|c| c.item_id == item_id)
    }
}

/// Builds contact sections into the `contactSections` slot.
pub struct SectionRenderer {
    sink: Arc<dyn UiSink>,
    handler: Arc<ActivationHandler>,
}

impl SectionRenderer {
    pub fn new(sink: Arc<dyn UiSink>, handler: Arc<ActivationHandler>) -> Self {
        Self { sink, handler }
    }

    /// Replace the rendered sections with the ones described by `config`.
    ///
    /// Clearing the container drops previous cards and their listeners, so
    /// repeated calls never leave stale content behind.
    pub fn render(&self, config: &SiteConfig) -> RenderSummary {
        let Some(root) = self.sink.slot(slots::CONTACT_SECTIONS) else {
            warn!("contact sections container missing, nothing rendered");
            return RenderSummary::default();
        };

        self.sink.clear_children(root);

        let sections: Vec<RenderedSection> = config
            .groups
            .iter()
            .enumerate()
            .map(|(index, group)| {
                let section = self.render_group(group, index);
                self.sink.append_child(root, section.node);
                section
            })
            .collect();

        info!("Generated {} contact groups", sections.len());
        RenderSummary { sections }
    }

    fn render_group(&self, group: &ContactGroup, index: usize) -> RenderedSection {
        let sink = &self.sink;

        let section = sink.create_element("section");
        sink.add_class(section, "contact-group");
        sink.set_attribute(section, "data-aos", "fade-up");
        sink.set_style(section, "animation-delay", &stagger_delay(index, GROUP_STAGGER_MS));

        let header = sink.create_element("div");
        sink.add_class(header, "group-header");
        let heading = sink.create_element("h3");
        sink.set_text(heading, &group.title);
        sink.append_child(header, heading);
        sink.append_child(section, header);

        let grid = sink.create_element("div");
        sink.add_class(grid, "contact-grid");

        let enabled: Vec<&ContactItem> = group.enabled_items().collect();
        let three_up = enabled.len() == 3;
        if three_up {
            sink.add_class(grid, THREE_UP_CLASS);
        }

        let cards = enabled
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let node = self.render_card(item, i);
                sink.append_child(grid, node);
                RenderedCard {
                    item_id: item.id.clone(),
                    node,
                }
            })
            .collect();

        sink.append_child(section, grid);

        RenderedSection {
            group_id: group.id.clone(),
            node: section,
            grid,
            three_up,
            cards,
        }
    }

    fn render_card(&self, item: &ContactItem, index: usize) -> NodeId {
        let sink = &self.sink;

        let card = sink.create_element("div");
        sink.add_class(card, "contact-card");
        sink.add_class(card, item.kind.card_class());
        sink.set_style(card, "animation-delay", &stagger_delay(index, CARD_STAGGER_MS));

        let icon_box = sink.create_element("div");
        sink.add_class(icon_box, "contact-icon");
        let icon = sink.create_element("i");
        for class in item.kind.icon().split_whitespace() {
            sink.add_class(icon, class);
        }
        sink.append_child(icon_box, icon);
        sink.append_child(card, icon_box);

        let title = sink.create_element("div");
        sink.add_class(title, "contact-title");
        sink.set_text(title, &item.title);
        sink.append_child(card, title);

        let desc = sink.create_element("div");
        sink.add_class(desc, "contact-desc");
        sink.set_text(desc, &item.description);
        sink.append_child(card, desc);

        let handler = Arc::clone(&self.handler);
        let bound = item.clone();
        sink.add_listener(
            card,
            UiEvent::Click,
            Arc::new(move || {
                handler.activate(&bound);
            }),
        );

        // Hover lift. Weak so the document's own listeners don't keep it alive.
        for (event, transform) in [
            (UiEvent::PointerEnter, "translateY(-8px)"),
            (UiEvent::PointerLeave, "translateY(0)"),
        ] {
            let weak: Weak<dyn UiSink> = Arc::downgrade(sink);
            sink.add_listener(
                card,
                event,
                Arc::new(move || {
                    if let Some(sink) = weak.upgrade() {
                        sink.set_style(card, "transform", transform);
                    }
                }),
            );
        }

        card
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::{RecordingNavigator, Timings};
    use crate::render::Document;
    use crate::site::{ContactKind, default_config};

    fn item(id: &str, kind: &str, enabled: bool) -> ContactItem {
        ContactItem {
            id: id.to_string(),
            kind: ContactKind::from(kind),
            url: Some(format!("https://example.com/{id}")),
            title: format!("Title {id}"),
            description: format!("Desc {id}"),
            enabled,
            number: None,
        }
    }

    fn group(id: &str, items: Vec<ContactItem>) -> ContactGroup {
        ContactGroup {
            id: id.to_string(),
            title: format!("Group {id}"),
            items,
        }
    }

    fn setup() -> (Arc<Document>, SectionRenderer) {
        let doc = Arc::new(Document::landing_page());
        let sink: Arc<dyn UiSink> = doc.clone();
        let handler = Arc::new(ActivationHandler::new(
            &sink,
            Arc::new(RecordingNavigator::default()),
            Timings::default(),
        ));
        (doc, SectionRenderer::new(sink, handler))
    }

    fn container(doc: &Document) -> NodeId {
        doc.slot(slots::CONTACT_SECTIONS).unwrap()
    }

    #[test]
    fn test_order_and_disabled_filter() {
        let (doc, renderer) = setup();
        let config = SiteConfig {
            groups: vec![
                group("b", vec![item("b1", "email", true), item("b2", "telegram", false)]),
                group(
                    "a",
                    vec![
                        item("a1", "telegram", true),
                        item("a2", "whatsapp", false),
                        item("a3", "whatsapp", true),
                    ],
                ),
            ],
            ..SiteConfig::default()
        };

        let summary = renderer.render(&config);

        let groups: Vec<_> = summary.sections.iter().map(|s| s.group_id.as_str()).collect();
        assert_eq!(groups, ["b", "a"]);
        let ids: Vec<Vec<&str>> = summary
            .sections
            .iter()
            .map(|s| s.cards.iter().map(|c| c.item_id.as_str()).collect())
            .collect();
        assert_eq!(ids, vec![vec!["b1"], vec!["a1", "a3"]]);

        // Tree mirrors the summary.
        let sections = doc.children(container(&doc));
        assert_eq!(sections, summary.sections.iter().map(|s| s.node).collect::<Vec<_>>());
        let cards = doc.find_all_by_class(container(&doc), "contact-card");
        assert_eq!(cards.len(), 3);
        let titles: Vec<_> = doc
            .find_all_by_class(container(&doc), "contact-title")
            .into_iter()
            .filter_map(|node| doc.text(node))
            .collect();
        assert_eq!(titles, ["Title b1", "Title a1", "Title a3"]);
    }

    #[test]
    fn test_three_up_marker_only_for_exactly_three() {
        let (doc, renderer) = setup();
        let config = SiteConfig {
            groups: vec![
                group("two", vec![item("1", "email", true), item("2", "email", true)]),
                group(
                    "three",
                    vec![
                        item("1", "email", true),
                        item("2", "email", false),
                        item("3", "email", true),
                        item("4", "email", true),
                    ],
                ),
                group("four", (0..4).map(|i| item(&i.to_string(), "email", true)).collect()),
                group("none", vec![]),
            ],
            ..SiteConfig::default()
        };

        let summary = renderer.render(&config);
        let flags: Vec<_> = summary.sections.iter().map(|s| s.three_up).collect();
        assert_eq!(flags, [false, true, false, false]);
        for section in &summary.sections {
            assert_eq!(doc.has_class(section.grid, THREE_UP_CLASS), section.three_up);
            assert!(doc.has_class(section.grid, "contact-grid"));
        }
    }

    #[test]
    fn test_empty_config_renders_no_sections() {
        let (doc, renderer) = setup();
        let summary = renderer.render(&SiteConfig::default());

        assert!(summary.sections.is_empty());
        assert!(doc.children(container(&doc)).is_empty());
    }

    #[test]
    fn test_card_markup() {
        let (doc, renderer) = setup();
        let config = SiteConfig {
            groups: vec![group(
                "g",
                vec![item("x", "whatsapp_group", true), item("y", "bogus_type", true)],
            )],
            ..SiteConfig::default()
        };
        let summary = renderer.render(&config);
        let section = &summary.sections[0];

        assert_eq!(doc.attribute(section.node, "data-aos").as_deref(), Some("fade-up"));
        assert_eq!(doc.style(section.node, "animation-delay").as_deref(), Some("0s"));

        let first = section.cards[0].node;
        assert!(doc.has_class(first, "group"));
        assert_eq!(doc.style(first, "animation-delay").as_deref(), Some("0s"));
        assert_eq!(doc.find_all_by_class(first, "fa-users").len(), 1);

        let second = section.cards[1].node;
        assert!(doc.has_class(second, "default"));
        assert_eq!(doc.style(second, "animation-delay").as_deref(), Some("0.1s"));
        assert_eq!(doc.find_all_by_class(second, "fa-question").len(), 1);
    }

    #[test]
    fn test_section_stagger() {
        let (doc, renderer) = setup();
        let config = SiteConfig {
            groups: vec![group("a", vec![]), group("b", vec![]), group("c", vec![])],
            ..SiteConfig::default()
        };
        let summary = renderer.render(&config);
        let delays: Vec<_> = summary
            .sections
            .iter()
            .filter_map(|s| doc.style(s.node, "animation-delay"))
            .collect();
        assert_eq!(delays, ["0s", "0.2s", "0.4s"]);
    }

    #[test]
    fn test_rerender_leaves_no_stale_cards() {
        let (doc, renderer) = setup();
        let first = renderer.render(&default_config());
        let old_cards: Vec<NodeId> = first
            .sections
            .iter()
            .flat_map(|s| s.cards.iter().map(|c| c.node))
            .collect();
        assert_eq!(old_cards.len(), 5);

        let replacement = SiteConfig {
            groups: vec![group("only", vec![item("z", "telegram", true)])],
            ..SiteConfig::default()
        };
        let second = renderer.render(&replacement);

        assert_eq!(second.card_count(), 1);
        assert_eq!(doc.find_all_by_class(container(&doc), "contact-card").len(), 1);
        assert!(old_cards.iter().all(|node| !doc.contains(*node)));
        // One click + two hover listeners on the single remaining card.
        assert_eq!(doc.listener_count(), 3);
    }

    #[test]
    fn test_rerender_same_config_is_identical() {
        let (doc, renderer) = setup();
        renderer.render(&default_config());
        let before = doc.render_node(container(&doc));
        let nodes_before = doc.node_count();

        renderer.render(&default_config());

        assert_eq!(doc.render_node(container(&doc)), before);
        assert_eq!(doc.node_count(), nodes_before);
    }

    #[test]
    fn test_missing_container_is_noop() {
        let doc = Arc::new(Document::new());
        let sink: Arc<dyn UiSink> = doc.clone();
        let handler = Arc::new(ActivationHandler::new(
            &sink,
            Arc::new(RecordingNavigator::default()),
            Timings::default(),
        ));
        let renderer = SectionRenderer::new(sink, handler);

        let summary = renderer.render(&default_config());

        assert!(summary.sections.is_empty());
        assert_eq!(doc.node_count(), 1);
    }

    #[test]
    fn test_hover_sets_transform() {
        let (doc, renderer) = setup();
        let summary = renderer.render(&default_config());
        let card = summary.sections[0].cards[0].node;

        doc.dispatch(card, UiEvent::PointerEnter);
        assert_eq!(doc.style(card, "transform").as_deref(), Some("translateY(-8px)"));
        doc.dispatch(card, UiEvent::PointerLeave);
        assert_eq!(doc.style(card, "transform").as_deref(), Some("translateY(0)"));
    }

    #[test]
    fn test_find_card() {
        let (_doc, renderer) = setup();
        let summary = renderer.render(&default_config());
        assert!(summary.find_card("contact_admin", "email").is_some());
        assert!(summary.find_card("group_admin", "email").is_none());
    }
}
