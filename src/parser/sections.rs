use std::sync::LazyLock;

use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::rows;
use super::text::{flatten_text, sanitize_name};
use crate::model::FunctionDescriptor;

static H3: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3").unwrap());

/// Walk every level-3 heading in document order and build one descriptor per
/// function section. Headings are ignored until the first one whose sanitized
/// text starts with `start_marker`; the page opens with prose headings that
/// describe no function.
pub fn walk_headings(doc: &Html, start_marker: &str) -> Vec<FunctionDescriptor> {
    let marker = start_marker.to_lowercase();
    let mut functions = Vec::new();
    let mut collecting = false;

    for heading in doc.select(&H3) {
        let title = flatten_text(&heading);
        let name = sanitize_name(&title);

        if !collecting {
            if name.to_lowercase().starts_with(&marker) {
                collecting = true;
            } else {
                continue;
            }
        }

        let Some(table) = following_table(heading) else {
            debug!("No table follows '{}', skipped", title);
            continue;
        };

        if name.is_empty() {
            debug!("Heading '{}' sanitized to nothing, skipped", title);
            continue;
        }

        let description = sibling_description(heading);
        let (parameters, returns) = rows::classify_rows(table, &name);

        functions.push(FunctionDescriptor {
            title,
            description,
            name,
            parameters,
            returns,
        });
    }

    functions
}

/// First table after the heading in document order. The search descends into
/// containers, since the page wraps wide tables in scroll divs. There is no
/// stop condition, so a heading with no table of its own adopts the next one.
fn following_table(heading: ElementRef) -> Option<ElementRef> {
    let mut node = next_in_document(*heading);
    while let Some(n) = node {
        if let Some(el) = ElementRef::wrap(n) {
            if el.value().name() == "table" {
                return Some(el);
            }
        }
        node = next_in_document(n);
    }
    None
}

/// Successor in document order: first child, else next sibling, else the
/// nearest ancestor's next sibling.
fn next_in_document<'a>(node: NodeRef<'a, Node>) -> Option<NodeRef<'a, Node>> {
    if let Some(child) = node.first_child() {
        return Some(child);
    }
    let mut cur = node;
    loop {
        if let Some(sib) = cur.next_sibling() {
            return Some(sib);
        }
        cur = cur.parent()?;
    }
}

/// Text of the first paragraph between the heading and its table. Only
/// following siblings count; a table sibling ends the scan empty-handed.
fn sibling_description(heading: ElementRef) -> Option<String> {
    let mut node = heading.next_sibling();
    while let Some(n) = node {
        if let Some(el) = ElementRef::wrap(n) {
            match el.value().name() {
                "p" => {
                    let text = flatten_text(&el);
                    return (!text.is_empty()).then_some(text);
                }
                "table" => return None,
                _ => {}
            }
        }
        node = n.next_sibling();
    }
    None
}

// ── Tests ──
