//! Card section helpers.
//!
//! Each helper takes a label and a value and returns a markup fragment, or an
//! empty string when there is nothing to show.

use super::markup::Element;
use crate::constants::SUBDOMAIN_PALETTE;
use crate::model::{LexicalRelation, RelationValue};

const LABEL_CLASS: &str = "text-lg text-[#296F9A] font-bold";
const VALUE_CLASS: &str = "text-sm font-medium text-gray-900";

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// `<li>` wrapper shared by every card section
fn section(label: &str, body_class: &str, content: Element) -> Element {
    Element::new("li").class("py-3 sm:py-4").child(
        Element::new("div").class("flex items-center space-x-4").child(
            Element::new("div")
                .class(body_class)
                .child(Element::new("p").class(LABEL_CLASS).text(label))
                .child(content),
        ),
    )
}

/// Labeled section with inline markup applied to `value`; empty when blank
pub fn display_if_exists(label: &str, value: &str) -> String {
    if is_blank(value) {
        return String::new();
    }
    let content = Element::new("p").class(VALUE_CLASS).rich(value);
    section(label, "flex-1 min-w-0", content).render()
}

/// Labeled section with `value` as plain text; empty when blank
pub fn display_field(label: &str, value: &str) -> String {
    if is_blank(value) {
        return String::new();
    }
    let content = Element::new("p").class(VALUE_CLASS).text(value);
    section(label, "flex-1 min-w-0", content).render()
}

/// Cooccurrence list, one line per item. Empty items become line breaks.
pub fn display_cooccurrence(label: &str, items: &[String]) -> String {
    if items.iter().all(|item| is_blank(item)) {
        return String::new();
    }
    let lines = items.iter().map(|item| {
        if is_blank(item) {
            Element::void("br")
        } else {
            Element::new("span").class("mb-0 text-sm").text(item)
        }
    });
    let content = Element::new("div").class("flex flex-col").children(lines);
    section(label, "flex flex-col min-w-0", content).render()
}

/// Two-column table, one row per relation. List values are joined with `<br>`.
pub fn display_lexical_relations(relations: &[LexicalRelation]) -> String {
    let rows: Vec<Element> = relations
        .iter()
        .filter(|relation| !is_blank(&relation.kind))
        .map(relation_row)
        .collect();
    if rows.is_empty() {
        return String::new();
    }
    Element::new("table")
        .class("table-auto text-sm w-full text-left whitespace-normal")
        .children(rows)
        .render()
}

fn relation_row(relation: &LexicalRelation) -> Element {
    let mut cell = Element::new("td").class("pl-0 py-2 text-sm");
    match &relation.value {
        RelationValue::List(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    cell = cell.child(Element::void("br"));
                }
                cell = cell.text(item);
            }
        }
        RelationValue::Text(text) => cell = cell.text(text),
        RelationValue::Empty => {}
    }
    Element::new("tr")
        .child(
            Element::new("th")
                .class("pl-0 py-2 font-bold")
                .text(&relation.kind),
        )
        .child(cell)
}

/// Palette class for the chip at `index`
pub fn subdomain_color(index: usize) -> &'static str {
    SUBDOMAIN_PALETTE[index % SUBDOMAIN_PALETTE.len()]
}

/// Colored chips, palette cycling by position in the list.
/// Blank names are skipped but keep their slot in the cycle.
pub fn display_subdomains(subdomains: &[String]) -> String {
    subdomains
        .iter()
        .enumerate()
        .filter(|(_, name)| !is_blank(name))
        .map(|(index, name)| {
            Element::new("span")
                .class(&format!(
                    "inline-block {} text-white py-1 px-2 mr-1 mb-2 rounded-lg text-sm",
                    subdomain_color(index)
                ))
                .text(name)
                .render()
        })
        .collect()
}
