//! Bilingual term cards.

use super::fields::{
    display_cooccurrence, display_field, display_if_exists, display_lexical_relations,
    display_subdomains,
};
use super::labels::Labels;
use super::markup::Element;
use crate::constants::{INLINE_FETCH_ERROR, NO_RESULTS};
use crate::model::{Language, TermEntry};

/// Cards are emitted English first, then French
pub const CARD_ORDER: [Language; 2] = [Language::English, Language::French];

const HEADING_ACCENT: &str = "text-[#296F9A] font-bold";

/// One half of an entry
pub fn render_card(entry: &TermEntry, language: Language) -> Element {
    let side = entry.side(language);
    let labels = Labels::for_language(language);

    let mut header = Element::new("div")
        .class("flex flex-col items-start gap-1 mb-4")
        .child(
            Element::new("h3")
                .class("text-xl max-sm:text-lg font-bold leading-none text-gray-500")
                .child(
                    Element::new("span")
                        .class("text-[#A32A34] font-bold")
                        .rich(side.term),
                ),
        );

    if !side.semantic_label.trim().is_empty() {
        header = header.child(
            Element::new("h4")
                .class("text-gray-700")
                .child(
                    Element::new("span")
                        .class(HEADING_ACCENT)
                        .text(labels.semantic_label),
                )
                .text(&format!(": {}", side.semantic_label)),
        );
    }

    if !side.domain.trim().is_empty() {
        header = header.child(
            Element::new("h4")
                .class("text-gray-700")
                .text(labels.domain)
                .text(" ")
                .child(Element::new("span").class(HEADING_ACCENT).text(side.domain)),
        );
    }

    let chips = display_subdomains(side.subdomains);
    if !chips.is_empty() {
        header = header.child(
            Element::new("h4")
                .class("text-gray-700")
                .text(labels.subdomain)
                .text(" ")
                .trusted(chips),
        );
    }

    let relations = display_lexical_relations(side.lexical_relations);
    let relations_section = if relations.is_empty() {
        String::new()
    } else {
        Element::new("li")
            .class("py-3 sm:py-4")
            .child(
                Element::new("div").class("flex items-center space-x-4").child(
                    Element::new("div")
                        .class("flex-1 min-w-0")
                        .child(
                            Element::new("p")
                                .class("text-lg text-[#296F9A] font-bold")
                                .text(labels.lexical_relations),
                        )
                        .trusted(relations),
                ),
            )
            .render()
    };

    let sections = [
        display_if_exists(labels.variant, side.variant),
        display_if_exists(labels.synonym, side.near_synonym),
        display_if_exists(labels.definition, side.definition),
        display_cooccurrence(labels.cooccurrence, side.cooccurrence),
        relations_section,
        display_if_exists(labels.note, side.note),
        display_field(labels.confused_with, side.confused_with),
        display_field(labels.frequent_expression, side.frequent_expression),
        display_if_exists(labels.phraseology, side.phraseology),
        display_if_exists(labels.context, side.context),
    ];

    let mut list = Element::new("ul")
        .attr("role", "list")
        .class("divide-y divide-gray-200");
    for fragment in sections {
        list = list.trusted(fragment);
    }

    Element::new("div")
        .class("bg-white shadow-lg rounded-lg mb-4 p-4 sm:p-6 h-full max-w-full")
        .attr("lang", language.code())
        .child(header)
        .child(Element::new("div").class("flow-root").child(list))
}

/// Results container content for a filtered entry list.
///
/// Pure: the same entries always give the same markup.
pub fn render_results(entries: &[TermEntry]) -> String {
    if entries.is_empty() {
        return render_message(NO_RESULTS);
    }

    let mut out = String::new();
    for entry in entries {
        for language in CARD_ORDER {
            render_card(entry, language).write_to(&mut out);
        }
    }
    out
}

/// Inline error shown in the results container after a failed fetch
pub fn render_fetch_error() -> String {
    render_message(INLINE_FETCH_ERROR)
}

pub fn render_message(message: &str) -> String {
    Element::new("p").text(message).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LexicalRelation, RelationValue};

    fn sample() -> TermEntry {
        TermEntry {
            tid: Some(7),
            french_term: "preuve de *travail*".to_string(),
            english_term: "proof of work".to_string(),
            domain_fr: "Chaîne de blocs".to_string(),
            domain_en: "Blockchain".to_string(),
            subdomains_fr: vec!["Consensus".to_string(), "Minage".to_string()],
            subdomains_en: vec!["Consensus".to_string()],
            semantic_label_fr: "mécanisme".to_string(),
            semantic_label_en: "mechanism".to_string(),
            definition_en: "A consensus mechanism".to_string(),
            definition_fr: "Mécanisme de consensus".to_string(),
            note_fr: String::new(),
            note_en: "Energy-hungry".to_string(),
            context_en: "Bitcoin uses *PoW*.".to_string(),
            lexical_relations_en: vec![
                LexicalRelation::new(
                    "hyperonym",
                    RelationValue::List(vec!["a".to_string(), "b".to_string()]),
                ),
                LexicalRelation::new("synonym", RelationValue::Text("c".to_string())),
            ]
            .into(),
            ..TermEntry::default()
        }
    }

    fn card_html(entry: &TermEntry, language: Language) -> String {
        render_card(entry, language).render()
    }

    #[test]
    fn test_empty_results_message_only() {
        assert_eq!(render_results(&[]), "<p>Aucun résultat trouvé.</p>");
    }

    #[test]
    fn test_fetch_error_message() {
        assert_eq!(
            render_fetch_error(),
            "<p>Erreur dans l&#39;obtention des résultats. Veuillez réessayer.</p>"
        );
    }

    #[test]
    fn test_empty_note_has_no_section() {
        let entry = sample();
        let fr = card_html(&entry, Language::French);
        assert!(!fr.contains(">Note</p>"));

        let en = card_html(&entry, Language::English);
        assert!(en.contains(">Note</p>"));
        assert!(en.contains("Energy-hungry"));
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let entry = sample();
        let fr = card_html(&entry, Language::French);
        for label in [
            "Variante",
            "Synonyme",
            "Cooccurrence Syntaxique",
            "Relations lexicales",
            "À ne pas confondre avec",
            "Expression fréquente",
            "Phraséologie",
            "Contexte",
        ] {
            assert!(!fr.contains(label), "unexpected section {}", label);
        }
        assert!(fr.contains(">Définition</p>"));
    }

    #[test]
    fn test_lexical_relations_table() {
        let en = card_html(&sample(), Language::English);
        assert!(en.contains(">Lexical Relations</p><table"));
        assert_eq!(en.matches("<tr>").count(), 2);
        assert!(en.contains(">hyperonym</th><td class=\"pl-0 py-2 text-sm\">a<br>b</td>"));
        assert!(en.contains(">synonym</th><td class=\"pl-0 py-2 text-sm\">c</td>"));
    }

    #[test]
    fn test_header_labels_per_language() {
        let entry = sample();
        let fr = card_html(&entry, Language::French);
        assert!(fr.contains(">ES</span>: mécanisme"));
        assert!(fr.contains("Domaine : <span"));
        assert!(fr.contains("Sous-domaine : <span"));
        assert!(fr.contains("lang=\"fr\""));

        let en = card_html(&entry, Language::English);
        assert!(en.contains(">SL</span>: mechanism"));
        assert!(en.contains("Domain: <span"));
        assert!(en.contains("lang=\"en\""));
    }

    #[test]
    fn test_inline_markup_on_term_and_context() {
        let entry = sample();
        let fr = card_html(&entry, Language::French);
        assert!(fr.contains("preuve de <em>travail</em>"));

        let en = card_html(&entry, Language::English);
        assert!(en.contains("Bitcoin uses <em>PoW</em>."));
    }

    #[test]
    fn test_untrusted_text_is_escaped() {
        let mut entry = sample();
        entry.english_term = "<script>alert(1)</script>".to_string();
        entry.subdomains_en = vec!["\"><img>".to_string()];
        let en = card_html(&entry, Language::English);
        assert!(!en.contains("<script>"));
        assert!(!en.contains("<img>"));
        assert!(en.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_results_pair_cards_english_first() {
        let html = render_results(&[sample(), sample()]);
        assert_eq!(html.matches("lang=\"en\"").count(), 2);
        assert_eq!(html.matches("lang=\"fr\"").count(), 2);
        let en = html.find("lang=\"en\"").unwrap();
        let fr = html.find("lang=\"fr\"").unwrap();
        assert!(en < fr);
    }

    #[test]
    fn test_render_is_deterministic() {
        let entries = vec![sample()];
        assert_eq!(render_results(&entries), render_results(&entries));
    }
}
