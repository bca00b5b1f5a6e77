//! Section labels for each half of a card.

use crate::model::Language;

#[derive(Debug)]
pub struct Labels {
    /// Abbreviation shown before the semantic label
    pub semantic_label: &'static str,
    pub domain: &'static str,
    pub subdomain: &'static str,
    pub variant: &'static str,
    pub synonym: &'static str,
    pub definition: &'static str,
    pub cooccurrence: &'static str,
    pub lexical_relations: &'static str,
    pub note: &'static str,
    pub confused_with: &'static str,
    pub frequent_expression: &'static str,
    pub phraseology: &'static str,
    pub context: &'static str,
}

const ENGLISH: Labels = Labels {
    semantic_label: "SL",
    domain: "Domain:",
    subdomain: "Subdomain:",
    variant: "Variant",
    synonym: "Synonym",
    definition: "Definition",
    cooccurrence: "Syntactic Cooccurrence",
    lexical_relations: "Lexical Relations",
    note: "Note",
    confused_with: "Not to be confused with",
    frequent_expression: "Frequent expression",
    phraseology: "Phraseology",
    context: "Context",
};

const FRENCH: Labels = Labels {
    semantic_label: "ES",
    domain: "Domaine :",
    subdomain: "Sous-domaine :",
    variant: "Variante",
    synonym: "Synonyme",
    definition: "Définition",
    cooccurrence: "Cooccurrence Syntaxique",
    lexical_relations: "Relations lexicales",
    note: "Note",
    confused_with: "À ne pas confondre avec",
    frequent_expression: "Expression fréquente",
    phraseology: "Phraséologie",
    context: "Contexte",
};

impl Labels {
    pub fn for_language(language: Language) -> &'static Labels {
        match language {
            Language::French => &FRENCH,
            Language::English => &ENGLISH,
        }
    }
}
