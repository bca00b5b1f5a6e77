//! Glossary data model.
//!
//! A `TermEntry` is one bilingual record as returned by the terminology API.
//! Entries are parsed once per query and never mutated.

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which half of a bilingual card is being built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    French,
    English,
}

impl Language {
    /// Two-letter code used as the field suffix in API records
    pub fn code(&self) -> &'static str {
        match self {
            Language::French => "fr",
            Language::English => "en",
        }
    }
}

/// One bilingual glossary record.
///
/// Optional text fields deserialize `null` and missing keys to an empty string,
/// sequences to an empty vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tid: Option<i64>,

    pub french_term: String,
    pub english_term: String,

    /// Single-domain records predating the per-language columns.
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain_fr: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain_en: String,

    #[serde(default, deserialize_with = "nullable_strings")]
    pub subdomains_fr: Vec<String>,
    #[serde(default, deserialize_with = "nullable_strings")]
    pub subdomains_en: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub semantic_label_fr: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub semantic_label_en: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub variant_fr: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variant_en: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub near_synonym_fr: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub near_synonym_en: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub definition_fr: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub definition_en: String,

    #[serde(default, deserialize_with = "nullable_strings")]
    pub syntactic_cooccurrence_fr: Vec<String>,
    #[serde(default, deserialize_with = "nullable_strings")]
    pub syntactic_cooccurrence_en: Vec<String>,

    #[serde(default)]
    pub lexical_relations_fr: LexicalRelations,
    #[serde(default)]
    pub lexical_relations_en: LexicalRelations,

    #[serde(default, deserialize_with = "null_as_default")]
    pub note_fr: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub note_en: String,

    // The backend model calls these `not_to_be_confused_with_*`.
    #[serde(
        default,
        alias = "not_to_be_confused_with_fr",
        deserialize_with = "null_as_default"
    )]
    pub note_to_be_confused_with_fr: String,
    #[serde(
        default,
        alias = "not_to_be_confused_with_en",
        deserialize_with = "null_as_default"
    )]
    pub note_to_be_confused_with_en: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub frequent_expression_fr: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub frequent_expression_en: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub phraseology_fr: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phraseology_en: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub context_fr: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub context_en: String,
}

/// Borrowed view of one language half of a `TermEntry`
#[derive(Debug, Clone, Copy)]
pub struct TermSide<'a> {
    pub language: Language,
    pub term: &'a str,
    pub semantic_label: &'a str,
    pub domain: &'a str,
    pub subdomains: &'a [String],
    pub variant: &'a str,
    pub near_synonym: &'a str,
    pub definition: &'a str,
    pub cooccurrence: &'a [String],
    pub lexical_relations: &'a [LexicalRelation],
    pub note: &'a str,
    pub confused_with: &'a str,
    pub frequent_expression: &'a str,
    pub phraseology: &'a str,
    pub context: &'a str,
}

impl TermEntry {
    /// Borrow the fields of one language
    pub fn side(&self, language: Language) -> TermSide<'_> {
        match language {
            Language::French => TermSide {
                language,
                term: &self.french_term,
                semantic_label: &self.semantic_label_fr,
                domain: fallback(&self.domain_fr, &self.domain),
                subdomains: &self.subdomains_fr,
                variant: &self.variant_fr,
                near_synonym: &self.near_synonym_fr,
                definition: &self.definition_fr,
                cooccurrence: &self.syntactic_cooccurrence_fr,
                lexical_relations: &self.lexical_relations_fr.0,
                note: &self.note_fr,
                confused_with: &self.note_to_be_confused_with_fr,
                frequent_expression: &self.frequent_expression_fr,
                phraseology: &self.phraseology_fr,
                context: &self.context_fr,
            },
            Language::English => TermSide {
                language,
                term: &self.english_term,
                semantic_label: &self.semantic_label_en,
                domain: fallback(&self.domain_en, &self.domain),
                subdomains: &self.subdomains_en,
                variant: &self.variant_en,
                near_synonym: &self.near_synonym_en,
                definition: &self.definition_en,
                cooccurrence: &self.syntactic_cooccurrence_en,
                lexical_relations: &self.lexical_relations_en.0,
                note: &self.note_en,
                confused_with: &self.note_to_be_confused_with_en,
                frequent_expression: &self.frequent_expression_en,
                phraseology: &self.phraseology_en,
                context: &self.context_en,
            },
        }
    }

    /// Case-insensitive substring match on either term.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.french_term.to_lowercase().contains(needle)
            || self.english_term.to_lowercase().contains(needle)
    }
}

fn fallback<'a>(value: &'a str, legacy: &'a str) -> &'a str {
    if value.trim().is_empty() {
        legacy
    } else {
        value
    }
}

/// Value side of a lexical relation.
///
/// Lenient on input: `null` is `Empty`, numbers and booleans become text,
/// `null` list items become empty strings and other non-string items their
/// JSON text. An object value is dropped to `Empty`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RelationValue {
    Text(String),
    List(Vec<String>),
    Empty,
}

fn relation_item(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    }
}

impl<'de> Deserialize<'de> for RelationValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = RelationValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a related term, a list of related terms or null")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(RelationValue::Text(value.to_string()))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
                Ok(RelationValue::Text(value))
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
                Ok(RelationValue::Text(value.to_string()))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(RelationValue::Text(value.to_string()))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(RelationValue::Text(value.to_string()))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
                Ok(RelationValue::Text(value.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(RelationValue::Empty)
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(RelationValue::Empty)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element::<serde_json::Value>()? {
                    items.push(relation_item(item));
                }
                Ok(RelationValue::List(items))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
                Ok(RelationValue::Empty)
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

/// A single-key mapping from relation type to related term(s)
#[derive(Debug, Clone, PartialEq)]
pub struct LexicalRelation {
    pub kind: String,
    pub value: RelationValue,
}

impl LexicalRelation {
    pub fn new(kind: &str, value: RelationValue) -> Self {
        Self {
            kind: kind.to_string(),
            value,
        }
    }
}

/// Ordered relations of one language.
///
/// Accepts the list-of-single-key-maps shape the search page consumes, a plain
/// object (one relation per key, document order), or `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexicalRelations(pub Vec<LexicalRelation>);

impl LexicalRelations {
    pub fn iter(&self) -> std::slice::Iter<'_, LexicalRelation> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<LexicalRelation>> for LexicalRelations {
    fn from(relations: Vec<LexicalRelation>) -> Self {
        Self(relations)
    }
}

impl Serialize for LexicalRelations {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeSeq};

        struct Single<'a>(&'a LexicalRelation);

        impl Serialize for Single<'_> {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(&self.0.kind, &self.0.value)?;
                map.end()
            }
        }

        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for relation in &self.0 {
            seq.serialize_element(&Single(relation))?;
        }
        seq.end()
    }
}

/// One element of the relation list. Only the first key of each map is kept.
struct SingleRelation(Option<LexicalRelation>);

impl<'de> Deserialize<'de> for SingleRelation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SingleVisitor;

        impl<'de> Visitor<'de> for SingleVisitor {
            type Value = SingleRelation;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a single-key relation object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let first = match map.next_key::<String>()? {
                    Some(kind) => {
                        let value = map.next_value::<RelationValue>()?;
                        Some(LexicalRelation { kind, value })
                    }
                    None => None,
                };
                while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
                Ok(SingleRelation(first))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(SingleRelation(None))
            }
        }

        deserializer.deserialize_any(SingleVisitor)
    }
}

impl<'de> Deserialize<'de> for LexicalRelations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RelationsVisitor;

        impl<'de> Visitor<'de> for RelationsVisitor {
            type Value = LexicalRelations;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a list of relation objects, a relation object or null")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut relations = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(SingleRelation(relation)) = seq.next_element()? {
                    relations.extend(relation);
                }
                Ok(LexicalRelations(relations))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut relations = Vec::new();
                while let Some((kind, value)) = map.next_entry::<String, RelationValue>()? {
                    relations.push(LexicalRelation { kind, value });
                }
                Ok(LexicalRelations(relations))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(LexicalRelations::default())
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(LexicalRelations::default())
            }
        }

        deserializer.deserialize_any(RelationsVisitor)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Null items are kept as empty strings so positions survive (cooccurrence
// lists use them as spacers).
fn nullable_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Option<String>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items.into_iter().map(Option::unwrap_or_default).collect())
}
