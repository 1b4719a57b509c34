use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field key that is always present and never overwritten by parsed data.
pub const CARD_NUMBER: &str = "card_number";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Map(BTreeMap<String, String>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            FieldValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

impl From<BTreeMap<String, String>> for FieldValue {
    fn from(map: BTreeMap<String, String>) -> Self {
        FieldValue::Map(map)
    }
}

/// One card's attributes, serialized as a flat JSON object.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CardRecord {
    card_number: String,
    #[serde(flatten)]
    fields: BTreeMap<String, FieldValue>,
}

impl CardRecord {
    pub fn new(card_number: &str) -> CardRecord {
        CardRecord {
            card_number: card_number.to_string(),
            fields: BTreeMap::new(),
        }
    }

    pub fn card_number(&self) -> &str {
        &self.card_number
    }

    /// Returns false when the key is `card_number`, which keeps the identifier
    /// the record was fetched with.
    pub fn insert(&mut self, key: &str, value: impl Into<FieldValue>) -> bool {
        if key == CARD_NUMBER {
            return false;
        }
        self.fields.insert(key.to_string(), value.into());
        true
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    pub fn list(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(FieldValue::as_list)
    }

    pub fn map(&self, key: &str) -> Option<&BTreeMap<String, String>> {
        self.get(key).and_then(FieldValue::as_map)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }
}

/// Expansion code to the cards scraped for it.
pub type ScrapeResult = BTreeMap<String, Vec<CardRecord>>;
