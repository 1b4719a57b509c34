use crate::error::Result;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

const CATEGORY_TRANSLATIONS: [(&str, &str); 13] = [
    ("収録商品", "set"),
    ("カードタイプ", "card_type"),
    ("作品名", "group"),
    ("参加ユニット", "unit"),
    ("コスト", "cost"),
    ("基本ハート", "hearts"),
    ("ブレードハート", "blade_hearts"),
    ("ブレード", "blades"),
    ("レアリティ", "rarity"),
    ("カード番号", "card_number"),
    ("スコア", "score"),
    ("必要ハート", "required_hearts"),
    ("特殊ハート", "special_hearts"),
];

/// Maps the site's Japanese attribute labels to record field keys.
#[derive(Debug, Clone)]
pub struct Translations {
    categories: HashMap<String, String>,
}

impl Default for Translations {
    fn default() -> Self {
        Translations {
            categories: CATEGORY_TRANSLATIONS
                .iter()
                .map(|(label, key)| (label.to_string(), key.to_string()))
                .collect(),
        }
    }
}

impl Translations {
    /// Labels without an entry are used as the key unchanged.
    pub fn field_key<'a>(&'a self, label: &'a str) -> &'a str {
        self.categories
            .get(label)
            .map(String::as_str)
            .unwrap_or(label)
    }

    pub fn insert(&mut self, label: &str, key: &str) {
        self.categories.insert(label.to_string(), key.to_string());
    }

    /// Merges a JSON object of `label -> key` entries over the built-in table.
    pub fn with_overrides_from(mut self, path: &Path) -> Result<Translations> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let overrides: HashMap<String, String> = serde_json::from_reader(reader)?;
        info!(
            "Loaded {} category translations from {}",
            overrides.len(),
            path.display()
        );
        self.categories.extend(overrides);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
