use crate::card::FieldValue;
use lazy_static::lazy_static;
use scraper::{ElementRef, Selector};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

lazy_static! {
    static ref SPAN: Selector = Selector::parse("span").expect("valid span selector");
    static ref IMG: Selector = Selector::parse("img").expect("valid img selector");
    static ref ALL_HEART_ICON: Selector =
        Selector::parse(r#"img[alt="ALL1"]"#).expect("valid ALL1 selector");
}

/// Key emitted for the wildcard heart icon.
pub const ALL_HEARTS_KEY: &str = "ALL1";

/// Turns one `<dd>` of the attribute list into a field value.
pub trait FieldDecoder: Send + Sync {
    fn decode(&self, definition: ElementRef<'_>) -> Option<FieldValue>;
}

/// Concatenates the trimmed text nodes, skipping blank ones.
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

pub struct TextDecoder;

impl FieldDecoder for TextDecoder {
    fn decode(&self, definition: ElementRef<'_>) -> Option<FieldValue> {
        Some(FieldValue::Text(stripped_text(definition)))
    }
}

/// Every text fragment becomes one entry; cards may belong to several groups.
pub struct GroupDecoder;

impl FieldDecoder for GroupDecoder {
    fn decode(&self, definition: ElementRef<'_>) -> Option<FieldValue> {
        let groups: Vec<String> = definition
            .text()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .collect();
        Some(FieldValue::List(groups))
    }
}

/// Heart costs: one `<span>` per colour, keyed by its first class containing
/// "heart". An empty span counts as one heart.
pub struct HeartsDecoder;

impl FieldDecoder for HeartsDecoder {
    fn decode(&self, definition: ElementRef<'_>) -> Option<FieldValue> {
        let spans: Vec<ElementRef> = definition.select(&SPAN).collect();

        if spans.is_empty() {
            if definition.select(&ALL_HEART_ICON).next().is_some() {
                let mut values = BTreeMap::new();
                values.insert(ALL_HEARTS_KEY.to_string(), "1".to_string());
                return Some(FieldValue::Map(values));
            }
            return None;
        }

        let mut values = BTreeMap::new();
        for span in spans {
            let class_name = span
                .value()
                .attr("class")
                .unwrap_or("")
                .split_whitespace()
                .find(|class| class.contains("heart"));

            if let Some(class_name) = class_name {
                let mut count = stripped_text(span);
                if count.is_empty() {
                    count = "1".to_string();
                }
                values.insert(class_name.to_string(), count);
            }
        }
        Some(FieldValue::Map(values))
    }
}

/// Uses the text when present, otherwise the icon label minus its trailing
/// type character.
pub struct SpecialHeartsDecoder;

impl FieldDecoder for SpecialHeartsDecoder {
    fn decode(&self, definition: ElementRef<'_>) -> Option<FieldValue> {
        let text: String = definition.text().collect();
        let text = text.trim();
        if !text.is_empty() {
            return Some(FieldValue::Text(text.to_string()));
        }

        let alt = match definition
            .select(&IMG)
            .next()
            .and_then(|img| img.value().attr("alt"))
        {
            Some(alt) => alt,
            None => {
                debug!("special hearts has neither text nor icon label");
                return None;
            }
        };

        let mut label = alt.chars();
        label.next_back();
        let label = label.as_str();
        if label.is_empty() {
            None
        } else {
            Some(FieldValue::Text(label.to_string()))
        }
    }
}

/// Field key to decoder, with plain text as the fallback for unregistered keys.
pub struct DecoderRegistry {
    decoders: HashMap<String, Box<dyn FieldDecoder>>,
    fallback: Box<dyn FieldDecoder>,
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        let mut registry = DecoderRegistry::empty();
        registry.register("required_hearts", HeartsDecoder);
        registry.register("hearts", HeartsDecoder);
        registry.register("blade_hearts", HeartsDecoder);
        registry.register("special_hearts", SpecialHeartsDecoder);
        registry.register("group", GroupDecoder);
        registry
    }
}

impl DecoderRegistry {
    pub fn empty() -> DecoderRegistry {
        DecoderRegistry {
            decoders: HashMap::new(),
            fallback: Box::new(TextDecoder),
        }
    }

    pub fn register(&mut self, key: &str, decoder: impl FieldDecoder + 'static) {
        self.decoders.insert(key.to_string(), Box::new(decoder));
    }

    pub fn decoder_for(&self, key: &str) -> &dyn FieldDecoder {
        self.decoders
            .get(key)
            .map(|decoder| decoder.as_ref())
            .unwrap_or_else(|| self.fallback.as_ref())
    }

    pub fn decode(&self, key: &str, definition: ElementRef<'_>) -> Option<FieldValue> {
        self.decoder_for(key).decode(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn decode_dd(key: &str, dd: &str) -> Option<FieldValue> {
        let html = Html::parse_fragment(&format!("<dl><dt>x</dt>{}</dl>", dd));
        let selector = Selector::parse("dd").unwrap();
        let definition = html.select(&selector).next().unwrap();
        DecoderRegistry::default().decode(key, definition)
    }

    fn map(pairs: &[(&str, &str)]) -> FieldValue {
        FieldValue::Map(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_hearts_with_counts() {
        let value = decode_dd(
            "required_hearts",
            r#"<dd><span class="icon heart01">2</span><span class="icon heart03">2</span><span class="icon heart06">2</span><span class="icon heart0">6</span></dd>"#,
        );
        assert_eq!(
            value,
            Some(map(&[
                ("heart01", "2"),
                ("heart03", "2"),
                ("heart06", "2"),
                ("heart0", "6"),
            ]))
        );
    }

    #[test]
    fn test_empty_heart_span_counts_as_one() {
        let value = decode_dd("blade_hearts", r#"<dd><span class="b_heart03"></span></dd>"#);
        assert_eq!(value, Some(map(&[("b_heart03", "1")])));
    }

    #[test]
    fn test_heart_key_is_first_matching_class() {
        let value = decode_dd(
            "hearts",
            r#"<dd><span class="icon heart02 heart-big">1</span><span class="label">x</span></dd>"#,
        );
        assert_eq!(value, Some(map(&[("heart02", "1")])));
    }

    #[test]
    fn test_all_hearts_icon() {
        let value = decode_dd("blade_hearts", r#"<dd><img src="all.png" alt="ALL1"></dd>"#);
        assert_eq!(value, Some(map(&[("ALL1", "1")])));
    }

    #[test]
    fn test_hearts_absent() {
        assert_eq!(decode_dd("hearts", "<dd></dd>"), None);
    }

    #[test]
    fn test_special_hearts_text() {
        let value = decode_dd("special_hearts", "<dd> ドロー </dd>");
        assert_eq!(value, Some(FieldValue::Text("ドロー".to_string())));
    }

    #[test]
    fn test_special_hearts_icon_fallback_strips_last_char() {
        let value = decode_dd("special_hearts", r#"<dd><img src="d.png" alt="ドローX"></dd>"#);
        assert_eq!(value, Some(FieldValue::Text("ドロー".to_string())));
    }

    #[test]
    fn test_special_hearts_single_char_label_is_dropped() {
        assert_eq!(decode_dd("special_hearts", r#"<dd><img alt="X"></dd>"#), None);
    }

    #[test]
    fn test_special_hearts_without_icon() {
        assert_eq!(decode_dd("special_hearts", "<dd>  </dd>"), None);
    }

    #[test]
    fn test_group_keeps_every_fragment() {
        let value = decode_dd(
            "group",
            "<dd>ラブライブ！サンシャイン!!<br>\n ラブライブ！スーパースター!!<br>蓮ノ空女学院スクールアイドルクラブ</dd>",
        );
        assert_eq!(
            value,
            Some(FieldValue::List(vec![
                "ラブライブ！サンシャイン!!".to_string(),
                "ラブライブ！スーパースター!!".to_string(),
                "蓮ノ空女学院スクールアイドルクラブ".to_string(),
            ]))
        );
    }

    #[test]
    fn test_unregistered_key_uses_text() {
        let value = decode_dd("rarity", "<dd>\n  <span>R</span>+ </dd>");
        assert_eq!(value, Some(FieldValue::Text("R+".to_string())));
    }

    #[test]
    fn test_custom_decoder() {
        struct Upper;
        impl FieldDecoder for Upper {
            fn decode(&self, definition: ElementRef<'_>) -> Option<FieldValue> {
                Some(FieldValue::Text(stripped_text(definition).to_uppercase()))
            }
        }

        let html = Html::parse_fragment("<dl><dd>kaleidoscore</dd></dl>");
        let selector = Selector::parse("dd").unwrap();
        let definition = html.select(&selector).next().unwrap();

        let mut registry = DecoderRegistry::default();
        registry.register("unit", Upper);
        assert_eq!(
            registry.decode("unit", definition),
            Some(FieldValue::Text("KALEIDOSCORE".to_string()))
        );
    }
}
