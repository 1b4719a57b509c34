use crate::card::{CardRecord, CARD_NUMBER};
use crate::decode::{stripped_text, DecoderRegistry};
use crate::error::ParseError;
use crate::text_block::block_lines;
use crate::translations::Translations;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

lazy_static! {
    static ref INFO_CONTAINER: Selector =
        Selector::parse(".cardlist-Info").expect("valid container selector");
    static ref IMAGE: Selector = Selector::parse(".info-Image img").expect("valid image selector");
    static ref HEADING: Selector =
        Selector::parse("p.info-Heading").expect("valid heading selector");
    static ref DETAIL: Selector = Selector::parse(".info-Detail").expect("valid detail selector");
    static ref DETAIL_ITEM: Selector = Selector::parse(".dl-Item").expect("valid item selector");
    static ref TERM: Selector = Selector::parse("dt").expect("valid dt selector");
    static ref DEFINITION: Selector = Selector::parse("dd").expect("valid dd selector");
    static ref INFO_TEXT: Selector = Selector::parse(".info-Text").expect("valid text selector");
}

/// Parses card detail pages into records.
///
/// The translation table and decoder registry are shared, so one extractor can
/// be cloned cheaply into every fetch task.
#[derive(Clone)]
pub struct CardExtractor {
    translations: Arc<Translations>,
    decoders: Arc<DecoderRegistry>,
    base_url: Url,
}

impl CardExtractor {
    pub fn new(translations: Arc<Translations>, base_url: Url) -> CardExtractor {
        CardExtractor {
            translations,
            decoders: Arc::new(DecoderRegistry::default()),
            base_url,
        }
    }

    pub fn with_decoders(mut self, decoders: DecoderRegistry) -> CardExtractor {
        self.decoders = Arc::new(decoders);
        self
    }

    pub fn parse(&self, html_content: &str, card_number: &str) -> Result<CardRecord, ParseError> {
        let document = Html::parse_document(html_content);

        let container = match document.select(&INFO_CONTAINER).next() {
            Some(container) => container,
            None => {
                warn!("Card details container not found for {}.", card_number);
                return Err(ParseError::MissingContainer {
                    card_number: card_number.to_string(),
                });
            }
        };

        let mut card = CardRecord::new(card_number);

        if let Some(img_url) = self.image_url(container) {
            card.insert("img_url", img_url);
        }

        if let Some(heading) = container.select(&HEADING).next() {
            let name: String = heading.text().collect();
            card.insert("name", name.trim());
        }

        if let Some(detail) = container.select(&DETAIL).next() {
            for item in detail.select(&DETAIL_ITEM) {
                let (term, definition) =
                    match (item.select(&TERM).next(), item.select(&DEFINITION).next()) {
                        (Some(term), Some(definition)) => (term, definition),
                        _ => continue,
                    };

                let label = stripped_text(term);
                let key = self.translations.field_key(&label);

                if key == CARD_NUMBER {
                    let listed = stripped_text(definition);
                    if listed != card_number {
                        debug!("{} is listed on its page as {}", card_number, listed);
                    }
                    continue;
                }

                match self.decoders.decode(key, definition) {
                    Some(value) => {
                        card.insert(key, value);
                    }
                    None => debug!("No value for {} on {}", key, card_number),
                }
            }
        }

        if let Some(info_text) = container.select(&INFO_TEXT).next() {
            card.insert("info_text", block_lines(info_text));
        }

        Ok(card)
    }

    fn image_url(&self, container: ElementRef<'_>) -> Option<String> {
        let src = container
            .select(&IMAGE)
            .next()
            .and_then(|img| img.value().attr("src"))?;

        match self.base_url.join(src.trim()) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                warn!("Could not resolve image url {}: {}", src, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::FieldValue;
    use crate::config::DEFAULT_BASE_URL;
    use std::collections::BTreeMap;

    const LIVE_CARD: &str = r#"
<html><body>
<div class="cardlist-Info">
  <div class="info-Image"><img src="/wordpress/wp-content/images/cardlist/PLSD01/PL!-pb1-022-SD.png" alt="僕らは今のなかで"></div>
  <div class="info-Detail">
    <p class="info-Heading">僕らは今のなかで</p>
    <dl>
      <div class="dl-Item"><dt>カード番号</dt><dd>PL!-sd1-022-SD</dd></div>
      <div class="dl-Item"><dt>収録商品</dt><dd>スタートデッキ ラブライブ！</dd></div>
      <div class="dl-Item"><dt>カードタイプ</dt><dd>ライブ</dd></div>
      <div class="dl-Item"><dt>作品名</dt><dd>ラブライブ！</dd></div>
      <div class="dl-Item"><dt>スコア</dt><dd>4</dd></div>
      <div class="dl-Item"><dt>必要ハート</dt><dd><span class="icon heart01">2</span><span class="icon heart03">2</span><span class="icon heart06">2</span><span class="icon heart0">6</span></dd></div>
      <div class="dl-Item"><dt>ブレードハート</dt><dd><span class="icon b_heart03"></span></dd></div>
      <div class="dl-Item"><dt>特殊ハート</dt><dd><img src="/images/draw.png" alt="ドローX"></dd></div>
      <div class="dl-Item"><dt>レアリティ</dt><dd>SD</dd></div>
      <div class="dl-Item"><dt>イラスト</dt><dd> 作者名 </dd></div>
    </dl>
  </div>
  <div class="info-Text"><img src="/images/live_start.png" alt="ライブ開始時">自分の成功ライブカード置き場にあるカード1枚につき、このカードを成功させるための必要ハートは<img alt="heart0"><img alt="heart0">少なくなる。</div>
</div>
</body></html>
"#;

    fn extractor() -> CardExtractor {
        CardExtractor::new(
            Arc::new(Translations::default()),
            Url::parse(DEFAULT_BASE_URL).unwrap(),
        )
    }

    #[test]
    fn test_parse_live_card() {
        let card = extractor().parse(LIVE_CARD, "PL!-sd1-022-SD").unwrap();

        assert_eq!(card.card_number(), "PL!-sd1-022-SD");
        assert_eq!(
            card.text("img_url"),
            Some("https://llofficial-cardgame.com/wordpress/wp-content/images/cardlist/PLSD01/PL!-pb1-022-SD.png")
        );
        assert_eq!(card.text("name"), Some("僕らは今のなかで"));
        assert_eq!(card.text("set"), Some("スタートデッキ ラブライブ！"));
        assert_eq!(card.text("card_type"), Some("ライブ"));
        assert_eq!(card.list("group"), Some(&["ラブライブ！".to_string()][..]));
        assert_eq!(card.text("score"), Some("4"));
        assert_eq!(card.text("rarity"), Some("SD"));
        assert_eq!(card.text("special_hearts"), Some("ドロー"));

        let required: BTreeMap<String, String> = [
            ("heart01", "2"),
            ("heart03", "2"),
            ("heart06", "2"),
            ("heart0", "6"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(card.map("required_hearts"), Some(&required));
        assert_eq!(
            card.map("blade_hearts").and_then(|m| m.get("b_heart03")),
            Some(&"1".to_string())
        );

        assert_eq!(
            card.list("info_text"),
            Some(&["ライブ開始時 自分の成功ライブカード置き場にあるカード1枚につき、このカードを成功させるための必要ハートは heart0 heart0 少なくなる。".to_string()][..])
        );
    }

    #[test]
    fn test_unknown_label_kept_as_key() {
        let card = extractor().parse(LIVE_CARD, "PL!-sd1-022-SD").unwrap();
        assert_eq!(card.text("イラスト"), Some("作者名"));
    }

    #[test]
    fn test_card_number_is_fetch_identifier() {
        let card = extractor().parse(LIVE_CARD, "PL!-sd1-022-SD-alt").unwrap();
        assert_eq!(card.card_number(), "PL!-sd1-022-SD-alt");

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["card_number"], "PL!-sd1-022-SD-alt");
    }

    #[test]
    fn test_missing_container() {
        let result = extractor().parse("<html><body><p>not found</p></body></html>", "X-1");
        assert!(matches!(
            result,
            Err(ParseError::MissingContainer { ref card_number }) if card_number == "X-1"
        ));
    }

    #[test]
    fn test_optional_fields_are_independent() {
        let card = extractor()
            .parse(
                r#"<div class="cardlist-Info"><p class="info-Heading"> 鬼塚夏美 </p></div>"#,
                "PL!SP-bp2-009-SEC",
            )
            .unwrap();
        assert_eq!(card.text("name"), Some("鬼塚夏美"));
        assert_eq!(card.fields().count(), 1);
        assert!(card.get("info_text").is_none());
    }

    #[test]
    fn test_replaced_decoders() {
        let extractor = extractor().with_decoders(crate::decode::DecoderRegistry::empty());
        let card = extractor.parse(LIVE_CARD, "PL!-sd1-022-SD").unwrap();
        assert_eq!(card.text("group"), Some("ラブライブ！"));
        assert_eq!(card.text("required_hearts"), Some("2226"));
    }

    #[test]
    fn test_injected_translations() {
        let mut translations = Translations::default();
        translations.insert("イラスト", "illustrator");
        let extractor = CardExtractor::new(
            Arc::new(translations),
            Url::parse(DEFAULT_BASE_URL).unwrap(),
        );
        let card = extractor.parse(LIVE_CARD, "PL!-sd1-022-SD").unwrap();
        assert_eq!(
            card.get("illustrator"),
            Some(&FieldValue::Text("作者名".to_string()))
        );
    }
}
