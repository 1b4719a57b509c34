use crate::api::SiteClient;
use crate::expansion::{ExpansionRef, UNKNOWN_EXPANSION};
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::{error, info};

lazy_static! {
    static ref PRODUCT_LINK: Selector =
        Selector::parse("a.productsList-Item").expect("valid product link selector");
    static ref PRODUCT_TITLE: Selector =
        Selector::parse("p.item-Title").expect("valid product title selector");
    static ref EXPANSION_PARAM: Regex =
        Regex::new(r"expansion=([\w-]+)").expect("valid expansion pattern");
}

/// Reads every product link on the card list page, keeping the first entry
/// for each expansion code.
pub fn parse_expansions(html_content: &str) -> Vec<ExpansionRef> {
    let document = Html::parse_document(html_content);
    let mut expansions = Vec::new();
    let mut seen_codes = HashSet::new();

    for item in document.select(&PRODUCT_LINK) {
        let href = item.value().attr("href").unwrap_or("");
        let code = match EXPANSION_PARAM.captures(href).and_then(|caps| caps.get(1)) {
            Some(code) => code.as_str().to_string(),
            None => continue,
        };
        if seen_codes.contains(&code) {
            continue;
        }

        let name = item
            .select(&PRODUCT_TITLE)
            .next()
            .map(|title| title.text().map(str::trim).collect::<String>())
            .unwrap_or_else(|| UNKNOWN_EXPANSION.to_string());

        seen_codes.insert(code.clone());
        expansions.push(ExpansionRef { code, name });
    }

    expansions
}

pub async fn get_expansions(client: &SiteClient) -> Vec<ExpansionRef> {
    info!("Fetching expansion codes...");
    let html_content = match client.get_cardlist_page().await {
        Ok(html_content) => html_content,
        Err(e) => {
            error!("Could not fetch expansion codes page. Error: {}", e);
            return Vec::new();
        }
    };

    let expansions = parse_expansions(&html_content);
    info!("Found {} expansions.", expansions.len());
    expansions
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARDLIST_PAGE: &str = r#"
<html><body>
<div class="productsList">
  <a class="productsList-Item" href="/cardlist/searchresults/?expansion=BP02&view=image">
    <p class="item-Title">ブースターパック NEXT STEP</p>
  </a>
  <a class="productsList-Item" href="/cardlist/searchresults/?expansion=PLSD01">
    <p class="item-Title"> スタートデッキ ラブライブ！ </p>
  </a>
  <a class="productsList-Item" href="/cardlist/searchresults/?expansion=BP02">
    <p class="item-Title">duplicate entry</p>
  </a>
  <a class="productsList-Item" href="/news/">
    <p class="item-Title">not an expansion</p>
  </a>
  <a class="productsList-Item" href="/cardlist/searchresults/?expansion=PR">
    <span>no title</span>
  </a>
  <a class="otherLink" href="/cardlist/searchresults/?expansion=NSD01">ignored</a>
</div>
</body></html>
"#;

    #[test]
    fn test_parse_expansions() {
        let expansions = parse_expansions(CARDLIST_PAGE);
        assert_eq!(
            expansions,
            vec![
                ExpansionRef {
                    code: "BP02".to_string(),
                    name: "ブースターパック NEXT STEP".to_string(),
                },
                ExpansionRef {
                    code: "PLSD01".to_string(),
                    name: "スタートデッキ ラブライブ！".to_string(),
                },
                ExpansionRef {
                    code: "PR".to_string(),
                    name: UNKNOWN_EXPANSION.to_string(),
                },
            ]
        );
        assert_eq!(expansions[0].to_string(), "BP02: ブースターパック NEXT STEP");
    }

    #[test]
    fn test_parse_expansions_is_repeatable() {
        assert_eq!(parse_expansions(CARDLIST_PAGE), parse_expansions(CARDLIST_PAGE));
    }

    #[test]
    fn test_parse_expansions_empty_page() {
        assert!(parse_expansions("<html><body></body></html>").is_empty());
    }
}
