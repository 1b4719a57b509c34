use crate::api::{SearchPage, SiteClient};
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info};

lazy_static! {
    static ref RESULT_ITEM: Selector = Selector::parse(".ex-item.cardlist-Result_Item.image-Item")
        .expect("valid result item selector");
}

/// Where the search walk goes after a page has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageState {
    Fetching(u32),
    Done,
}

pub fn parse_card_numbers(html_content: &str) -> Vec<String> {
    let document = Html::parse_document(html_content);
    document
        .select(&RESULT_ITEM)
        .filter_map(|item| item.value().attr("card"))
        .map(str::trim)
        .filter(|card_number| !card_number.is_empty())
        .map(str::to_string)
        .collect()
}

/// Walks the search results for one expansion, page by page, until the site
/// answers 404, returns a page without cards, or a request fails.
///
/// Pages are fetched strictly one after another with `page_delay` between them.
pub async fn get_card_numbers(
    client: &SiteClient,
    expansion: &str,
    page_delay: Duration,
) -> Vec<String> {
    let mut all_card_numbers = Vec::new();
    let mut state = PageState::Fetching(1);

    while let PageState::Fetching(page) = state {
        info!("Fetching page {} for expansion {}...", page, expansion);
        state = match client.get_search_page(expansion, page).await {
            Ok(SearchPage::NotFound) => {
                info!(
                    "Page {} not found. Reached end of expansion {}.",
                    page, expansion
                );
                PageState::Done
            }
            Ok(SearchPage::Found(html_content)) => {
                let card_numbers = parse_card_numbers(&html_content);
                if card_numbers.is_empty() {
                    info!(
                        "No cards found on page {}. Assuming end of expansion {}.",
                        page, expansion
                    );
                    PageState::Done
                } else {
                    all_card_numbers.extend(card_numbers);
                    PageState::Fetching(page + 1)
                }
            }
            Err(e) => {
                error!(
                    "Failed to fetch page {} for expansion {}: {}",
                    page, expansion, e
                );
                PageState::Done
            }
        };

        if state != PageState::Done && !page_delay.is_zero() {
            sleep(page_delay).await;
        }
    }

    all_card_numbers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_card_numbers() {
        let html = r#"
<ul class="cardlist-Result">
  <li class="ex-item cardlist-Result_Item image-Item" card="LL-bp1-001-R＋"><img src="a.png"></li>
  <li class="image-Item ex-item cardlist-Result_Item" card=" PL!-sd1-001-SD "></li>
  <li class="ex-item cardlist-Result_Item image-Item" card="  "></li>
  <li class="ex-item cardlist-Result_Item image-Item"></li>
  <li class="ex-item cardlist-Result_Item" card="LIST-VIEW-ONLY"></li>
</ul>
"#;
        assert_eq!(
            parse_card_numbers(html),
            vec!["LL-bp1-001-R＋".to_string(), "PL!-sd1-001-SD".to_string()]
        );
    }

    #[test]
    fn test_parse_card_numbers_empty_page() {
        assert!(parse_card_numbers("<html><body><p>0件</p></body></html>").is_empty());
    }
}
