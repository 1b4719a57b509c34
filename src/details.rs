use crate::api::SiteClient;
use crate::card::CardRecord;
use crate::extract::CardExtractor;
use tracing::{error, info, warn};

/// Fetches one card's detail fragment and parses it. Any failure along the
/// way is logged and yields `None`.
pub async fn get_card_details(
    client: &SiteClient,
    extractor: &CardExtractor,
    card_number: &str,
) -> Option<CardRecord> {
    info!("Fetching details for {}...", card_number);
    let html_content = match client.post_card_details(card_number).await {
        Ok(Some(html_content)) => html_content,
        Ok(None) => {
            warn!("Empty response for {}.", card_number);
            return None;
        }
        Err(e) => {
            error!("Failed to fetch details for {}: {}", card_number, e);
            return None;
        }
    };

    extractor.parse(&html_content, card_number).ok()
}
