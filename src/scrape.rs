use crate::api::SiteClient;
use crate::card::{CardRecord, ScrapeResult};
use crate::config::Config;
use crate::details::get_card_details;
use crate::extract::CardExtractor;
use crate::paginate::get_card_numbers;
use futures::future::join_all;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task;
use tracing::{debug, error, info};

pub struct Scraper {
    client: SiteClient,
    extractor: CardExtractor,
    page_delay: Duration,
    max_concurrent_details: usize,
}

impl Scraper {
    pub fn new(client: SiteClient, extractor: CardExtractor, config: &Config) -> Scraper {
        Scraper {
            client,
            extractor,
            page_delay: config.page_delay,
            max_concurrent_details: config.max_concurrent_details.max(1),
        }
    }

    /// Collects every card number of the expansion, then fetches the details
    /// concurrently. Cards come back in the order the search pages listed them;
    /// cards whose fetch or parse failed are left out.
    pub async fn scrape_expansion(&self, code: &str, progress: &ProgressBar) -> Vec<CardRecord> {
        info!("--- Starting scrape for expansion: {} ---", code);
        let card_numbers = get_card_numbers(&self.client, code, self.page_delay).await;
        progress.set_length(card_numbers.len() as u64);

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_details));
        let mut tasks = Vec::with_capacity(card_numbers.len());
        for card_number in &card_numbers {
            let semaphore = Arc::clone(&semaphore);
            let client = self.client.clone();
            let extractor = self.extractor.clone();
            let card_number = card_number.clone();
            let progress = progress.clone();
            tasks.push(task::spawn(async move {
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => return None,
                };
                let card = get_card_details(&client, &extractor, &card_number).await;
                progress.inc(1);
                card
            }));
        }

        let results = join_all(tasks).await;

        let mut cards = Vec::with_capacity(results.len());
        for (card_number, result) in card_numbers.iter().zip(results) {
            match result {
                Ok(Some(card)) => cards.push(card),
                Ok(None) => debug!("No record for {}", card_number),
                Err(e) => error!("Task for {} failed: {}", card_number, e),
            }
        }

        info!(
            "--- Finished scrape for expansion: {}, found {} cards. ---",
            code,
            cards.len()
        );
        cards
    }

    /// Scrapes several expansions at once. Each code maps to its own list no
    /// matter which expansion finishes first.
    pub async fn scrape_expansions(
        &self,
        codes: &[String],
        progress: &MultiProgress,
    ) -> ScrapeResult {
        let overall = progress.add(ProgressBar::new(codes.len() as u64));
        overall.set_style(bar_style("{msg:<20} [{bar:40}] {pos}/{len}"));
        overall.set_message("Scraping Expansions");
        let overall = &overall;

        let expansions = codes.iter().map(|code| {
            let bar = progress.add(ProgressBar::new(0));
            bar.set_style(bar_style("{msg:<20} [{bar:40}] {pos}/{len} cards"));
            bar.set_message(format!("Cards in {}", code));
            async move {
                let cards = self.scrape_expansion(code, &bar).await;
                bar.finish_and_clear();
                overall.inc(1);
                (code.clone(), cards)
            }
        });
        let results = join_all(expansions).await;
        overall.finish();

        results.into_iter().collect()
    }
}

fn bar_style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .map(|style| style.progress_chars("=> "))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}
