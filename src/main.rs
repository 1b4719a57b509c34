mod cli;
mod prompt;

use clap::Parser;
use cli::Cli;
use indicatif::MultiProgress;
use llcard_scraper::api::SiteClient;
use llcard_scraper::expansions::get_expansions;
use llcard_scraper::extract::CardExtractor;
use llcard_scraper::logging;
use llcard_scraper::output::{self, FileAction};
use llcard_scraper::scrape::Scraper;
use llcard_scraper::translations::Translations;
use std::error::Error;
use std::sync::Arc;
use tracing::{error, info, warn};

fn cancelled() -> Result<(), Box<dyn Error>> {
    info!("Operation cancelled by user. Exiting.");
    println!("Cancelled.");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    logging::setup_logger(&cli.log_level, cli.log_destination())?;

    let config = cli.to_config()?;
    let translations = match &config.translations {
        Some(path) => Translations::default().with_overrides_from(path)?,
        None => Translations::default(),
    };

    let client = SiteClient::new(&config)?;
    let extractor = CardExtractor::new(Arc::new(translations), config.endpoints.base.clone());
    let scraper = Scraper::new(client.clone(), extractor, &config);

    let selected_codes = if !cli.expansions.is_empty() {
        cli.expansions.clone()
    } else {
        println!("Hi, {}! Fetching the expansion list...", whoami::username());
        let expansions = get_expansions(&client).await;
        if expansions.is_empty() {
            warn!("No expansion codes found. Exiting.");
            match cli.log_destination() {
                Some(path) => println!("No expansions found, see {}.", path.display()),
                None => println!("No expansions found."),
            }
            return Ok(());
        }
        match prompt::select_expansions(&expansions)? {
            Some(codes) => codes,
            None => return cancelled(),
        }
    };

    let output_file = match &cli.output {
        Some(path) => path.clone(),
        None => match prompt::ask_filename()? {
            Some(path) => path,
            None => return cancelled(),
        },
    };

    let file_action = if output_file.exists() {
        match cli.file_action() {
            Some(action) => action,
            None => match prompt::ask_file_action()? {
                Some(action) => action,
                None => return cancelled(),
            },
        }
    } else {
        FileAction::Overwrite
    };

    if !cli.yes && !prompt::confirm()? {
        return cancelled();
    }

    println!();
    let progress = MultiProgress::new();
    let scraped = scraper.scrape_expansions(&selected_codes, &progress).await;

    match output::save(&output_file, &scraped, file_action) {
        Ok(total_cards) => {
            info!(
                "Scraping complete. Data for {} cards saved to {}",
                total_cards,
                output_file.display()
            );
            println!(
                "Data for {} cards saved to {}",
                total_cards,
                output_file.display()
            );
            Ok(())
        }
        Err(e) => {
            error!("Failed to write to file {}: {}", output_file.display(), e);
            Err(e.into())
        }
    }
}
