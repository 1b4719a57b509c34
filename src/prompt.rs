use inquire::list_option::ListOption;
use inquire::validator::Validation;
use inquire::{required, Confirm, InquireError, MultiSelect, Select, Text};
use llcard_scraper::config::DEFAULT_OUTPUT_FILE;
use llcard_scraper::error::Result;
use llcard_scraper::expansion::ExpansionRef;
use llcard_scraper::output::FileAction;
use std::path::PathBuf;

const OVERWRITE: &str = "Overwrite the file";
const MERGE: &str = "Merge new data with existing data";
const QUIT: &str = "Quit";

/// Escape and Ctrl+C both count as the user backing out.
fn skippable<T>(answer: std::result::Result<Option<T>, InquireError>) -> Result<Option<T>> {
    match answer {
        Ok(answer) => Ok(answer),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn select_expansions(expansions: &[ExpansionRef]) -> Result<Option<Vec<String>>> {
    let answer = MultiSelect::new("Select expansions to scrape", expansions.to_vec())
        .with_help_message(
            "Use arrow keys to navigate, <space> to select, and <enter> to confirm.",
        )
        .with_validator(|selected: &[ListOption<&ExpansionRef>]| {
            if selected.is_empty() {
                Ok(Validation::Invalid(
                    "You must select at least one expansion.".into(),
                ))
            } else {
                Ok(Validation::Valid)
            }
        })
        .prompt_skippable();

    Ok(skippable(answer)?
        .map(|selected| selected.into_iter().map(|expansion| expansion.code).collect()))
}

pub fn ask_filename() -> Result<Option<PathBuf>> {
    let answer = Text::new("Enter output filename")
        .with_default(DEFAULT_OUTPUT_FILE)
        .with_validator(required!("Filename cannot be empty."))
        .prompt_skippable();

    Ok(skippable(answer)?.map(|filename| PathBuf::from(filename.trim())))
}

/// `None` means the user chose to quit.
pub fn ask_file_action() -> Result<Option<FileAction>> {
    let answer = Select::new(
        "The file already exists. What would you like to do?",
        vec![OVERWRITE, MERGE, QUIT],
    )
    .prompt_skippable();

    Ok(match skippable(answer)? {
        Some(OVERWRITE) => Some(FileAction::Overwrite),
        Some(MERGE) => Some(FileAction::Merge),
        _ => None,
    })
}

pub fn confirm() -> Result<bool> {
    let answer = Confirm::new("Do you want to continue with scraping?")
        .with_default(true)
        .with_help_message("Press <enter> to confirm.")
        .prompt_skippable();

    Ok(skippable(answer)?.unwrap_or(false))
}
