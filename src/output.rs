use crate::card::ScrapeResult;
use crate::error::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Overwrite,
    Merge,
}

/// Layers freshly scraped expansions over the previous file contents.
///
/// Expansion codes already in the file are kept unless they were scraped
/// again. Content that is not a JSON object is discarded with a warning.
pub fn merge(existing: Option<&str>, scraped: &ScrapeResult) -> Result<Value> {
    let scraped = serde_json::to_value(scraped)?;
    let existing = match existing {
        Some(existing) => existing,
        None => return Ok(scraped),
    };

    match serde_json::from_str::<Value>(existing) {
        Ok(Value::Object(mut data)) => {
            if let Value::Object(scraped) = scraped {
                data.extend(scraped);
            }
            Ok(Value::Object(data))
        }
        Ok(_) => {
            warn!("Existing data is not a dictionary. Overwriting.");
            Ok(scraped)
        }
        Err(e) => {
            warn!("Could not parse existing JSON ({}). Overwriting.", e);
            Ok(scraped)
        }
    }
}

/// Writes the output file and returns how many cards it holds in total.
pub fn save(path: &Path, scraped: &ScrapeResult, action: FileAction) -> Result<usize> {
    let data = match action {
        FileAction::Overwrite => serde_json::to_value(scraped)?,
        FileAction::Merge => {
            let existing = read_existing(path)?;
            merge(existing.as_deref(), scraped)?
        }
    };

    let total_cards = count_cards(&data);

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut writer, formatter);
    data.serialize(&mut serializer)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(total_cards)
}

fn read_existing(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("File {} not found. Creating a new file.", path.display());
            Ok(None)
        }
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            warn!("File {} is not valid UTF-8. Overwriting.", path.display());
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

pub fn count_cards(data: &Value) -> usize {
    match data {
        Value::Object(expansions) => expansions
            .values()
            .filter_map(Value::as_array)
            .map(Vec::len)
            .sum(),
        _ => 0,
    }
}
