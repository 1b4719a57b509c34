pub mod api;
pub mod card;
pub mod config;
pub mod decode;
pub mod details;
pub mod error;
pub mod expansion;
pub mod expansions;
pub mod extract;
pub mod headers;
pub mod logging;
pub mod output;
pub mod paginate;
pub mod rate_limit;
pub mod scrape;
pub mod text_block;
pub mod translations;

pub use card::{CardRecord, FieldValue, ScrapeResult};
pub use error::{ParseError, ScrapeError};
pub use expansion::ExpansionRef;
