use serde::{Deserialize, Serialize};
use std::fmt;

pub const UNKNOWN_EXPANSION: &str = "Unknown Expansion";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ExpansionRef {
    pub code: String,
    pub name: String,
}

impl fmt::Display for ExpansionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.name)
    }
}
