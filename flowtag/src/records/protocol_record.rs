use serde::Deserialize;

use super::{trimmed_number, trimmed_string, Number};

/// One row of the protocol table (`number,name`).
#[derive(Debug, Deserialize)]
pub struct ProtocolRecord {
    #[serde(deserialize_with = "trimmed_number")]
    pub number: Number,
    #[serde(deserialize_with = "trimmed_string")]
    pub name: String,
}
