use serde::Deserialize;

use super::{trimmed_number, trimmed_string, Number};

/// One row of the tag lookup table (`dstport,protocol,tag`).
///
/// The tag is kept byte for byte, only the key fields are trimmed.
#[derive(Debug, Deserialize)]
pub struct LookupRecord {
    #[serde(deserialize_with = "trimmed_number")]
    pub dstport: Number,
    #[serde(deserialize_with = "trimmed_string")]
    pub protocol: String,
    pub tag: String,
}
