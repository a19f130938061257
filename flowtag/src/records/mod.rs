use serde::{de::Error, Deserialize, Deserializer};

pub mod flow_log_record;
pub mod lookup_record;
pub mod protocol_record;

/// Port and protocol numbers as written in the inputs. Kept wide so any whole
/// number is accepted, whether or not it is a valid port or protocol.
pub type Number = i64;

/// Deserializes a whole number, ignoring surrounding whitespace.
pub fn trimmed_number<'de, D>(deserializer: D) -> Result<Number, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.trim()
        .parse::<Number>()
        .map_err(|e| D::Error::custom(format!("invalid integer '{}': {}", raw, e)))
}

/// Deserializes a string with surrounding whitespace removed.
pub fn trimmed_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}
