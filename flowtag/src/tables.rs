use std::{borrow::Cow, collections::HashMap, path::Path};

use log::{debug, info};

use crate::{
    parsers::{
        csv_parser::CsvParser,
        parser::{Parser, ReadError},
    },
    records::{lookup_record::LookupRecord, protocol_record::ProtocolRecord, Number},
};

/// Protocol name used for numbers missing from the protocol table.
pub const UNKNOWN_PROTOCOL: &str = "unknown";

/// Tag used for (port, protocol) pairs missing from the lookup table.
pub const UNTAGGED: &str = "untagged";

/// Maps IANA protocol numbers to lowercase protocol names.
#[derive(Debug, Default, Clone)]
pub struct ProtocolTable {
    names: HashMap<Number, String>,
}

impl ProtocolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a `number,name` table. Any unreadable or malformed row fails the
    /// whole load.
    pub fn load(path: &Path) -> Result<Self, ReadError> {
        info!("Loading protocols from {}", path.display());

        let mut table = ProtocolTable::new();
        for record in CsvParser.parse::<ProtocolRecord>(path)? {
            let record = record?;
            debug!("Protocol {} => {}", record.number, record.name);
            table.insert(record.number, &record.name);
        }

        debug!("Loaded {} protocols", table.len());
        Ok(table)
    }

    pub fn insert(&mut self, number: Number, name: &str) {
        self.names.insert(number, name.to_lowercase());
    }

    pub fn get(&self, number: Number) -> Option<&str> {
        self.names.get(&number).map(String::as_str)
    }

    /// Returns the protocol name, or `"unknown"` for unlisted numbers.
    pub fn resolve(&self, number: Number) -> &str {
        self.get(number).unwrap_or(UNKNOWN_PROTOCOL)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Maps (destination port, protocol name) pairs to tags.
///
/// Protocol names are stored lowercase and matched case-insensitively; tags
/// are kept exactly as written in the lookup file.
#[derive(Debug, Default, Clone)]
pub struct TagLookup {
    // Keyed by port first so lookups can borrow the protocol name.
    tags: HashMap<Number, HashMap<String, String>>,
}

impl TagLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a `dstport,protocol,tag` table. Any unreadable or malformed row
    /// fails the whole load.
    pub fn load(path: &Path) -> Result<Self, ReadError> {
        info!("Creating lookup table from {}", path.display());

        let mut lookup = TagLookup::new();
        for record in CsvParser.parse::<LookupRecord>(path)? {
            let record = record?;
            debug!(
                "Lookup ({}, {}) => {}",
                record.dstport, record.protocol, record.tag
            );
            lookup.insert(record.dstport, &record.protocol, record.tag);
        }

        debug!("Loaded {} lookup entries", lookup.len());
        Ok(lookup)
    }

    pub fn insert(&mut self, port: Number, protocol: &str, tag: String) {
        self.tags
            .entry(port)
            .or_default()
            .insert(protocol.to_lowercase(), tag);
    }

    pub fn get(&self, port: Number, protocol: &str) -> Option<&str> {
        let protocol: Cow<str> = if protocol.chars().any(char::is_uppercase) {
            Cow::Owned(protocol.to_lowercase())
        } else {
            Cow::Borrowed(protocol)
        };

        self.tags
            .get(&port)
            .and_then(|by_protocol| by_protocol.get(protocol.as_ref()))
            .map(String::as_str)
    }

    /// Returns the configured tag, or `"untagged"` when the pair is not listed.
    pub fn resolve(&self, port: Number, protocol: &str) -> &str {
        self.get(port, protocol).unwrap_or(UNTAGGED)
    }

    pub fn len(&self) -> usize {
        self.tags.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
