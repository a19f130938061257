use serde::{Deserialize, Serialize};

use super::Number;
use crate::parsers::parser::RecordError;

/// Field positions of the default (version 2) flow log layout:
/// version, account-id, interface-id, srcaddr, dstaddr, srcport, dstport,
/// protocol, packets, bytes, start, end, action, log-status.
pub const DST_PORT_FIELD: usize = 6;
pub const PROTOCOL_FIELD: usize = 7;
pub const MIN_FIELDS: usize = 14;

/// Describes where the fields of interest sit in a whitespace separated
/// flow log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowLogLayout {
    /// Index of the destination port field.
    pub dst_port: usize,
    /// Index of the protocol number field.
    pub protocol: usize,
    /// Lines with fewer fields than this are skipped.
    pub min_fields: usize,
}

impl FlowLogLayout {
    /// The number of fields a line needs before it is looked at.
    ///
    /// Never smaller than what is needed to reach both indexed fields, so a
    /// custom layout with a short `min_fields` can't index out of bounds.
    pub fn required_fields(&self) -> usize {
        self.min_fields
            .max(self.dst_port + 1)
            .max(self.protocol + 1)
    }
}

impl Default for FlowLogLayout {
    fn default() -> Self {
        FlowLogLayout {
            dst_port: DST_PORT_FIELD,
            protocol: PROTOCOL_FIELD,
            min_fields: MIN_FIELDS,
        }
    }
}

/// The parts of a flow log line used for tagging.
///
/// Any whole number is accepted for both fields. Values that are not valid
/// ports or protocol numbers simply won't match the reference tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowLogRecord {
    pub dst_port: Number,
    pub protocol: Number,
}

impl FlowLogRecord {
    pub fn parse(line: &str, layout: &FlowLogLayout) -> Result<Self, RecordError> {
        let fields: Vec<&str> = line.split_whitespace().collect();

        let expected = layout.required_fields();
        if fields.len() < expected {
            return Err(RecordError::TooFewFields {
                found: fields.len(),
                expected,
            });
        }

        let dst_port = fields[layout.dst_port];
        let dst_port = dst_port
            .parse::<Number>()
            .map_err(|_| RecordError::InvalidDstPort(dst_port.to_string()))?;

        let protocol = fields[layout.protocol];
        let protocol = protocol
            .parse::<Number>()
            .map_err(|_| RecordError::InvalidProtocol(protocol.to_string()))?;

        Ok(FlowLogRecord { dst_port, protocol })
    }
}
