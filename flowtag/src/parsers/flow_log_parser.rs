use std::{
    fmt,
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use log::{debug, info, warn};

use super::parser::{ReadError, RecordError};
use crate::{
    counts::{PortProtocolCounts, TagCounts},
    records::flow_log_record::{FlowLogLayout, FlowLogRecord},
    tables::{ProtocolTable, TagLookup},
};

/// Result of one pass over a flow log.
#[derive(Debug, Default, Clone)]
pub struct FlowCounts {
    pub tag_counts: TagCounts,
    pub port_protocol_counts: PortProtocolCounts,
    /// Lines read from the log, including skipped ones.
    pub lines_read: u64,
    /// Lines that were tagged and counted.
    pub lines_counted: u64,
    /// Lines skipped because they were malformed.
    pub lines_skipped: u64,
}

/// A flow log line that was left out of the counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine<'l> {
    /// 1-based position of the line in the log.
    pub line_number: usize,
    pub line: &'l str,
    pub reason: RecordError,
}

impl fmt::Display for SkippedLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid log entry at line {}: {}, skipping it: {}",
            self.line_number, self.reason, self.line
        )
    }
}

/// Tags flow log lines against the reference tables and counts them.
pub struct FlowLogParser<'a> {
    protocols: &'a ProtocolTable,
    lookup: &'a TagLookup,
    layout: FlowLogLayout,
}

impl<'a> FlowLogParser<'a> {
    pub fn new(protocols: &'a ProtocolTable, lookup: &'a TagLookup, layout: FlowLogLayout) -> Self {
        Self {
            protocols,
            lookup,
            layout,
        }
    }

    pub fn parse_file(&self, path: &Path) -> Result<FlowCounts, ReadError> {
        info!("Parsing flow logs from {}", path.display());

        let io_error = |source| ReadError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_error)?;
        self.parse_reader(BufReader::new(file)).map_err(io_error)
    }

    /// Reads the log line by line. Malformed lines are logged and skipped,
    /// only read errors end the pass early.
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> io::Result<FlowCounts> {
        self.parse_reader_with(reader, |skipped| warn!("{}", skipped))
    }

    /// Same as [`parse_reader`](Self::parse_reader), handing every skipped
    /// line to `on_skip` instead of the log.
    pub fn parse_reader_with<R, F>(&self, reader: R, mut on_skip: F) -> io::Result<FlowCounts>
    where
        R: BufRead,
        F: FnMut(&SkippedLine<'_>),
    {
        let mut counts = FlowCounts::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            counts.lines_read += 1;

            match FlowLogRecord::parse(&line, &self.layout) {
                Ok(record) => {
                    self.count(&mut counts, &record);
                    counts.lines_counted += 1;
                }
                Err(reason) => {
                    on_skip(&SkippedLine {
                        line_number: index + 1,
                        line: &line,
                        reason,
                    });
                    counts.lines_skipped += 1;
                }
            }
        }

        debug!(
            "Read {} lines, counted {}, skipped {}",
            counts.lines_read, counts.lines_counted, counts.lines_skipped
        );
        Ok(counts)
    }

    /// Resolves the protocol name and tag for a record.
    pub fn classify(&self, record: &FlowLogRecord) -> (&'a str, &'a str) {
        let protocol = self.protocols.resolve(record.protocol);
        let tag = self.lookup.resolve(record.dst_port, protocol);
        (protocol, tag)
    }

    fn count(&self, counts: &mut FlowCounts, record: &FlowLogRecord) {
        let (protocol, tag) = self.classify(record);
        counts.tag_counts.increment(tag);
        counts
            .port_protocol_counts
            .increment(&(record.dst_port, protocol.to_string()));
    }
}
