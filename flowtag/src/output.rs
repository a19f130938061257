use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use csv::WriterBuilder;
use log::{debug, info};
use serde::Serialize;
use thiserror::Error;

use crate::{
    args::{ExportMethodType, OutputConfig},
    counts::{PortProtocolCounts, TagCounts},
    records::Number,
};

pub const TAG_COUNTS_HEADER: [&str; 2] = ["Tag", "Count"];
pub const PORT_PROTOCOL_COUNTS_HEADER: [&str; 3] = ["Port", "Protocol", "Count"];

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Serialize)]
struct TagCountRow<'a> {
    tag: &'a str,
    count: u64,
}

#[derive(Serialize)]
struct PortProtocolCountRow<'a> {
    port: Number,
    protocol: &'a str,
    count: u64,
}

/// Writes the tag and port/protocol reports, either to files or to stdout.
pub struct ReportWriter {
    export_type: ExportMethodType,
    tag_counts_path: PathBuf,
    port_protocol_counts_path: PathBuf,
}

impl ReportWriter {
    pub fn new(config: &OutputConfig) -> Self {
        ReportWriter {
            export_type: config.output,
            tag_counts_path: config.tag_counts_path.clone(),
            port_protocol_counts_path: config.port_protocol_counts_path.clone(),
        }
    }

    pub fn write(
        &self,
        tag_counts: &TagCounts,
        port_protocol_counts: &PortProtocolCounts,
    ) -> Result<(), WriteError> {
        match self.export_type {
            ExportMethodType::Csv => info!(
                "Writing output to the files, {} and {}",
                self.tag_counts_path.display(),
                self.port_protocol_counts_path.display()
            ),
            ExportMethodType::Print => info!("Writing output to stdout"),
        }

        let writer = self.open(&self.tag_counts_path)?;
        write_tag_counts(writer, tag_counts).map_err(|source| WriteError::Write {
            path: self.destination(&self.tag_counts_path),
            source,
        })?;

        let writer = self.open(&self.port_protocol_counts_path)?;
        write_port_protocol_counts(writer, port_protocol_counts).map_err(|source| {
            WriteError::Write {
                path: self.destination(&self.port_protocol_counts_path),
                source,
            }
        })?;

        debug!("Reports written");
        Ok(())
    }

    pub(crate) fn open(&self, path: &Path) -> Result<BufWriter<Box<dyn Write>>, WriteError> {
        let writer: Box<dyn Write> = match self.export_type {
            ExportMethodType::Csv => {
                let file = File::create(path).map_err(|source| WriteError::Create {
                    path: path.to_path_buf(),
                    source,
                })?;
                Box::new(file)
            }
            ExportMethodType::Print => Box::new(io::stdout()),
        };
        Ok(BufWriter::new(writer))
    }

    /// Name used for `path` in errors, `<stdout>` when printing.
    pub(crate) fn destination(&self, path: &Path) -> PathBuf {
        match self.export_type {
            ExportMethodType::Csv => path.to_path_buf(),
            ExportMethodType::Print => PathBuf::from("<stdout>"),
        }
    }
}

/// Writes `Tag,Count` followed by one row per tag in counter order.
pub fn write_tag_counts<W: Write>(writer: W, counts: &TagCounts) -> Result<(), csv::Error> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(TAG_COUNTS_HEADER)?;
    for (tag, count) in counts.iter() {
        wtr.serialize(TagCountRow { tag, count })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `Port,Protocol,Count` followed by one row per pair in counter order.
pub fn write_port_protocol_counts<W: Write>(
    writer: W,
    counts: &PortProtocolCounts,
) -> Result<(), csv::Error> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(PORT_PROTOCOL_COUNTS_HEADER)?;
    for ((port, protocol), count) in counts.iter() {
        wtr.serialize(PortProtocolCountRow {
            port: *port,
            protocol,
            count,
        })?;
    }
    wtr.flush()?;
    Ok(())
}
