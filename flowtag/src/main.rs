mod args;
mod counts;
mod output;
mod parsers;
mod records;
mod tables;
#[cfg(test)]
mod tests;

use anyhow::Context;
use args::{Cli, ConfigFile};
use clap::Parser;
use log::{error, info, warn};
use output::ReportWriter;
use parsers::flow_log_parser::FlowLogParser;
use std::time::Instant;
use tables::{ProtocolTable, TagLookup, UNTAGGED};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // A config file replaces the command line flags entirely
    let config: ConfigFile = if let Some(config_path) = cli.config_file.clone() {
        match confy::load_path::<ConfigFile>(&config_path) {
            Ok(cfg_file) => cfg_file,
            Err(e) => {
                error!(
                    "Error loading configuration file {}: {:?}",
                    config_path.display(),
                    e
                );
                std::process::exit(1);
            }
        }
    } else {
        ConfigFile::from(cli)
    };

    if let Err(err) = run(&config) {
        error!("Error: {:#}", err);
        std::process::exit(1);
    }
}

/// Loads both reference tables, tags the flow log and writes the reports.
///
/// Nothing is written unless every input was read successfully.
fn run(config: &ConfigFile) -> anyhow::Result<()> {
    let start = Instant::now();

    let protocols = ProtocolTable::load(&config.input.protocols)
        .context("Failed to load the protocol table")?;
    let lookup =
        TagLookup::load(&config.input.lookup).context("Failed to load the lookup table")?;

    if protocols.is_empty() {
        warn!("The protocol table is empty, every protocol will be reported as unknown");
    }
    if lookup.is_empty() {
        warn!("The lookup table is empty, every record will be untagged");
    }

    let parser = FlowLogParser::new(&protocols, &lookup, config.layout);
    let counts = parser
        .parse_file(&config.input.flow_log)
        .context("Failed to parse the flow log")?;

    if counts.tag_counts.is_empty() {
        warn!("No flow log entries were counted, the reports only hold headers");
    }

    ReportWriter::new(&config.output)
        .write(&counts.tag_counts, &counts.port_protocol_counts)
        .context("Failed to write the reports")?;

    info!(
        "Tagged {} of {} lines ({} skipped, {} untagged) into {} tags and {} port/protocol pairs",
        counts.tag_counts.total(),
        counts.lines_read,
        counts.lines_skipped,
        counts.tag_counts.get(UNTAGGED),
        counts.tag_counts.len(),
        counts.port_protocol_counts.len()
    );
    info!(
        "Duration: {:.4} seconds",
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
