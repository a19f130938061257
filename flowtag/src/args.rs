use std::path::PathBuf;

use clap::{Args, Parser};
use serde::{Deserialize, Serialize};

use crate::records::flow_log_record::FlowLogLayout;

pub const DEFAULT_PROTOCOLS_PATH: &str = "protocols.csv";
pub const DEFAULT_LOOKUP_PATH: &str = "lookup.csv";
pub const DEFAULT_FLOW_LOG_PATH: &str = "flowlogs.txt";
pub const DEFAULT_TAG_COUNTS_PATH: &str = "tc_output.txt";
pub const DEFAULT_PORT_PROTOCOL_COUNTS_PATH: &str = "ppc_output.txt";

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct Cli {
    /// Load the whole configuration from a TOML file instead of the flags below
    #[clap(short, long)]
    pub config_file: Option<PathBuf>,

    /// Reference tables and flow log to read
    #[clap(flatten)]
    pub input: InputConfig,

    /// Report destinations
    #[clap(flatten)]
    pub output: OutputConfig,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Protocol table with a `number,name` header
    #[clap(long, default_value = DEFAULT_PROTOCOLS_PATH)]
    pub protocols: PathBuf,

    /// Tag lookup table with a `dstport,protocol,tag` header
    #[clap(long, default_value = DEFAULT_LOOKUP_PATH)]
    pub lookup: PathBuf,

    /// Whitespace separated flow log, one record per line
    #[clap(long, default_value = DEFAULT_FLOW_LOG_PATH)]
    pub flow_log: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            protocols: PathBuf::from(DEFAULT_PROTOCOLS_PATH),
            lookup: PathBuf::from(DEFAULT_LOOKUP_PATH),
            flow_log: PathBuf::from(DEFAULT_FLOW_LOG_PATH),
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output method
    #[clap(short, long, value_enum, default_value_t = ExportMethodType::Csv)]
    pub output: ExportMethodType,

    /// File path for the tag counts (used if method is Csv)
    #[clap(long, default_value = DEFAULT_TAG_COUNTS_PATH)]
    pub tag_counts_path: PathBuf,

    /// File path for the port/protocol counts (used if method is Csv)
    #[clap(long, default_value = DEFAULT_PORT_PROTOCOL_COUNTS_PATH)]
    pub port_protocol_counts_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            output: ExportMethodType::Csv,
            tag_counts_path: PathBuf::from(DEFAULT_TAG_COUNTS_PATH),
            port_protocol_counts_path: PathBuf::from(DEFAULT_PORT_PROTOCOL_COUNTS_PATH),
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMethodType {
    /// The reports will be printed to the console
    Print,

    /// The reports will be written to CSV files
    Csv,
}

/// Everything a run needs, as stored in a configuration file.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub layout: FlowLogLayout,
}

impl From<Cli> for ConfigFile {
    fn from(cli: Cli) -> Self {
        ConfigFile {
            input: cli.input,
            output: cli.output,
            layout: FlowLogLayout::default(),
        }
    }
}
