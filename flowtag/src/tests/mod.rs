mod output_test;

use std::{
    fs,
    path::{Path, PathBuf},
};

/// Writes `contents` to `name` inside `dir` and returns the full path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

pub const PROTOCOLS_CSV: &str = "number,name\n1,ICMP\n6,TCP\n17,UDP\n";

pub const LOOKUP_CSV: &str = "dstport,protocol,tag\n80,TCP,HTTP\n443,tcp,HTTPS\n53,UDP,DNS\n";

/// Builds a version 2 flow log line with the given destination port and protocol.
pub fn flow_line(dst_port: &str, protocol: &str) -> String {
    format!(
        "2 123456789012 eni-0a1b2c3d 10.0.1.201 198.51.100.2 49153 {} {} 25 20000 1620140761 1620140821 ACCEPT OK",
        dst_port, protocol
    )
}
