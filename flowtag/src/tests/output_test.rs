#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use csv::ReaderBuilder;
    use tempfile::TempDir;

    use crate::{
        args::{ExportMethodType, OutputConfig},
        counts::{PortProtocolCounts, TagCounts},
        output::{write_port_protocol_counts, write_tag_counts, ReportWriter, WriteError},
    };

    fn setup_counts() -> (TagCounts, PortProtocolCounts) {
        let mut tag_counts = TagCounts::new();
        for tag in ["tag_1", "tag_2", "tag_1", "untagged"] {
            tag_counts.increment(tag);
        }

        let mut port_protocol_counts = PortProtocolCounts::new();
        for (port, protocol) in [(80i64, "tcp"), (443, "tcp"), (53, "udp"), (8080, "tcp")] {
            port_protocol_counts.increment(&(port, protocol.to_string()));
        }

        (tag_counts, port_protocol_counts)
    }

    #[test]
    fn test_write_tag_counts() {
        let (tag_counts, _) = setup_counts();
        let mut buffer = Vec::new();

        write_tag_counts(&mut buffer, &tag_counts).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Tag,Count\ntag_1,2\ntag_2,1\nuntagged,1\n"
        );
    }

    #[test]
    fn test_write_port_protocol_counts() {
        let (_, port_protocol_counts) = setup_counts();
        let mut buffer = Vec::new();

        write_port_protocol_counts(&mut buffer, &port_protocol_counts).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Port,Protocol,Count\n80,tcp,1\n443,tcp,1\n53,udp,1\n8080,tcp,1\n"
        );
    }

    #[test]
    fn test_empty_counts_still_write_header() {
        let mut tags = Vec::new();
        let mut pairs = Vec::new();

        write_tag_counts(&mut tags, &TagCounts::new()).unwrap();
        write_port_protocol_counts(&mut pairs, &PortProtocolCounts::new()).unwrap();

        assert_eq!(String::from_utf8(tags).unwrap(), "Tag,Count\n");
        assert_eq!(String::from_utf8(pairs).unwrap(), "Port,Protocol,Count\n");
    }

    #[test]
    fn test_reports_read_back() {
        let (tag_counts, port_protocol_counts) = setup_counts();
        let mut tags = Vec::new();
        let mut pairs = Vec::new();
        write_tag_counts(&mut tags, &tag_counts).unwrap();
        write_port_protocol_counts(&mut pairs, &port_protocol_counts).unwrap();

        let mut rdr = ReaderBuilder::new().from_reader(tags.as_slice());
        assert_eq!(rdr.headers().unwrap(), vec!["Tag", "Count"]);
        let rows: Vec<(String, u64)> = rdr.deserialize().map(Result::unwrap).collect();
        let expected: Vec<(String, u64)> = tag_counts
            .iter()
            .map(|(tag, count)| (tag.clone(), count))
            .collect();
        assert_eq!(rows, expected);

        let mut rdr = ReaderBuilder::new().from_reader(pairs.as_slice());
        assert_eq!(rdr.headers().unwrap(), vec!["Port", "Protocol", "Count"]);
        let rows: Vec<(i64, String, u64)> = rdr.deserialize().map(Result::unwrap).collect();
        let expected: Vec<(i64, String, u64)> = port_protocol_counts
            .iter()
            .map(|((port, protocol), count)| (*port, protocol.clone(), count))
            .collect();
        assert_eq!(rows, expected);
    }

    #[test]
    fn test_report_writer_creates_files() {
        let dir = TempDir::new().unwrap();
        let config = OutputConfig {
            output: ExportMethodType::Csv,
            tag_counts_path: dir.path().join("tc_output.txt"),
            port_protocol_counts_path: dir.path().join("ppc_output.txt"),
        };
        let (tag_counts, port_protocol_counts) = setup_counts();

        ReportWriter::new(&config)
            .write(&tag_counts, &port_protocol_counts)
            .unwrap();

        let tags = fs::read_to_string(&config.tag_counts_path).unwrap();
        let pairs = fs::read_to_string(&config.port_protocol_counts_path).unwrap();
        assert!(tags.starts_with("Tag,Count\n"));
        assert!(tags.contains("tag_1,2\n"));
        assert!(pairs.starts_with("Port,Protocol,Count\n"));
        assert!(pairs.contains("8080,tcp,1\n"));
    }

    #[test]
    fn test_report_writer_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let config = OutputConfig {
            output: ExportMethodType::Csv,
            tag_counts_path: dir.path().join("tc_output.txt"),
            port_protocol_counts_path: dir.path().join("ppc_output.txt"),
        };
        fs::write(
            &config.tag_counts_path,
            "stale content that is longer than the report\n".repeat(10),
        )
        .unwrap();

        ReportWriter::new(&config)
            .write(&TagCounts::new(), &PortProtocolCounts::new())
            .unwrap();

        assert_eq!(
            fs::read_to_string(&config.tag_counts_path).unwrap(),
            "Tag,Count\n"
        );
    }

    #[test]
    fn test_report_writer_unwritable_destination() {
        let dir = TempDir::new().unwrap();
        let config = OutputConfig {
            output: ExportMethodType::Csv,
            tag_counts_path: dir.path().join("missing").join("tc_output.txt"),
            port_protocol_counts_path: dir.path().join("ppc_output.txt"),
        };
        let (tag_counts, port_protocol_counts) = setup_counts();

        let err = ReportWriter::new(&config)
            .write(&tag_counts, &port_protocol_counts)
            .unwrap_err();

        assert!(matches!(err, WriteError::Create { .. }));
        assert!(err.to_string().contains("tc_output.txt"));
    }

    #[test]
    fn test_print_mode_writes_no_files() {
        let dir = TempDir::new().unwrap();
        let config = OutputConfig {
            output: ExportMethodType::Print,
            tag_counts_path: dir.path().join("missing").join("tc_output.txt"),
            port_protocol_counts_path: dir.path().join("ppc_output.txt"),
        };
        let (tag_counts, port_protocol_counts) = setup_counts();

        ReportWriter::new(&config)
            .write(&tag_counts, &port_protocol_counts)
            .unwrap();

        assert!(!config.tag_counts_path.exists());
        assert!(!config.port_protocol_counts_path.exists());
    }

    #[test]
    fn test_report_destination() {
        let path = PathBuf::from("out/tc_output.txt");
        let mut config = OutputConfig {
            output: ExportMethodType::Print,
            tag_counts_path: path.clone(),
            port_protocol_counts_path: PathBuf::from("out/ppc_output.txt"),
        };

        let printer = ReportWriter::new(&config);
        assert_eq!(printer.destination(&path), PathBuf::from("<stdout>"));
        assert!(printer.open(&path).is_ok());

        config.output = ExportMethodType::Csv;
        let file_writer = ReportWriter::new(&config);
        assert_eq!(file_writer.destination(&path), path);
    }
}
