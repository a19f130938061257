use super::parser::{Parser, ReadError};
use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::Path;

/// Reads headed, comma separated reference tables into typed rows.
pub struct CsvParser;

impl Parser for CsvParser {
    fn parse<T>(
        &self,
        file_path: &Path,
    ) -> Result<Box<dyn Iterator<Item = Result<T, ReadError>>>, ReadError>
    where
        T: DeserializeOwned + 'static,
    {
        let file = File::open(file_path).map_err(|source| ReadError::Io {
            path: file_path.to_path_buf(),
            source,
        })?;
        let rdr = ReaderBuilder::new().trim(Trim::Headers).from_reader(file);

        let path = file_path.to_path_buf();
        let iter = rdr.into_deserialize().map(move |result| {
            result.map_err(|source| ReadError::Csv {
                path: path.clone(),
                source,
            })
        });

        Ok(Box::new(iter))
    }
}
