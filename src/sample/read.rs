use std::path::Path;

use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::Sample;

/// Failure while reading observations from a CSV file.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A record did not deserialize into the item type.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),
    /// Header present but no records.
    #[error("CSV file contains no data records")]
    EmptyFile,
}

impl<T> Sample<T> {
    /// Read sample data from a CSV file with headers matching struct fields
    ///
    /// # Errors
    /// [`ReadError`] on I/O failure, malformed records or an empty file.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ReadError>
    where
        T: DeserializeOwned,
    {
        let rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)?;
        Self::read_from(rdr)
    }

    /// Same as [`Sample::read`] over any reader.
    ///
    /// # Errors
    /// [`ReadError::Csv`] on malformed records, [`ReadError::EmptyFile`] when none.
    pub fn read_from<R: std::io::Read>(mut rdr: csv::Reader<R>) -> Result<Self, ReadError>
    where
        T: DeserializeOwned,
    {
        let records = rdr.deserialize().collect::<Result<Vec<T>, _>>()?;
        if records.is_empty() {
            return Err(ReadError::EmptyFile);
        }
        Ok(Self { data: records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Height {
        sex: String,
        height: f64,
    }

    #[test]
    fn reads_records_in_order() {
        let text = "sex,height\nFemale,65.0\nMale,70.5\n";
        let rdr = ReaderBuilder::new().has_headers(true).from_reader(text.as_bytes());
        let sample: Sample<Height> = Sample::read_from(rdr).unwrap();
        assert_eq!(sample.len(), 2);
        assert_eq!(sample.data[1].height, 70.5);
    }

    #[test]
    fn header_only_is_empty_file() {
        let rdr = ReaderBuilder::new().has_headers(true).from_reader("sex,height\n".as_bytes());
        let err = Sample::<Height>::read_from(rdr).unwrap_err();
        assert!(matches!(err, ReadError::EmptyFile));
    }
}
