use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;

use crate::error::{Result, TextbankError};

/// A single CSV record with access to its values by header name.
#[derive(Debug, Clone)]
pub struct Row {
    headers: Arc<[String]>,
    record: csv::StringRecord,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.headers
            .iter()
            .position(|h| h == column)
            .and_then(|i| self.record.get(i))
    }

    pub fn require(&self, column: &str) -> Result<&str> {
        self.get(column)
            .ok_or_else(|| TextbankError::MissingColumn(column.to_string()))
    }

    /// All values in header order, for passing a record through unchanged.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.record.iter()
    }
}

/// Header-aware CSV reader.
pub struct RowReader<R: Read> {
    reader: csv::Reader<R>,
    headers: Arc<[String]>,
}

impl RowReader<File> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }
}

impl<R: Read> RowReader<R> {
    pub fn from_reader(rdr: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(rdr);
        let headers: Vec<String> = reader.headers()?.iter().map(ToString::to_string).collect();
        Ok(Self {
            reader,
            headers: headers.into(),
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&mut self) -> Rows<'_, R> {
        Rows {
            records: self.reader.records(),
            headers: Arc::clone(&self.headers),
        }
    }
}

pub struct Rows<'a, R: Read> {
    records: csv::StringRecordsIter<'a, R>,
    headers: Arc<[String]>,
}

impl<R: Read> Iterator for Rows<'_, R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(
            record
                .map(|record| Row {
                    headers: Arc::clone(&self.headers),
                    record,
                })
                .map_err(Into::into),
        )
    }
}

/// CSV writer that flushes after every record, so a run that dies mid-way
/// leaves the completed rows on disk.
pub struct RowWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl RowWriter<File> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            writer: csv::Writer::from_path(path)?,
        })
    }
}

impl<W: Write> RowWriter<W> {
    pub fn from_writer(wtr: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(wtr),
        }
    }

    pub fn write_record<I, S>(&mut self, record: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        self.writer.write_record(record)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| e.into_error().into())
    }
}
