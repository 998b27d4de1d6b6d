use crate::parser::{BatchError, ColumnMap, ParseError, RecordDecoder, RecordError, Row};
use csv::{Position, ReaderBuilder, StringRecordsIntoIter, Trim};
use std::fs::File;
use std::io::{BufReader, Read};
use std::mem;
use std::path::Path;
use tracing::{debug, info, warn};

/// Streaming parser for delimited record sources with a header row.
///
/// Rows are decoded one at a time and handed to the caller in batches, so memory use is bounded
/// by the batch size rather than by the size of the source.
#[derive(Debug, Clone)]
pub struct CsvParser<D> {
    decoder: D
}

impl<D: RecordDecoder> CsvParser<D> {
    pub fn new(decoder: D) -> Self {
        Self { decoder }
    }

    /// Opens `path` and streams its records into `on_batch`.
    ///
    /// # Errors
    /// Returns `ParseError` if:
    /// - The file cannot be opened.
    /// - The header cannot be read or lacks a required column.
    /// - `on_batch` fails, in which case nothing after the failing batch is read.
    pub fn parse<P, F>(&self, path: P, batch_size: usize, on_batch: F) -> Result<(), ParseError>
    where
        P: AsRef<Path>,
        F: FnMut(Vec<D::Record>) -> Result<(), BatchError>
    {
        let path = path.as_ref();
        let origin = path.display().to_string();

        let file = File::open(path).map_err(|error| ParseError::Open { origin: origin.clone(), error })?;

        self.parse_reader(&origin, BufReader::new(file), batch_size, on_batch)
    }

    /// Same as [`CsvParser::parse`] for an already open source. `origin` only labels logs and errors.
    pub fn parse_reader<R, F>(&self, origin: &str, reader: R, batch_size: usize, mut on_batch: F) -> Result<(), ParseError>
    where
        R: Read,
        F: FnMut(Vec<D::Record>) -> Result<(), BatchError>
    {
        let batch_size = batch_size.max(1);
        let mut records = self.records(origin, reader)?;
        let mut batch = Vec::with_capacity(batch_size);
        let mut emitted = 0usize;
        let mut skipped = 0usize;

        //NOTE: Not a `for` loop, the line of the current row is needed when a batch fails.
        while let Some(result) = records.next() {
            match result {
                Ok(record) => batch.push(record),
                Err(error) => {
                    warn!(origin, line = error.line(), "Skipping malformed row: {error}");
                    skipped += 1;
                    continue;
                }
            }

            if batch.len() >= batch_size {
                emitted += batch.len();
                let full = mem::replace(&mut batch, Vec::with_capacity(batch_size));
                deliver(origin, records.line(), full, &mut on_batch)?;
            }
        }

        if !batch.is_empty() {
            emitted += batch.len();
            deliver(origin, records.line(), batch, &mut on_batch)?;
        }

        info!(origin, emitted, skipped, "Finished parsing source");

        Ok(())
    }

    /// Validates the header of `reader` and returns a lazy iterator with one result per data row.
    pub fn records<R: Read>(&self, origin: &str, reader: R) -> Result<Records<'_, D, R>, ParseError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let header = reader.headers()
            .map_err(|error| ParseError::Header { origin: origin.to_string(), error })?
            .clone();

        let columns = ColumnMap::from_header(&header);
        let missing = columns.missing(D::REQUIRED_COLUMNS);

        if !missing.is_empty() {
            return Err(ParseError::Schema { origin: origin.to_string(), missing });
        }

        Ok(Records {
            decoder: &self.decoder,
            columns,
            rows: reader.into_records(),
            line: 1
        })
    }
}

fn deliver<T, F>(origin: &str, line: u64, batch: Vec<T>, on_batch: &mut F) -> Result<(), ParseError>
where
    F: FnMut(Vec<T>) -> Result<(), BatchError>
{
    debug!(origin, line, size = batch.len(), "Delivering batch");

    on_batch(batch).map_err(|error| ParseError::Callback { origin: origin.to_string(), line, error })
}

/// Decoded rows of a source, malformed ones included as `Err`.
pub struct Records<'d, D, R> {
    decoder: &'d D,
    columns: ColumnMap,
    rows: StringRecordsIntoIter<R>,
    line: u64
}

impl<D, R> Records<'_, D, R> {
    /// Line number of the most recently read row (the header is line 1).
    pub fn line(&self) -> u64 {
        self.line
    }
}

impl<D: RecordDecoder, R: Read> Iterator for Records<'_, D, R> {
    type Item = Result<D::Record, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = match self.rows.next()? {
            Ok(record) => {
                self.line = record.position().map_or(self.line + 1, Position::line);
                self.decoder.decode(&Row::new(&self.columns, &record, self.line))
            }
            Err(error) => {
                self.line = error.position().map_or(self.line + 1, Position::line);
                Err(RecordError::Unreadable { line: self.line, error })
            }
        };

        Some(item)
    }
}
