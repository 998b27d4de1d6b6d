mod columns;
mod csv_parser;
mod decoders;
mod errors;
#[cfg(test)]
mod tests;

pub use columns::{ColumnMap, Row};
pub use csv_parser::{CsvParser, Records};
pub use decoders::{RecordDecoder, StatementDecoder, TransactionDecoder};
pub use errors::{BatchError, ParseError, RecordError};
