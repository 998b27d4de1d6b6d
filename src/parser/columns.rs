use crate::parser::RecordError;
use crate::types::{parse_timestamp, Timestamp, AMOUNT_LIMIT};
use csv::StringRecord;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

/// Header positions keyed by trimmed, lower-cased column name.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    positions: HashMap<String, usize>
}

impl ColumnMap {
    pub fn from_header(header: &StringRecord) -> Self {
        let positions = header.iter()
            .enumerate()
            .map(|(position, name)| (name.trim().to_lowercase(), position))
            .collect();

        Self { positions }
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }

    /// Required columns absent from the header, in the order they were asked for.
    pub fn missing(&self, required: &[&str]) -> Vec<String> {
        required.iter()
            .filter(|column| !self.positions.contains_key(**column))
            .map(|column| column.to_string())
            .collect()
    }
}

/// A data row viewed through the header of its source.
pub struct Row<'a> {
    columns: &'a ColumnMap,
    record: &'a StringRecord,
    line: u64
}

impl<'a> Row<'a> {
    pub fn new(columns: &'a ColumnMap, record: &'a StringRecord, line: u64) -> Self {
        Self { columns, record, line }
    }

    pub fn line(&self) -> u64 {
        self.line
    }

    /// Trimmed value of `column`. Fails if the row is too short to contain it.
    pub fn field(&self, column: &'static str) -> Result<&'a str, RecordError> {
        self.columns.position(column)
            .and_then(|position| self.record.get(position))
            .map(str::trim)
            .ok_or_else(|| RecordError::missing_field(self, column))
    }

    pub fn required(&self, column: &'static str) -> Result<&'a str, RecordError> {
        let value = self.field(column)?;

        if value.is_empty() {
            return Err(RecordError::empty_field(self, column));
        }

        Ok(value)
    }

    /// Exact decimal value of `column`, bounded by [`AMOUNT_LIMIT`].
    pub fn decimal(&self, column: &'static str) -> Result<Decimal, RecordError> {
        let value = self.required(column)?;

        let amount = Decimal::from_str(value).map_err(|error| RecordError::invalid_amount(self, value, error))?;

        if amount.abs() > AMOUNT_LIMIT {
            return Err(RecordError::amount_out_of_range(self, amount));
        }

        Ok(amount)
    }

    pub fn timestamp(&self, column: &'static str) -> Result<Timestamp, RecordError> {
        parse_timestamp(self.field(column)?)
            .map_err(|error| RecordError::invalid_timestamp(self, column, error))
    }
}
