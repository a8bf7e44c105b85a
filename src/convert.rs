//! CSV to JSON conversion.
//!
//! Each CSV row becomes a [`Record`], an ordered mapping from column name to
//! cell text. The full record list is written as a JSON array indented with
//! four spaces.

use color_eyre::eyre::{Result, WrapErr};
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{map::Map, Value};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Column holding the value returned on a successful lookup.
pub const OPTION_FIELD: &str = "Option";

const INDENT: &[u8] = b"    ";

/// One CSV row. Keys keep the column order of the header row. Values are
/// JSON strings, or `null` for cells missing from a short row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Builds a record from an arbitrary JSON object. Non-string values are
    /// stored as their JSON text, so `3` becomes `"3"` and `null` becomes
    /// `"null"`.
    pub fn from_map(map: Map<String, Value>) -> Self {
        let fields = map
            .into_iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, Value::String(text))
            })
            .collect();
        Record(fields)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn option(&self) -> Option<&str> {
        self.get(OPTION_FIELD)
    }

    /// Values of every column except [`OPTION_FIELD`], in column order.
    /// Missing cells are left out.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(key, _)| key.as_str() != OPTION_FIELD)
            .filter_map(|(_, value)| value.as_str())
    }

    /// True when some column has no cell in this row.
    pub fn is_padded(&self) -> bool {
        self.0.values().any(Value::is_null)
    }
}

/// Maps one CSV row onto `headers`. Columns past the end of a short row
/// become `null`; cells past the last header are dropped.
pub fn convert_line(headers: &[String], record: &StringRecord) -> Result<Record> {
    let mut line = Map::new();

    for (i, header_name) in headers.iter().enumerate() {
        let value = match record.get(i) {
            Some(value) => Value::String(value.to_string()),
            None => Value::Null,
        };
        line.insert(header_name.to_string(), value);
    }

    Ok(Record(line))
}

/// Reads every data row of a CSV file with a header row.
///
/// Rows may be shorter or longer than the header, see [`convert_line`].
pub fn read_records(input: &Path) -> Result<Vec<Record>> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_path(input)
        .wrap_err_with(|| format!("failed to open {}", input.display()))?;
    let headers: Vec<String> = rdr
        .headers()
        .wrap_err_with(|| format!("failed to read header row of {}", input.display()))?
        .iter()
        .map(String::from)
        .collect();
    debug!("Columns of {}: {:?}", input.display(), headers);

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result.wrap_err_with(|| format!("failed to parse {}", input.display()))?;
        let record = convert_line(&headers, &row)?;
        if record.is_padded() {
            debug!(
                "Line {:?} of {} is short, padded with null",
                row.position().map(|p| p.line()),
                input.display()
            );
        }
        records.push(record);
    }

    Ok(records)
}

/// Serializes `value` as JSON indented with four spaces.
pub fn write_pretty<T, W>(value: &T, writer: W) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    let mut serializer =
        serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    Ok(())
}

pub fn write_records<W: Write>(records: &[Record], writer: W) -> Result<()> {
    write_pretty(records, writer)
}

/// Writes `records` to `output`, replacing any existing file.
pub fn write_to_file(records: &[Record], output: &Path) -> Result<()> {
    let file_handler = File::create(output)
        .wrap_err_with(|| format!("failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file_handler);
    write_records(records, &mut writer)?;
    writer
        .flush()
        .wrap_err_with(|| format!("failed to write {}", output.display()))?;
    Ok(())
}

/// Converts `input` to `output` and hands back the parsed rows.
pub fn convert_file(input: &Path, output: &Path) -> Result<Vec<Record>> {
    let records = read_records(input)?;
    write_to_file(&records, output)?;
    info!(
        "Converted {} rows from {} to {}",
        records.len(),
        input.display(),
        output.display()
    );
    Ok(records)
}

/// Loads records from a JSON array of objects, as written by [`convert_file`].
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let file_handler =
        File::open(path).wrap_err_with(|| format!("failed to open {}", path.display()))?;
    let rows: Vec<Map<String, Value>> = serde_json::from_reader(BufReader::new(file_handler))
        .wrap_err_with(|| format!("{} is not a JSON array of objects", path.display()))?;
    info!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows.into_iter().map(Record::from_map).collect())
}
