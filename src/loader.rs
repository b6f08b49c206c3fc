//! File loading into engine tables using DuckDB

use crate::error::{DatasureError, Result};
use crate::table::{Column, DataType, Table, Value};
use crate::types::TypeTag;
use chrono::{DateTime, NaiveDateTime};
use duckdb::Connection;
use log::{debug, info, warn};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Encodings tried, in order, for delimited text files. Latin-1 decodes any
/// byte sequence, so UTF-16 is only reached first when the file carries a
/// UTF-16 byte order mark.
pub const CSV_ENCODINGS: [&str; 3] = ["utf-8", "latin-1", "utf-16"];

const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

const LOADED_TABLE: &str = "datasure_loaded";

/// Loads CSV, TSV, Parquet and JSON files through an in-memory DuckDB
/// connection and converts them into typed [`Table`]s.
pub struct TableLoader {
    connection: Connection,
}

impl TableLoader {
    pub fn new() -> Result<Self> {
        let connection = Connection::open_in_memory()?;
        connection.execute("SET enable_progress_bar=false", [])?;
        Ok(Self { connection })
    }

    /// Load a file, naming it by its file name in error messages
    pub fn load_file(&self, file_path: &Path) -> Result<Table> {
        let name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.display().to_string());
        self.load_file_named(file_path, &name)
    }

    /// Load a file; `name` is the human-readable label used in errors
    pub fn load_file_named(&self, file_path: &Path, name: &str) -> Result<Table> {
        if !file_path.is_file() {
            return Err(DatasureError::invalid_input(format!(
                "File not found: {}",
                file_path.display()
            )));
        }
        if !Self::is_supported_format(file_path) {
            return Err(DatasureError::invalid_input(format!(
                "Unsupported file format: {} (expected csv, tsv, parquet, json or jsonl)",
                file_path.display()
            )));
        }
        if std::fs::metadata(file_path)?.len() == 0 {
            return Err(DatasureError::empty_table(name));
        }

        self.materialize(file_path, name)?;
        let schema = self.describe()?;
        self.check_integer_range(&schema, name)?;
        let columns = self.extract_columns(&schema)?;
        let table = Table::new(columns)?;

        if table.is_empty() {
            return Err(DatasureError::empty_table(name));
        }

        info!(
            "Loaded {}: {} rows x {} columns",
            name,
            table.row_count(),
            table.column_count()
        );
        Ok(table)
    }

    /// Check if file format is supported
    pub fn is_supported_format(file_path: &Path) -> bool {
        extension(file_path)
            .map(|ext| matches!(ext.as_str(), "csv" | "tsv" | "parquet" | "json" | "jsonl"))
            .unwrap_or(false)
    }

    /// Copy the file's contents into a DuckDB table, retrying delimited text
    /// with each candidate encoding while the failure is an encoding failure.
    fn materialize(&self, file_path: &Path, name: &str) -> Result<()> {
        let path = file_path.to_string_lossy().replace('\'', "''");
        let ext = extension(file_path).unwrap_or_default();

        let reader = match ext.as_str() {
            "parquet" => format!("read_parquet('{}')", path),
            "json" | "jsonl" => format!("read_json_auto('{}')", path),
            _ => {
                let delim = if ext == "tsv" { ", delim='\\t'" } else { "" };
                let encodings = encoding_candidates(file_path)?;
                for encoding in &encodings {
                    let reader = format!(
                        "read_csv_auto('{}'{}, encoding='{}')",
                        path, delim, encoding
                    );
                    match self.create_table(&reader) {
                        Ok(()) => {
                            debug!("Read {} as {}", name, encoding);
                            return Ok(());
                        }
                        Err(e) if is_encoding_error(&e) => {
                            warn!("{} could not be decoded as {}: {}", name, encoding, e);
                        }
                        Err(e) => return Err(convert_duckdb_error(e, file_path)),
                    }
                }
                return Err(DatasureError::Encoding {
                    name: name.to_string(),
                    tried: encodings.join(", "),
                });
            }
        };

        self.create_table(&reader)
            .map_err(|e| convert_duckdb_error(e, file_path))
    }

    fn create_table(&self, reader: &str) -> duckdb::Result<()> {
        let sql = format!("CREATE OR REPLACE TABLE {} AS SELECT * FROM {}", LOADED_TABLE, reader);
        self.connection.execute(&sql, []).map(|_| ())
    }

    /// Column names and storage types, in file order
    fn describe(&self) -> Result<Vec<(String, DataType)>> {
        let mut stmt = self
            .connection
            .prepare(&format!("DESCRIBE {}", LOADED_TABLE))
            .map_err(|e| {
                DatasureError::data_processing(format!("Failed to prepare describe query: {}", e))
            })?;

        let rows = stmt
            .query_map([], |row| {
                let name: String = row.get(0)?;
                let type_name: String = row.get(1)?;
                Ok((name, DataType::from_duckdb(&type_name)))
            })
            .map_err(|e| {
                DatasureError::data_processing(format!("Failed to query column info: {}", e))
            })?;

        let mut schema = Vec::new();
        for row in rows {
            schema.push(row.map_err(|e| {
                DatasureError::data_processing(format!("Failed to process column info row: {}", e))
            })?);
        }
        Ok(schema)
    }

    /// Fetch every column with a cast matching its type tag so each cell
    /// arrives as a known Rust type. Dates come back as timestamps and are
    /// narrowed to their day.
    fn extract_columns(&self, schema: &[(String, DataType)]) -> Result<Vec<Column>> {
        if schema.is_empty() {
            return Ok(Vec::new());
        }

        let tags: Vec<TypeTag> = schema.iter().map(|(_, dt)| dt.classify()).collect();
        let select_list = schema
            .iter()
            .zip(&tags)
            .map(|((name, _), tag)| select_expr(name, *tag))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("SELECT {} FROM {}", select_list, LOADED_TABLE);

        let mut stmt = self.connection.prepare(&sql).map_err(|e| {
            DatasureError::data_processing(format!("Failed to prepare data extraction query: {}", e))
        })?;

        let rows = stmt
            .query_map([], |row| {
                let mut values = Vec::with_capacity(tags.len());
                for (i, (tag, (_, data_type))) in tags.iter().zip(schema).enumerate() {
                    let value = match tag {
                        TypeTag::Integer => Value::from(row.get::<_, Option<i64>>(i)?),
                        TypeTag::Float => Value::from(row.get::<_, Option<f64>>(i)?),
                        TypeTag::Boolean => Value::from(row.get::<_, Option<bool>>(i)?),
                        TypeTag::Datetime => {
                            let ts = row.get::<_, Option<i64>>(i)?.and_then(timestamp_from_micros);
                            if *data_type == DataType::Date {
                                Value::from(ts.map(|t| t.date()))
                            } else {
                                Value::from(ts)
                            }
                        }
                        TypeTag::String => Value::from(row.get::<_, Option<String>>(i)?),
                    };
                    values.push(value);
                }
                Ok(values)
            })
            .map_err(|e| {
                DatasureError::data_processing(format!("Failed to extract data rows: {}", e))
            })?;

        let mut buffers: Vec<Vec<Value>> = vec![Vec::new(); schema.len()];
        for row in rows {
            let values = row.map_err(|e| {
                DatasureError::data_processing(format!("Failed to process data row: {}", e))
            })?;
            for (buffer, value) in buffers.iter_mut().zip(values) {
                buffer.push(value);
            }
        }

        Ok(schema
            .iter()
            .zip(buffers)
            .map(|((name, data_type), values)| {
                // A UTF-16 byte order mark can survive on the first header
                Column::new(name.trim_start_matches('\u{feff}'), data_type.clone(), values)
            })
            .collect())
    }

    /// Cells hold signed 64-bit integers; reject wider integer columns whose
    /// values do not fit instead of failing mid-extraction
    fn check_integer_range(&self, schema: &[(String, DataType)], name: &str) -> Result<()> {
        for (column, data_type) in schema.iter().filter(|(_, dt)| dt.is_wide_integer()) {
            let ident = quote_ident(column);
            let sql = format!(
                "SELECT count(*) FROM {} WHERE {} IS NOT NULL AND TRY_CAST({} AS BIGINT) IS NULL",
                LOADED_TABLE, ident, ident
            );
            let out_of_range: i64 = self
                .connection
                .query_row(&sql, [], |row| row.get(0))
                .map_err(|e| {
                    DatasureError::data_processing(format!("Failed to check column '{}': {}", column, e))
                })?;
            if out_of_range > 0 {
                return Err(DatasureError::invalid_input(format!(
                    "{}: column '{}' ({}) has {} value(s) outside the 64-bit signed integer range",
                    name, column, data_type, out_of_range
                )));
            }
        }
        Ok(())
    }
}

/// Encodings to try for a delimited file, UTF-16 first when a UTF-16 byte
/// order mark is present
fn encoding_candidates(file_path: &Path) -> Result<Vec<&'static str>> {
    let mut bom = [0u8; 2];
    let read = File::open(file_path)?.read(&mut bom)?;
    if read == 2 && (bom == UTF16_LE_BOM || bom == UTF16_BE_BOM) {
        Ok(vec!["utf-16", "utf-8", "latin-1"])
    } else {
        Ok(CSV_ENCODINGS.to_vec())
    }
}

fn extension(file_path: &Path) -> Option<String> {
    file_path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn select_expr(name: &str, tag: TypeTag) -> String {
    let column = quote_ident(name);
    match tag {
        TypeTag::Integer => format!("CAST({} AS BIGINT)", column),
        TypeTag::Float => format!("CAST({} AS DOUBLE)", column),
        TypeTag::Boolean => format!("CAST({} AS BOOLEAN)", column),
        TypeTag::Datetime => format!("epoch_us(CAST({} AS TIMESTAMP))", column),
        TypeTag::String => format!("CAST({} AS VARCHAR)", column),
    }
}

fn timestamp_from_micros(micros: i64) -> Option<NaiveDateTime> {
    let secs = micros.div_euclid(1_000_000);
    let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
    DateTime::from_timestamp(secs, nanos).map(|dt| dt.naive_utc())
}

fn is_encoding_error(error: &duckdb::Error) -> bool {
    let msg = error.to_string().to_lowercase();
    msg.contains("unicode") || msg.contains("utf-8") || msg.contains("encoding")
}

/// Convert DuckDB errors to readable input errors where the cause is known
fn convert_duckdb_error(error: duckdb::Error, file_path: &Path) -> DatasureError {
    let error_msg = error.to_string();

    if error_msg.contains("CSV Error")
        || error_msg.contains("Could not convert")
        || error_msg.contains("Invalid CSV")
        || error_msg.contains("Unterminated quoted field")
    {
        DatasureError::invalid_input(format!(
            "Malformed CSV file '{}': {}",
            file_path.display(),
            error_msg
        ))
    } else if error_msg.contains("JSON") {
        DatasureError::invalid_input(format!(
            "Malformed JSON file '{}': {}",
            file_path.display(),
            error_msg
        ))
    } else if error_msg.contains("No files found") || error_msg.contains("does not exist") {
        DatasureError::invalid_input(format!("File not found: {}", file_path.display()))
    } else if error_msg.contains("Permission denied") {
        DatasureError::invalid_input(format!(
            "Permission denied accessing file: {}",
            file_path.display()
        ))
    } else {
        DatasureError::DuckDb(error)
    }
}
