use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use calamine::{open_workbook_auto, Data, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, SurveyDataset};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Extensions accepted by [`load_file`], for file dialogs.
pub const SUPPORTED_EXTENSIONS: &[&str] =
    &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv", "json", "parquet", "pq"];

/// Load a survey dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – first row is the header;
///   `worksheet` selects the sheet (default: the first one)
/// * `.csv`     – header row, one respondent per line
/// * `.json`    – `[{ "Gender": "Female", "Q1b": 2, ... }, ...]`
/// * `.parquet` – flat scalar columns (pandas `df.to_parquet()`)
pub fn load_file(path: &Path, worksheet: Option<&str>) -> Result<SurveyDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_spreadsheet(path, worksheet),
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

fn load_spreadsheet(path: &Path, worksheet: Option<&str>) -> Result<SurveyDataset> {
    let mut workbook = open_workbook_auto(path).context("opening workbook")?;

    let sheet = match worksheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .context("workbook has no worksheets")?,
    };
    let range = workbook
        .worksheet_range(&sheet)
        .with_context(|| format!("reading worksheet '{sheet}'"))?;

    let mut rows = range.rows();
    let header_row = rows
        .next()
        .with_context(|| format!("worksheet '{sheet}' is empty"))?;
    let header: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| header_name(&cell.to_string(), i))
        .collect();

    let body = rows
        .map(|row| row.iter().map(spreadsheet_cell).collect())
        .collect();

    Ok(SurveyDataset::from_rows(header, body))
}

fn spreadsheet_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => float_cell(*f),
        Data::String(s) if s.trim().is_empty() => CellValue::Null,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Empty | Data::Error(_) => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout:  header row with column names, one respondent per record.
/// Empty cells are missing answers.
fn load_csv(path: &Path) -> Result<SurveyDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let header: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .enumerate()
        .map(|(i, h)| header_name(h, i))
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(SurveyDataset::from_rows(header, rows))
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return float_cell(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Institution": "A", "Gender": "Female", "Q1b": 2, "Q2b": null },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<SurveyDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut parsed = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let record: BTreeMap<String, CellValue> = obj
            .iter()
            .map(|(key, val)| (key.trim().to_string(), json_to_cell(val)))
            .collect();
        parsed.push(record);
    }

    Ok(SurveyDataset::from_records(parsed))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) if s.trim().is_empty() => CellValue::Null,
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                float_cell(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one scalar column per survey field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<SurveyDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let header: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .enumerate()
        .map(|(i, f)| header_name(f.name(), i))
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            rows.push(
                batch
                    .columns()
                    .iter()
                    .map(|col| extract_cell(col, row))
                    .collect(),
            );
        }
    }

    Ok(SurveyDataset::from_rows(header, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map(|s| text_cell(s.value(row))),
        DataType::LargeUtf8 => Some(text_cell(col.as_string::<i64>().value(row))),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| CellValue::Integer(a.value(row) as i64)),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| CellValue::Integer(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| float_cell(a.value(row) as f64)),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| float_cell(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| CellValue::Bool(a.value(row))),
        _ => None,
    };
    value.unwrap_or_else(|| CellValue::String(format!("{:?}", col.data_type())))
}

// -- shared helpers --

/// pandas writes missing numbers as NaN.
fn float_cell(f: f64) -> CellValue {
    if f.is_nan() {
        CellValue::Null
    } else {
        CellValue::Float(f)
    }
}

fn text_cell(s: &str) -> CellValue {
    if s.trim().is_empty() {
        CellValue::Null
    } else {
        CellValue::String(s.to_string())
    }
}

/// Trimmed header text; blank headers get a positional name.
fn header_name(raw: &str, idx: usize) -> String {
    let name = raw.trim();
    if name.is_empty() {
        format!("Unnamed: {idx}")
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_csv_types_and_missing_cells() {
        let file = write_temp(
            ".csv",
            "Institution, Gender ,Age,Q1b\nAKU,Female,34,1\nKMTC,Male,,2.0\nAKU,,29,\n",
        );
        let ds = load_file(file.path(), None).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.column_names, vec!["Institution", "Gender", "Age", "Q1b"]);
        assert_eq!(ds.value("Age", 0), Some(&CellValue::Integer(34)));
        assert_eq!(ds.value("Age", 1), Some(&CellValue::Null));
        assert_eq!(ds.value("Q1b", 1), Some(&CellValue::Float(2.0)));
        assert_eq!(ds.value("Gender", 2), Some(&CellValue::Null));
    }

    #[test]
    fn test_csv_short_rows_are_padded() {
        let file = write_temp(".csv", "Role,Level,Q1c\nNurse,Senior\n");
        let ds = load_file(file.path(), None).unwrap();
        assert_eq!(ds.value("Q1c", 0), Some(&CellValue::Null));
    }

    #[test]
    fn test_json_records() {
        let file = write_temp(
            ".json",
            r#"[{"Role": "Faculty", "Q1d": 3}, {"Role": "Student", "Q1d": null, "Q2d": 4.5}]"#,
        );
        let ds = load_file(file.path(), None).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.column_names, vec!["Q1d", "Q2d", "Role"]);
        assert_eq!(ds.value("Q1d", 0), Some(&CellValue::Integer(3)));
        assert_eq!(ds.value("Q2d", 0), Some(&CellValue::Null));
        assert_eq!(ds.value("Q2d", 1), Some(&CellValue::Float(4.5)));
    }

    #[test]
    fn test_json_requires_array() {
        let file = write_temp(".json", r#"{"Role": "Faculty"}"#);
        assert!(load_file(file.path(), None).is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_temp(".txt", "Role\nNurse\n");
        let err = load_file(file.path(), None).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("TrainingNeeds.csv");
        assert!(load_file(&path, None).is_err());
    }

    #[test]
    fn test_guess_cell_type() {
        assert_eq!(guess_cell_type("NaN"), CellValue::Null);
        assert_eq!(guess_cell_type(" 5 "), CellValue::Integer(5));
        assert_eq!(guess_cell_type("true"), CellValue::Bool(true));
        assert_eq!(guess_cell_type("Agree"), CellValue::String("Agree".into()));
    }

    #[test]
    fn test_spreadsheet_cells() {
        let three = spreadsheet_cell(&Data::Float(3.0));
        assert_eq!(three, CellValue::Float(3.0));
        assert_eq!(three.as_code(), Some(3));
        assert_eq!(spreadsheet_cell(&Data::Int(5)), CellValue::Integer(5));
        assert_eq!(spreadsheet_cell(&Data::Float(f64::NAN)), CellValue::Null);
        assert_eq!(spreadsheet_cell(&Data::Empty), CellValue::Null);
        assert_eq!(
            spreadsheet_cell(&Data::Error(calamine::CellErrorType::NA)),
            CellValue::Null
        );
        assert_eq!(spreadsheet_cell(&Data::String("   ".into())), CellValue::Null);
        assert_eq!(
            spreadsheet_cell(&Data::String("Female".into())),
            CellValue::String("Female".into())
        );
        assert_eq!(spreadsheet_cell(&Data::Bool(true)), CellValue::Bool(true));
    }

    #[test]
    fn test_parquet_survey() {
        use arrow::array::ArrayRef;
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new("Institution", DataType::Utf8, true),
            Field::new("Q1b", DataType::Int64, true),
            Field::new("Q2b", DataType::Float64, true),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec![Some("AKU"), None, Some("KMTC")])),
            Arc::new(Int64Array::from(vec![Some(1), None, Some(5)])),
            Arc::new(Float64Array::from(vec![Some(2.0), Some(f64::NAN), None])),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

        let file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path(), None).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.column_names, vec!["Institution", "Q1b", "Q2b"]);
        assert_eq!(ds.value("Institution", 0), Some(&CellValue::String("AKU".into())));
        assert_eq!(ds.value("Institution", 1), Some(&CellValue::Null));
        assert_eq!(ds.value("Q1b", 0), Some(&CellValue::Integer(1)));
        assert_eq!(ds.value("Q1b", 1), Some(&CellValue::Null));
        assert_eq!(ds.value("Q1b", 2), Some(&CellValue::Integer(5)));
        assert_eq!(ds.value("Q2b", 0).and_then(CellValue::as_code), Some(2));
        assert_eq!(ds.value("Q2b", 1), Some(&CellValue::Null));
        assert_eq!(ds.value("Q2b", 2), Some(&CellValue::Null));
    }

    #[test]
    fn test_blank_header_gets_position() {
        assert_eq!(header_name("  ", 3), "Unnamed: 3");
        assert_eq!(header_name(" Q4i ", 0), "Q4i");
    }
}
