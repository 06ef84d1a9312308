use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::error::DataError;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the survey sheet
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring what spreadsheets and CSV exports carry.
/// Using `BTreeMap` / `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            // Spreadsheets store every number as a float; show 25.0 as 25.
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.0}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Interpret the cell as an integer response code.
    ///
    /// Integer-valued floats (`3.0`) and numeric text (`" 3 "`) qualify;
    /// fractional numbers, booleans and free text do not.
    pub fn as_code(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            CellValue::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// SurveyDataset – the complete loaded sheet
// ---------------------------------------------------------------------------

/// The full parsed survey, stored column-wise with pre-computed value sets.
#[derive(Debug, Clone, Default)]
pub struct SurveyDataset {
    /// Column names in file order.
    pub column_names: Vec<String>,
    /// For each column the sorted set of unique non-null values.
    pub unique_values: BTreeMap<String, BTreeSet<CellValue>>,
    columns: BTreeMap<String, Vec<CellValue>>,
    rows: usize,
}

impl SurveyDataset {
    /// Build a dataset from a header and row-major cells.
    ///
    /// Short rows are padded with nulls, extra cells are dropped. A repeated
    /// header keeps its first occurrence.
    pub fn from_rows(header: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let n_rows = rows.len();
        let mut column_names: Vec<String> = Vec::with_capacity(header.len());
        let mut positions: Vec<usize> = Vec::with_capacity(header.len());
        for (idx, name) in header.into_iter().enumerate() {
            if !column_names.contains(&name) {
                column_names.push(name);
                positions.push(idx);
            }
        }

        let mut columns: BTreeMap<String, Vec<CellValue>> = column_names
            .iter()
            .map(|name| (name.clone(), Vec::with_capacity(n_rows)))
            .collect();

        for row in rows {
            for (name, &idx) in column_names.iter().zip(&positions) {
                let value = row.get(idx).cloned().unwrap_or(CellValue::Null);
                if let Some(col) = columns.get_mut(name) {
                    col.push(value);
                }
            }
        }

        Self::from_columns(column_names, columns, n_rows)
    }

    /// Build a dataset from records (one map per respondent). Columns are
    /// the sorted union of all record keys; absent keys become nulls.
    pub fn from_records(records: Vec<BTreeMap<String, CellValue>>) -> Self {
        let names: BTreeSet<String> = records
            .iter()
            .flat_map(|rec| rec.keys().cloned())
            .collect();
        let column_names: Vec<String> = names.into_iter().collect();

        let rows = records
            .into_iter()
            .map(|mut rec| {
                column_names
                    .iter()
                    .map(|name| rec.remove(name).unwrap_or(CellValue::Null))
                    .collect()
            })
            .collect();

        Self::from_rows(column_names, rows)
    }

    fn from_columns(
        column_names: Vec<String>,
        columns: BTreeMap<String, Vec<CellValue>>,
        rows: usize,
    ) -> Self {
        let unique_values = columns
            .iter()
            .map(|(name, values)| {
                let set: BTreeSet<CellValue> =
                    values.iter().filter(|v| !v.is_null()).cloned().collect();
                (name.clone(), set)
            })
            .collect();

        SurveyDataset {
            column_names,
            unique_values,
            columns,
            rows,
        }
    }

    /// All cells of a column, in row order.
    pub fn column(&self, name: &str) -> Result<&[CellValue], DataError> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| DataError::MissingColumn {
                column: name.to_string(),
            })
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// The cell at (`column`, `row`), if both exist.
    pub fn value(&self, column: &str, row: usize) -> Option<&CellValue> {
        self.columns.get(column).and_then(|col| col.get(row))
    }

    /// A new dataset holding only the given rows, in the given order.
    pub fn subset(&self, indices: &[usize]) -> SurveyDataset {
        let columns: BTreeMap<String, Vec<CellValue>> = self
            .columns
            .iter()
            .map(|(name, values)| {
                let picked = indices
                    .iter()
                    .filter_map(|&i| values.get(i).cloned())
                    .collect();
                (name.clone(), picked)
            })
            .collect();
        let rows = indices.iter().filter(|&&i| i < self.rows).count();
        Self::from_columns(self.column_names.clone(), columns, rows)
    }

    /// Number of respondents.
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    #[test]
    fn test_from_rows_pads_short_rows() {
        let ds = SurveyDataset::from_rows(
            vec!["Gender".into(), "Q1b".into()],
            vec![vec![s("F"), CellValue::Integer(1)], vec![s("M")]],
        );
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.column("Q1b").unwrap()[1], CellValue::Null);
        assert_eq!(ds.column_names, vec!["Gender", "Q1b"]);
    }

    #[test]
    fn test_unique_values_skip_nulls() {
        let ds = SurveyDataset::from_rows(
            vec!["Role".into()],
            vec![vec![s("Nurse")], vec![CellValue::Null], vec![s("Nurse")]],
        );
        let uniq = &ds.unique_values["Role"];
        assert_eq!(uniq.len(), 1);
        assert!(uniq.contains(&s("Nurse")));
    }

    #[test]
    fn test_missing_column() {
        let ds = SurveyDataset::default();
        assert_eq!(
            ds.column("Q1b"),
            Err(DataError::MissingColumn {
                column: "Q1b".into()
            })
        );
    }

    #[test]
    fn test_from_records_union_of_keys() {
        let mut a = BTreeMap::new();
        a.insert("Age".to_string(), CellValue::Integer(30));
        let mut b = BTreeMap::new();
        b.insert("Role".to_string(), s("Faculty"));
        let ds = SurveyDataset::from_records(vec![a, b]);
        assert_eq!(ds.column_names, vec!["Age", "Role"]);
        assert_eq!(ds.value("Age", 1), Some(&CellValue::Null));
        assert_eq!(ds.value("Role", 1), Some(&s("Faculty")));
    }

    #[test]
    fn test_subset_keeps_selected_rows() {
        let ds = SurveyDataset::from_rows(
            vec!["Q1b".into()],
            (1..=5).map(|c| vec![CellValue::Integer(c)]).collect(),
        );
        let sub = ds.subset(&[4, 0]);
        assert_eq!(sub.len(), 2);
        assert_eq!(
            sub.column("Q1b").unwrap(),
            &[CellValue::Integer(5), CellValue::Integer(1)]
        );
    }

    #[test]
    fn test_as_code() {
        assert_eq!(CellValue::Integer(4).as_code(), Some(4));
        assert_eq!(CellValue::Float(2.0).as_code(), Some(2));
        assert_eq!(CellValue::Float(2.5).as_code(), None);
        assert_eq!(s(" 3 ").as_code(), Some(3));
        assert_eq!(s("Agree").as_code(), None);
        assert_eq!(CellValue::Null.as_code(), None);
    }

    #[test]
    fn test_float_display_drops_zero_fraction() {
        assert_eq!(CellValue::Float(25.0).to_string(), "25");
        assert_eq!(CellValue::Float(2.5).to_string(), "2.5");
    }
}
