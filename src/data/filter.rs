use std::collections::{BTreeMap, BTreeSet};

use super::model::{CellValue, SurveyDataset};

// ---------------------------------------------------------------------------
// Filter predicate: which demographic values are selected per column
// ---------------------------------------------------------------------------

/// Per-column selection state: maps column_name → set of selected values.
/// A column absent from the map is not filtered. [`CellValue::Null`] stands
/// for respondents who left the column blank.
pub type FilterState = BTreeMap<String, BTreeSet<CellValue>>;

/// Every value a respondent can be filtered on in `column`: its unique
/// values, plus [`CellValue::Null`] when some cells are blank.
pub fn selectable_values(dataset: &SurveyDataset, column: &str) -> Option<BTreeSet<CellValue>> {
    let mut values = dataset.unique_values.get(column)?.clone();
    if dataset
        .column(column)
        .is_ok_and(|cells| cells.iter().any(CellValue::is_null))
    {
        values.insert(CellValue::Null);
    }
    Some(values)
}

/// Initialise a [`FilterState`] over `columns` with every value selected
/// (i.e., keep every respondent). Columns missing from the dataset are skipped.
pub fn init_filter_state(dataset: &SurveyDataset, columns: &[&str]) -> FilterState {
    columns
        .iter()
        .filter_map(|col| Some((col.to_string(), selectable_values(dataset, col)?)))
        .collect()
}

/// Return indices of respondents that pass all active filters.
///
/// A respondent passes a column filter when its value for that column (or
/// [`CellValue::Null`] for a blank cell) is in the selected set. An empty
/// set therefore hides everyone.
pub fn filtered_indices(dataset: &SurveyDataset, filters: &FilterState) -> Vec<usize> {
    (0..dataset.len())
        .filter(|&row| {
            filters.iter().all(|(col, selected)| {
                let value = dataset.value(col, row).unwrap_or(&CellValue::Null);
                selected.contains(value)
            })
        })
        .collect()
}
