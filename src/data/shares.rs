use std::collections::BTreeMap;

use serde::Serialize;

use super::error::DataError;
use super::model::{CellValue, SurveyDataset};

/// Percentage of respondents holding one value of a nominal column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueShare {
    pub label: String,
    pub percent: f64,
}

/// Share of every distinct non-null value of `column`, largest first.
/// Ties keep the value order of [`CellValue`].
pub fn value_shares(dataset: &SurveyDataset, column: &str) -> Result<Vec<ValueShare>, DataError> {
    let cells = dataset.column(column)?;

    let mut counts: BTreeMap<&CellValue, usize> = BTreeMap::new();
    for cell in cells.iter().filter(|c| !c.is_null()) {
        *counts.entry(cell).or_default() += 1;
    }
    let base: usize = counts.values().sum();

    let mut ranked: Vec<(&CellValue, usize)> = counts.into_iter().collect();
    // Stable sort: equal counts stay in ascending value order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(ranked
        .into_iter()
        .map(|(value, count)| ValueShare {
            label: value.to_string(),
            percent: count as f64 / base as f64 * 100.0,
        })
        .collect())
}
