use serde::Serialize;

use super::error::DataError;
use super::model::{CellValue, SurveyDataset};

// ---------------------------------------------------------------------------
// Response categories
// ---------------------------------------------------------------------------

/// The five ordinal answers, in decreasing agreement. Code `n` is the
/// `n`-th variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LikertCategory {
    StronglyAgree,
    Agree,
    Neutral,
    Disagree,
    StronglyDisagree,
}

impl LikertCategory {
    pub const ALL: [LikertCategory; 5] = [
        LikertCategory::StronglyAgree,
        LikertCategory::Agree,
        LikertCategory::Neutral,
        LikertCategory::Disagree,
        LikertCategory::StronglyDisagree,
    ];

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1..=5 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        self as i64 + 1
    }

    pub fn label(self) -> &'static str {
        match self {
            LikertCategory::StronglyAgree => "Strongly Agree",
            LikertCategory::Agree => "Agree",
            LikertCategory::Neutral => "Neutral",
            LikertCategory::Disagree => "Disagree",
            LikertCategory::StronglyDisagree => "Strongly Disagree",
        }
    }
}

/// What to do with non-missing cells that are not a code in 1..=5.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CodePolicy {
    /// Count them in the base but give them no bucket, so the
    /// distribution sums to less than 100.
    #[default]
    Ignore,
    /// Fail with [`DataError::InvalidCode`].
    Reject,
}

// ---------------------------------------------------------------------------
// Distribution
// ---------------------------------------------------------------------------

/// Percentage of respondents per category, indexed by `code - 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Distribution(pub [f64; 5]);

impl Distribution {
    pub fn get(&self, category: LikertCategory) -> f64 {
        self.0[(category.code() - 1) as usize]
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// `(category, percentage)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (LikertCategory, f64)> + '_ {
        LikertCategory::ALL.iter().map(|&c| (c, self.get(c)))
    }
}

/// Percentage distribution of a Likert column over the five categories.
///
/// The base is every non-null cell. Categories nobody picked are 0.0.
pub fn summarize(
    dataset: &SurveyDataset,
    column: &str,
    policy: CodePolicy,
) -> Result<Distribution, DataError> {
    let cells = dataset.column(column)?;

    let mut counts = [0usize; 5];
    let mut base = 0usize;
    for (row, cell) in cells.iter().enumerate() {
        if cell.is_null() {
            continue;
        }
        base += 1;
        match cell.as_code().and_then(LikertCategory::from_code) {
            Some(category) => counts[(category.code() - 1) as usize] += 1,
            None if policy == CodePolicy::Reject => {
                return Err(invalid_code(column, row, cell));
            }
            None => {
                log::debug!("{column}: ignoring out-of-range value {cell} at row {row}");
            }
        }
    }

    if base == 0 {
        return Ok(Distribution::default());
    }

    let mut pct = [0.0; 5];
    for (slot, count) in pct.iter_mut().zip(counts) {
        *slot = count as f64 / base as f64 * 100.0;
    }
    Ok(Distribution(pct))
}

fn invalid_code(column: &str, row: usize, cell: &CellValue) -> DataError {
    DataError::InvalidCode {
        column: column.to_string(),
        row,
        value: cell.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(values: Vec<CellValue>) -> SurveyDataset {
        SurveyDataset::from_rows(
            vec!["Q1b".into()],
            values.into_iter().map(|v| vec![v]).collect(),
        )
    }

    fn codes(codes: &[i64]) -> SurveyDataset {
        dataset(codes.iter().map(|&c| CellValue::Integer(c)).collect())
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_category_codes_and_labels() {
        assert_eq!(LikertCategory::from_code(1), Some(LikertCategory::StronglyAgree));
        assert_eq!(LikertCategory::from_code(5), Some(LikertCategory::StronglyDisagree));
        assert_eq!(LikertCategory::from_code(0), None);
        assert_eq!(LikertCategory::from_code(6), None);
        assert_eq!(LikertCategory::Neutral.code(), 3);
        assert_eq!(LikertCategory::Disagree.label(), "Disagree");
    }

    #[test]
    fn test_worked_example() {
        let d = summarize(&codes(&[1, 1, 2, 5]), "Q1b", CodePolicy::Ignore).unwrap();
        assert_eq!(d.0, [50.0, 25.0, 0.0, 0.0, 25.0]);
    }

    #[test]
    fn test_empty_column_is_all_zero() {
        let d = summarize(&codes(&[]), "Q1b", CodePolicy::Ignore).unwrap();
        assert_eq!(d.0, [0.0; 5]);

        let nulls = dataset(vec![CellValue::Null, CellValue::Null]);
        let d = summarize(&nulls, "Q1b", CodePolicy::Reject).unwrap();
        assert_eq!(d.0, [0.0; 5]);
    }

    #[test]
    fn test_valid_codes_sum_to_hundred() {
        let d = summarize(&codes(&[3, 1, 4, 1, 5, 2, 2]), "Q1b", CodePolicy::Ignore).unwrap();
        assert_close(d.total(), 100.0);
    }

    #[test]
    fn test_absent_code_is_exactly_zero() {
        let d = summarize(&codes(&[1, 2, 4, 5]), "Q1b", CodePolicy::Ignore).unwrap();
        assert_eq!(d.get(LikertCategory::Neutral), 0.0);
    }

    #[test]
    fn test_row_order_does_not_matter() {
        let a = summarize(&codes(&[5, 4, 4, 1, 2]), "Q1b", CodePolicy::Ignore).unwrap();
        let b = summarize(&codes(&[1, 2, 4, 5, 4]), "Q1b", CodePolicy::Ignore).unwrap();
        assert_eq!(a, b);
        let order: Vec<i64> = a.iter().map(|(c, _)| c.code()).collect();
        assert_eq!(order, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let ds = codes(&[2, 3, 3, 3]);
        let first = summarize(&ds, "Q1b", CodePolicy::Ignore).unwrap();
        let second = summarize(&ds, "Q1b", CodePolicy::Ignore).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_cells_leave_the_base() {
        let ds = dataset(vec![
            CellValue::Integer(1),
            CellValue::Null,
            CellValue::Float(2.0),
            CellValue::Null,
        ]);
        let d = summarize(&ds, "Q1b", CodePolicy::Ignore).unwrap();
        assert_eq!(d.0, [50.0, 50.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_out_of_range_ignored_but_counted() {
        let d = summarize(&codes(&[1, 1, 9, 0]), "Q1b", CodePolicy::Ignore).unwrap();
        assert_eq!(d.0, [50.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(d.total() < 100.0);
    }

    #[test]
    fn test_out_of_range_rejected_in_strict_mode() {
        let ds = dataset(vec![
            CellValue::Integer(2),
            CellValue::String("n/a".into()),
        ]);
        let err = summarize(&ds, "Q1b", CodePolicy::Reject).unwrap_err();
        assert_eq!(
            err,
            DataError::InvalidCode {
                column: "Q1b".into(),
                row: 1,
                value: "n/a".into(),
            }
        );
    }

    #[test]
    fn test_missing_column_is_data_error() {
        let err = summarize(&codes(&[1]), "Q9z", CodePolicy::Ignore).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn { column } if column == "Q9z"));
    }
}
