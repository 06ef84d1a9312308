use serde::Serialize;

use crate::data::error::DataError;
use crate::data::likert::{summarize, CodePolicy, Distribution};
use crate::data::model::SurveyDataset;
use crate::data::shares::{value_shares, ValueShare};
use crate::sections::{ChartKind, Section, SECTIONS};

// ---------------------------------------------------------------------------
// Section driver: section table row → computed chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "values")]
pub enum ChartData {
    Likert(Distribution),
    Shares(Vec<ValueShare>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartResult {
    pub column: &'static str,
    pub title: &'static str,
    pub kind: ChartKind,
    pub data: ChartData,
}

/// Everything needed to draw one navigation page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionReport {
    pub section: &'static str,
    pub heading: &'static str,
    pub respondents: usize,
    pub charts: Vec<ChartResult>,
}

/// Summarise every chart of `section`, in table order. The first data
/// error aborts the section.
pub fn build_section(
    dataset: &SurveyDataset,
    section: &Section,
    policy: CodePolicy,
) -> Result<SectionReport, DataError> {
    let charts = section
        .charts
        .iter()
        .map(|spec| {
            let data = match spec.kind {
                ChartKind::Likert => ChartData::Likert(summarize(dataset, spec.column, policy)?),
                ChartKind::Bar | ChartKind::Pie => {
                    ChartData::Shares(value_shares(dataset, spec.column)?)
                }
            };
            Ok(ChartResult {
                column: spec.column,
                title: spec.label,
                kind: spec.kind,
                data,
            })
        })
        .collect::<Result<Vec<_>, DataError>>()?;

    log::debug!("built section '{}' with {} charts", section.name, charts.len());

    Ok(SectionReport {
        section: section.name,
        heading: section.heading,
        respondents: dataset.len(),
        charts,
    })
}

/// Every section, in navigation order.
pub fn build_all(
    dataset: &SurveyDataset,
    policy: CodePolicy,
) -> Result<Vec<SectionReport>, DataError> {
    SECTIONS
        .iter()
        .map(|section| build_section(dataset, section, policy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;
    use crate::sections::{find_section, referenced_columns};

    fn by_name(ds: &SurveyDataset, name: &str) -> Result<SectionReport, DataError> {
        let idx = find_section(name).expect("section exists");
        build_section(ds, &SECTIONS[idx], CodePolicy::Ignore)
    }

    /// One respondent answering every column: demographics as text,
    /// every question with `code`.
    fn full_survey(codes: &[i64]) -> SurveyDataset {
        let header: Vec<String> = referenced_columns().map(str::to_string).collect();
        let rows = codes
            .iter()
            .enumerate()
            .map(|(i, &code)| {
                header
                    .iter()
                    .map(|col| {
                        if col.starts_with('Q') {
                            CellValue::Integer(code)
                        } else {
                            CellValue::String(format!("{col}-{}", i % 2))
                        }
                    })
                    .collect()
            })
            .collect();
        SurveyDataset::from_rows(header, rows)
    }

    #[test]
    fn test_likert_section() {
        let ds = full_survey(&[1, 1, 2, 5]);
        let report = by_name(&ds, "Effective Communication").unwrap();
        assert_eq!(report.heading, "Effective Communication");
        assert_eq!(report.respondents, 4);
        assert_eq!(report.charts.len(), 5);
        assert_eq!(report.charts[0].column, "Q1c");
        assert_eq!(
            report.charts[0].data,
            ChartData::Likert(Distribution([50.0, 25.0, 0.0, 0.0, 25.0]))
        );
    }

    #[test]
    fn test_demographics_section() {
        let ds = full_survey(&[3, 3, 3]);
        let report = build_section(&ds, &SECTIONS[0], CodePolicy::Ignore).unwrap();
        let gender = &report.charts[1];
        assert_eq!(gender.kind, ChartKind::Pie);
        match &gender.data {
            ChartData::Shares(shares) => {
                assert_eq!(shares[0].label, "Gender-0");
                assert!((shares[0].percent - 200.0 / 3.0).abs() < 1e-9);
            }
            other => panic!("unexpected chart data {other:?}"),
        }
    }

    #[test]
    fn test_missing_column_aborts_section() {
        let ds = SurveyDataset::from_rows(
            vec!["Q1d".into()],
            vec![vec![CellValue::Integer(1)]],
        );
        let err = by_name(&ds, "Managing Adverse Events").unwrap_err();
        assert_eq!(err, DataError::MissingColumn { column: "Q2d".into() });
    }

    #[test]
    fn test_build_all_and_serialize() {
        let ds = full_survey(&[4, 2]);
        let reports = build_all(&ds, CodePolicy::Reject).unwrap();
        assert_eq!(reports.len(), SECTIONS.len());

        let json = serde_json::to_value(&reports[1]).unwrap();
        assert_eq!(json["section"], "General Knowledge");
        assert_eq!(json["charts"][0]["kind"], "likert");
        assert_eq!(json["charts"][0]["data"]["type"], "likert");
        assert_eq!(json["charts"][0]["data"]["values"][1], 50.0);
    }
}
