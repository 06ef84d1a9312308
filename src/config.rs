use std::path::PathBuf;

use clap::Parser;

use crate::data::error::DataError;
use crate::data::likert::CodePolicy;
use crate::sections::find_section;

/// Training needs survey dashboard.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Survey file to open at startup (.xlsx, .xls, .ods, .csv, .json or .parquet).
    /// Without it, use File → Open… in the window.
    pub data: Option<PathBuf>,

    /// Worksheet to read from a spreadsheet. Defaults to the first sheet.
    #[arg(long)]
    pub worksheet: Option<String>,

    /// Fail on Likert answers outside 1..=5 instead of leaving them out of the charts.
    #[arg(long)]
    pub strict: bool,

    /// Section shown first, e.g. "Specific Issues".
    #[arg(long)]
    pub section: Option<String>,

    /// Print every section as JSON to stdout and exit without opening a window.
    #[arg(long, requires = "data")]
    pub summary: bool,

    /// Turn on debug logging (RUST_LOG still takes precedence).
    #[arg(short, long)]
    pub verbose: bool,
}

/// Startup configuration injected into the application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardConfig {
    pub data_path: Option<PathBuf>,
    pub worksheet: Option<String>,
    pub code_policy: CodePolicy,
    /// Index into the section table, when one was asked for.
    pub initial_section: Option<usize>,
    pub headless_summary: bool,
    pub verbose: bool,
}

impl TryFrom<Args> for DashboardConfig {
    type Error = anyhow::Error;

    fn try_from(args: Args) -> anyhow::Result<Self> {
        let initial_section = args
            .section
            .as_deref()
            .map(|name| {
                find_section(name).ok_or_else(|| DataError::UnknownSection {
                    name: name.to_string(),
                })
            })
            .transpose()?;

        Ok(DashboardConfig {
            data_path: args.data,
            worksheet: args.worksheet,
            code_policy: if args.strict {
                CodePolicy::Reject
            } else {
                CodePolicy::Ignore
            },
            initial_section,
            headless_summary: args.summary,
            verbose: args.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> anyhow::Result<DashboardConfig> {
        let args = Args::try_parse_from(std::iter::once("training-needs").chain(argv.iter().copied()))?;
        DashboardConfig::try_from(args)
    }

    #[test]
    fn test_defaults() {
        let cfg = parse(&[]).unwrap();
        assert_eq!(cfg, DashboardConfig::default());
    }

    #[test]
    fn test_full_command_line() {
        let cfg = parse(&[
            "TrainingNeeds.xlsx",
            "--worksheet",
            "Sheet1",
            "--strict",
            "--section",
            "managing adverse events",
            "--summary",
        ])
        .unwrap();
        assert_eq!(cfg.data_path, Some(PathBuf::from("TrainingNeeds.xlsx")));
        assert_eq!(cfg.worksheet.as_deref(), Some("Sheet1"));
        assert_eq!(cfg.code_policy, CodePolicy::Reject);
        assert_eq!(cfg.initial_section, Some(3));
        assert!(cfg.headless_summary);
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        assert!(parse(&["--section", "Outcomes"]).is_err());
    }

    #[test]
    fn test_summary_needs_data() {
        assert!(parse(&["--summary"]).is_err());
    }
}
