use std::collections::BTreeSet;
use std::path::Path;

use crate::config::DashboardConfig;
use crate::data::filter::{filtered_indices, init_filter_state, selectable_values, FilterState};
use crate::data::loader::load_file;
use crate::data::model::{CellValue, SurveyDataset};
use crate::report::{build_section, SectionReport};
use crate::sections::{referenced_columns, DEMOGRAPHIC_COLUMNS, SECTIONS};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded survey (None until a file is loaded).
    pub dataset: Option<SurveyDataset>,

    /// Per-demographic filter selections.
    pub filters: FilterState,

    /// Indices of respondents passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Index of the selected section in [`SECTIONS`].
    pub section: usize,

    /// Report for the selected section over the filtered respondents.
    pub report: Option<SectionReport>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let section = config.initial_section.unwrap_or(0).min(SECTIONS.len() - 1);
        Self {
            config,
            dataset: None,
            filters: FilterState::default(),
            visible_indices: Vec::new(),
            section,
            report: None,
            status_message: None,
        }
    }

    /// Load the survey at `path`, reporting failures in the status line.
    pub fn open(&mut self, path: &Path) {
        match load_file(path, self.config.worksheet.as_deref()) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} respondents with columns {:?}",
                    dataset.len(),
                    dataset.column_names
                );
                self.config.data_path = Some(path.to_path_buf());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset, initialise filters and the report.
    pub fn set_dataset(&mut self, dataset: SurveyDataset) {
        let absent: Vec<&str> = referenced_columns()
            .filter(|col| !dataset.has_column(col))
            .collect();
        if !absent.is_empty() {
            log::warn!("dataset lacks columns used by the dashboard: {absent:?}");
        }
        if dataset.is_empty() {
            log::warn!("dataset has no respondents");
        }

        self.filters = init_filter_state(&dataset, &DEMOGRAPHIC_COLUMNS);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.rebuild_report();
    }

    /// Switch the navigation page.
    pub fn select_section(&mut self, section: usize) {
        if section != self.section && section < SECTIONS.len() {
            self.section = section;
            self.rebuild_report();
        }
    }

    /// Number of respondents passing the current filters.
    pub fn visible_count(&self) -> usize {
        self.visible_indices.len()
    }

    /// Whether the filters hide any respondent.
    pub fn filters_active(&self) -> bool {
        self.dataset
            .as_ref()
            .is_some_and(|ds| self.visible_indices.len() != ds.len())
    }

    /// Recompute the cached report after a dataset, filter or section change.
    pub fn rebuild_report(&mut self) {
        let Some(ds) = &self.dataset else {
            self.visible_indices.clear();
            self.report = None;
            return;
        };

        self.visible_indices = filtered_indices(ds, &self.filters);
        let view = if self.visible_indices.len() == ds.len() {
            None
        } else {
            Some(ds.subset(&self.visible_indices))
        };
        let view = view.as_ref().unwrap_or(ds);

        match build_section(view, &SECTIONS[self.section], self.config.code_policy) {
            Ok(report) => {
                self.report = Some(report);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to summarise '{}': {e}", SECTIONS[self.section].name);
                self.report = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Toggle a single demographic value in a column's filter.
    pub fn toggle_filter_value(&mut self, column: &str, value: &CellValue) {
        let selected = self.filters.entry(column.to_string()).or_default();
        if selected.contains(value) {
            selected.remove(value);
        } else {
            selected.insert(value.clone());
        }
        self.rebuild_report();
    }

    /// Select all values in a column.
    pub fn select_all(&mut self, column: &str) {
        if let Some(all_vals) = self
            .dataset
            .as_ref()
            .and_then(|ds| selectable_values(ds, column))
        {
            self.filters.insert(column.to_string(), all_vals);
            self.rebuild_report();
        }
    }

    /// Deselect all values in a column.
    pub fn select_none(&mut self, column: &str) {
        self.filters.insert(column.to_string(), BTreeSet::new());
        self.rebuild_report();
    }
}
