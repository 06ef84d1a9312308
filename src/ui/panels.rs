use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::selectable_values;
use crate::data::loader::SUPPORTED_EXTENSIONS;
use crate::data::model::CellValue;
use crate::sections::{DEMOGRAPHIC_COLUMNS, SECTIONS};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – navigation and respondent filters
// ---------------------------------------------------------------------------

/// Render the left navigation panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Navigation");
    ui.separator();

    ui.strong("Select Section");
    let mut selected = state.section;
    for (idx, section) in SECTIONS.iter().enumerate() {
        ui.radio_value(&mut selected, idx, section.name);
    }
    state.select_section(selected);

    ui.add_space(8.0);
    ui.heading("Respondents");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Collect what we need so we can mutate state after the loop.
    let choices: Vec<(&str, _)> = DEMOGRAPHIC_COLUMNS
        .iter()
        .filter_map(|&col| Some((col, selectable_values(dataset, col)?)))
        .collect();
    let mut actions: Vec<(&str, FilterAction)> = Vec::new();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (col, all_values) in &choices {
                let col = *col;
                let Some(selected) = state.filters.get(col) else {
                    continue;
                };

                // Show count of selected / total in the header
                let n_selected = all_values.iter().filter(|v| selected.contains(*v)).count();
                let n_total = all_values.len();
                let header_text = format!("{col}  ({n_selected}/{n_total})");

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(col)
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                actions.push((col, FilterAction::All));
                            }
                            if ui.small_button("None").clicked() {
                                actions.push((col, FilterAction::None));
                            }
                        });

                        for val in all_values {
                            let mut checked = selected.contains(val);
                            let label = match val {
                                CellValue::Null => "(missing)".to_string(),
                                other => other.to_string(),
                            };
                            if ui.checkbox(&mut checked, label).changed() {
                                actions.push((col, FilterAction::Toggle(val.clone())));
                            }
                        }
                    });
            }
        });

    // Apply after drawing so the filter map is not borrowed mid-frame.
    for (col, action) in actions {
        match action {
            FilterAction::All => state.select_all(col),
            FilterAction::None => state.select_none(col),
            FilterAction::Toggle(value) => state.toggle_filter_value(col, &value),
        }
    }
}

enum FilterAction {
    All,
    None,
    Toggle(CellValue),
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let source = state
                .config
                .data_path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!("{source}: {} respondents", ds.len()));
            if state.filters_active() {
                ui.label(
                    RichText::new(format!("{} after filters", state.visible_count()))
                        .color(Color32::from_rgb(255, 165, 0)),
                );
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open survey data")
        .add_filter("Supported files", SUPPORTED_EXTENSIONS)
        .add_filter("Spreadsheets", &["xlsx", "xlsm", "xlsb", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
