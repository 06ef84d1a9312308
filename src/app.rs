use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TrainingNeedsApp {
    pub state: AppState,
}

impl TrainingNeedsApp {
    /// Build the app and open the configured data file, if any.
    pub fn new(config: DashboardConfig) -> Self {
        let data_path = config.data_path.clone();
        let mut state = AppState::new(config);
        if let Some(path) = data_path {
            state.open(&path);
        }
        Self { state }
    }
}

impl eframe::App for TrainingNeedsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: navigation + filters ----
        egui::SidePanel::left("navigation_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts of the selected section ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts::section_view(ui, &self.state);
        });
    }
}
