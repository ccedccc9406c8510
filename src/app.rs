use eframe::egui;

use crate::config::AnalysisConfig;
use crate::state::{AppState, Tab};
use crate::ui::{logs, panels, results};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct KeywordGapApp {
    pub state: AppState,
}

impl KeywordGapApp {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for KeywordGapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: range filters ----
        if self.state.tab == Tab::Analysis {
            egui::SidePanel::left("filter_panel")
                .default_width(220.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::side_panel(ui, &mut self.state);
                });
        }

        // ---- Central panel: results or log ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.tab {
            Tab::Analysis => results::analysis_view(ui, &mut self.state),
            Tab::Logs => logs::logs_view(ui, &self.state),
        });
    }
}
