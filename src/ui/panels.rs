use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::bucket::{DifficultyRange, PositionRange};
use crate::data::loader::RawFile;
use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Left side panel – range filters
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.label("Applied to common keywords and positions by range.");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Position ranges ----
            let header = format!(
                "Position ranges  ({}/{})",
                state.params.position_ranges.len(),
                PositionRange::ALL.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("position_ranges")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_positions(true);
                        }
                        if ui.small_button("None").clicked() {
                            state.select_all_positions(false);
                        }
                    });
                    for range in PositionRange::ALL {
                        let mut checked = state.params.position_ranges.contains(&range);
                        let text = RichText::new(range.label()).color(state.colors.position(range));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_position_range(range);
                        }
                    }
                });

            // ---- Keyword difficulty ranges ----
            let header = format!(
                "Keyword difficulty  ({}/{})",
                state.params.kd_ranges.len(),
                DifficultyRange::ALL.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("kd_ranges")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_kd(true);
                        }
                        if ui.small_button("None").clicked() {
                            state.select_all_kd(false);
                        }
                    });
                    for range in DifficultyRange::ALL {
                        let mut checked = state.params.kd_ranges.contains(&range);
                        let text = RichText::new(range.label()).color(state.colors.for_label(range.label()));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_kd_range(range);
                        }
                    }
                });

            ui.separator();
            egui::CollapsingHeader::new("How to use")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    ui.label("1. Export your organic positions and one or more broad match keyword ideas reports from SEMrush.");
                    ui.label("2. Open the positions file, then the ideas files (File menu).");
                    ui.label("3. Narrow the tables with the range filters and include / exclude regexes.");
                    ui.label("4. Save any table as a semicolon-separated CSV.");
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open positions…").clicked() {
                open_positions_dialog(state);
                ui.close_menu();
            }
            if ui.button("Open keyword ideas…").clicked() {
                open_ideas_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Clear").clicked() {
                state.clear();
                ui.close_menu();
            }
        });

        ui.separator();
        ui.selectable_value(&mut state.tab, Tab::Analysis, "Analysis");
        ui.selectable_value(&mut state.tab, Tab::Logs, "Logs");
        ui.separator();

        let positions = state
            .positions_file
            .as_ref()
            .map(|f| f.name.as_str())
            .unwrap_or("no positions file");
        ui.label(format!(
            "{positions} · {} ideas file(s)",
            state.ideas_files.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

fn csv_dialog(title: &str) -> rfd::FileDialog {
    rfd::FileDialog::new()
        .set_title(title)
        .add_filter("CSV", &["csv"])
        .add_filter("All files", &["*"])
}

pub fn open_positions_dialog(state: &mut AppState) {
    let Some(path) = csv_dialog("Open organic positions export").pick_file() else {
        return;
    };
    match RawFile::from_path(&path) {
        Ok(file) => {
            log::info!("Picked positions file {}", path.display());
            state.status_message = None;
            state.set_positions_file(file);
        }
        Err(e) => {
            log::error!("Failed to read positions file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

pub fn open_ideas_dialog(state: &mut AppState) {
    let Some(paths) = csv_dialog("Open keyword ideas exports").pick_files() else {
        return;
    };
    let files: anyhow::Result<Vec<RawFile>> =
        paths.iter().map(|p| RawFile::from_path(p)).collect();
    match files {
        Ok(files) => {
            log::info!("Picked {} keyword ideas file(s)", files.len());
            state.status_message = None;
            state.set_ideas_files(files);
        }
        Err(e) => {
            log::error!("Failed to read keyword ideas files: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
