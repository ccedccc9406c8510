use eframe::egui::{Color32, RichText, ScrollArea, Ui};
use log::Level;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Logs tab
// ---------------------------------------------------------------------------

/// Render the event log of the last run, oldest first.
pub fn logs_view(ui: &mut Ui, state: &AppState) {
    ui.heading("Application log");
    ui.separator();

    let Some(report) = &state.report else {
        ui.label("No analysis has run yet.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui: &mut Ui| {
            for event in report.log.events() {
                let color = match event.level {
                    Level::Error => Color32::RED,
                    Level::Warn => Color32::from_rgb(220, 160, 0),
                    _ => ui.visuals().text_color(),
                };
                ui.label(RichText::new(format!("[{}] {}", event.level, event.message)).color(color));
            }
        });
}
