use eframe::egui::{self, Color32, RichText, ScrollArea, TextEdit, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::RangeColors;
use crate::data::model::columns;
use crate::data::pipeline::{KeywordPatterns, ResultKind, ResultTable};
use crate::data::summary::Summary;
use crate::state::AppState;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Analysis tab (central panel)
// ---------------------------------------------------------------------------

/// Render recovered messages and the three result sections.
pub fn analysis_view(ui: &mut Ui, state: &mut AppState) {
    if state.positions_file.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a positions export and keyword ideas exports  (File → Open…)");
        });
        return;
    }

    let mut patterns_changed = false;
    let mut save_requested: Option<ResultKind> = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if let Some(report) = &state.report {
                for message in &report.messages {
                    let color = if message.is_warning() {
                        Color32::from_rgb(220, 160, 0)
                    } else {
                        Color32::RED
                    };
                    ui.label(RichText::new(message.to_string()).color(color));
                }
            }

            for kind in ResultKind::ALL {
                egui::CollapsingHeader::new(RichText::new(kind.title()).heading())
                    .id_salt(kind.file_name())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        patterns_changed |= pattern_inputs(ui, kind, state.params.patterns_mut(kind));

                        let Some(report) = &state.report else {
                            return;
                        };
                        let result = report.result(kind);

                        if kind == ResultKind::Distribution {
                            plot::distribution_chart(ui, &result.table, &state.colors);
                        }
                        result_table(ui, result, &state.colors);
                        summary_cards(ui, kind, &result.summary);

                        if ui.button(format!("Save {}…", kind.file_name())).clicked() {
                            save_requested = Some(kind);
                        }
                    });
                ui.add_space(8.0);
            }
        });

    if patterns_changed {
        state.recompute();
    }
    if let Some(kind) = save_requested {
        save_dialog(state, kind);
    }
}

/// Include / exclude inputs; returns whether either text changed.
fn pattern_inputs(ui: &mut Ui, kind: ResultKind, patterns: &mut KeywordPatterns) -> bool {
    let mut changed = false;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Include (regex)");
        changed |= ui
            .add(
                TextEdit::singleline(&mut patterns.include)
                    .id_salt((kind.file_name(), "include"))
                    .hint_text("e.g. shoe|boot"),
            )
            .changed();
        ui.label("Exclude (regex)");
        changed |= ui
            .add(
                TextEdit::singleline(&mut patterns.exclude)
                    .id_salt((kind.file_name(), "exclude"))
                    .hint_text("e.g. cheap"),
            )
            .changed();
    });
    changed
}

fn result_table(ui: &mut Ui, result: &ResultTable, colors: &RangeColors) {
    let table = &result.table;
    if table.columns().is_empty() {
        ui.label("No rows.");
        return;
    }

    let is_range_column: Vec<bool> = table
        .columns()
        .iter()
        .map(|c| c == columns::POSITION_RANGE || c == columns::KD_RANGE)
        .collect();

    ui.push_id(result.kind.file_name(), |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(true)
            .max_scroll_height(320.0)
            .columns(Column::auto().at_least(60.0).clip(true), table.columns().len())
            .header(22.0, |mut header| {
                for name in table.columns() {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, table.len(), |mut row| {
                    let record = &table.records()[row.index()];
                    for (col, value) in record.values.iter().enumerate() {
                        row.col(|ui: &mut Ui| {
                            let text = value.to_string();
                            if is_range_column[col] {
                                let color = colors.for_label(&text);
                                ui.label(RichText::new(text).color(color));
                            } else {
                                ui.label(text);
                            }
                        });
                    }
                });
            });
    });
}

fn summary_cards(ui: &mut Ui, kind: ResultKind, summary: &Summary) {
    let count_label = match kind {
        ResultKind::Missing => "Keywords not ranking",
        ResultKind::Common => "Keywords to optimize",
        ResultKind::Distribution => "Filtered keywords",
    };
    ui.horizontal(|ui: &mut Ui| {
        ui.group(|ui: &mut Ui| {
            ui.vertical(|ui: &mut Ui| {
                ui.label(count_label);
                ui.label(RichText::new(summary.count.to_string()).heading().strong());
            });
        });
        ui.group(|ui: &mut Ui| {
            ui.vertical(|ui: &mut Ui| {
                ui.label("Total volume");
                ui.label(RichText::new(format_volume(summary.volume_total)).heading().strong());
            });
        });
    });
}

fn format_volume(total: f64) -> String {
    if total.fract() == 0.0 {
        format!("{total:.0}")
    } else {
        format!("{total:.2}")
    }
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

pub fn save_dialog(state: &mut AppState, kind: ResultKind) {
    let Some(path) = rfd::FileDialog::new()
        .set_title(format!("Save {}", kind.title().to_lowercase()))
        .add_filter("CSV", &["csv"])
        .set_file_name(kind.file_name())
        .save_file()
    else {
        return;
    };

    match state.export(kind, &path) {
        Ok(rows) => {
            log::info!("Saved {rows} rows to {}", path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Failed to save {}: {e:#}", kind.file_name());
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volumes_drop_needless_decimals() {
        assert_eq!(format_volume(0.0), "0");
        assert_eq!(format_volume(12500.0), "12500");
        assert_eq!(format_volume(10.5), "10.50");
    }
}
