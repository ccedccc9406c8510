use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::RangeColors;
use crate::data::model::KeywordTable;
use crate::data::summary::range_distribution;

// ---------------------------------------------------------------------------
// Position range distribution chart
// ---------------------------------------------------------------------------

/// Bar chart of rows per position range, one coloured series per range.
pub fn distribution_chart(ui: &mut Ui, table: &KeywordTable, colors: &RangeColors) {
    Plot::new("distribution_plot")
        .legend(Legend::default())
        .height(180.0)
        .y_axis_label("Keywords")
        .show_x(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for (i, (range, count)) in range_distribution(table).into_iter().enumerate() {
                let bar = Bar::new(i as f64, count as f64).width(0.7);
                let chart = BarChart::new(vec![bar])
                    .name(range.label())
                    .color(colors.position(range));
                plot_ui.bar_chart(chart);
            }
        });
}
