use egui_extras::{Column, TableBuilder};

use crate::state::app_state::AppState;

/// Tabular view of the committed series, one row per point in file order.
pub fn show_table_view(ui: &mut egui::Ui, state: &AppState, height: f32) {
    let series = &state.series;
    if series.is_empty() {
        ui.label("No data loaded.");
        return;
    }

    let x_header = state.config.x_label.clone();
    let y_header = state.config.y_label.clone();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(60.0))
        .columns(Column::remainder().at_least(100.0), 2)
        .min_scrolled_height(300.0)
        .max_scroll_height(height)
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            header.col(|ui| {
                ui.strong(&x_header);
            });
            header.col(|ui| {
                ui.strong(&y_header);
            });
        })
        .body(|body| {
            body.rows(18.0, series.len(), |mut row| {
                let index = row.index();
                let Some(point) = series.get(index) else {
                    return;
                };
                row.col(|ui| {
                    ui.label(egui::RichText::new(format!("{}", index + 1)).weak());
                });
                row.col(|ui| {
                    ui.label(format!("{:.4}", point.x()));
                });
                row.col(|ui| {
                    ui.label(format!("{:.4}", point.y()));
                });
            });
        });
}
