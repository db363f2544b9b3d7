use crate::state::app_state::{AnalysisStatus, AppState};
use crate::state::theme::ACCENT;

pub enum AnalysisAction {
    None,
    Analyze,
}

/// Statistics summary and the AI interpretation of the committed series.
pub fn show_analysis_panel(ui: &mut egui::Ui, state: &AppState) -> AnalysisAction {
    let mut action = AnalysisAction::None;
    if !state.has_data() {
        return action;
    }

    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(10))
        .corner_radius(egui::CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            egui::CollapsingHeader::new("Statistics")
                .default_open(false)
                .show(ui, |ui| {
                    let report = state.stats.report(&state.config.x_label, &state.config.y_label);
                    ui.label(egui::RichText::new(report).monospace());
                });

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("AI INSIGHTS").color(ACCENT).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let label = if state.is_analyzing() { "Analyzing..." } else { "Analyze" };
                    let btn = egui::Button::new(egui::RichText::new(label).strong())
                        .min_size(egui::vec2(0.0, 26.0));
                    if ui
                        .add_enabled(!state.is_analyzing(), btn)
                        .on_hover_text("Send the statistics and a data sample for interpretation")
                        .clicked()
                    {
                        action = AnalysisAction::Analyze;
                    }
                    if state.is_analyzing() {
                        ui.spinner();
                    }
                });
            });

            match &state.analysis {
                AnalysisStatus::Idle => {
                    ui.label(
                        egui::RichText::new("Press \"Analyze\" for an interpretation of this dataset.")
                            .weak(),
                    );
                }
                AnalysisStatus::Running { .. } => {}
                AnalysisStatus::Ready(text) => {
                    ui.separator();
                    egui::ScrollArea::vertical()
                        .id_salt("analysis_text")
                        .max_height(240.0)
                        .show(ui, |ui| {
                            ui.label(text);
                        });
                    if ui.small_button("Copy").clicked() {
                        ui.ctx().copy_text(text.clone());
                    }
                }
            }
        });

    action
}
