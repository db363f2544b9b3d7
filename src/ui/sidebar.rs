use crate::state::app_state::AppState;
use crate::state::plot_config::{format_bound, parse_bound, Axis, AxisRange, Bound};
use crate::state::theme::{ACCENT, ERROR_TEXT};
use crate::state::Event;

/// Actions that the sidebar can request from the parent.
pub enum SidebarAction {
    OpenFile,
    Emit(Event),
}

/// Text buffers for one axis' bound fields.
///
/// The text is re-synced from the config whenever the range changes from
/// elsewhere (drag-zoom, reset, a new plot), so typing a half-finished
/// number is not overwritten every frame.
#[derive(Default)]
struct AxisInputs {
    synced: AxisRange,
    min_text: String,
    max_text: String,
    min_invalid: bool,
    max_invalid: bool,
}

impl AxisInputs {
    fn sync(&mut self, range: AxisRange) {
        if range != self.synced {
            self.synced = range;
            self.min_text = format_bound(range.min);
            self.max_text = format_bound(range.max);
            self.min_invalid = false;
            self.max_invalid = false;
        }
    }

    fn text_mut(&mut self, bound: Bound) -> (&mut String, &mut bool) {
        match bound {
            Bound::Min => (&mut self.min_text, &mut self.min_invalid),
            Bound::Max => (&mut self.max_text, &mut self.max_invalid),
        }
    }
}

/// Persistent sidebar state.
#[derive(Default)]
pub struct SidebarState {
    x_inputs: AxisInputs,
    y_inputs: AxisInputs,
}

impl SidebarState {
    fn inputs_mut(&mut self, axis: Axis) -> &mut AxisInputs {
        match axis {
            Axis::X => &mut self.x_inputs,
            Axis::Y => &mut self.y_inputs,
        }
    }
}

fn section_heading(ui: &mut egui::Ui, text: &str) {
    ui.add_space(6.0);
    ui.separator();
    ui.label(egui::RichText::new(text).strong().size(13.0));
    ui.add_space(2.0);
}

/// Render the control sidebar. Returns the actions the user triggered.
pub fn show_sidebar(
    ui: &mut egui::Ui,
    state: &AppState,
    sidebar: &mut SidebarState,
) -> Vec<SidebarAction> {
    let mut actions = Vec::new();

    sidebar.x_inputs.sync(state.config.x_range);
    sidebar.y_inputs.sync(state.config.y_range);

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.label(egui::RichText::new("CONTROLS").color(ACCENT).strong().size(18.0));
        ui.add_space(8.0);

        // --- Upload ---
        ui.label("Upload Data (.csv, .txt)");
        let choose_btn = egui::Button::new(egui::RichText::new("Choose File...").strong())
            .min_size(egui::vec2(ui.available_width(), 28.0));
        if ui.add(choose_btn).on_hover_text("Open a data file, or drop one on the window").clicked() {
            actions.push(SidebarAction::OpenFile);
        }
        if let Some(pending) = &state.pending {
            ui.label(
                egui::RichText::new(format!("{} ({} points)", pending.name, pending.series.len()))
                    .small(),
            );
        }
        ui.label(
            egui::RichText::new("Format: Two columns (X Y) separated by comma, tab, or space.")
                .small()
                .weak(),
        );
        ui.add_space(4.0);

        let plot_btn = egui::Button::new(egui::RichText::new("PLOT DATA").strong())
            .min_size(egui::vec2(ui.available_width(), 30.0));
        if ui.add_enabled(state.can_plot(), plot_btn).clicked() {
            actions.push(SidebarAction::Emit(Event::Commit));
        }

        // --- Labels ---
        section_heading(ui, "LABELS");
        ui.label(egui::RichText::new("Chart Title").small().weak());
        let mut title = state.config.title.clone();
        if ui
            .add(egui::TextEdit::singleline(&mut title).desired_width(f32::INFINITY))
            .changed()
        {
            actions.push(SidebarAction::Emit(Event::SetTitle(title)));
        }

        ui.columns(2, |cols| {
            cols[0].label(egui::RichText::new("X Label").small().weak());
            let mut x_label = state.config.x_label.clone();
            if cols[0].text_edit_singleline(&mut x_label).changed() {
                actions.push(SidebarAction::Emit(Event::SetXLabel(x_label)));
            }
            cols[1].label(egui::RichText::new("Y Label").small().weak());
            let mut y_label = state.config.y_label.clone();
            if cols[1].text_edit_singleline(&mut y_label).changed() {
                actions.push(SidebarAction::Emit(Event::SetYLabel(y_label)));
            }
        });

        // --- Axis ranges ---
        section_heading(ui, "AXIS RANGES");
        for (axis, label) in [(Axis::X, "X-Axis Range"), (Axis::Y, "Y-Axis Range")] {
            ui.label(egui::RichText::new(label).small().color(ACCENT));
            let inputs = sidebar.inputs_mut(axis);
            ui.columns(2, |cols| {
                for (col, bound) in cols.iter_mut().zip([Bound::Min, Bound::Max]) {
                    let (text, invalid) = inputs.text_mut(bound);
                    let mut edit = egui::TextEdit::singleline(text).hint_text(bound.label());
                    if *invalid {
                        edit = edit.text_color(ERROR_TEXT);
                    }
                    if col.add(edit).changed() {
                        match parse_bound(text) {
                            Ok(value) => {
                                *invalid = false;
                                actions.push(SidebarAction::Emit(Event::SetRange {
                                    axis,
                                    bound,
                                    value,
                                }));
                            }
                            Err(e) => {
                                tracing::debug!("Ignoring axis bound: {e}");
                                *invalid = true;
                            }
                        }
                    }
                }
            });
            // The config will change to match what was typed; record that so
            // the next sync does not rewrite the text.
            inputs.synced = pending_range(inputs.synced, &actions, axis);
        }
    });

    actions
}

/// The range `axis` will have once the emitted `SetRange` events apply.
fn pending_range(current: AxisRange, actions: &[SidebarAction], axis: Axis) -> AxisRange {
    actions.iter().fold(current, |range, action| match action {
        SidebarAction::Emit(Event::SetRange { axis: a, bound, value }) if *a == axis => {
            range.with(*bound, *value)
        }
        _ => range,
    })
}
