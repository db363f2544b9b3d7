use crate::render::plot_view::{self, PlotView};
use crate::state::app_state::AppState;
use crate::state::theme::{Theme, ACCENT, HIGHLIGHT};

/// Series below this size are drawn with point markers.
const DOT_THRESHOLD: usize = 50;

const TOOLTIP_BG: egui::Color32 = egui::Color32::from_rgb(31, 41, 55);
const TOOLTIP_VALUE: egui::Color32 = egui::Color32::from_rgb(251, 146, 60);

/// Actions that the chart panel can request from the parent.
pub enum ChartAction {
    None,
    Zoom { from: f64, to: f64 },
    ResetZoom,
    ToggleTable,
    ExportImageSave,
    ExportImageClipboard,
    ExportCsv,
}

/// Interaction state that lives outside [`AppState`]: the in-progress drag
/// selection and the panel rect from the last frame.
#[derive(Default)]
pub struct ChartState {
    drag_start: Option<f64>,
    drag_end: Option<f64>,
    /// (data generation, x values non-decreasing)
    sorted_cache: Option<(u64, bool)>,
    /// Screen rect of the chart (set each frame for screenshot cropping).
    pub last_frame_rect: Option<egui::Rect>,
}

impl ChartState {
    fn is_sorted(&mut self, state: &AppState) -> bool {
        match self.sorted_cache {
            Some((generation, sorted)) if generation == state.generation => sorted,
            _ => {
                let sorted = state.series.is_sorted_by_x();
                self.sorted_cache = Some((state.generation, sorted));
                sorted
            }
        }
    }
}

/// Helper to create a toolbar button with consistent min size.
fn toolbar_btn(ui: &mut egui::Ui, label: &str) -> egui::Response {
    ui.add(egui::Button::new(label).min_size(egui::vec2(0.0, 26.0)))
}

/// Helper to create a selected/toggled toolbar button.
fn toolbar_toggle_btn(ui: &mut egui::Ui, label: &str, active: bool) -> egui::Response {
    let btn = if active {
        egui::Button::new(egui::RichText::new(label).strong())
            .fill(ui.visuals().selection.bg_fill)
            .min_size(egui::vec2(0.0, 26.0))
    } else {
        egui::Button::new(label).min_size(egui::vec2(0.0, 26.0))
    };
    ui.add(btn)
}

/// Render the chart section. Returns an action if the user asked for one.
/// `panel_height` is the target height of the plot area.
pub fn show_chart_panel(
    ui: &mut egui::Ui,
    state: &AppState,
    chart: &mut ChartState,
    panel_height: f32,
) -> ChartAction {
    let mut action = ChartAction::None;
    let config = &state.config;

    // --- Title row ---
    ui.horizontal(|ui| {
        ui.heading(&config.title);
        if state.has_data() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(egui::RichText::new(&config.y_label).small());
                ui.label(egui::RichText::new("Y:").small().weak());
                ui.add_space(8.0);
                ui.label(egui::RichText::new(&config.x_label).small());
                ui.label(egui::RichText::new("X:").small().weak());
            });
        }
    });

    let frame_resp = egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(10))
        .corner_radius(egui::CornerRadius::same(8))
        .show(ui, |ui| {
            if !state.has_data() {
                show_placeholder(ui, panel_height);
                return;
            }

            // --- Toolbar row ---
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                if state.is_zoomed()
                    && toolbar_btn(ui, "Reset Zoom")
                        .on_hover_text("Show the full X range")
                        .clicked()
                {
                    action = ChartAction::ResetZoom;
                }
                if toolbar_toggle_btn(
                    ui,
                    if state.show_table { "Graph View" } else { "Table View" },
                    state.show_table,
                )
                .on_hover_text("Toggle between chart and data table")
                .clicked()
                {
                    action = ChartAction::ToggleTable;
                }

                ui.separator();

                if toolbar_btn(ui, "Save PNG").on_hover_text("Save the chart as an image").clicked() {
                    action = ChartAction::ExportImageSave;
                }
                if toolbar_btn(ui, "Copy Image").on_hover_text("Copy the chart to the clipboard").clicked() {
                    action = ChartAction::ExportImageClipboard;
                }
                if toolbar_btn(ui, "Export CSV").on_hover_text("Write the data as x,y lines").clicked() {
                    action = ChartAction::ExportCsv;
                }
            });

            ui.add_space(4.0);

            if state.show_table {
                crate::ui::table_view::show_table_view(ui, state, panel_height);
            } else if let Some(zoom) = show_plot(ui, state, chart, panel_height) {
                action = zoom;
            }
        });

    chart.last_frame_rect = Some(frame_resp.response.rect);
    action
}

fn show_placeholder(ui: &mut egui::Ui, height: f32) {
    ui.set_min_height(height);
    ui.vertical_centered(|ui| {
        ui.add_space(height * 0.4);
        ui.label(egui::RichText::new("No data loaded").strong().size(16.0));
        ui.add_space(6.0);
        ui.label(
            egui::RichText::new("Upload a .txt or .csv file, then click \"PLOT DATA\"").weak(),
        );
    });
}

/// Draw the line chart and handle drag-to-zoom. Returns a zoom or reset
/// action when an interaction completes.
fn show_plot(
    ui: &mut egui::Ui,
    state: &AppState,
    chart: &mut ChartState,
    plot_area_height: f32,
) -> Option<ChartAction> {
    let series = &state.series;
    let config = &state.config;
    let theme = state.theme;
    let view = PlotView::compute(series, config)?;
    let sorted = chart.is_sorted(state);

    // --- Layout: left margin for Y axis, bottom margin for X axis ---
    let left_margin = 76.0_f32;
    let right_margin = 20.0_f32;
    let bottom_margin = 44.0_f32;
    let top_margin = 12.0_f32;
    let plot_height = (plot_area_height - bottom_margin - top_margin).max(100.0);

    let total_height = plot_height + bottom_margin + top_margin;
    let available_width = ui.available_width();
    let total_rect = ui.allocate_space(egui::Vec2::new(available_width, total_height)).1;

    let plot_rect = egui::Rect::from_min_max(
        egui::Pos2::new(total_rect.left() + left_margin, total_rect.top() + top_margin),
        egui::Pos2::new(total_rect.right() - right_margin, total_rect.bottom() - bottom_margin),
    );

    let plot_id = egui::Id::new("chart_plot");
    let response = ui.interact(plot_rect, plot_id, egui::Sense::click_and_drag());
    let action = handle_drag_zoom(chart, &response, &view, plot_rect);

    let painter = ui.painter_at(total_rect);
    painter.rect_filled(total_rect, 6.0, theme.plot_bg());

    // --- Grid ---
    let x_grid = plot_view::grid_ticks(view.x_min, view.x_max);
    let y_grid = plot_view::grid_ticks(view.y_min, view.y_max);
    let grid_stroke = egui::Stroke::new(1.0, theme.grid_color());
    for &xv in &x_grid {
        let x = view.data_to_screen(xv, view.y_min, plot_rect).x;
        painter.extend(egui::Shape::dashed_line(
            &[egui::pos2(x, plot_rect.top()), egui::pos2(x, plot_rect.bottom())],
            grid_stroke,
            3.0,
            3.0,
        ));
    }
    for &yv in &y_grid {
        let y = view.data_to_screen(view.x_min, yv, plot_rect).y;
        painter.extend(egui::Shape::dashed_line(
            &[egui::pos2(plot_rect.left(), y), egui::pos2(plot_rect.right(), y)],
            grid_stroke,
            3.0,
            3.0,
        ));
    }

    // --- Data line, clipped to the plot area ---
    let range = plot_view::visible_range(series, view.x_min, view.x_max, sorted);
    let plot_painter = painter.with_clip_rect(plot_rect);
    let screen_points: Vec<egui::Pos2> = series.points()[range.clone()]
        .iter()
        .map(|p| view.data_to_screen(p.x(), p.y(), plot_rect))
        .collect();
    if screen_points.len() >= 2 {
        plot_painter.add(egui::Shape::line(
            screen_points.clone(),
            egui::Stroke::new(2.0, ACCENT),
        ));
    }
    if series.len() < DOT_THRESHOLD {
        for &pos in &screen_points {
            plot_painter.circle_filled(pos, 3.0, ACCENT);
        }
    }

    draw_selection(&plot_painter, chart, &view, plot_rect);
    draw_axes_and_labels(&painter, state, &view, plot_rect, total_rect, &x_grid, &y_grid, theme);

    if let Some(mouse_pos) = response.hover_pos() {
        if chart.drag_start.is_none() {
            draw_hover_tooltip(&painter, state, &view, plot_rect, mouse_pos, range);
        }
    }

    if !state.is_zoomed() {
        painter.text(
            egui::pos2(plot_rect.right() - 4.0, plot_rect.bottom() - 4.0),
            egui::Align2::RIGHT_BOTTOM,
            "Click and drag to zoom",
            egui::FontId::proportional(10.0),
            theme.plot_text().gamma_multiply(0.5),
        );
    }

    action
}

fn handle_drag_zoom(
    chart: &mut ChartState,
    response: &egui::Response,
    view: &PlotView,
    plot_rect: egui::Rect,
) -> Option<ChartAction> {
    let pointer_x = |resp: &egui::Response| {
        resp.interact_pointer_pos()
            .map(|pos| view.screen_to_data(pos, plot_rect).0)
    };

    if response.drag_started_by(egui::PointerButton::Primary) {
        chart.drag_start = pointer_x(response);
        chart.drag_end = None;
    } else if response.dragged_by(egui::PointerButton::Primary) {
        if let Some(x) = pointer_x(response) {
            chart.drag_end = Some(x);
        }
    }

    if response.drag_stopped() {
        let selection = chart.drag_start.take().zip(chart.drag_end.take());
        if let Some((from, to)) = selection {
            if from != to {
                return Some(ChartAction::Zoom { from, to });
            }
        }
    }

    if response.double_clicked() {
        return Some(ChartAction::ResetZoom);
    }
    None
}

fn draw_selection(
    painter: &egui::Painter,
    chart: &ChartState,
    view: &PlotView,
    plot_rect: egui::Rect,
) {
    let (Some(start), Some(end)) = (chart.drag_start, chart.drag_end) else {
        return;
    };
    let x0 = view.data_to_screen(start, view.y_min, plot_rect).x;
    let x1 = view.data_to_screen(end, view.y_min, plot_rect).x;
    let rect = egui::Rect::from_x_y_ranges(x0.min(x1)..=x0.max(x1), plot_rect.y_range());
    painter.rect_filled(rect, 0.0, ACCENT.gamma_multiply(0.1));
    painter.rect_stroke(
        rect,
        0.0,
        egui::Stroke::new(1.0, ACCENT.gamma_multiply(0.3)),
        egui::StrokeKind::Inside,
    );
}

#[allow(clippy::too_many_arguments)]
fn draw_axes_and_labels(
    painter: &egui::Painter,
    state: &AppState,
    view: &PlotView,
    plot_rect: egui::Rect,
    total_rect: egui::Rect,
    x_grid: &[f64],
    y_grid: &[f64],
    theme: Theme,
) {
    let text_color = theme.plot_text();
    let dim_color = text_color.gamma_multiply(0.7);

    // --- Plot border ---
    painter.rect_stroke(
        plot_rect,
        0.0,
        egui::Stroke::new(1.0, dim_color),
        egui::StrokeKind::Outside,
    );

    // --- X-axis tick labels ---
    for &xval in x_grid {
        let screen_x = view.data_to_screen(xval, view.y_min, plot_rect).x;
        if screen_x < plot_rect.left() || screen_x > plot_rect.right() {
            continue;
        }
        painter.text(
            egui::Pos2::new(screen_x, plot_rect.bottom() + 4.0),
            egui::Align2::CENTER_TOP,
            plot_view::format_tick_value(xval),
            egui::FontId::proportional(12.0),
            dim_color,
        );
    }

    // --- X-axis label ---
    painter.text(
        egui::Pos2::new(plot_rect.center().x, total_rect.bottom() - 4.0),
        egui::Align2::CENTER_BOTTOM,
        &state.config.x_label,
        egui::FontId::proportional(13.0),
        text_color,
    );

    // --- Y-axis tick labels ---
    for &yval in y_grid {
        let screen_y = view.data_to_screen(view.x_min, yval, plot_rect).y;
        if screen_y < plot_rect.top() || screen_y > plot_rect.bottom() {
            continue;
        }
        painter.text(
            egui::Pos2::new(plot_rect.left() - 6.0, screen_y),
            egui::Align2::RIGHT_CENTER,
            plot_view::format_tick_value(yval),
            egui::FontId::proportional(12.0),
            dim_color,
        );
    }

    // --- Y-axis label, rotated to read bottom-to-top ---
    let galley = painter.layout_no_wrap(
        state.config.y_label.clone(),
        egui::FontId::proportional(13.0),
        text_color,
    );
    let pos = egui::Pos2::new(
        total_rect.left() + 4.0,
        plot_rect.center().y + galley.size().x / 2.0,
    );
    painter.add(
        egui::epaint::TextShape::new(pos, galley, text_color)
            .with_angle(-std::f32::consts::FRAC_PI_2),
    );
}

fn draw_hover_tooltip(
    painter: &egui::Painter,
    state: &AppState,
    view: &PlotView,
    plot_rect: egui::Rect,
    mouse_pos: egui::Pos2,
    range: std::ops::Range<usize>,
) {
    let (mouse_data_x, _) = view.screen_to_data(mouse_pos, plot_rect);
    let Some(index) = plot_view::nearest_by_x(&state.series, view, range, mouse_data_x) else {
        return;
    };
    let Some(point) = state.series.get(index) else {
        return;
    };

    let screen_pos = view.data_to_screen(point.x(), point.y(), plot_rect);
    if plot_rect.contains(screen_pos) {
        painter.circle_filled(screen_pos, 6.0, HIGHLIGHT);
        painter.circle_stroke(screen_pos, 6.0, egui::Stroke::new(1.0, egui::Color32::WHITE));
    }

    let config = &state.config;
    let font = egui::FontId::proportional(12.0);
    let header = painter.layout_no_wrap(
        format!("{}: {:.4}", config.x_label, point.x()),
        font.clone(),
        egui::Color32::WHITE,
    );
    let value = painter.layout_no_wrap(
        format!("{}: {:.4}", config.y_label, point.y()),
        font,
        TOOLTIP_VALUE,
    );

    let width = header.size().x.max(value.size().x) + 12.0;
    let height = header.size().y + value.size().y + 10.0;
    // Flip to the left of the cursor near the right edge.
    let left = if mouse_pos.x + 12.0 + width > plot_rect.right() {
        mouse_pos.x - 12.0 - width
    } else {
        mouse_pos.x + 12.0
    };
    let top = (mouse_pos.y - height - 8.0).max(plot_rect.top());
    let bg_rect = egui::Rect::from_min_size(egui::pos2(left, top), egui::vec2(width, height));

    painter.rect_filled(bg_rect, 4.0, TOOLTIP_BG);
    let header_height = header.size().y;
    painter.galley(bg_rect.min + egui::vec2(6.0, 4.0), header, egui::Color32::WHITE);
    painter.galley(
        bg_rect.min + egui::vec2(6.0, 6.0 + header_height),
        value,
        TOOLTIP_VALUE,
    );
}
