use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use eframe::egui;

use crate::analysis::{self, AnalysisConfig};
use crate::data::{export, parser};
use crate::state::app_state::{AnalysisStatus, AppState, VERSION};
use crate::state::theme::ERROR_TEXT;
use crate::state::Event;
use crate::ui::analysis_panel::{self, AnalysisAction};
use crate::ui::chart_panel::{self, ChartAction, ChartState};
use crate::ui::sidebar::{self, SidebarAction, SidebarState};

/// Extensions accepted by the open dialog and by drag-and-drop.
const DATA_EXTENSIONS: [&str; 2] = ["csv", "txt"];

/// What to do when a screenshot arrives.
enum PendingScreenshot {
    SaveFile,
    Clipboard,
}

/// One-shot background job whose result is picked up by `update`.
struct PendingJob {
    result: Arc<Mutex<Option<Event>>>,
}

impl PendingJob {
    fn spawn<F>(job: F) -> Self
    where
        F: FnOnce() -> Event + Send + 'static,
    {
        let result = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&result);
        std::thread::spawn(move || {
            let event = job();
            if let Ok(mut slot) = slot.lock() {
                *slot = Some(event);
            }
        });
        Self { result }
    }

    fn take(&self) -> Option<Event> {
        self.result.lock().ok().and_then(|mut slot| slot.take())
    }
}

/// The main SciPlot application.
pub struct SciPlotApp {
    pub state: AppState,
    sidebar: SidebarState,
    chart: ChartState,
    analysis_config: AnalysisConfig,
    /// Async file load in progress.
    pending_load: Option<PendingJob>,
    /// Analysis request in flight.
    pending_analysis: Option<PendingJob>,
    /// Pending screenshot action (save file or clipboard).
    pending_screenshot: Option<PendingScreenshot>,
}

impl SciPlotApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let state = AppState::new();

        let ctx = &cc.egui_ctx;
        let mut style = (*ctx.style()).clone();
        style.text_styles.insert(egui::TextStyle::Body, egui::FontId::proportional(14.5));
        style.text_styles.insert(egui::TextStyle::Button, egui::FontId::proportional(14.0));
        style.text_styles.insert(egui::TextStyle::Heading, egui::FontId::proportional(20.0));
        style.text_styles.insert(egui::TextStyle::Small, egui::FontId::proportional(12.0));
        style.spacing.button_padding = egui::vec2(10.0, 5.0);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        ctx.set_style(style);
        apply_visuals(ctx, &state);

        let analysis_config = AnalysisConfig::from_env();
        if !analysis_config.has_api_key() {
            tracing::warn!("No API key configured; analysis will be unavailable");
        }
        tracing::debug!("Analysis config: {analysis_config:?}");

        Self {
            state,
            sidebar: SidebarState::default(),
            chart: ChartState::default(),
            analysis_config,
            pending_load: None,
            pending_analysis: None,
            pending_screenshot: None,
        }
    }

    fn dispatch(&mut self, event: Event) {
        self.state = std::mem::take(&mut self.state).reduce(event);
    }

    fn open_file_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Data Files", &DATA_EXTENSIONS)
            .add_filter("All Files", &["*"])
            .pick_file()
        {
            self.load_file(&path);
        }
    }

    /// Parse a data file on a background thread so the UI stays responsive.
    /// A newer load replaces one still in flight.
    fn load_file(&mut self, path: &Path) {
        let path_buf = path.to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        tracing::info!("Loading {:?}", path_buf);

        self.pending_load = Some(PendingJob::spawn(move || match parser::read_file(&path_buf) {
            Ok(series) => Event::FileParsed { name, series },
            Err(e) => Event::FileFailed {
                name,
                reason: e.to_string(),
            },
        }));
    }

    fn start_analysis(&mut self) {
        self.dispatch(Event::AnalysisStarted);
        let AnalysisStatus::Running { generation } = self.state.analysis else {
            return;
        };

        let config = self.analysis_config.clone();
        let series = self.state.series.clone();
        let stats = self.state.stats;
        let x_label = self.state.config.x_label.clone();
        let y_label = self.state.config.y_label.clone();
        self.pending_analysis = Some(PendingJob::spawn(move || {
            let text = analysis::run_analysis(&config, &series, &stats, &x_label, &y_label);
            Event::AnalysisFinished { generation, text }
        }));
    }

    fn export_csv(&mut self) {
        if !self.state.has_data() {
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(export::csv_file_name(&self.state.config.title))
            .add_filter("CSV Files", &["csv"])
            .save_file()
        {
            if let Err(e) = export::write_csv(&self.state.series, &path) {
                self.dispatch(Event::ExportFailed(e.to_string()));
            }
        }
    }

    fn request_screenshot(&mut self, ctx: &egui::Context, action: PendingScreenshot) {
        self.pending_screenshot = Some(action);
        ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
    }

    fn handle_screenshot(&mut self, ctx: &egui::Context) {
        if self.pending_screenshot.is_none() {
            return;
        }
        let pending = &mut self.pending_screenshot;
        let ready = ctx.input(|i| take_ready_screenshot(pending, &i.raw.events));
        let Some((action, image)) = ready else {
            return;
        };

        let (rgba, width, height) =
            crop_rgba(&image, self.chart.last_frame_rect, ctx.pixels_per_point());
        let result = match action {
            PendingScreenshot::SaveFile => save_png(&self.state.config.title, rgba, width, height),
            PendingScreenshot::Clipboard => copy_image(rgba, width, height),
        };
        if let Err(reason) = result {
            self.dispatch(Event::ExportFailed(reason));
        }
    }

    fn poll_jobs(&mut self, ctx: &egui::Context) {
        if let Some(event) = self.pending_load.as_ref().and_then(PendingJob::take) {
            self.pending_load = None;
            self.dispatch(event);
        }
        if let Some(event) = self.pending_analysis.as_ref().and_then(PendingJob::take) {
            self.pending_analysis = None;
            self.dispatch(event);
        }
        if self.pending_load.is_some() || self.pending_analysis.is_some() {
            ctx.request_repaint();
        }
    }

    fn dropped_file(ctx: &egui::Context) -> Option<PathBuf> {
        ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .find(|path| has_data_extension(path))
        })
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        let mut toggle_theme = false;
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(16, 8)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.visuals_mut().override_text_color = Some(ui.visuals().strong_text_color());
                    ui.heading("SciPlot");
                    ui.visuals_mut().override_text_color = None;
                    ui.label(egui::RichText::new("Scientific Data Visualization").weak());

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(self.state.theme.toggle_label()).clicked() {
                            toggle_theme = true;
                        }
                        ui.separator();
                        ui.small(format!("v{VERSION}"));

                        if self.state.has_data() {
                            ui.separator();
                            let stats = &self.state.stats;
                            ui.label(format!("Mean Y: {:.3}", stats.mean_y));
                            ui.label(format!("Points: {}", stats.count));
                        }
                    });
                });
            });
        if toggle_theme {
            self.dispatch(Event::ToggleTheme);
        }
    }

    fn show_error(&mut self, ui: &mut egui::Ui) {
        let Some(message) = self.state.error.clone() else {
            return;
        };
        let mut dismiss = false;
        egui::Frame::group(ui.style())
            .stroke(egui::Stroke::new(1.0, ERROR_TEXT))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(ERROR_TEXT, message);
                    if ui.small_button("dismiss").clicked() {
                        dismiss = true;
                    }
                });
            });
        ui.add_space(6.0);
        if dismiss {
            self.dispatch(Event::DismissError);
        }
    }
}

impl eframe::App for SciPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        apply_visuals(ctx, &self.state);

        // Screenshots requested last frame arrive as input events.
        self.handle_screenshot(ctx);
        self.poll_jobs(ctx);

        if let Some(path) = Self::dropped_file(ctx) {
            self.load_file(&path);
        }

        self.show_header(ctx);

        let mut sidebar_actions = Vec::new();
        egui::SidePanel::left("sidebar")
            .resizable(true)
            .default_width(280.0)
            .min_width(220.0)
            .show(ctx, |ui| {
                sidebar_actions = sidebar::show_sidebar(ui, &self.state, &mut self.sidebar);
            });
        for action in sidebar_actions {
            match action {
                SidebarAction::OpenFile => self.open_file_dialog(),
                SidebarAction::Emit(event) => self.dispatch(event),
            }
        }

        if self.pending_load.is_some() {
            egui::Window::new("Loading")
                .collapsible(false)
                .resizable(false)
                .title_bar(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading file...");
                    });
                });
        }

        let mut chart_action = ChartAction::None;
        let mut analysis_action = AnalysisAction::None;
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_error(ui);
            let panel_height = (ui.available_height() * 0.65).max(320.0);
            egui::ScrollArea::vertical().show(ui, |ui| {
                chart_action =
                    chart_panel::show_chart_panel(ui, &self.state, &mut self.chart, panel_height);
                ui.add_space(10.0);
                analysis_action = analysis_panel::show_analysis_panel(ui, &self.state);
            });
        });

        match chart_action {
            ChartAction::None => {}
            ChartAction::Zoom { from, to } => self.dispatch(Event::ZoomX { from, to }),
            ChartAction::ResetZoom => self.dispatch(Event::ResetZoom),
            ChartAction::ToggleTable => self.dispatch(Event::ToggleTable),
            ChartAction::ExportImageSave => self.request_screenshot(ctx, PendingScreenshot::SaveFile),
            ChartAction::ExportImageClipboard => {
                self.request_screenshot(ctx, PendingScreenshot::Clipboard)
            }
            ChartAction::ExportCsv => self.export_csv(),
        }
        if let AnalysisAction::Analyze = analysis_action {
            self.start_analysis();
        }
    }
}

fn apply_visuals(ctx: &egui::Context, state: &AppState) {
    let mut vis = state.theme.visuals();
    vis.window_corner_radius = egui::CornerRadius::same(8);
    vis.widgets.inactive.corner_radius = egui::CornerRadius::same(6);
    vis.widgets.hovered.corner_radius = egui::CornerRadius::same(6);
    vis.widgets.active.corner_radius = egui::CornerRadius::same(6);
    ctx.set_visuals(vis);
}

/// Pair the pending action with a screenshot from this frame's events.
///
/// The capture can arrive several frames after the request, so the action
/// stays pending until an image is actually delivered.
fn take_ready_screenshot(
    pending: &mut Option<PendingScreenshot>,
    events: &[egui::Event],
) -> Option<(PendingScreenshot, Arc<egui::ColorImage>)> {
    let image = events.iter().find_map(|event| match event {
        egui::Event::Screenshot { image, .. } => Some(Arc::clone(image)),
        _ => None,
    })?;
    pending.take().map(|action| (action, image))
}

fn has_data_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .is_some_and(|e| DATA_EXTENSIONS.contains(&e.as_str()))
}

/// Crop a screenshot to `rect` (in points) and return RGBA bytes with the
/// pixel dimensions. Without a rect the whole image is returned.
fn crop_rgba(image: &egui::ColorImage, rect: Option<egui::Rect>, ppp: f32) -> (Vec<u8>, usize, usize) {
    let full_w = image.width();
    let full_h = image.height();
    let (x0, y0, x1, y1) = match rect {
        Some(rect) => (
            ((rect.left() * ppp).max(0.0) as usize).min(full_w),
            ((rect.top() * ppp).max(0.0) as usize).min(full_h),
            ((rect.right() * ppp).ceil().max(0.0) as usize).min(full_w),
            ((rect.bottom() * ppp).ceil().max(0.0) as usize).min(full_h),
        ),
        None => (0, 0, full_w, full_h),
    };
    let width = x1.saturating_sub(x0);
    let height = y1.saturating_sub(y0);
    let mut rgba = Vec::with_capacity(width * height * 4);
    for row in y0..y1 {
        for c in &image.pixels[row * full_w + x0..row * full_w + x1] {
            rgba.extend_from_slice(&[c.r(), c.g(), c.b(), c.a()]);
        }
    }
    (rgba, width, height)
}

fn save_png(title: &str, rgba: Vec<u8>, width: usize, height: usize) -> Result<(), String> {
    let Some(path) = rfd::FileDialog::new()
        .set_file_name(export::png_file_name(title))
        .add_filter("PNG Image", &["png"])
        .save_file()
    else {
        return Ok(());
    };
    let img = image::RgbaImage::from_raw(width as u32, height as u32, rgba)
        .ok_or_else(|| "screenshot buffer has the wrong size".to_string())?;
    img.save(&path).map_err(|e| format!("failed to save image: {e}"))?;
    tracing::info!("Saved chart image to {:?}", path);
    Ok(())
}

fn copy_image(rgba: Vec<u8>, width: usize, height: usize) -> Result<(), String> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| format!("failed to access clipboard: {e}"))?;
    clipboard
        .set_image(arboard::ImageData {
            width,
            height,
            bytes: std::borrow::Cow::Owned(rgba),
        })
        .map_err(|e| format!("failed to copy to clipboard: {e}"))?;
    tracing::info!("Copied chart image to clipboard");
    Ok(())
}
