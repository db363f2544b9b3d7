//! File -> pending -> plotted workflows through the reducer.

use crate::helpers::{linear_series, plotted, write_temp_file};
use approx::assert_relative_eq;
use sciplot::analysis::prompt::build_prompt;
use sciplot::data::parser::read_file;
use sciplot::data::ParseFailure;
use sciplot::render::plot_view::PlotView;
use sciplot::state::app_state::{NO_VALID_DATA_MESSAGE, PARSE_ERROR_MESSAGE};
use sciplot::state::{AnalysisStatus, AppState, Event};

fn load(name: &str, content: &[u8]) -> Event {
    let (_dir, path) = write_temp_file(name, content);
    match read_file(&path) {
        Ok(series) => Event::FileParsed { name: name.into(), series },
        Err(e) => Event::FileFailed { name: name.into(), reason: e.to_string() },
    }
}

#[test]
fn test_load_and_plot_workflow() {
    let content = b"wavenumber,intensity\n400,0.1\n500\t0.4\n600 0.25\n\n700,,0.3,extra\n";
    let state = AppState::new().reduce(load("spectrum.csv", content));

    assert!(state.can_plot());
    assert!(!state.has_data());
    let pending = state.pending.as_ref().unwrap();
    assert_eq!(pending.name, "spectrum.csv");
    assert_eq!(pending.series.len(), 4);

    let state = state.reduce(Event::Commit);
    assert!(state.has_data());
    assert_eq!(state.stats.count, 4);
    assert_eq!(state.stats.min_x, 400.0);
    assert_eq!(state.stats.max_x, 700.0);
    assert_relative_eq!(state.stats.mean_y, 0.2625, epsilon = 1e-12);
}

#[test]
fn test_file_without_pairs_reports_no_data() {
    let state = AppState::new().reduce(load("notes.txt", b"just some\nwords here\n"));
    assert!(!state.can_plot());
    assert_eq!(state.error.as_deref(), Some(NO_VALID_DATA_MESSAGE));
}

#[test]
fn test_binary_file_reports_parse_error() {
    let (_dir, path) = write_temp_file("blob.csv", &[0x31, 0x2c, 0xff, 0xfe, 0x0a]);
    assert!(matches!(read_file(&path), Err(ParseFailure::Encoding { valid_up_to: 2 })));

    let state = AppState::new().reduce(load("blob.csv", &[0x31, 0x2c, 0xff, 0xfe, 0x0a]));
    assert_eq!(state.error.as_deref(), Some(PARSE_ERROR_MESSAGE));
    assert!(state.pending.is_none());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_file(&dir.path().join("absent.csv"));
    assert!(matches!(result, Err(ParseFailure::Io(_))));
}

#[test]
fn test_failed_load_keeps_plotted_data() {
    let state = plotted(linear_series(5)).reduce(load("bad.csv", &[0xc3, 0x28]));
    assert!(state.has_data());
    assert_eq!(state.stats.count, 5);
    assert!(state.error.is_some());
}

#[test]
fn test_replot_resets_zoom_and_analysis() {
    let state = plotted(linear_series(10))
        .reduce(Event::ZoomX { from: 2.0, to: 4.0 })
        .reduce(Event::AnalysisStarted);
    assert!(state.is_zoomed());
    assert!(state.is_analyzing());
    let first_generation = state.generation;

    let state = state
        .reduce(load("second.txt", b"0 0\n1 1\n"))
        .reduce(Event::Commit);
    assert!(!state.is_zoomed());
    assert_eq!(state.analysis, AnalysisStatus::Idle);
    assert_eq!(state.generation, first_generation + 1);
    assert_eq!(state.series_name.as_deref(), Some("second.txt"));
}

#[test]
fn test_zoomed_view_follows_selection() {
    let state = plotted(linear_series(11)).reduce(Event::ZoomX { from: 8.0, to: 2.0 });
    let view = PlotView::compute(&state.series, &state.config).unwrap();
    assert_eq!((view.x_min, view.x_max), (2.0, 8.0));
    // y = 2x + 1 over [2, 8] is [5, 17], padded by 5%.
    assert_relative_eq!(view.y_min, 4.4, epsilon = 1e-9);
    assert_relative_eq!(view.y_max, 17.6, epsilon = 1e-9);
}

#[test]
fn test_prompt_from_plotted_state() {
    let state = plotted(linear_series(100))
        .reduce(Event::SetXLabel("Time (s)".into()))
        .reduce(Event::SetYLabel("Voltage (mV)".into()));
    let prompt = build_prompt(
        &state.series,
        &state.stats,
        &state.config.x_label,
        &state.config.y_label,
        30,
    )
    .unwrap();

    assert!(prompt.contains("- X-Axis: Time (s)"));
    assert!(prompt.contains("- Y-Axis: Voltage (mV)"));
    assert!(prompt.contains("- Count: 100"));
    assert!(prompt.contains("- Mean Y: 100.0000"));
    // stride ceil(100 / 30) = 4 keeps 25 points
    assert_eq!(prompt.matches("), (").count() + 1, 25);
    assert!(prompt.contains("(96.00, 193.00)"));
}
