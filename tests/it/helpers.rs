//! Shared fixtures for the integration tests.

use std::io::Write;
use std::path::PathBuf;

use sciplot::data::DataSeries;
use sciplot::state::{AppState, Event};
use tempfile::TempDir;

/// Write `content` to `name` inside a fresh temp dir. Keep the `TempDir`
/// alive for as long as the file is needed.
pub fn write_temp_file(name: &str, content: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create temp file");
    file.write_all(content).expect("write temp file");
    (dir, path)
}

/// A series of `n` points on y = 2x + 1.
pub fn linear_series(n: usize) -> DataSeries {
    DataSeries::from_pairs((0..n).map(|i| (i as f64, 2.0 * i as f64 + 1.0)))
}

/// State with `series` loaded and plotted.
pub fn plotted(series: DataSeries) -> AppState {
    AppState::new()
        .reduce(Event::FileParsed {
            name: "fixture.csv".into(),
            series,
        })
        .reduce(Event::Commit)
}
