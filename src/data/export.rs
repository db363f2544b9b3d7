use std::path::Path;

use crate::data::error::ExportError;
use crate::data::series::DataSeries;

/// Render a series as headerless `x,y` CSV text, one point per line.
///
/// Floats are written in shortest round-trip form, so parsing the output
/// reproduces the series exactly.
pub fn to_csv_string(series: &DataSeries) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    for point in series {
        writer.serialize((point.x(), point.y()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::IntoInner(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Write a series to `path` as headerless `x,y` CSV.
pub fn write_csv(series: &DataSeries, path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    for point in series {
        writer.serialize((point.x(), point.y()))?;
    }
    writer.flush()?;
    tracing::info!("Exported {} points to {:?}", series.len(), path);
    Ok(())
}

/// File name for a PNG export of the chart.
pub fn png_file_name(title: &str) -> String {
    format!("{}_plot.png", file_stem(title))
}

/// File name for a CSV export of the data.
pub fn csv_file_name(title: &str) -> String {
    format!("{}_data.csv", file_stem(title))
}

/// The chart title with each whitespace run replaced by one underscore.
fn file_stem(title: &str) -> String {
    let mut stem = String::with_capacity(title.len());
    let mut in_whitespace = false;
    for c in title.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                stem.push('_');
            }
            in_whitespace = true;
        } else {
            stem.push(c);
            in_whitespace = false;
        }
    }
    stem
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_text_layout() {
        let series = DataSeries::from_pairs([(1.0, 2.5), (-3.0, 1e-7)]);
        let text = to_csv_string(&series).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "1.0,2.5");
        assert!(lines[1].starts_with("-3.0,"));
    }

    #[test]
    fn test_empty_series_exports_nothing() {
        assert_eq!(to_csv_string(&DataSeries::default()).unwrap(), "");
    }

    #[test]
    fn test_png_file_name() {
        assert_eq!(png_file_name("Data Visualization"), "Data_Visualization_plot.png");
        assert_eq!(png_file_name("IR  \tspectrum"), "IR_spectrum_plot.png");
        assert_eq!(png_file_name(" a b "), "_a_b__plot.png");
        assert_eq!(png_file_name(""), "_plot.png");
        assert_eq!(csv_file_name("Raman run 2"), "Raman_run_2_data.csv");
    }
}
