use crate::data::series::DataSeries;
use crate::processing::downsampling::{downsample, DownsampleError};
use crate::processing::statistics::DataStats;

/// Build the interpretation prompt for a dataset.
///
/// Only a stride-downsampled sample of at most `sample_points` points is
/// included; the statistics always describe the full series.
pub fn build_prompt(
    series: &DataSeries,
    stats: &DataStats,
    x_label: &str,
    y_label: &str,
    sample_points: usize,
) -> Result<String, DownsampleError> {
    let sample = downsample(series, sample_points)?;
    let sample_text = sample
        .iter()
        .map(|p| format!("({:.2}, {:.2})", p.x(), p.y()))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!(
        "As a senior data scientist, analyze the following scientific dataset.

Context:
- X-Axis: {x_label}
- Y-Axis: {y_label}

Statistics:
- Count: {count}
- X Range: {min_x:.4} to {max_x:.4}
- Y Range: {min_y:.4} to {max_y:.4}
- Mean Y: {mean_y:.4}
- Std Dev Y: {std_y:.4}

Sample Data Points (X, Y):
[{sample_text}]

Please provide a concise scientific interpretation.
1. Describe the general trend (linear, exponential, periodic, noise, peaks, etc.).
2. Identify any potential anomalies or significant features (like peaks in spectra).
3. Suggest what physical phenomenon might be represented based on the axis labels (e.g., if Wavenumber vs Intensity, discuss IR/Raman peaks).

Keep the tone professional and scientific. Format with clear paragraphs.
",
        count = stats.count,
        min_x = stats.min_x,
        max_x = stats.max_x,
        min_y = stats.min_y,
        max_y = stats.max_y,
        mean_y = stats.mean_y,
        std_y = stats.std_y,
    ))
}
