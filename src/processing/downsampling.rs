use thiserror::Error;

use crate::data::series::DataSeries;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownsampleError {
    #[error("Downsample target must be at least one point")]
    ZeroTarget,
}

/// Fixed-stride thinning to at most `max_points` points.
///
/// Keeps indices `0, stride, 2 * stride, ...` with
/// `stride = ceil(len / max_points)`, so the same input always gives the
/// same output. Series already within the target are returned unchanged.
pub fn downsample(series: &DataSeries, max_points: usize) -> Result<DataSeries, DownsampleError> {
    if max_points == 0 {
        return Err(DownsampleError::ZeroTarget);
    }
    if series.len() <= max_points {
        return Ok(series.clone());
    }

    let stride = series.len().div_ceil(max_points);
    Ok(series.iter().step_by(stride).copied().collect())
}
