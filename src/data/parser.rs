use std::path::Path;

use crate::data::error::{ParseFailure, MAX_FILE_SIZE_MB};
use crate::data::series::{DataPoint, DataSeries};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const BYTES_PER_MB: u64 = 1024 * 1024;

/// Read a two-column data file from disk.
///
/// Fails only when the file cannot be read as text. A file in which no line
/// holds a valid pair yields an empty series; the caller decides whether
/// that is an error.
pub fn read_file(path: &Path) -> Result<DataSeries, ParseFailure> {
    let len = std::fs::metadata(path)?.len();
    if len > MAX_FILE_SIZE_MB * BYTES_PER_MB {
        return Err(ParseFailure::TooLarge {
            size_mb: len.div_ceil(BYTES_PER_MB),
            max_mb: MAX_FILE_SIZE_MB,
        });
    }

    let bytes = std::fs::read(path)?;
    let series = parse_bytes(&bytes)?;
    tracing::debug!("Parsed {} points from {:?}", series.len(), path);
    Ok(series)
}

/// Decode raw file bytes as UTF-8 (skipping a BOM) and parse them.
pub fn parse_bytes(bytes: &[u8]) -> Result<DataSeries, ParseFailure> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let text = std::str::from_utf8(bytes).map_err(|e| ParseFailure::Encoding {
        valid_up_to: e.valid_up_to(),
    })?;
    Ok(parse_content(text))
}

/// Parse text with one `x<delim>y` pair per line.
///
/// The delimiter is any run of commas, spaces or tabs. Only the first two
/// fields of a line are read. Lines that do not start with two finite
/// numbers are skipped.
pub fn parse_content(content: &str) -> DataSeries {
    content
        .trim()
        .split('\n')
        .enumerate()
        .filter_map(|(line_no, line)| {
            let point = parse_line(line);
            if point.is_none() && !line.trim().is_empty() {
                tracing::trace!("Skipping line {}: {:?}", line_no + 1, line);
            }
            point
        })
        .collect()
}

fn parse_line(line: &str) -> Option<DataPoint> {
    let line = line.trim();
    // A leading comma leaves an empty first field, which is never a number.
    if line.starts_with(is_delimiter) {
        return None;
    }

    let mut fields = line.split(is_delimiter).filter(|f| !f.is_empty());
    let x = parse_number(fields.next()?)?;
    let y = parse_number(fields.next()?)?;
    DataPoint::new(x, y)
}

fn is_delimiter(c: char) -> bool {
    matches!(c, ',' | ' ' | '\t')
}

/// Decimal or scientific notation. `inf`/`NaN` spellings and values that
/// overflow to infinity are rejected.
fn parse_number(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}
