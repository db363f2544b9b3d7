//! CSV export back through the parser.

use crate::helpers::{linear_series, write_temp_file};
use sciplot::data::export::{to_csv_string, write_csv};
use sciplot::data::parser::{parse_content, read_file};
use sciplot::data::DataSeries;

#[test]
fn test_csv_text_round_trip() {
    let series = DataSeries::from_pairs([
        (0.1, -2.5),
        (1e-9, 3.0e12),
        (-0.0, 7.0),
        (123456.789, 0.333333333333),
    ]);
    let text = to_csv_string(&series).unwrap();
    assert_eq!(parse_content(&text), series);
}

#[test]
fn test_csv_file_round_trip() {
    let series = linear_series(250);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Data_Visualization_data.csv");
    write_csv(&series, &path).unwrap();
    assert_eq!(read_file(&path).unwrap(), series);
}

#[test]
fn test_reexport_keeps_parsed_points() {
    let (_dir, path) = write_temp_file("in.txt", b"# header\n1\t2\textra\n3 4\n");
    let series = read_file(&path).unwrap();
    let text = to_csv_string(&series).unwrap();
    assert_eq!(text, "1.0,2.0\n3.0,4.0\n");
}

#[test]
fn test_write_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.csv");
    assert!(write_csv(&linear_series(3), &path).is_err());
}
