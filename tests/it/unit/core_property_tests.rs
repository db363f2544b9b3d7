//! Properties of the parse -> statistics -> downsample pipeline.

use approx::assert_relative_eq;
use sciplot::data::parser::parse_content;
use sciplot::data::DataSeries;
use sciplot::processing::statistics::DataStats;
use sciplot::processing::{downsample, DownsampleError};

fn pairs(series: &DataSeries) -> Vec<(f64, f64)> {
    series.iter().map(|p| (p.x(), p.y())).collect()
}

/// Small deterministic generator so the property checks cover varied input
/// without pulling in a property-testing crate.
fn lcg_series(seed: u64, len: usize) -> DataSeries {
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((state >> 33) as f64 / (1u64 << 31) as f64) * 200.0 - 100.0
    };
    DataSeries::from_pairs((0..len).map(|_| (next(), next())))
}

#[test]
fn test_parse_examples() {
    assert!(parse_content("").is_empty());
    assert_eq!(
        pairs(&parse_content("1,2\n3\t4\n5 6")),
        vec![(1.0, 2.0), (3.0, 4.0), (5.0, 6.0)]
    );
    assert_eq!(pairs(&parse_content("a,b\n1,2")), vec![(1.0, 2.0)]);
    assert_eq!(pairs(&parse_content("1,2,ignored\n")), vec![(1.0, 2.0)]);
}

#[test]
fn test_stats_invariants_hold_for_varied_series() {
    for seed in 0..20 {
        let series = lcg_series(seed, 1 + seed as usize * 7);
        let stats = DataStats::compute(&series);
        assert_eq!(stats.count, series.len());
        assert!(stats.min_y <= stats.mean_y);
        assert!(stats.mean_y <= stats.max_y);
        assert!(stats.min_x <= stats.max_x);
        assert!(stats.std_y >= 0.0);
    }
}

#[test]
fn test_stats_invariants_hold_at_numeric_extremes() {
    for text in ["0,0.1\n1,0.1\n2,0.1", "0,1e308\n1,1e308", "0,1e308\n1,-1e308\n2,1e308"] {
        let series = parse_content(text);
        let stats = DataStats::compute(&series);
        assert_eq!(stats.count, series.len());
        assert!(stats.min_y <= stats.mean_y && stats.mean_y <= stats.max_y, "{text}: {stats:?}");
        assert!(stats.std_y.is_finite(), "{text}: {stats:?}");
    }
    let constant = DataStats::compute(&parse_content("0,0.1\n1,0.1\n2,0.1"));
    assert_eq!(constant.std_y, 0.0);
}

#[test]
fn test_stats_edge_cases() {
    let single = DataStats::compute(&DataSeries::from_pairs([(0.0, 5.0)]));
    assert_eq!(single.std_y, 0.0);
    assert_eq!(DataStats::compute(&DataSeries::default()), DataStats::default());

    let textbook = DataSeries::from_pairs(
        [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]
            .iter()
            .enumerate()
            .map(|(i, &y)| (i as f64, y)),
    );
    assert_relative_eq!(DataStats::compute(&textbook).std_y, 2.0);
}

#[test]
fn test_downsample_laws() {
    for seed in 0..10 {
        let series = lcg_series(seed, 10 + seed as usize * 13);
        let len = series.len();

        assert_eq!(downsample(&series, len).unwrap(), series);
        assert_eq!(downsample(&series, len + 5).unwrap(), series);

        for target in [1, 3, 7, len - 1] {
            let sampled = downsample(&series, target).unwrap();
            let stride = len.div_ceil(target);
            assert!(sampled.len() <= target);
            assert_eq!(sampled.get(0), series.get(0));
            for (i, point) in sampled.iter().enumerate() {
                assert_eq!(Some(point), series.get(i * stride));
            }
        }
    }
}

#[test]
fn test_downsample_ten_to_one() {
    let series = lcg_series(42, 10);
    let sampled = downsample(&series, 1).unwrap();
    assert_eq!(sampled.len(), 1);
    assert_eq!(sampled.get(0), series.get(0));
}

#[test]
fn test_downsample_zero_target_rejected() {
    assert_eq!(downsample(&lcg_series(1, 5), 0), Err(DownsampleError::ZeroTarget));
}

#[test]
fn test_text_rendering_round_trip() {
    for seed in 0..5 {
        let series = lcg_series(seed, 50);
        let text: String = series
            .iter()
            .map(|p| format!("{},{}\n", p.x(), p.y()))
            .collect();
        let parsed = parse_content(&text);
        assert_eq!(parsed.len(), series.len());
        for (a, b) in parsed.iter().zip(series.iter()) {
            assert_relative_eq!(a.x(), b.x());
            assert_relative_eq!(a.y(), b.y());
        }
    }
}
