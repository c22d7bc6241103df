use crate::metrics::{Histogram, histogram_edges};
use pretty_assertions::assert_eq;

const BOUNDS: &[f64] = &[0.0, 500.0, 1000.0, 2000.0, 5000.0];

fn strictly_increasing(edges: &[f64]) -> bool {
    edges.windows(2).all(|w| w[0] < w[1])
}

#[test]
fn bounds_at_or_above_max_are_replaced() {
    let edges = histogram_edges(100.0, 1000.0, BOUNDS, 50.0);

    assert_eq!(edges, vec![0.0, 500.0, 1050.0]);
}

#[test]
fn max_above_every_bound_appends_final_edge() {
    let edges = histogram_edges(10.0, 8000.0, BOUNDS, 100.0);

    assert_eq!(edges, vec![0.0, 500.0, 1000.0, 2000.0, 5000.0, 8100.0]);
}

#[test]
fn all_bounds_dropped_is_single_bucket() {
    let edges = histogram_edges(0.0, 0.0, BOUNDS, 100.0);

    assert_eq!(edges, vec![0.0, 100.0]);
}

#[test]
fn bounds_above_every_sample_get_a_lower_edge() {
    let edges = histogram_edges(20.0, 50.0, &[100.0, 200.0], 10.0);

    assert_eq!(edges, vec![0.0, 60.0]);
}

#[test]
fn edges_are_always_increasing_and_cover_max() {
    let cases = [
        (0.0, 0.0),
        (0.0, 0.5),
        (1.0, 499.0),
        (500.0, 500.0),
        (3.0, 1999.9),
        (4000.0, 5000.0),
        (0.0, 123456.0),
    ];

    for (min, max) in cases {
        let edges = histogram_edges(min, max, BOUNDS, 100.0);
        assert!(edges.len() >= 2, "{edges:?}");
        assert!(strictly_increasing(&edges), "{edges:?}");
        assert!(*edges.last().unwrap() > max, "{edges:?}");
    }
}

#[test]
fn samples_are_counted_in_half_open_bins() {
    let samples = [0.0, 499.0, 500.0, 900.0, 1000.0];

    let h = Histogram::from_samples(&samples, BOUNDS, 100.0).unwrap();

    // edges: 0, 500, 1100
    let counts: Vec<u64> = h.bins().iter().map(|b| b.count).collect();
    assert_eq!(h.edges(), &[0.0, 500.0, 1100.0]);
    assert_eq!(counts, vec![2, 3]);
    assert_eq!(h.total(), 5);
}

#[test]
fn empty_samples_have_no_histogram() {
    assert!(Histogram::from_samples(&[], BOUNDS, 100.0).is_none());
}
