//! Retention-time binning and aggregation.
//!
//! Two independent transforms over a peak list:
//! - [`merge_histogram`]: fixed-width bins starting at the sample's own minimum
//!   retention time, normalized to percent of the total intensity.
//! - [`composition_buckets`]: five global retention-time ranges, summed as
//!   absolute intensities.
//!
//! Both are pure functions of their input.

use serde::ser::SerializeMap;
use serde::{
    Serialize,
    Serializer,
};

use crate::errors::BinningError;
use crate::models::PeakPoint;

/// Lower bounds (minutes) of composition buckets 1..=4; bucket 0 starts at 0.
pub const COMPOSITION_BOUNDARIES: [f64; 4] = [20.0, 40.0, 60.0, 80.0];
pub const COMPOSITION_LABELS: [&str; 5] = ["0-20", "20-40", "40-60", "60-80", "80+"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub center: f64,
    pub relative_intensity: f64,
}

/// Relative-intensity histogram of one sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramSeries {
    /// `bins.len() + 1` edges, ascending.
    pub edges: Vec<f64>,
    pub bins: Vec<HistogramBin>,
    /// Sum of all binned intensities before normalization.
    pub total_intensity: f64,
}

impl HistogramSeries {
    pub fn num_bins(&self) -> usize {
        self.bins.len()
    }

    /// True when normalization had a zero denominator and every bin is 0.
    pub fn is_zero_total(&self) -> bool {
        self.total_intensity <= 0.0
    }

    pub fn relative_sum(&self) -> f64 {
        self.bins.iter().map(|b| b.relative_intensity).sum()
    }
}

/// Upper bound on the number of bins of one histogram.
pub const MAX_BINS: usize = 1_000_000;

/// Bin edges from `min` in steps of `width`, ending at the first edge >= `max`.
///
/// Always returns at least two edges, also when `min == max`. Ranges needing
/// more than [`MAX_BINS`] bins are rejected.
pub fn bin_edges(min: f64, max: f64, width: f64) -> Result<Vec<f64>, BinningError> {
    let needed = ((max - min) / width).ceil();
    if !needed.is_finite() || needed > MAX_BINS as f64 {
        return Err(BinningError::TooManyBins {
            span: max - min,
            width,
        });
    }
    let num_bins = (needed as usize).max(1);
    Ok((0..=num_bins).map(|i| min + (i as f64) * width).collect())
}

/// Index of the bin holding `rt`.
///
/// Bins are right-open, `[e_i, e_{i+1})`, except the last one which also takes
/// its right edge (and anything the float edges fell short of).
fn locate_bin(edges: &[f64], rt: f64) -> Option<usize> {
    if edges.len() < 2 || rt < edges[0] {
        return None;
    }
    let upper = edges.partition_point(|&e| e <= rt);
    Some((upper - 1).min(edges.len() - 2))
}

/// Sums intensities into fixed-width retention-time bins and converts the sums
/// to percent of the sample total.
///
/// A sample with zero total intensity yields all-zero relative values.
pub fn merge_histogram(points: &[PeakPoint], width: f64) -> Result<HistogramSeries, BinningError> {
    if !width.is_finite() || width <= 0.0 {
        return Err(BinningError::InvalidMergeWidth(width));
    }
    if points.is_empty() {
        return Err(BinningError::EmptySeries);
    }

    let (min_rt, max_rt) = points.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), p| (lo.min(p.retention_time), hi.max(p.retention_time)),
    );

    let edges = bin_edges(min_rt, max_rt, width)?;
    let mut sums = vec![0.0; edges.len() - 1];
    for point in points {
        if let Some(idx) = locate_bin(&edges, point.retention_time) {
            sums[idx] += point.intensity;
        }
    }

    let total_intensity: f64 = sums.iter().sum();
    let bins = edges
        .windows(2)
        .zip(sums.iter())
        .map(|(edge_pair, &sum)| HistogramBin {
            center: (edge_pair[0] + edge_pair[1]) / 2.0,
            relative_intensity: if total_intensity > 0.0 {
                sum / total_intensity * 100.0
            } else {
                0.0
            },
        })
        .collect();

    Ok(HistogramSeries {
        edges,
        bins,
        total_intensity,
    })
}

/// Absolute intensity sums over the five fixed retention-time ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompositionBuckets {
    sums: [f64; 5],
}

impl CompositionBuckets {
    pub fn from_sums(sums: [f64; 5]) -> Self {
        Self { sums }
    }

    pub fn sums(&self) -> &[f64; 5] {
        &self.sums
    }

    pub fn total(&self) -> f64 {
        self.sums.iter().sum()
    }

    /// `(label, sum)` pairs in fixed bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        COMPOSITION_LABELS.iter().copied().zip(self.sums.iter().copied())
    }
}

impl Serialize for CompositionBuckets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sums.len()))?;
        for (label, sum) in self.iter() {
            map.serialize_entry(label, &sum)?;
        }
        map.end()
    }
}

fn bucket_index(rt: f64) -> usize {
    COMPOSITION_BOUNDARIES.partition_point(|&b| b <= rt)
}

/// Sums intensities into `[0,20) [20,40) [40,60) [60,80) [80,inf)` minutes.
///
/// Empty buckets stay at 0 and the order never changes.
pub fn composition_buckets(points: &[PeakPoint]) -> CompositionBuckets {
    let mut sums = [0.0; 5];
    for point in points.iter().filter(|p| p.retention_time >= 0.0) {
        sums[bucket_index(point.retention_time)] += point.intensity;
    }
    CompositionBuckets { sums }
}
