//! Fetch-and-aggregate pass over a selection.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Display;
use tracing::{
    info,
    instrument,
    warn,
};

use crate::binning::{
    CompositionBuckets,
    HistogramSeries,
    composition_buckets,
    merge_histogram,
};
use crate::catalog::SampleCatalog;
use crate::client::PeakSource;
use crate::errors::{
    BinningError,
    FetchError,
    FoodRepoError,
};
use crate::models::DetectionMode;

/// Engine output for one successfully fetched sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleProfile {
    pub sample_id: String,
    pub label: String,
    pub histogram: HistogramSeries,
    pub composition: CompositionBuckets,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WarningKind {
    /// The sample was skipped.
    Fetch(FetchError),
    /// The sample was skipped.
    EmptyPeakList,
    /// The sample was skipped.
    Binning(BinningError),
    /// The sample was kept with an all-zero histogram.
    ZeroTotalIntensity,
}

/// A user-facing, non-fatal problem with one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleWarning {
    pub sample_id: String,
    pub kind: WarningKind,
}

impl SampleWarning {
    /// Whether the sample was left out of the charts.
    pub fn is_skip(&self) -> bool {
        !matches!(self.kind, WarningKind::ZeroTotalIntensity)
    }
}

impl Display for SampleWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            WarningKind::Fetch(FetchError::RemoteFetchFailed { status_code }) => write!(
                f,
                "Failed to fetch data for sample ID {}: HTTP {}",
                self.sample_id, status_code
            ),
            WarningKind::Fetch(e) => {
                write!(f, "Failed to fetch data for sample ID {}: {}", self.sample_id, e)
            }
            WarningKind::Binning(e) => {
                write!(f, "Could not bin sample ID {}: {}", self.sample_id, e)
            }
            WarningKind::EmptyPeakList => {
                write!(f, "Sample ID {} returned an empty peak list", self.sample_id)
            }
            WarningKind::ZeroTotalIntensity => write!(
                f,
                "Sample ID {} has zero total intensity, relative intensities shown as 0",
                self.sample_id
            ),
        }
    }
}

/// Everything one confirm action produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub profiles: Vec<SampleProfile>,
    pub warnings: Vec<SampleWarning>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch and aggregate one sample, recording either its profile or a warning.
    ///
    /// Never fails; every per-sample problem ends up in `warnings`.
    #[instrument(skip(self, source, label))]
    pub fn process_sample<S: PeakSource + ?Sized>(
        &mut self,
        source: &S,
        sample_id: &str,
        label: String,
        mode: DetectionMode,
        merge_width: f64,
    ) {
        let peaks = match source.fetch_peaks(sample_id, mode) {
            Ok(peaks) => peaks,
            Err(e) => {
                warn!("Fetch failed for {}: {}", sample_id, e);
                self.push_warning(sample_id, WarningKind::Fetch(e));
                return;
            }
        };

        let histogram = match merge_histogram(&peaks, merge_width) {
            Ok(histogram) => histogram,
            Err(BinningError::EmptySeries) => {
                warn!("Empty peak list for {}", sample_id);
                self.push_warning(sample_id, WarningKind::EmptyPeakList);
                return;
            }
            Err(e) => {
                warn!("Binning failed for {}: {}", sample_id, e);
                self.push_warning(sample_id, WarningKind::Binning(e));
                return;
            }
        };

        if histogram.is_zero_total() {
            warn!("Zero total intensity for {}", sample_id);
            self.push_warning(sample_id, WarningKind::ZeroTotalIntensity);
        }

        self.profiles.push(SampleProfile {
            sample_id: sample_id.to_string(),
            label,
            histogram,
            composition: composition_buckets(&peaks),
        });
    }

    fn push_warning(&mut self, sample_id: &str, kind: WarningKind) {
        self.warnings.push(SampleWarning {
            sample_id: sample_id.to_string(),
            kind,
        });
    }
}

/// Selected ids in catalog row order; ids unknown to the catalog go last.
pub fn ordered_selection<'a>(
    catalog: &SampleCatalog,
    selection: &'a BTreeSet<String>,
) -> Vec<&'a str> {
    let mut ids: Vec<&str> = selection.iter().map(String::as_str).collect();
    ids.sort_by_key(|id| catalog.position(id).unwrap_or(usize::MAX));
    ids
}

/// Run the fetch → bin → aggregate pass for every selected sample.
///
/// Samples are processed one at a time. A failing sample only adds a warning;
/// the only batch-level failures are an empty selection and an invalid width.
pub fn run_batch<S: PeakSource + ?Sized>(
    source: &S,
    catalog: &SampleCatalog,
    selection: &BTreeSet<String>,
    mode: DetectionMode,
    merge_width: f64,
) -> Result<BatchReport, FoodRepoError> {
    run_batch_with(source, catalog, selection, mode, merge_width, |_| {})
}

/// Same as [`run_batch`], calling `on_sample` with each id once it is done.
#[instrument(
    skip(source, catalog, selection, on_sample),
    fields(num_selected = selection.len())
)]
pub fn run_batch_with<S, F>(
    source: &S,
    catalog: &SampleCatalog,
    selection: &BTreeSet<String>,
    mode: DetectionMode,
    merge_width: f64,
    mut on_sample: F,
) -> Result<BatchReport, FoodRepoError>
where
    S: PeakSource + ?Sized,
    F: FnMut(&str),
{
    if selection.is_empty() {
        return Err(FoodRepoError::EmptySelection);
    }
    if !merge_width.is_finite() || merge_width <= 0.0 {
        return Err(BinningError::InvalidMergeWidth(merge_width).into());
    }

    let mut report = BatchReport::new();
    for sample_id in ordered_selection(catalog, selection) {
        report.process_sample(source, sample_id, catalog.label_for(sample_id), mode, merge_width);
        on_sample(sample_id);
    }

    info!(
        "Batch finished: {} profiles, {} warnings",
        report.profiles.len(),
        report.warnings.len()
    );
    Ok(report)
}
