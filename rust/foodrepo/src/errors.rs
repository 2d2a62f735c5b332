use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FoodRepoError {
    #[error("Sample catalog unavailable at '{path}': {reason}")]
    CatalogUnavailable { path: PathBuf, reason: String },

    #[error("Failed to parse sample catalog at '{path}': {source}")]
    CatalogFormat {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("No samples selected")]
    EmptySelection,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Binning(#[from] BinningError),
}

/// Failures of a single peak list request.
///
/// These never abort a batch; the pipeline turns them into per-sample warnings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Remote fetch failed with HTTP status {status_code}")]
    RemoteFetchFailed { status_code: u16 },

    #[error("Malformed peak list response: {0}")]
    MalformedResponse(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BinningError {
    #[error("Cannot bin an empty peak list")]
    EmptySeries,

    #[error("Invalid merge width: {0}")]
    InvalidMergeWidth(f64),

    #[error("Retention time span {span} needs more than {max} bins at width {width}", max = crate::binning::MAX_BINS)]
    TooManyBins { span: f64, width: f64 },
}
