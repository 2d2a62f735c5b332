#![doc = include_str!("../README.md")]

// Declare modules
pub mod binning;
pub mod catalog;
pub mod client;
pub mod errors;
pub mod models;
pub mod pipeline;
pub mod session;

// Re-export main structures
pub use crate::binning::{
    COMPOSITION_LABELS,
    CompositionBuckets,
    HistogramBin,
    HistogramSeries,
    composition_buckets,
    merge_histogram,
};
pub use crate::catalog::SampleCatalog;
pub use crate::client::{
    HttpPeakClient,
    PeakSource,
};
pub use crate::models::{
    DetectionMode,
    MergeWidth,
    PeakPoint,
    Sample,
};
pub use crate::pipeline::{
    BatchReport,
    SampleProfile,
    SampleWarning,
    WarningKind,
    run_batch,
    run_batch_with,
};
pub use crate::session::{
    CandidateRow,
    SessionState,
};

// Re-export errors
pub use crate::errors::{
    BinningError,
    FetchError,
    FoodRepoError,
};
