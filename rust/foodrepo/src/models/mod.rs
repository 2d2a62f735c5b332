pub mod merge_width;
pub mod peaks;
pub mod sample;

pub use merge_width::MergeWidth;
pub use peaks::{
    PeakPoint,
    parse_peak_list,
};
pub use sample::{
    DetectionMode,
    Sample,
};
