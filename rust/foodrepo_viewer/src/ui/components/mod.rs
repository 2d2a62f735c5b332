pub mod sample_table;

pub use sample_table::render_sample_table;
