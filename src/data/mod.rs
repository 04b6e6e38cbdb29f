pub mod dataset;

pub use dataset::{normalize_key, Dataset};
