//! Conversion orchestration and run configuration

pub mod options;
pub mod pipeline;

pub use options::ConvertOptions;
pub use pipeline::{ConvertPipeline, ExportReport};
