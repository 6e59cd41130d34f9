//! Path layout and analysis parameter configuration

pub mod parameters;
pub mod paths;

pub use parameters::AnalysisParams;
pub use paths::{ensure_directory, AnalysisDomain, PathConfig};
