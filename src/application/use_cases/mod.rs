pub mod analyzer;
pub mod profiler;

pub use analyzer::CsvAnalyzer;
pub use profiler::Profiler;
