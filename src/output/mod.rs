//! Console output: run summaries and index statistics

mod stats;

pub use stats::{
    load_statistics, print_statistics, print_summary, IndexStatistics, IngestSummary,
};
