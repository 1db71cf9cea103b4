pub mod job_counts;

pub use job_counts::{JobCountRecord, StoredRecord, week_start};
