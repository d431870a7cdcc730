pub mod statistics;
pub mod temporal;

pub use statistics::{ScheduleStats, count_overlaps};
pub use temporal::TemporalCheck;
