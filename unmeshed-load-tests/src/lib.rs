pub mod latch;
pub mod report;
pub mod sample;
pub mod summary;
pub mod worker;
pub mod workload;
