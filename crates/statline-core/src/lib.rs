// Library root: season-row ingestion, career-total aggregation, and the
// sort/search view state for the totals table. No I/O beyond parsing bytes
// handed in by the caller.

pub mod stats;
pub mod view;
