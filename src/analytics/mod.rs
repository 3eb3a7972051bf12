//! Local analysis history: a JSONL summary log, a detail event log, and
//! aggregate stats over the summary log.

pub mod events;
pub mod logger;
pub mod reporter;
