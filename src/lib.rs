//! codelens: interpret the free-text output of a code-analysis service into
//! structured dashboard data.
//!
//! - [`interpret`]: pure text interpretation (complexity tokens, scores,
//!   refactoring suggestions, function counts)
//! - [`response`]: envelope validation and per-section degradation
//! - [`view`]: the rendering seam and a colored terminal adapter
//! - [`config`]: layered TOML configuration
//! - [`analytics`]: local JSONL history and stats
//! - [`cli`]: subcommand handlers

pub mod analytics;
pub mod cli;
pub mod config;
pub mod interpret;
pub mod response;
pub mod view;
