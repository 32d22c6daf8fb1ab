pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{CsvReviewSource, OpenAiClient};
pub use config::DigestConfig;
pub use core::engine::{preview, DigestEngine};
pub use domain::model::{DigestReport, Exemplar, Period, ReviewRecord, Verdict};
pub use utils::error::{DigestError, Result};
