pub mod cleanup;
pub mod engine;
pub mod exemplars;
pub mod filter;
pub mod formatter;
pub mod period;
pub mod pipeline;

pub use crate::domain::model::{Period, ReviewRecord};
pub use crate::domain::ports::{ConfigProvider, ReviewSource, Summarizer};
pub use crate::utils::error::Result;
