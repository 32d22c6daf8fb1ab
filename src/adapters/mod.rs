// Adapters layer: concrete implementations for external systems (CSV export, chat completions API).

pub mod csv_source;
pub mod openai;

pub use csv_source::CsvReviewSource;
pub use openai::OpenAiClient;
