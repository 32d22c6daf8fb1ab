use crate::domain::model::ReviewRecord;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ReviewSource: Send + Sync {
    fn load_reviews(&self) -> Result<Vec<ReviewRecord>>;
}

pub trait ConfigProvider: Send + Sync {
    fn reviews_path(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn max_tokens(&self) -> u32;
    fn api_key_env(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
}

/// Produces a summary of `review` following the instructions in `system_prompt`.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, system_prompt: &str, review: &str) -> Result<String>;
}
