use crate::core::exemplars::default_exemplars;
use crate::domain::model::Exemplar;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DigestError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_REVIEWS_PATH: &str = "data/reviews.csv";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_MAX_TOKENS: u32 = 150;
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    pub input: InputConfig,
    pub llm: LlmConfig,
    /// Replaces the built-in exemplars when present.
    pub exemplars: Option<Vec<Exemplar>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub reviews_path: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            reviews_path: DEFAULT_REVIEWS_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub api_key_env: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_seconds: None,
        }
    }
}

impl DigestConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DigestError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DigestError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DigestError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Override settings with values from `lookup`, keyed by environment variable name.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|url| !url.trim().is_empty()) {
            tracing::debug!("Using API base URL from {}", BASE_URL_ENV);
            self.llm.base_url = base_url;
        }
    }

    /// The API key, read from the environment variable named in `llm.api_key_env`.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.llm.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    pub fn exemplars(&self) -> Vec<Exemplar> {
        self.exemplars.clone().unwrap_or_else(default_exemplars)
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("input.reviews_path", &self.input.reviews_path)?;
        validate_url("llm.base_url", &self.llm.base_url)?;
        validate_non_empty_string("llm.model", &self.llm.model)?;
        validate_range("llm.max_tokens", self.llm.max_tokens, 1, 4096)?;
        validate_non_empty_string("llm.api_key_env", &self.llm.api_key_env)?;
        if let Some(timeout) = self.llm.timeout_seconds {
            validate_range("llm.timeout_seconds", timeout, 1, 3600)?;
        }

        if let Some(exemplars) = &self.exemplars {
            if exemplars.is_empty() {
                return Err(DigestError::ConfigValidationError {
                    field: "exemplars".to_string(),
                    message: "at least one exemplar is required".to_string(),
                });
            }
            for exemplar in exemplars {
                validate_non_empty_string("exemplars.title", &exemplar.title)?;
                validate_non_empty_string("exemplars.summary", &exemplar.summary)?;
            }
        }

        Ok(())
    }
}

impl ConfigProvider for DigestConfig {
    fn reviews_path(&self) -> &str {
        &self.input.reviews_path
    }

    fn base_url(&self) -> &str {
        &self.llm.base_url
    }

    fn model(&self) -> &str {
        &self.llm.model
    }

    fn max_tokens(&self) -> u32 {
        self.llm.max_tokens
    }

    fn api_key_env(&self) -> &str {
        &self.llm.api_key_env
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.llm.timeout_seconds
    }
}

impl Validate for DigestConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
