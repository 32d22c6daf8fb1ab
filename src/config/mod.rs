pub mod toml_config;

pub use toml_config::DigestConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "letterboxd-digest")]
#[command(about = "Summarize last month's Letterboxd reviews (or a month/year you supply) \
                   for a social feed post")]
pub struct CliConfig {
    /// Month to process (1-12); requires --year
    #[arg(short, long, requires = "year", value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Year to process (e.g. 2025); requires --month
    #[arg(short, long, requires = "month", allow_negative_numbers = true)]
    pub year: Option<i32>,

    /// Path to the reviews.csv of a Letterboxd export
    #[arg(short, long)]
    pub reviews: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// List the reviews that would be summarized without calling the API
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Built-in defaults, then the TOML file, then environment, then flags.
    pub fn resolve_settings(&self) -> Result<DigestConfig> {
        self.resolve_settings_with(|name| std::env::var(name).ok())
    }

    pub fn resolve_settings_with<F>(&self, env_lookup: F) -> Result<DigestConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path);
                DigestConfig::from_file(path)?
            }
            None => DigestConfig::default(),
        };

        settings.apply_overrides_from(env_lookup);

        if let Some(reviews) = &self.reviews {
            settings.input.reviews_path = reviews.clone();
        }

        Ok(settings)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::domain::ports::ConfigProvider;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BIN: &str = "letterboxd-digest";

    fn toml_file() -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                b"[input]\nreviews_path = \"toml/reviews.csv\"\n\n\
                  [llm]\nbase_url = \"http://toml.example/v1\"\n",
            )
            .unwrap();
        temp_file
    }

    #[test]
    fn test_month_and_year_together() {
        let config = CliConfig::try_parse_from([BIN, "-m", "3", "-y", "2023"]).unwrap();
        assert_eq!(config.month, Some(3));
        assert_eq!(config.year, Some(2023));
    }

    #[test]
    fn test_no_period_arguments() {
        let config = CliConfig::try_parse_from([BIN]).unwrap();
        assert_eq!(config.month, None);
        assert_eq!(config.year, None);
        assert!(!config.dry_run);
    }

    #[test]
    fn test_partial_period_is_rejected() {
        assert!(CliConfig::try_parse_from([BIN, "--month", "3"]).is_err());
        assert!(CliConfig::try_parse_from([BIN, "--year", "2023"]).is_err());
    }

    #[test]
    fn test_month_out_of_range_is_rejected() {
        assert!(CliConfig::try_parse_from([BIN, "-m", "13", "-y", "2023"]).is_err());
        assert!(CliConfig::try_parse_from([BIN, "-m", "0", "-y", "2023"]).is_err());
    }

    #[test]
    fn test_reviews_flag_overrides_default_path() {
        let config = CliConfig::try_parse_from([BIN, "--reviews", "export/reviews.csv"]).unwrap();
        let settings = config.resolve_settings_with(|_| None).unwrap();
        assert_eq!(settings.reviews_path(), "export/reviews.csv");
    }

    #[test]
    fn test_toml_values_apply_without_overrides() {
        let file = toml_file();
        let path = file.path().to_str().unwrap();

        let config = CliConfig::try_parse_from([BIN, "--config", path]).unwrap();
        let settings = config.resolve_settings_with(|_| None).unwrap();

        assert_eq!(settings.reviews_path(), "toml/reviews.csv");
        assert_eq!(settings.base_url(), "http://toml.example/v1");
    }

    #[test]
    fn test_env_and_flags_override_toml() {
        let file = toml_file();
        let path = file.path().to_str().unwrap();

        let config =
            CliConfig::try_parse_from([BIN, "--config", path, "--reviews", "cli/reviews.csv"])
                .unwrap();
        let settings = config
            .resolve_settings_with(|name| match name {
                "OPENAI_BASE_URL" => Some("http://env.example/v1".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(settings.reviews_path(), "cli/reviews.csv");
        assert_eq!(settings.base_url(), "http://env.example/v1");
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let config = CliConfig::try_parse_from([BIN, "--config", "/no/such/digest.toml"]).unwrap();
        assert!(matches!(
            config.resolve_settings_with(|_| None),
            Err(crate::utils::error::DigestError::IoError(_))
        ));
    }
}
