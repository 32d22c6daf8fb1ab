use clap::Parser;
use letterboxd_digest::core::formatter::write_failure_report;
use letterboxd_digest::core::period::resolve_period_now;
use letterboxd_digest::domain::ports::ConfigProvider;
use letterboxd_digest::utils::error::DigestError;
use letterboxd_digest::utils::logger;
use letterboxd_digest::utils::validation::{validate_required_field, Validate};
use letterboxd_digest::{preview, CliConfig, CsvReviewSource, DigestEngine, OpenAiClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 載入 .env 中的 API 金鑰
    dotenvy::dotenv().ok();

    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting letterboxd-digest");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match run(&config).await {
        Ok(0) => Ok(()),
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            tracing::error!(
                "❌ Digest failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    }
}

async fn run(config: &CliConfig) -> Result<i32, DigestError> {
    let settings = config.resolve_settings()?;
    settings.validate()?;

    let period = resolve_period_now(config.month, config.year)?;
    let source = CsvReviewSource::new(settings.reviews_path());
    let exemplars = settings.exemplars();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no summaries will be requested");
        let count = preview(&source, &exemplars, period, &mut out)?;
        tracing::info!("{} reviews would be summarized for {}", count, period);
        return Ok(0);
    }

    let api_key = settings.api_key();
    let api_key = validate_required_field(settings.api_key_env(), &api_key)?;
    let client = OpenAiClient::from_config(&settings, api_key.as_str())?;
    tracing::info!("Using model {} at {}", client.model(), settings.base_url());

    let engine = DigestEngine::new(source, client).with_exemplars(exemplars);
    let report = engine.run(period, &mut out).await?;

    if report.is_complete() {
        tracing::info!("✅ Digest for {} completed", period);
    } else {
        write_failure_report(&mut std::io::stderr(), &report)?;
    }
    Ok(report.exit_code())
}
