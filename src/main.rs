use clap::Parser;
use meal_subscriptions::utils::error::{ErrorSeverity, MealError};
use meal_subscriptions::utils::{logger, validation::Validate};
use meal_subscriptions::{CliConfig, ConfigProvider, TomlConfig};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting meal-subscriptions");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => start(&config),
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            }
        }
        None => start(&cli),
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Session failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn start<C: ConfigProvider + Validate>(config: &C) -> Result<(), MealError> {
    // 驗證配置
    config.validate()?;
    tracing::info!("✅ Configuration validated, seed file: {}", config.seed_path());

    let letters = meal_subscriptions::app::run(config)?;
    tracing::info!("✅ {} letter(s) written to {}", letters, config.letters_path());
    Ok(())
}
