use clap::Parser;
use team_roster::utils::logger;
use team_roster::CliConfig;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting team-roster service");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 解析並驗證配置
    let settings = match config.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if settings.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    if let Err(e) = team_roster::serve(settings).await {
        tracing::error!(
            "❌ Server failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(3);
    }
}
