use clap::Parser;
use std::path::{Path, PathBuf};
use team_roster::config::toml_config::TomlConfig;
use team_roster::core::layout::{heading_line, member_lines};
use team_roster::core::{Pipeline, Storage};
use team_roster::utils::error::ErrorSeverity;
use team_roster::utils::logger;
use team_roster::utils::validation::{validate_workbook_path, Validate};
use team_roster::{LocalStorage, RosterEngine, Settings, WorkbookFormat, WorkbookPipeline};

#[derive(Parser)]
#[command(name = "roster-pdf")]
#[command(about = "Generate the team report PDF from a workbook on disk")]
struct Args {
    /// Workbook to read (.xlsx, .xls, .ods, or .zip of CSV files)
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the PDF
    #[arg(short, long, default_value = "teams.pdf")]
    output: PathBuf,

    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Print the teams without writing a PDF
    #[arg(long)]
    dry_run: bool,
}

fn split_path(path: &Path) -> (PathBuf, String) {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    (dir, name)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    // 載入 TOML 配置
    let mut settings = match &args.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config.into_settings(),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path.display(), e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    if let Some(monitor) = args.monitor {
        settings.monitor = monitor;
    }

    // 驗證配置
    if let Err(e) = settings
        .validate()
        .and_then(|_| validate_workbook_path("input", &args.input))
    {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let (input_dir, input_file) = split_path(&args.input);
    let format = WorkbookFormat::from_file_name(Some(&input_file));
    tracing::info!("📁 Reading {} as {:?}", args.input.display(), format);

    let pipeline = WorkbookPipeline::new(
        LocalStorage::new(input_dir),
        settings.clone(),
        input_file,
        format,
    );

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No PDF will be written");
        return perform_dry_run(&pipeline).await;
    }

    let engine = RosterEngine::new_with_monitoring(pipeline, settings.monitor);
    match engine.run().await {
        Ok(report) => {
            let (output_dir, output_file) = split_path(&args.output);
            LocalStorage::new(output_dir)
                .write_file(&output_file, &report.bytes)
                .await?;

            tracing::info!("✅ Team report generated");
            println!(
                "✅ {} team(s), {} page(s) written to {}",
                report.team_count,
                report.page_count,
                args.output.display()
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Report generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            std::process::exit(exit_code(e.severity()));
        }
    }

    Ok(())
}

// 根據錯誤嚴重程度決定退出碼
fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

async fn perform_dry_run<P: Pipeline>(pipeline: &P) -> anyhow::Result<()> {
    let sheets = pipeline.extract().await?;
    for sheet in &sheets {
        println!("📄 {} ({} rows)", sheet.name, sheet.records.len());
    }

    let roster = pipeline.transform(sheets).await?;

    for (number, team) in roster.numbered() {
        println!("{}", heading_line(number));
        for line in member_lines(team) {
            println!("  {}", line);
        }
    }
    println!("👥 {} team(s) would be rendered", roster.len());
    Ok(())
}
