use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "team-roster")]
#[command(about = "Turns a staff workbook into a PDF of fixed-size teams")]
pub struct CliConfig {
    #[arg(long, help = "Address to bind")]
    pub host: Option<String>,

    #[arg(long, env = "PORT", help = "Port to listen on [default: 3000]")]
    pub port: Option<u16>,

    #[arg(long, help = "Directory for transient uploads [default: uploads]")]
    pub upload_dir: Option<PathBuf>,

    #[arg(long, help = "Maximum accepted request body in bytes")]
    pub max_upload_bytes: Option<usize>,

    #[arg(short, long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Log CPU and memory usage per request phase")]
    pub monitor: bool,
}

impl CliConfig {
    /// Defaults, then the TOML file, then flags and environment.
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                TomlConfig::from_file(path)?.into_settings()
            }
            None => Settings::default(),
        };

        if let Some(host) = &self.host {
            settings.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(upload_dir) = &self.upload_dir {
            settings.upload_dir = upload_dir.clone();
        }
        if let Some(max_upload_bytes) = self.max_upload_bytes {
            settings.max_upload_bytes = max_upload_bytes;
        }
        if self.monitor {
            settings.monitor = true;
        }

        settings.validate()?;
        Ok(settings)
    }
}
