use crate::config::Settings;
use crate::core::ReportLayout;
use crate::utils::error::{RosterError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerConfig>,
    pub report: Option<ReportLayout>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub upload_dir: Option<PathBuf>,
    pub max_upload_bytes: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RosterError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${UPLOAD_DIR})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    /// Overlays the file's values on top of the defaults.
    pub fn into_settings(self) -> Settings {
        let mut settings = Settings {
            monitor: self.monitoring_enabled(),
            ..Settings::default()
        };

        if let Some(server) = self.server {
            if let Some(host) = server.host {
                settings.host = host;
            }
            if let Some(port) = server.port {
                settings.port = port;
            }
            if let Some(upload_dir) = server.upload_dir {
                settings.upload_dir = upload_dir;
            }
            if let Some(max_upload_bytes) = server.max_upload_bytes {
                settings.max_upload_bytes = max_upload_bytes;
            }
        }

        if let Some(report) = self.report {
            settings.layout = report;
        }

        settings
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.clone().into_settings().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[server]
host = "127.0.0.1"
port = 8080
upload_dir = "/var/tmp/roster"
max_upload_bytes = 1048576

[report]
title = "Spring Cohort"
page_height = 842.0
trailing_gap = 30.0

[monitoring]
enabled = true
"#;

        let settings = TomlConfig::from_toml_str(toml_content)
            .unwrap()
            .into_settings();

        assert_eq!(settings.listen_addr(), "127.0.0.1:8080");
        assert_eq!(settings.upload_dir, PathBuf::from("/var/tmp/roster"));
        assert_eq!(settings.max_upload_bytes, 1_048_576);
        assert_eq!(settings.layout.title, "Spring Cohort");
        assert_eq!(settings.layout.page_height, 842.0);
        assert_eq!(settings.layout.trailing_gap, 30.0);
        // unspecified layout fields keep their defaults
        assert_eq!(settings.layout.line_advance, 20.0);
        assert!(settings.monitor);
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let settings = TomlConfig::from_toml_str("").unwrap().into_settings();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEAM_ROSTER_TEST_UPLOADS", "/srv/uploads");

        let toml_content = r#"
[server]
upload_dir = "${TEAM_ROSTER_TEST_UPLOADS}"
"#;

        let settings = TomlConfig::from_toml_str(toml_content)
            .unwrap()
            .into_settings();
        assert_eq!(settings.upload_dir, PathBuf::from("/srv/uploads"));

        std::env::remove_var("TEAM_ROSTER_TEST_UPLOADS");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[report]
body_size = 0.5
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_layout_values_are_rejected() {
        for field in ["page_height", "line_advance", "trailing_gap"] {
            let toml_content = format!("[report]\n{} = nan\n", field);
            let config = TomlConfig::from_toml_str(&toml_content).unwrap();
            assert!(config.validate().is_err(), "{} = nan passed validation", field);
        }
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[server\nport = ").unwrap_err();
        assert!(matches!(err, RosterError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nport = 9000\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.into_settings().port, 9000);
    }
}
