#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::{ConfigProvider, ReportLayout, Team};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_fits, validate_non_empty_string, validate_path, validate_positive_number,
    validate_range, Validate,
};
use std::path::{Path, PathBuf};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Fully resolved runtime settings shared by the service and the batch tool.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub layout: ReportLayout,
    pub monitor: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            layout: ReportLayout::default(),
            monitor: false,
        }
    }
}

impl Settings {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ConfigProvider for Settings {
    fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    fn report_layout(&self) -> &ReportLayout {
        &self.layout
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitor
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("host", &self.host)?;
        validate_positive_number("port", self.port as usize, 1)?;
        validate_path("upload_dir", &self.upload_dir)?;
        validate_positive_number("max_upload_bytes", self.max_upload_bytes, 1)?;
        self.layout.validate()?;

        tracing::debug!("✅ Settings validation passed");
        Ok(())
    }
}

impl Validate for ReportLayout {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("report.title", &self.title)?;
        validate_range("report.page_width", self.page_width, 72.0, 14_400.0)?;
        validate_range("report.page_height", self.page_height, 72.0, 14_400.0)?;
        validate_range("report.heading_size", self.heading_size, 4.0, 144.0)?;
        validate_range("report.body_size", self.body_size, 4.0, 144.0)?;
        validate_range("report.top_margin", self.top_margin, 0.0, self.page_height / 2.0)?;
        validate_range("report.bottom_margin", self.bottom_margin, 0.0, self.page_height / 2.0)?;
        validate_range("report.left_margin", self.left_margin, 0.0, self.page_width / 2.0)?;
        validate_range("report.member_indent", self.member_indent, 0.0, self.page_width / 2.0)?;
        validate_range("report.heading_advance", self.heading_advance, 0.0, self.page_height)?;
        validate_range("report.line_advance", self.line_advance, 0.0, self.page_height)?;
        validate_range("report.trailing_gap", self.trailing_gap, 0.0, self.page_height)?;
        validate_fits(
            "report",
            self.block_footprint(Team::MEMBERS),
            self.usable_bottom() - self.top_margin,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.listen_addr(), "0.0.0.0:3000");
        assert_eq!(settings.upload_dir(), Path::new("uploads"));
    }

    #[test]
    fn test_zero_upload_limit_is_rejected() {
        let settings = Settings {
            max_upload_bytes: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_layout_margins_must_fit_page() {
        let layout = ReportLayout {
            top_margin: 500.0,
            ..ReportLayout::default()
        };
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_team_block_must_fit_between_margins() {
        let layout = ReportLayout {
            page_height: 200.0,
            top_margin: 20.0,
            bottom_margin: 20.0,
            ..ReportLayout::default()
        };
        assert!(layout.validate().is_err());
    }
}
