use crate::domain::model::{RenderedReport, ReportLayout, Sheet, TeamRoster};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn upload_dir(&self) -> &Path;
    fn max_upload_bytes(&self) -> usize;
    fn report_layout(&self) -> &ReportLayout;
    fn monitoring_enabled(&self) -> bool;
}

/// Turns a workbook's raw bytes into named sheets of records.
pub trait WorkbookReader: Send + Sync {
    fn read_sheets(&self, bytes: &[u8]) -> Result<Vec<Sheet>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Heading,
    Body,
}

/// Drawing surface used by the report renderer. Coordinates are in points
/// measured from the top-left corner of the current page.
pub trait Canvas {
    fn add_page(&mut self) -> Result<()>;
    fn draw_text(&mut self, text: &str, style: TextStyle, x: f32, y: f32) -> Result<()>;
    fn finish(self) -> Result<Vec<u8>>
    where
        Self: Sized;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Sheet>>;
    async fn transform(&self, sheets: Vec<Sheet>) -> Result<TeamRoster>;
    async fn load(&self, roster: TeamRoster) -> Result<RenderedReport>;
}
