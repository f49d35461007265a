use crate::adapters::pdf::render_pdf;
use crate::adapters::workbook::WorkbookFormat;
use crate::core::classify::classify_sheets;
use crate::core::grouping::group_teams;
use crate::core::{ConfigProvider, Pipeline, RenderedReport, Sheet, Storage, TeamRoster};
use crate::utils::error::{Result, RosterError};

/// Reads one workbook from storage and turns it into the team report PDF.
pub struct WorkbookPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    source: String,
    format: WorkbookFormat,
}

impl<S: Storage, C: ConfigProvider> WorkbookPipeline<S, C> {
    pub fn new(storage: S, config: C, source: impl Into<String>, format: WorkbookFormat) -> Self {
        Self {
            storage,
            config,
            source: source.into(),
            format,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for WorkbookPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Sheet>> {
        tracing::debug!("Reading workbook '{}' as {:?}", self.source, self.format);
        let bytes = self.storage.read_file(&self.source).await?;
        let format = self.format;
        // calamine parsing is CPU bound; keep it off the async workers
        tokio::task::spawn_blocking(move || format.read_sheets(&bytes))
            .await
            .map_err(task_failure)?
    }

    async fn transform(&self, sheets: Vec<Sheet>) -> Result<TeamRoster> {
        let pools = classify_sheets(sheets)?;
        tracing::debug!(
            "Pools: {} developers, {} business analysts, {} data analysts",
            pools.developers.len(),
            pools.business_analysts.len(),
            pools.data_analysts.len()
        );
        Ok(group_teams(pools))
    }

    async fn load(&self, roster: TeamRoster) -> Result<RenderedReport> {
        let layout = self.config.report_layout().clone();
        tokio::task::spawn_blocking(move || render_pdf(&roster, &layout))
            .await
            .map_err(task_failure)?
    }
}

fn task_failure(e: tokio::task::JoinError) -> RosterError {
    RosterError::TaskFailure {
        message: e.to_string(),
    }
}
