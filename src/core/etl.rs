use crate::core::{Pipeline, RenderedReport};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Runs a pipeline's extract, transform and load phases in order.
pub struct RosterEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> RosterEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RenderedReport> {
        tracing::debug!("Starting roster pipeline");

        // Extract
        let sheets = self.pipeline.extract().await?;
        tracing::info!("📄 Extracted {} sheet(s)", sheets.len());
        self.monitor.record_phase("Extract");

        // Transform
        let roster = self.pipeline.transform(sheets).await?;
        tracing::info!("👥 Formed {} team(s)", roster.len());
        self.monitor.record_phase("Transform");

        // Load
        let report = self.pipeline.load(roster).await?;
        tracing::info!(
            "🖨️ Rendered {} team(s) on {} page(s) ({} bytes)",
            report.team_count,
            report.page_count,
            report.bytes.len()
        );
        self.monitor.record_phase("Load");
        self.monitor.log_summary();

        Ok(report)
    }
}
