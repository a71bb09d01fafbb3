use crate::core::Scaffold;
use crate::domain::model::{PlannedFile, WriteReport};
use crate::utils::error::Result;

/// Drives a [`Scaffold`] through its plan, render and write phases.
pub struct ScaffoldEngine<S: Scaffold> {
    scaffold: S,
}

impl<S: Scaffold> ScaffoldEngine<S> {
    pub fn new(scaffold: S) -> Self {
        Self { scaffold }
    }

    pub async fn run(&self) -> Result<WriteReport> {
        tracing::info!("Planning chapter workspace...");
        let plan = self.scaffold.plan().await?;
        tracing::debug!("Planned {} files", plan.len());

        tracing::info!("Rendering templates...");
        let rendered = self.scaffold.render(plan).await?;

        tracing::info!("Writing files...");
        let report = self.scaffold.write(rendered).await?;
        tracing::info!(
            "Created {}, overwrote {}, kept {} existing files in {}",
            report.created.len(),
            report.overwritten.len(),
            report.skipped.len(),
            report.chapter_dir
        );

        Ok(report)
    }

    /// Plans without touching the filesystem.
    pub async fn dry_run(&self) -> Result<Vec<PlannedFile>> {
        let plan = self.scaffold.plan().await?;
        for file in &plan {
            tracing::info!("Would write {} ({:?})", file.relative_path, file.kind);
        }
        Ok(plan)
    }
}
