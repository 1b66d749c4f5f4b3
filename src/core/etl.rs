use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct SyncEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SyncEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs extract, transform and load in order; the first error stops the run.
    /// Returns the written artifact paths.
    pub async fn run(&self) -> Result<Vec<String>> {
        let started = Instant::now();
        tracing::info!("🚀 Starting store sync at {}", chrono::Utc::now().to_rfc3339());

        let records = self.pipeline.extract().await?;
        tracing::debug!("Extracted {} records", records.len());

        let artifacts = self.pipeline.transform(records).await?;
        tracing::debug!("Rendered {} artifacts", artifacts.len());

        let written = self.pipeline.load(artifacts).await?;
        tracing::info!(
            "✅ Wrote {} files in {:?}",
            written.len(),
            started.elapsed()
        );

        Ok(written)
    }
}
