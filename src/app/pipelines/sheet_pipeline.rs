use crate::adapters::sheets::SheetsClient;
use crate::config::SyncConfig;
use crate::core::normalize::normalize_rows;
use crate::core::partition::{ensure_country_column, partition_all};
use crate::core::serialize::{artifacts_for, file_name};
use crate::domain::model::{Artifact, ArtifactFormat, Destination, RecordSet};
use crate::domain::ports::{Pipeline, Sink};
use crate::utils::error::Result;

/// Sheet -> records -> per-shop slices -> json/min.json/csv files.
pub struct SheetPipeline<S: Sink> {
    sink: S,
    config: SyncConfig,
    client: SheetsClient,
}

impl<S: Sink> SheetPipeline<S> {
    pub fn new(sink: S, config: SyncConfig) -> Result<Self> {
        let client = SheetsClient::new(&config.sheet)?;
        Ok(Self {
            sink,
            config,
            client,
        })
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }
}

/// File stem for one partition.
///
/// Without destinations the whole set is `<prefix>`. With destinations each one is
/// `<prefix>-<name>` (or its `output_file` minus `.json`) and the combined set is
/// `<prefix>-all`.
pub fn base_name(config: &SyncConfig, destination: Option<&Destination>) -> String {
    let prefix = &config.output.prefix;
    match destination {
        Some(destination) => match &destination.output_file {
            Some(file) => file.strip_suffix(".json").unwrap_or(file).to_string(),
            None => format!("{}-{}", prefix, destination.name),
        },
        None if config.is_multi_destination() => format!("{}-all", prefix),
        None => prefix.clone(),
    }
}

/// Every file a run writes, in write order.
pub fn planned_artifact_names(config: &SyncConfig) -> Vec<String> {
    config
        .destinations
        .iter()
        .map(Some)
        .chain(std::iter::once(None))
        .flat_map(|destination| {
            let base = base_name(config, destination);
            ArtifactFormat::ALL
                .into_iter()
                .map(move |format| file_name(&base, format))
        })
        .collect()
}

#[async_trait::async_trait]
impl<S: Sink> Pipeline for SheetPipeline<S> {
    async fn extract(&self) -> Result<RecordSet> {
        let sheet = &self.config.sheet;
        tracing::info!("📊 Fetching data from Google Sheets tab '{}'", sheet.tab);

        let range = sheet.fetch_range()?;
        let rows = self.client.fetch_values(&range).await?;
        let records = normalize_rows(&rows, sheet.duplicate_headers)?;

        ensure_country_column(&records, &self.config.destinations, sheet.country_column())?;

        tracing::info!("✅ Fetched {} stores", records.len());
        Ok(records)
    }

    async fn transform(&self, data: RecordSet) -> Result<Vec<Artifact>> {
        let partitions = partition_all(
            &data,
            &self.config.destinations,
            self.config.sheet.country_column(),
        );

        let mut artifacts = Vec::with_capacity(partitions.len() * ArtifactFormat::ALL.len());
        for partition in &partitions {
            let base = base_name(&self.config, partition.destination);
            match partition.destination {
                Some(destination) => tracing::info!(
                    "📦 {}: {} stores for {} ({}, {})",
                    destination.name.to_uppercase(),
                    partition.records.len(),
                    destination.domain.as_deref().unwrap_or(&destination.name),
                    destination.currency,
                    destination.language
                ),
                None => tracing::debug!("Combined set: {} stores", partition.records.len()),
            }
            artifacts.extend(artifacts_for(&base, &partition.records)?);
        }

        Ok(artifacts)
    }

    async fn load(&self, artifacts: Vec<Artifact>) -> Result<Vec<String>> {
        let mut written = Vec::with_capacity(artifacts.len());
        for artifact in &artifacts {
            let path = self
                .sink
                .write_artifact(&artifact.name, artifact.content.as_bytes())
                .await?;
            tracing::debug!("{} ({} records) -> {}", artifact.name, artifact.record_count, path);
            written.push(path);
        }
        Ok(written)
    }
}
