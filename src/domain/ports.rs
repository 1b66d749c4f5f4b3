use crate::domain::model::{Artifact, RecordSet};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Sink: Send + Sync {
    /// Writes `data` under `name`, replacing whatever was there.
    fn write_artifact(
        &self,
        name: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<RecordSet>;
    async fn transform(&self, data: RecordSet) -> Result<Vec<Artifact>>;
    async fn load(&self, artifacts: Vec<Artifact>) -> Result<Vec<String>>;
}
