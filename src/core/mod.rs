pub mod etl;
pub mod normalize;
pub mod partition;
pub mod serialize;

pub use crate::domain::model::{Artifact, ArtifactFormat, Destination, Record, RecordSet};
pub use crate::domain::ports::{Pipeline, Sink};
pub use crate::utils::error::Result;
