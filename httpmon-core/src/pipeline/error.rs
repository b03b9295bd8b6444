use crate::alert::AlertError;
use crate::ingest::IngestError;
use crate::metrics::MetricError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("ingestion stopped: {0}")]
    Ingest(#[from] IngestError),

    #[error("metric collection failed: {0}")]
    Collect(#[from] MetricError),

    #[error("alert publication failed: {0}")]
    Alert(#[from] AlertError),
}
