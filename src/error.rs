use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop a sort run.
///
/// A run either completes with a fully sorted dataset or aborts with one of
/// these; there is no partial result. An empty dataset is not a failure -
/// zero rows flow through every phase and produce an empty, valid output.
#[derive(Debug, Error)]
pub enum SortError {
    /// The dataset source could not be read or parsed.
    #[error("dataset unavailable: {}: {reason}", path.display())]
    DatasetUnavailable {
        path: PathBuf,
        reason: String,
    },

    /// The requested sort field does not exist in the dataset schema.
    #[error("invalid sort key '{field}', available fields: {schema:?}")]
    InvalidSortKey {
        field: String,
        schema: Vec<String>,
    },

    /// A key value could not be parsed as the configured field type.
    #[error("invalid value '{value}' for sort field '{field}' at row {position}: {reason}")]
    InvalidKeyValue {
        field: String,
        value: String,
        position: usize,
        reason: String,
    },

    /// A gathered partition disagrees with the dataset schema. Indicates a
    /// broken invariant in the pipeline, not a recoverable condition.
    #[error("schema mismatch in partition gathered from worker {rank}")]
    SchemaMismatch {
        rank: usize,
    },

    /// A worker disconnected, failed to start, or missed the configured
    /// gather timeout.
    #[error("worker {rank} lost")]
    WorkerLost {
        rank: usize,
    },
}
