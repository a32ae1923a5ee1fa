//! Error types shared by the record model, the normalizer and the runner.

use bson::Bson;

use crate::runner::MigrationReport;
use crate::store::StoreError;

/// A player document that cannot be decoded or normalised.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("player document has no `_id`")]
    MissingId,

    #[error("player {id}: `{field}` is not an array (found {value})")]
    NotAnArray {
        id: Bson,
        field: &'static str,
        value: Bson,
    },

    #[error("player {id}: `{field}[{index}]` is not a document (found {value})")]
    NotADocument {
        id: Bson,
        field: &'static str,
        index: usize,
        value: Bson,
    },

    #[error("player {id}: `{path}` cannot be converted to a float (found {value})")]
    NotNumeric { id: Bson, path: String, value: Bson },
}

/// Any failure that can stop or skip a record during a run.
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A run that stopped before reaching the end of the collection.
///
/// `partial` counts only the records handled before the failure.
#[derive(Debug, thiserror::Error)]
#[error("migration aborted after updating {} players", .partial.updated)]
pub struct RunAborted {
    pub partial: MigrationReport,
    #[source]
    pub cause: MigrateError,
}
