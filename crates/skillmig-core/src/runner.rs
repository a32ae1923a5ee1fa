//! Runner — one sequential pass over the players collection.
//!
//! ```text
//! fetch_all ──► decode ──► normalize ──► replace_fields (if changed)
//! ```
//!
//! Records are handled strictly one after another. Nothing is batched and
//! nothing is retried.

use serde::{Deserialize, Serialize};

use crate::error::{MigrateError, RunAborted};
use crate::normalizer::normalize;
use crate::store::PlayerStore;
use crate::types::PlayerRecord;

/// What to do when a single record cannot be migrated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the run at the first bad record or failed write.
    #[default]
    Abort,
    /// Log the failure, count it and move on to the next record.
    Skip,
}

/// Tally of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Records fetched and looked at.
    pub scanned: usize,
    /// Records written back.
    pub updated: usize,
    /// Records with nothing to normalise.
    pub unchanged: usize,
    /// Records skipped under [`FailurePolicy::Skip`].
    pub failed: usize,
}

impl std::fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "✅ Migration completed. Updated {} players.", self.updated)?;
        if self.failed > 0 {
            write!(f, " ({} failed)", self.failed)?;
        }
        Ok(())
    }
}

/// Drives the normalizer over every record in a [`PlayerStore`].
pub struct MigrationRunner<S> {
    store: S,
    policy: FailurePolicy,
}

impl<S: PlayerStore> MigrationRunner<S> {
    pub fn new(store: S, policy: FailurePolicy) -> Self {
        Self { store, policy }
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Migrate the whole collection.
    ///
    /// Under [`FailurePolicy::Abort`] the first failure ends the run and the
    /// returned [`RunAborted`] carries the tally up to, not including, the
    /// failing record. A fetch failure always aborts with an empty tally.
    pub async fn run(&mut self) -> Result<MigrationReport, RunAborted> {
        let mut report = MigrationReport::default();

        let players = match self.store.fetch_all().await {
            Ok(players) => players,
            Err(e) => {
                return Err(RunAborted {
                    partial: report,
                    cause: e.into(),
                })
            }
        };
        tracing::info!(players = players.len(), policy = ?self.policy, "migration started");

        for doc in &players {
            match self.migrate_one(doc).await {
                Ok(true) => report.updated += 1,
                Ok(false) => report.unchanged += 1,
                Err(cause) => match self.policy {
                    FailurePolicy::Abort => {
                        tracing::error!(error = %cause, "migration aborted");
                        return Err(RunAborted {
                            partial: report,
                            cause,
                        });
                    }
                    FailurePolicy::Skip => {
                        tracing::warn!(error = %cause, "skipping player");
                        report.failed += 1;
                    }
                },
            }
            report.scanned += 1;
        }

        tracing::info!(
            scanned = report.scanned,
            updated = report.updated,
            unchanged = report.unchanged,
            failed = report.failed,
            "migration finished"
        );
        Ok(report)
    }

    /// Returns whether the record was written back.
    async fn migrate_one(&mut self, doc: &bson::Document) -> Result<bool, MigrateError> {
        let record = PlayerRecord::from_document(doc)?;
        let out = normalize(record)?;
        if !out.changed {
            return Ok(false);
        }

        let record = out.record;
        self.store
            .replace_fields(&record.id, record.persisted_fields())
            .await?;
        tracing::debug!(player = %record.label(), id = %record.id, "migrated");
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
