//! skillmig — normalises the skill fields of every player in the club
//! database.
//!
//! Rebuilds `skillMatrix` and `skillsHistory[*].skills` as plain
//! group → skill → score maps and coerces `skillGroupAverages[*].groupAverages`
//! to floats. The record model and runner live in [`skillmig_core`]; this crate
//! wires them to MongoDB.

pub use skillmig_core::*;
pub use skillmig_store::MongoStore;

/// Connect to the configured store and migrate the whole players collection.
pub async fn migrate(config: &Config) -> anyhow::Result<MigrationReport> {
    let store = MongoStore::connect(&config.store).await?;
    let mut runner = MigrationRunner::new(store, config.migration.on_record_error);
    Ok(runner.run().await?)
}
