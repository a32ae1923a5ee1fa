//! Store — the document database the migration reads from and writes back to.
//!
//! The runner only needs two operations, so the seam is a small trait.
//! `skillmig-store` provides the MongoDB implementation.

use bson::{Bson, Document};

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A failure talking to the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not connect to {target}")]
    Connect {
        target: String,
        #[source]
        source: BoxError,
    },

    #[error("could not fetch players")]
    Fetch(#[source] BoxError),

    #[error("could not update player {id}")]
    Write {
        id: Bson,
        #[source]
        source: BoxError,
    },
}

/// Collection of player documents.
///
/// Calls are awaited one at a time; implementations need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait PlayerStore {
    /// Every player document in the collection.
    async fn fetch_all(&self) -> Result<Vec<Document>, StoreError>;

    /// Overwrite exactly the keys in `fields` on the player with `_id == id`.
    async fn replace_fields(&mut self, id: &Bson, fields: Document) -> Result<(), StoreError>;
}
