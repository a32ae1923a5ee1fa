//! In-memory `PlayerStore` for runner harnesses.
//!
//! Applies `replace_fields` as a `$set` on its own copy of the documents and
//! records every write, so tests can assert both on what was sent and on the
//! resulting collection state.

use bson::{Bson, Document};
use skillmig_core::store::{PlayerStore, StoreError};

#[derive(Debug, Default)]
pub struct FakeStore {
    players: Vec<Document>,
    writes: Vec<(Bson, Document)>,
    fail_fetch: bool,
    reject_writes_for: Vec<Bson>,
}

impl FakeStore {
    pub fn new(players: Vec<Document>) -> Self {
        Self {
            players,
            ..Self::default()
        }
    }

    /// Make `fetch_all` fail.
    pub fn failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    /// Make `replace_fields` fail for the player with this id.
    pub fn reject_writes_for(mut self, id: impl Into<Bson>) -> Self {
        self.reject_writes_for.push(id.into());
        self
    }

    /// Every successful write, in order.
    pub fn writes(&self) -> &[(Bson, Document)] {
        &self.writes
    }

    pub fn written_ids(&self) -> Vec<Bson> {
        self.writes.iter().map(|(id, _)| id.clone()).collect()
    }

    /// Current state of the player with this id.
    pub fn player(&self, id: impl Into<Bson>) -> Option<&Document> {
        let id = id.into();
        self.players.iter().find(|p| p.get("_id") == Some(&id))
    }

    pub fn players(&self) -> &[Document] {
        &self.players
    }
}

impl PlayerStore for FakeStore {
    async fn fetch_all(&self) -> Result<Vec<Document>, StoreError> {
        if self.fail_fetch {
            return Err(StoreError::Fetch("cursor killed".into()));
        }
        Ok(self.players.clone())
    }

    async fn replace_fields(&mut self, id: &Bson, fields: Document) -> Result<(), StoreError> {
        if self.reject_writes_for.contains(id) {
            return Err(StoreError::Write {
                id: id.clone(),
                source: "write rejected".into(),
            });
        }
        if let Some(player) = self.players.iter_mut().find(|p| p.get("_id") == Some(id)) {
            for (key, value) in &fields {
                player.insert(key.clone(), value.clone());
            }
        }
        self.writes.push((id.clone(), fields));
        Ok(())
    }
}
