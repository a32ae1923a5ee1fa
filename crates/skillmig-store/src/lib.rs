//! skillmig-store — MongoDB implementation of [`PlayerStore`].

use futures::TryStreamExt;
use mongodb::{Client, Collection};
use skillmig_core::bson::{doc, Bson, Document};
use skillmig_core::config::StoreConfig;
use skillmig_core::{PlayerStore, StoreError};

/// The players collection of a MongoDB database.
pub struct MongoStore {
    players: Collection<Document>,
}

impl MongoStore {
    /// Open a client for `config.uri` and ping the database.
    ///
    /// The driver connects lazily, so the ping is what surfaces an
    /// unreachable server before any player is fetched.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let connect_err = |e: mongodb::error::Error| StoreError::Connect {
            target: config.uri.clone(),
            source: Box::new(e),
        };

        let client = Client::with_uri_str(&config.uri).await.map_err(connect_err)?;
        let db = client.database(&config.database);
        db.run_command(doc! { "ping": 1 }).await.map_err(connect_err)?;
        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "connected to store"
        );

        Ok(Self {
            players: db.collection(&config.collection),
        })
    }
}

impl PlayerStore for MongoStore {
    async fn fetch_all(&self) -> Result<Vec<Document>, StoreError> {
        let fetch_err = |e: mongodb::error::Error| StoreError::Fetch(Box::new(e));
        let cursor = self.players.find(doc! {}).await.map_err(fetch_err)?;
        cursor.try_collect().await.map_err(fetch_err)
    }

    async fn replace_fields(&mut self, id: &Bson, fields: Document) -> Result<(), StoreError> {
        let result = self
            .players
            .update_one(by_id(id), set(fields))
            .await
            .map_err(|e| StoreError::Write {
                id: id.clone(),
                source: Box::new(e),
            })?;
        if result.matched_count == 0 {
            tracing::warn!(id = %id, "update matched no player");
        }
        Ok(())
    }
}

fn by_id(id: &Bson) -> Document {
    doc! { "_id": id.clone() }
}

fn set(fields: Document) -> Document {
    doc! { "$set": fields }
}
