use futures::TryStreamExt;
use mongodb::options::ClientOptions;
use mongodb::{
    Client, Collection, Database as MongoDatabase,
    bson::{Document, doc},
};

use crate::error::Result;

/// Collection names as constants for consistency
pub mod collections {
    pub const BOOKINGS: &str = "bookings";
}

/// Wrapper around the bookings store. The client connects lazily, so
/// construction succeeds even when the store is down; failures surface on
/// the first query instead.
#[derive(Debug, Clone)]
pub struct Database {
    db: MongoDatabase,
}

impl Database {
    pub async fn new(uri: &str, db_name: &str) -> anyhow::Result<Self> {
        let client_options = ClientOptions::parse(uri).await?;
        let client = Client::with_options(client_options)?;
        Ok(Self {
            db: client.database(db_name),
        })
    }

    pub fn bookings(&self) -> Collection<Document> {
        self.db.collection(collections::BOOKINGS)
    }

    /// Raw dump of the most recently stored booking records.
    pub async fn recent_bookings(&self, limit: i64) -> Result<Vec<Document>> {
        let rows = self
            .bookings()
            .find(doc! {})
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(rows)
    }
}
