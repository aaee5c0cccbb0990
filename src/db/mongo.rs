use async_trait::async_trait;
use mongodb::{
    bson::{doc, Bson, Document},
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::db::store::KeyValueStore;
use crate::error::{QuoteError, Result};

const KEY_VALUE_COLLECTION: &str = "KeyValue";

pub async fn create_mongo_client(uri: &str) -> Result<Arc<Client>> {
    log::info!("Connecting to MongoDB");

    let mut client_options = ClientOptions::parse(uri)
        .await
        .map_err(|e| QuoteError::Config(format!("MongoDB URI could not be parsed: {}", e)))?;

    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(10);
    client_options.min_pool_size = Some(1);

    let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
    client_options.server_api = Some(server_api);

    let client = Client::with_options(client_options)?;

    // A failed ping is not fatal; the store reports errors per request.
    match client.database("admin").run_command(doc! {"ping": 1}).await {
        Ok(_) => log::info!("Connected to MongoDB and verified with ping"),
        Err(e) => log::warn!("Connected to MongoDB but ping failed: {}", e),
    }

    Ok(Arc::new(client))
}

/// Stores each key as `{ _id: key, value }` in one collection.
pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    pub fn new(client: &Client, database: &str) -> Self {
        Self {
            collection: client.database(database).collection(KEY_VALUE_COLLECTION),
        }
    }
}

#[async_trait]
impl KeyValueStore for MongoStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let found = self.collection.find_one(doc! { "_id": key }).await?;
        Ok(found
            .and_then(|mut document| document.remove("value"))
            .map(Bson::into_relaxed_extjson))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let replacement = doc! {
            "_id": key,
            "value": bson::to_bson(&value)?,
        };
        self.collection
            .replace_one(doc! { "_id": key }, replacement)
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.collection.delete_one(doc! { "_id": key }).await?;
        Ok(())
    }
}
