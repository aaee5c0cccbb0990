pub mod mongo;
pub mod repository;
pub mod seed;
pub mod store;

use std::sync::Arc;

use crate::config::StorageBackend;
use crate::error::Result;
use store::{FileStore, KeyValueStore, MemoryStore};

/// Opens the store selected in configuration.
pub async fn connect(backend: &StorageBackend) -> Result<Arc<dyn KeyValueStore>> {
    match backend {
        StorageBackend::Memory => {
            log::warn!("Using in-memory storage; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::File(dir) => Ok(Arc::new(FileStore::open(dir.clone()).await?)),
        StorageBackend::Mongo { uri, database } => {
            let client = mongo::create_mongo_client(uri).await?;
            Ok(Arc::new(mongo::MongoStore::new(&client, database)))
        }
    }
}
