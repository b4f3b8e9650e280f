use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::FindOptions,
    Database,
};
use tracing::{debug, instrument};

use models::{document::bson_to_json, Collection, DeleteAck, InsertAck, ObjectId};

use crate::errors::ServiceError;
use crate::kitchen::store::{DocumentFilter, DocumentStore};

/// MongoDB-backed store. Collection handles are cheap and taken per call.
#[derive(Clone)]
pub struct MongoDocumentStore {
    pub db: Database,
}

impl MongoDocumentStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.db.collection::<Document>(collection.name())
    }
}

fn filter_document(filter: &DocumentFilter) -> Document {
    match &filter.email {
        Some(email) => doc! { "email": email.as_str() },
        None => Document::new(),
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    #[instrument(skip(self, filter), fields(collection = %collection))]
    async fn find(&self, collection: Collection, filter: DocumentFilter, limit: Option<i64>) -> Result<Vec<Document>, ServiceError> {
        let mut options = FindOptions::default();
        options.limit = limit;
        let cursor = self.collection(collection).find(filter_document(&filter), options).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        debug!(count = docs.len(), "find completed");
        Ok(docs)
    }

    #[instrument(skip(self), fields(collection = %collection, id = %id))]
    async fn find_by_id(&self, collection: Collection, id: ObjectId) -> Result<Option<Document>, ServiceError> {
        Ok(self.collection(collection).find_one(doc! { "_id": id }, None).await?)
    }

    #[instrument(skip(self, doc), fields(collection = %collection))]
    async fn insert_one(&self, collection: Collection, doc: Document) -> Result<InsertAck, ServiceError> {
        let result = self.collection(collection).insert_one(doc, None).await?;
        Ok(InsertAck::new(bson_to_json(result.inserted_id)))
    }

    #[instrument(skip(self), fields(collection = %collection, id = %id))]
    async fn delete_by_id(&self, collection: Collection, id: ObjectId) -> Result<DeleteAck, ServiceError> {
        let result = self.collection(collection).delete_one(doc! { "_id": id }, None).await?;
        Ok(DeleteAck::new(result.deleted_count))
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        models::db::ping(&self.db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_matches_everything() {
        assert_eq!(filter_document(&DocumentFilter::all()), Document::new());
        assert_eq!(filter_document(&DocumentFilter::by_email("a@b.com")), doc! { "email": "a@b.com" });
    }

    /// Runs against a live deployment only when `MONGODB_TEST_URI` is set.
    #[tokio::test]
    async fn round_trip_against_live_mongodb() -> Result<(), anyhow::Error> {
        let Ok(uri) = std::env::var("MONGODB_TEST_URI") else {
            eprintln!("MONGODB_TEST_URI missing; skip live mongodb test");
            return Ok(());
        };
        let cfg = configs::DatabaseConfig {
            uri,
            name: format!("miahKitchen_test_{}", ObjectId::new().to_hex()),
            ..Default::default()
        };
        let db = models::db::connect(&cfg).await?;
        let store = MongoDocumentStore::new(db.clone());

        let ack = store.insert_one(Collection::Reviews, doc! { "email": "a@b.com", "text": "tasty" }).await?;
        let id = ObjectId::parse_str(ack.inserted_id.as_str().unwrap_or_default())?;
        let found = store.find(Collection::Reviews, DocumentFilter::by_email("a@b.com"), None).await?;
        assert_eq!(found.len(), 1);
        assert!(store.find_by_id(Collection::Reviews, id).await?.is_some());
        assert_eq!(store.delete_by_id(Collection::Reviews, id).await?.deleted_count, 1);

        db.drop(None).await?;
        Ok(())
    }
}
