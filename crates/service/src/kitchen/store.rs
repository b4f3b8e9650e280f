use async_trait::async_trait;
use models::{Collection, DeleteAck, Document, InsertAck, ObjectId};

use crate::errors::ServiceError;

/// Equality filter applied to `find`. An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    pub email: Option<String>,
}

impl DocumentFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_email(email: impl Into<String>) -> Self {
        Self { email: Some(email.into()) }
    }

    pub fn matches(&self, doc: &Document) -> bool {
        match &self.email {
            Some(email) => doc.get_str("email").map(|e| e == email.as_str()).unwrap_or(false),
            None => true,
        }
    }
}

/// Single-operation access to the four kitchen collections.
///
/// Each method maps onto exactly one driver call; there are no multi-document
/// transactions.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Documents matching `filter` in natural store order, at most `limit` of them.
    async fn find(&self, collection: Collection, filter: DocumentFilter, limit: Option<i64>) -> Result<Vec<Document>, ServiceError>;
    async fn find_by_id(&self, collection: Collection, id: ObjectId) -> Result<Option<Document>, ServiceError>;
    /// Store `doc`, generating an `_id` when it has none.
    async fn insert_one(&self, collection: Collection, doc: Document) -> Result<InsertAck, ServiceError>;
    async fn delete_by_id(&self, collection: Collection, id: ObjectId) -> Result<DeleteAck, ServiceError>;
    async fn ping(&self) -> Result<(), ServiceError>;
}

/// Test doubles: an in-memory store and an always-failing one.
pub mod mock {
    use super::*;
    use std::collections::HashMap;

    use models::document::{bson_to_json, object_id_of};
    use mongodb::bson::Bson;
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct MemoryStore {
        collections: RwLock<HashMap<Collection, Vec<Document>>>, // insertion order per collection
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Insert documents directly, bypassing the API. Returns their `_id` values.
        pub async fn seed(&self, collection: Collection, docs: Vec<Document>) -> Vec<Bson> {
            let mut ids = Vec::with_capacity(docs.len());
            let mut map = self.collections.write().await;
            let entries = map.entry(collection).or_default();
            for doc in docs {
                let (id, doc) = ensure_id(doc);
                ids.push(id);
                entries.push(doc);
            }
            ids
        }

        pub async fn len(&self, collection: Collection) -> usize {
            let map = self.collections.read().await;
            map.get(&collection).map(Vec::len).unwrap_or(0)
        }
    }

    /// Mirror the driver: a missing `_id` is generated and placed first.
    fn ensure_id(doc: Document) -> (Bson, Document) {
        if let Some(id) = doc.get("_id") {
            return (id.clone(), doc);
        }
        let id = Bson::ObjectId(ObjectId::new());
        let mut out = Document::new();
        out.insert("_id", id.clone());
        for (key, value) in doc {
            out.insert(key, value);
        }
        (id, out)
    }

    #[async_trait]
    impl DocumentStore for MemoryStore {
        async fn find(&self, collection: Collection, filter: DocumentFilter, limit: Option<i64>) -> Result<Vec<Document>, ServiceError> {
            let map = self.collections.read().await;
            let take = match limit {
                Some(n) if n > 0 => n as usize,
                _ => usize::MAX,
            };
            Ok(map
                .get(&collection)
                .map(|docs| docs.iter().filter(|d| filter.matches(d)).take(take).cloned().collect())
                .unwrap_or_default())
        }

        async fn find_by_id(&self, collection: Collection, id: ObjectId) -> Result<Option<Document>, ServiceError> {
            let map = self.collections.read().await;
            Ok(map
                .get(&collection)
                .and_then(|docs| docs.iter().find(|d| object_id_of(d) == Some(id)).cloned()))
        }

        async fn insert_one(&self, collection: Collection, doc: Document) -> Result<InsertAck, ServiceError> {
            let (id, doc) = ensure_id(doc);
            let mut map = self.collections.write().await;
            map.entry(collection).or_default().push(doc);
            Ok(InsertAck::new(bson_to_json(id)))
        }

        async fn delete_by_id(&self, collection: Collection, id: ObjectId) -> Result<DeleteAck, ServiceError> {
            let mut map = self.collections.write().await;
            let Some(docs) = map.get_mut(&collection) else {
                return Ok(DeleteAck::new(0));
            };
            match docs.iter().position(|d| object_id_of(d) == Some(id)) {
                Some(pos) => {
                    docs.remove(pos);
                    Ok(DeleteAck::new(1))
                }
                None => Ok(DeleteAck::new(0)),
            }
        }

        async fn ping(&self) -> Result<(), ServiceError> {
            Ok(())
        }
    }

    /// Store whose every operation fails, for exercising error paths.
    pub struct UnavailableStore {
        reason: String,
    }

    impl UnavailableStore {
        pub fn new(reason: impl Into<String>) -> Self {
            Self { reason: reason.into() }
        }

        fn err(&self) -> ServiceError {
            ServiceError::Store(format!("database unavailable: {}", self.reason))
        }
    }

    #[async_trait]
    impl DocumentStore for UnavailableStore {
        async fn find(&self, _: Collection, _: DocumentFilter, _: Option<i64>) -> Result<Vec<Document>, ServiceError> {
            Err(self.err())
        }

        async fn find_by_id(&self, _: Collection, _: ObjectId) -> Result<Option<Document>, ServiceError> {
            Err(self.err())
        }

        async fn insert_one(&self, _: Collection, _: Document) -> Result<InsertAck, ServiceError> {
            Err(self.err())
        }

        async fn delete_by_id(&self, _: Collection, _: ObjectId) -> Result<DeleteAck, ServiceError> {
            Err(self.err())
        }

        async fn ping(&self) -> Result<(), ServiceError> {
            Err(self.err())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{MemoryStore, UnavailableStore};
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn find_respects_order_filter_and_limit() -> Result<(), anyhow::Error> {
        let store = MemoryStore::new();
        store
            .seed(
                Collection::Reviews,
                vec![
                    doc! { "email": "a@b.com", "text": "great" },
                    doc! { "email": "c@d.com", "text": "ok" },
                    doc! { "email": "a@b.com", "text": "again" },
                ],
            )
            .await;

        let all = store.find(Collection::Reviews, DocumentFilter::all(), None).await?;
        assert_eq!(all.len(), 3);

        let mine = store.find(Collection::Reviews, DocumentFilter::by_email("a@b.com"), None).await?;
        let texts: Vec<_> = mine.iter().map(|d| d.get_str("text").unwrap()).collect();
        assert_eq!(texts, ["great", "again"]);

        let first = store.find(Collection::Reviews, DocumentFilter::all(), Some(1)).await?;
        assert_eq!(first[0].get_str("text")?, "great");
        Ok(())
    }

    #[tokio::test]
    async fn insert_generates_leading_object_id() -> Result<(), anyhow::Error> {
        let store = MemoryStore::new();
        let ack = store.insert_one(Collection::Orders, doc! { "email": "a@b.com" }).await?;
        assert!(ack.acknowledged);

        let stored = store.find(Collection::Orders, DocumentFilter::all(), None).await?;
        let (first_key, _) = stored[0].iter().next().unwrap();
        assert_eq!(first_key, "_id");
        assert_eq!(ack.inserted_id, serde_json::json!(stored[0].get_object_id("_id")?.to_hex()));
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_only_the_matching_document() -> Result<(), anyhow::Error> {
        let store = MemoryStore::new();
        let ids = store
            .seed(Collection::Reviews, vec![doc! { "n": 1 }, doc! { "n": 2 }])
            .await;

        let first = ids[0].as_object_id().unwrap();
        let ack = store.delete_by_id(Collection::Reviews, first).await?;
        assert_eq!(ack.deleted_count, 1);
        assert_eq!(store.len(Collection::Reviews).await, 1);
        assert!(store.find_by_id(Collection::Reviews, first).await?.is_none());

        let again = store.delete_by_id(Collection::Reviews, first).await?;
        assert_eq!(again.deleted_count, 0);
        Ok(())
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_call() {
        let store = UnavailableStore::new("dns lookup failed");
        let err = store.find(Collection::Services, DocumentFilter::all(), None).await.unwrap_err();
        assert!(err.to_string().contains("dns lookup failed"));
        assert!(store.ping().await.is_err());
    }
}
