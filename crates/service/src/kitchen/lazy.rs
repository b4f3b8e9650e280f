use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use tokio::sync::OnceCell;
use tracing::{error, info};

use models::{Collection, DeleteAck, Document, InsertAck, ObjectId};

use crate::errors::ServiceError;
use crate::kitchen::store::{DocumentFilter, DocumentStore};

type Connect = Box<dyn Fn() -> BoxFuture<'static, Result<Arc<dyn DocumentStore>, ServiceError>> + Send + Sync>;

/// Store that connects on first use.
///
/// A failed connection attempt is not cached: the call that hit it returns the
/// error and the next call tries again. Once connected, the inner store is kept
/// for the life of the process.
pub struct LazyStore {
    connect: Connect,
    inner: OnceCell<Arc<dyn DocumentStore>>,
}

impl LazyStore {
    pub fn new<F, Fut>(connect: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<dyn DocumentStore>, ServiceError>> + Send + 'static,
    {
        Self { connect: Box::new(move || Box::pin(connect())), inner: OnceCell::new() }
    }

    async fn store(&self) -> Result<&Arc<dyn DocumentStore>, ServiceError> {
        self.inner
            .get_or_try_init(|| async {
                match (self.connect)().await {
                    Ok(store) => {
                        info!("document store connected");
                        Ok(store)
                    }
                    Err(e) => {
                        error!(error = %e, "document store connection failed; will retry on next request");
                        Err(e)
                    }
                }
            })
            .await
    }
}

#[async_trait]
impl DocumentStore for LazyStore {
    async fn find(&self, collection: Collection, filter: DocumentFilter, limit: Option<i64>) -> Result<Vec<Document>, ServiceError> {
        self.store().await?.find(collection, filter, limit).await
    }

    async fn find_by_id(&self, collection: Collection, id: ObjectId) -> Result<Option<Document>, ServiceError> {
        self.store().await?.find_by_id(collection, id).await
    }

    async fn insert_one(&self, collection: Collection, doc: Document) -> Result<InsertAck, ServiceError> {
        self.store().await?.insert_one(collection, doc).await
    }

    async fn delete_by_id(&self, collection: Collection, id: ObjectId) -> Result<DeleteAck, ServiceError> {
        self.store().await?.delete_by_id(collection, id).await
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        self.store().await?.ping().await
    }
}
