use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument};

use models::document::{json_to_document, parse_object_id};
use models::{Collection, DeleteAck, Document, InsertAck};

use crate::errors::ServiceError;
use crate::kitchen::store::{DocumentFilter, DocumentStore};

/// Number of services shown on the landing page (`GET /service`).
pub const FEATURED_SERVICES: i64 = 3;

/// Application service behind every kitchen route. Each method is one store call.
#[derive(Clone)]
pub struct KitchenService {
    store: Arc<dyn DocumentStore>,
}

impl KitchenService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self { Self { store } }

    pub async fn featured_services(&self) -> Result<Vec<Document>, ServiceError> {
        self.store.find(Collection::Services, DocumentFilter::all(), Some(FEATURED_SERVICES)).await
    }

    pub async fn services(&self) -> Result<Vec<Document>, ServiceError> {
        self.store.find(Collection::Services, DocumentFilter::all(), None).await
    }

    pub async fn service(&self, id: &str) -> Result<Option<Document>, ServiceError> {
        let id = parse_object_id(id)?;
        self.store.find_by_id(Collection::Services, id).await
    }

    pub async fn catering_data(&self) -> Result<Vec<Document>, ServiceError> {
        self.store.find(Collection::CateringData, DocumentFilter::all(), None).await
    }

    #[instrument(skip(self, body))]
    pub async fn create_review(&self, body: Value) -> Result<InsertAck, ServiceError> {
        let ack = self.store.insert_one(Collection::Reviews, json_to_document(body)?).await?;
        info!(inserted_id = %ack.inserted_id, "review_created");
        Ok(ack)
    }

    pub async fn reviews(&self) -> Result<Vec<Document>, ServiceError> {
        self.store.find(Collection::Reviews, DocumentFilter::all(), None).await
    }

    /// Reviews written by `email`, or every review when no email is given.
    pub async fn reviews_by_email(&self, email: Option<&str>) -> Result<Vec<Document>, ServiceError> {
        self.store.find(Collection::Reviews, email_filter(email), None).await
    }

    pub async fn review(&self, id: &str) -> Result<Option<Document>, ServiceError> {
        let id = parse_object_id(id)?;
        self.store.find_by_id(Collection::Reviews, id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_review(&self, id: &str) -> Result<DeleteAck, ServiceError> {
        let oid = parse_object_id(id)?;
        let ack = self.store.delete_by_id(Collection::Reviews, oid).await?;
        info!(deleted_count = ack.deleted_count, "review_deleted");
        Ok(ack)
    }

    #[instrument(skip(self, body))]
    pub async fn create_order(&self, body: Value) -> Result<InsertAck, ServiceError> {
        let ack = self.store.insert_one(Collection::Orders, json_to_document(body)?).await?;
        info!(inserted_id = %ack.inserted_id, "order_created");
        Ok(ack)
    }

    /// Orders placed by `email`, or every order when no email is given.
    pub async fn orders_by_email(&self, email: Option<&str>) -> Result<Vec<Document>, ServiceError> {
        self.store.find(Collection::Orders, email_filter(email), None).await
    }
}

fn email_filter(email: Option<&str>) -> DocumentFilter {
    match email {
        Some(e) => DocumentFilter::by_email(e),
        None => DocumentFilter::all(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kitchen::store::mock::MemoryStore;
    use models::errors::ModelError;
    use mongodb::bson::doc;
    use serde_json::json;

    async fn service_with_menu(items: usize) -> (KitchenService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let menu = (0..items).map(|i| doc! { "name": format!("dish-{i}") }).collect();
        store.seed(Collection::Services, menu).await;
        (KitchenService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn featured_services_is_a_prefix_of_all_services() -> Result<(), anyhow::Error> {
        let (svc, _) = service_with_menu(5).await;
        let featured = svc.featured_services().await?;
        let all = svc.services().await?;
        assert_eq!(featured.len(), 3);
        assert_eq!(all.len(), 5);
        assert_eq!(&all[..3], &featured[..]);
        Ok(())
    }

    #[tokio::test]
    async fn featured_services_with_short_menu() -> Result<(), anyhow::Error> {
        let (svc, _) = service_with_menu(2).await;
        assert_eq!(svc.featured_services().await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_ids_are_reported_not_panicked() {
        let (svc, _) = service_with_menu(1).await;
        let err = svc.service("xyz").await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(ModelError::InvalidId(_))));
        let err = svc.delete_review("xyz").await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(ModelError::InvalidId(_))));
    }

    #[tokio::test]
    async fn missing_email_lists_everything() -> Result<(), anyhow::Error> {
        let (svc, store) = service_with_menu(0).await;
        svc.create_order(json!({ "email": "a@b.com", "item": "biryani" })).await?;
        svc.create_order(json!({ "email": "c@d.com", "item": "kebab" })).await?;
        assert_eq!(store.len(Collection::Orders).await, 2);

        assert_eq!(svc.orders_by_email(None).await?.len(), 2);
        let mine = svc.orders_by_email(Some("a@b.com")).await?;
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].get_str("item")?, "biryani");
        Ok(())
    }

    #[tokio::test]
    async fn created_review_is_retrievable_by_inserted_id() -> Result<(), anyhow::Error> {
        let (svc, _) = service_with_menu(0).await;
        let ack = svc.create_review(json!({ "email": "a@b.com", "rating": 5 })).await?;
        let id = ack.inserted_id.as_str().unwrap_or_default().to_string();
        let review = svc.review(&id).await?.expect("review stored");
        assert_eq!(review.get_str("email")?, "a@b.com");

        assert_eq!(svc.delete_review(&id).await?.deleted_count, 1);
        assert!(svc.review(&id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn non_object_body_is_rejected() {
        let (svc, _) = service_with_menu(0).await;
        let err = svc.create_review(json!(["not", "a", "document"])).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(ModelError::NotAnObject)));
    }
}
