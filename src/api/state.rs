//! Application state for shared services

use std::sync::Arc;

use crate::domain::subscription::{
    CostFilter, NewSubscription, Subscription, SubscriptionId, SubscriptionPatch,
    SubscriptionRepository,
};
use crate::domain::DomainError;
use crate::infrastructure::subscription::SubscriptionService;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub subscriptions: Arc<dyn SubscriptionServiceTrait>,
}

impl AppState {
    pub fn new(subscriptions: Arc<dyn SubscriptionServiceTrait>) -> Self {
        Self { subscriptions }
    }
}

/// Trait for subscription service operations
#[async_trait::async_trait]
pub trait SubscriptionServiceTrait: Send + Sync {
    async fn create(&self, record: NewSubscription) -> Result<Subscription, DomainError>;
    async fn get(&self, id: SubscriptionId) -> Result<Option<Subscription>, DomainError>;
    async fn list(&self) -> Result<Vec<Subscription>, DomainError>;
    async fn update(
        &self,
        id: SubscriptionId,
        record: NewSubscription,
    ) -> Result<Subscription, DomainError>;
    async fn patch(
        &self,
        id: SubscriptionId,
        patch: SubscriptionPatch,
    ) -> Result<Subscription, DomainError>;
    async fn delete(&self, id: SubscriptionId) -> Result<(), DomainError>;
    async fn total_cost(&self, filter: CostFilter) -> Result<i64, DomainError>;
}

#[async_trait::async_trait]
impl<R: SubscriptionRepository> SubscriptionServiceTrait for SubscriptionService<R> {
    async fn create(&self, record: NewSubscription) -> Result<Subscription, DomainError> {
        SubscriptionService::create(self, record).await
    }

    async fn get(&self, id: SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        SubscriptionService::get(self, id).await
    }

    async fn list(&self) -> Result<Vec<Subscription>, DomainError> {
        SubscriptionService::list(self).await
    }

    async fn update(
        &self,
        id: SubscriptionId,
        record: NewSubscription,
    ) -> Result<Subscription, DomainError> {
        SubscriptionService::update(self, id, record).await
    }

    async fn patch(
        &self,
        id: SubscriptionId,
        patch: SubscriptionPatch,
    ) -> Result<Subscription, DomainError> {
        SubscriptionService::patch(self, id, patch).await
    }

    async fn delete(&self, id: SubscriptionId) -> Result<(), DomainError> {
        SubscriptionService::delete(self, id).await
    }

    async fn total_cost(&self, filter: CostFilter) -> Result<i64, DomainError> {
        SubscriptionService::total_cost(self, filter).await
    }
}
