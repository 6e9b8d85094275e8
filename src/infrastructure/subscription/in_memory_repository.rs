//! In-memory subscription repository implementation

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::subscription::{
    CostFilter, NewSubscription, Subscription, SubscriptionId, SubscriptionRepository,
};
use crate::domain::DomainError;

/// In-memory implementation of SubscriptionRepository.
///
/// Used as the test double and as a selectable backend for local
/// development.
#[derive(Debug)]
pub struct InMemorySubscriptionRepository {
    records: Arc<RwLock<HashMap<SubscriptionId, Subscription>>>,
    next_id: AtomicI64,
}

impl InMemorySubscriptionRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemorySubscriptionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn create(&self, record: NewSubscription) -> Result<Subscription, DomainError> {
        let id = SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let subscription = Subscription::from_new(id, record);

        let mut records = self.records.write().await;
        records.insert(id, subscription.clone());

        Ok(subscription)
    }

    async fn get(&self, id: SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }

    async fn update(
        &self,
        id: SubscriptionId,
        record: NewSubscription,
    ) -> Result<Subscription, DomainError> {
        let mut records = self.records.write().await;

        if !records.contains_key(&id) {
            return Err(DomainError::not_found(format!(
                "Subscription {} not found",
                id
            )));
        }

        let subscription = Subscription::from_new(id, record);
        records.insert(id, subscription.clone());

        Ok(subscription)
    }

    async fn delete(&self, id: SubscriptionId) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        Ok(records.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<Subscription>, DomainError> {
        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }

    async fn total_cost(&self, filter: &CostFilter) -> Result<i64, DomainError> {
        let records = self.records.read().await;

        let total = records
            .values()
            .filter(|record| filter.matches(record))
            .map(|record| record.price)
            .sum();

        Ok(total)
    }
}
