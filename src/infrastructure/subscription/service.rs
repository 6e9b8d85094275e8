//! Subscription service over the repository trait

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::subscription::{
    CostFilter, NewSubscription, Subscription, SubscriptionId, SubscriptionPatch,
    SubscriptionRepository,
};
use crate::domain::DomainError;

/// Application-facing operations on subscription records.
///
/// Thin orchestration over the repository: the patch merge is the only
/// logic that spans more than one store call (read current, merge, full
/// replace).
#[derive(Debug)]
pub struct SubscriptionService<R: SubscriptionRepository> {
    repository: Arc<R>,
}

impl<R: SubscriptionRepository> SubscriptionService<R> {
    /// Create a new subscription service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a new subscription record
    pub async fn create(&self, record: NewSubscription) -> Result<Subscription, DomainError> {
        let created = self.repository.create(record).await?;
        info!(id = %created.id, service = %created.service_name, "Subscription created");
        Ok(created)
    }

    /// Get a record by id
    pub async fn get(&self, id: SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        self.repository.get(id).await
    }

    /// List all records
    pub async fn list(&self) -> Result<Vec<Subscription>, DomainError> {
        self.repository.list().await
    }

    /// Fully replace a record
    pub async fn update(
        &self,
        id: SubscriptionId,
        record: NewSubscription,
    ) -> Result<Subscription, DomainError> {
        let updated = self.repository.update(id, record).await?;
        info!(id = %id, "Subscription updated");
        Ok(updated)
    }

    /// Partially update a record: unset patch fields keep the stored
    /// values.
    pub async fn patch(
        &self,
        id: SubscriptionId,
        patch: SubscriptionPatch,
    ) -> Result<Subscription, DomainError> {
        let stored = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Subscription {} not found", id)))?;

        let merged = patch.apply(&stored);
        let updated = self.repository.update(id, merged).await?;
        info!(id = %id, "Subscription patched");

        Ok(updated)
    }

    /// Delete a record by id
    pub async fn delete(&self, id: SubscriptionId) -> Result<(), DomainError> {
        if !self.repository.delete(id).await? {
            return Err(DomainError::not_found(format!(
                "Subscription {} not found",
                id
            )));
        }

        info!(id = %id, "Subscription deleted");
        Ok(())
    }

    /// Sum the price of records matching the filter
    pub async fn total_cost(&self, filter: CostFilter) -> Result<i64, DomainError> {
        debug!(?filter, "Aggregating subscription cost");
        self.repository.total_cost(&filter).await
    }
}
