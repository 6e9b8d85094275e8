//! Subscription repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{NewSubscription, Subscription, SubscriptionId};
use super::filter::CostFilter;
use crate::domain::DomainError;

/// Storage capability for subscription records.
///
/// Every operation is a single statement against the backing store; the
/// store itself serializes conflicting writes, so no application-level
/// locking or transactions are layered on top.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync + Debug {
    /// Persist a new record; the store assigns the id.
    async fn create(&self, record: NewSubscription) -> Result<Subscription, DomainError>;

    /// Fetch a record by id.
    async fn get(&self, id: SubscriptionId) -> Result<Option<Subscription>, DomainError>;

    /// Fully replace a record by id. Fails with `NotFound` when the id
    /// does not exist.
    async fn update(
        &self,
        id: SubscriptionId,
        record: NewSubscription,
    ) -> Result<Subscription, DomainError>;

    /// Delete a record by id, returning whether anything was removed.
    async fn delete(&self, id: SubscriptionId) -> Result<bool, DomainError>;

    /// All records, order unspecified.
    async fn list(&self) -> Result<Vec<Subscription>, DomainError>;

    /// Sum of `price` over records matching the filter; 0 when nothing
    /// matches.
    async fn total_cost(&self, filter: &CostFilter) -> Result<i64, DomainError>;
}
