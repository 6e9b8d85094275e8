//! Subscription domain: records, patches, cost filters, storage trait

pub mod entity;
pub mod filter;
pub mod repository;

pub use entity::{NewSubscription, Subscription, SubscriptionId, SubscriptionPatch};
pub use filter::CostFilter;
pub use repository::SubscriptionRepository;
