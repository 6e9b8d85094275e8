//! Domain layer - Core business logic and entities

pub mod error;
pub mod month;
pub mod subscription;

pub use error::DomainError;
pub use month::{Month, MonthError};
pub use subscription::{
    CostFilter, NewSubscription, Subscription, SubscriptionId, SubscriptionPatch,
    SubscriptionRepository,
};
