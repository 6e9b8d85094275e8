//! Subscription infrastructure: storage backends and the service layer

pub mod in_memory_repository;
pub mod postgres_repository;
pub mod service;

pub use in_memory_repository::InMemorySubscriptionRepository;
pub use postgres_repository::PostgresSubscriptionRepository;
pub use service::SubscriptionService;
