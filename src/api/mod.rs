//! API layer - HTTP endpoints and wire types

pub mod health;
pub mod router;
pub mod state;
pub mod subscriptions;
pub mod types;

pub use router::create_router_with_state;
pub use state::{AppState, SubscriptionServiceTrait};
