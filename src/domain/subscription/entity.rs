//! Subscription record types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::month::Month;

/// Store-assigned subscription identifier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SubscriptionId(i64);

impl SubscriptionId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted subscription record.
///
/// `end` of `None` means the subscription is open-ended. A nil `user_id`
/// stands for "no user supplied"; the price is whole currency units and is
/// deliberately not bounds-checked at this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub service_name: String,
    pub price: i64,
    pub user_id: Uuid,
    pub start: Month,
    pub end: Option<Month>,
}

/// A subscription record before the store has assigned it an id.
///
/// Input to both create and full-replace update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
    pub service_name: String,
    pub price: i64,
    pub user_id: Uuid,
    pub start: Month,
    pub end: Option<Month>,
}

impl Subscription {
    pub fn from_new(id: SubscriptionId, new: NewSubscription) -> Self {
        Self {
            id,
            service_name: new.service_name,
            price: new.price,
            user_id: new.user_id,
            start: new.start,
            end: new.end,
        }
    }

    pub fn to_new(&self) -> NewSubscription {
        NewSubscription {
            service_name: self.service_name.clone(),
            price: self.price,
            user_id: self.user_id,
            start: self.start,
            end: self.end,
        }
    }
}

/// Partial update to a stored subscription.
///
/// `None` fields keep the stored value. The wire layer maps zero-valued
/// inputs (empty strings, price 0, absent dates) to `None`, so a caller
/// cannot patch a price to exactly 0 or clear an end date; the stored
/// value wins in both cases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionPatch {
    pub service_name: Option<String>,
    pub price: Option<i64>,
    pub user_id: Option<Uuid>,
    pub start: Option<Month>,
    pub end: Option<Month>,
}

impl SubscriptionPatch {
    /// Merge this patch over a stored record, producing the full
    /// replacement to write back.
    pub fn apply(self, stored: &Subscription) -> NewSubscription {
        NewSubscription {
            service_name: self.service_name.unwrap_or_else(|| stored.service_name.clone()),
            price: self.price.unwrap_or(stored.price),
            user_id: self.user_id.unwrap_or(stored.user_id),
            start: self.start.unwrap_or(stored.start),
            end: self.end.or(stored.end),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.service_name.is_none()
            && self.price.is_none()
            && self.user_id.is_none()
            && self.start.is_none()
            && self.end.is_none()
    }
}
