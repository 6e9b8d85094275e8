//! Wire shapes for the subscription endpoints
//!
//! These decouple the JSON surface (string-encoded dates and user ids)
//! from the typed domain record. Absent fields deserialize to their zero
//! values, which the conversions below interpret per endpoint: required
//! on create/update, "keep stored value" on patch, "unconstrained" on the
//! cost filter.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::month::Month;
use crate::domain::subscription::{CostFilter, NewSubscription, Subscription, SubscriptionPatch};
use crate::domain::DomainError;

/// Request body for create, full update, and partial update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionRequest {
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl SubscriptionRequest {
    /// Convert into a full domain record for create/update.
    ///
    /// `start_date` is required; `end_date` absent or empty means
    /// open-ended; an empty `user_id` is stored as the nil UUID. Price is
    /// copied verbatim, bounds unchecked.
    pub fn to_domain(&self) -> Result<NewSubscription, DomainError> {
        let start = parse_month_field(&self.start_date, "start_date")?
            .ok_or_else(|| DomainError::validation("start_date is required"))?;

        let end = match &self.end_date {
            Some(raw) => parse_month_field(raw, "end_date")?,
            None => None,
        };

        let user_id = parse_user_id(&self.user_id)?.unwrap_or_else(Uuid::nil);

        Ok(NewSubscription {
            service_name: self.service_name.clone(),
            price: self.price,
            user_id,
            start,
            end,
        })
    }

    /// Convert into a patch for partial update.
    ///
    /// Zero-valued fields (empty strings, price 0, absent dates) become
    /// `None` and keep the stored value. A genuine price of 0 is
    /// therefore indistinguishable from an omitted price; the stored
    /// price wins. Present-but-malformed values still fail the whole
    /// conversion.
    pub fn to_patch(&self) -> Result<SubscriptionPatch, DomainError> {
        let service_name = if self.service_name.is_empty() {
            None
        } else {
            Some(self.service_name.clone())
        };

        let price = if self.price == 0 { None } else { Some(self.price) };

        let start = parse_month_field(&self.start_date, "start_date")?;

        let end = match &self.end_date {
            Some(raw) => parse_month_field(raw, "end_date")?,
            None => None,
        };

        Ok(SubscriptionPatch {
            service_name,
            price,
            user_id: parse_user_id(&self.user_id)?,
            start,
            end,
        })
    }
}

/// Response body for a single subscription record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    pub id: i64,
    pub service_name: String,
    pub price: i64,
    pub user_id: String,
    pub start_date: String,
    // Serialized as null when unset, not omitted.
    pub end_date: Option<String>,
}

impl From<&Subscription> for SubscriptionResponse {
    fn from(record: &Subscription) -> Self {
        Self {
            id: record.id.value(),
            service_name: record.service_name.clone(),
            price: record.price,
            user_id: record.user_id.to_string(),
            start_date: record.start.to_string(),
            end_date: record.end.map(|m| m.to_string()),
        }
    }
}

/// List response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSubscriptionsResponse {
    pub subscriptions: Vec<SubscriptionResponse>,
    pub total: usize,
}

/// Request body for the cost aggregation endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CostRequest {
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

impl CostRequest {
    /// Build the aggregation filter; empty fields are unconstrained.
    pub fn to_filter(&self) -> Result<CostFilter, DomainError> {
        let service_name = if self.service_name.is_empty() {
            None
        } else {
            Some(self.service_name.clone())
        };

        Ok(CostFilter {
            service_name,
            user_id: parse_user_id(&self.user_id)?,
            active_from: parse_month_field(&self.start_date, "start_date")?,
            active_to: parse_month_field(&self.end_date, "end_date")?,
        })
    }
}

/// Response body for the cost aggregation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostResponse {
    pub cost: i64,
}

fn parse_month_field(raw: &str, field: &str) -> Result<Option<Month>, DomainError> {
    Month::parse(raw).map_err(|e| DomainError::validation(format!("Invalid {}: {}", field, e)))
}

fn parse_user_id(raw: &str) -> Result<Option<Uuid>, DomainError> {
    if raw.is_empty() {
        return Ok(None);
    }

    Uuid::parse_str(raw)
        .map(Some)
        .map_err(|_| DomainError::validation("Invalid user_id format, must be a UUID"))
}
