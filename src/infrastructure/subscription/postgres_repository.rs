//! PostgreSQL subscription repository implementation

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::month::Month;
use crate::domain::subscription::{
    CostFilter, NewSubscription, Subscription, SubscriptionId, SubscriptionRepository,
};
use crate::domain::DomainError;

/// PostgreSQL implementation of SubscriptionRepository
#[derive(Debug, Clone)]
pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn create(&self, record: NewSubscription) -> Result<Subscription, DomainError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO subscriptions (service_name, price, user_id, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&record.service_name)
        .bind(record.price)
        .bind(record.user_id)
        .bind(record.start.first_day())
        .bind(record.end.map(|m| m.first_day()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create subscription: {}", e)))?;

        Ok(Subscription::from_new(SubscriptionId::new(id), record))
    }

    async fn get(&self, id: SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, service_name, price, user_id, start_date, end_date
            FROM subscriptions
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get subscription: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_subscription(&row)?)),
            None => Ok(None),
        }
    }

    async fn update(
        &self,
        id: SubscriptionId,
        record: NewSubscription,
    ) -> Result<Subscription, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE subscriptions
            SET service_name = $2, price = $3, user_id = $4, start_date = $5, end_date = $6
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .bind(&record.service_name)
        .bind(record.price)
        .bind(record.user_id)
        .bind(record.start.first_day())
        .bind(record.end.map(|m| m.first_day()))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update subscription: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Subscription {} not found",
                id
            )));
        }

        Ok(Subscription::from_new(id, record))
    }

    async fn delete(&self, id: SubscriptionId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete subscription: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<Subscription>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, service_name, price, user_id, start_date, end_date
            FROM subscriptions
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list subscriptions: {}", e)))?;

        rows.iter().map(row_to_subscription).collect()
    }

    async fn total_cost(&self, filter: &CostFilter) -> Result<i64, DomainError> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(price), 0)::BIGINT
            FROM subscriptions
            WHERE ($1::date IS NULL OR start_date <= $1)
              AND ($2::date IS NULL OR end_date IS NULL OR end_date >= $2)
              AND ($3::uuid IS NULL OR user_id = $3)
              AND ($4::text IS NULL OR service_name = $4)
            "#,
        )
        .bind(filter.active_to.map(|m| m.first_day()))
        .bind(filter.active_from.map(|m| m.first_day()))
        .bind(filter.user_id)
        .bind(filter.service_name.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to aggregate cost: {}", e)))?;

        Ok(total)
    }
}

fn row_to_subscription(row: &PgRow) -> Result<Subscription, DomainError> {
    let id: i64 = get_column(row, "id")?;
    let service_name: String = get_column(row, "service_name")?;
    let price: i64 = get_column(row, "price")?;
    let user_id: Uuid = get_column(row, "user_id")?;
    let start_date: NaiveDate = get_column(row, "start_date")?;
    let end_date: Option<NaiveDate> = get_column(row, "end_date")?;

    Ok(Subscription {
        id: SubscriptionId::new(id),
        service_name,
        price,
        user_id,
        start: Month::from_date(start_date),
        end: end_date.map(Month::from_date),
    })
}

fn get_column<'r, T>(row: &'r PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| DomainError::storage(format!("Failed to decode column '{}': {}", column, e)))
}
