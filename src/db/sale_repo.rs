//! Sale repository for Farmstead
//!
//! Sales are append-only; the listing query sorts by sale date descending
//! (lexicographic on YYYY-MM-DD, which matches chronological order), with
//! creation time as the tie-breaker.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    db::{repository::RepositoryResult, DbPool},
    models::{NewSale, Sale},
};

/// Sale repository trait
#[async_trait]
pub trait SaleRepository: Send + Sync {
    /// Insert a new sale, issuing its identifier
    async fn insert(&self, sale: NewSale) -> RepositoryResult<Sale>;

    /// Fetch every sale, newest sale date first
    async fn find_all_by_date_desc(&self) -> RepositoryResult<Vec<Sale>>;
}

/// PostgreSQL implementation of SaleRepository
pub struct PgSaleRepository {
    pool: DbPool,
}

impl PgSaleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn row_to_sale(row: &sqlx::postgres::PgRow) -> RepositoryResult<Sale> {
        Ok(Sale {
            id: row.try_get("id")?,
            description: row.try_get("description")?,
            amount: row.try_get("amount")?,
            quantity: row.try_get("quantity")?,
            date: row.try_get("sale_date")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl SaleRepository for PgSaleRepository {
    async fn insert(&self, sale: NewSale) -> RepositoryResult<Sale> {
        let record = Sale {
            id: Uuid::new_v4(),
            description: sale.description,
            amount: sale.amount,
            quantity: sale.quantity,
            date: sale.date,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO sales (id, description, amount, quantity, sale_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id)
        .bind(&record.description)
        .bind(record.amount)
        .bind(record.quantity)
        .bind(&record.date)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    async fn find_all_by_date_desc(&self) -> RepositoryResult<Vec<Sale>> {
        let rows = sqlx::query(
            r#"
            SELECT id, description, amount, quantity, sale_date, created_at
            FROM sales
            ORDER BY sale_date DESC, created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_sale).collect()
    }
}
