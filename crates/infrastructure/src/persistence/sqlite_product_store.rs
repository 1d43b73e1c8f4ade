//! SQLite product store using sqlx
//!
//! Filters and search compare the case-folded shadow columns, as in the book
//! store.

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{ResourceStore, StoreBackend},
};
use async_trait::async_trait;
use domain::{EntityId, ListQuery, Page, Product, ProductDraft, ProductStats, fold_case};
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::{connection::DatabaseHandle, error::map_sqlx_error};

/// Product store backed by the catalog database
#[derive(Debug, Clone)]
pub struct SqliteProductStore {
    handle: Arc<DatabaseHandle>,
}

impl SqliteProductStore {
    #[must_use]
    pub const fn new(handle: Arc<DatabaseHandle>) -> Self {
        Self { handle }
    }

    fn pool(&self) -> Result<Arc<SqlitePool>, ApplicationError> {
        self.handle
            .current()
            .ok_or_else(|| ApplicationError::Storage("Database is not connected".to_string()))
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    description: String,
    price: f64,
    category: String,
    in_stock: bool,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: EntityId::new(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            category: row.category,
            in_stock: row.in_stock,
        }
    }
}

fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

#[async_trait]
impl ResourceStore<Product> for SqliteProductStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Database
    }

    fn is_available(&self) -> bool {
        self.handle.is_connected()
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ListQuery) -> Result<Page<Product>, ApplicationError> {
        let pool = self.pool()?;
        let category = query.category.as_deref().map(fold_case);
        let term = query.term.as_deref().map(fold_case);

        let total: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*) FROM products
            WHERE ($1 IS NULL OR category_folded = $1)
              AND ($2 IS NULL
                   OR instr(name_folded, $2) > 0
                   OR instr(description_folded, $2) > 0)
            ",
        )
        .bind(category.as_deref())
        .bind(term.as_deref())
        .fetch_one(&*pool)
        .await
        .map_err(map_sqlx_error)?;

        let rows: Vec<ProductRow> = sqlx::query_as(
            r"
            SELECT id, name, description, price, category, in_stock
            FROM products
            WHERE ($1 IS NULL OR category_folded = $1)
              AND ($2 IS NULL
                   OR instr(name_folded, $2) > 0
                   OR instr(description_folded, $2) > 0)
            ORDER BY rowid
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(category.as_deref())
        .bind(term.as_deref())
        .bind(i64::from(query.pagination.limit))
        .bind(i64::try_from(query.pagination.offset()).unwrap_or(i64::MAX))
        .fetch_all(&*pool)
        .await
        .map_err(map_sqlx_error)?;

        debug!(total, returned = rows.len(), "Listed products");
        Ok(Page {
            total: to_count(total),
            page: query.pagination.page,
            limit: query.pagination.limit,
            data: rows.into_iter().map(Product::from).collect(),
        })
    }

    #[instrument(skip(self))]
    async fn search(&self, term: &str) -> Result<Vec<Product>, ApplicationError> {
        if term.is_empty() {
            return Ok(Vec::new());
        }
        let pool = self.pool()?;
        let rows: Vec<ProductRow> = sqlx::query_as(
            r"
            SELECT id, name, description, price, category, in_stock
            FROM products
            WHERE instr(name_folded, $1) > 0
               OR instr(description_folded, $1) > 0
            ORDER BY rowid
            ",
        )
        .bind(fold_case(term))
        .fetch_all(&*pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self))]
    async fn stats(&self) -> Result<ProductStats, ApplicationError> {
        let pool = self.pool()?;

        let (total, in_stock): (i64, i64) =
            sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(in_stock), 0) FROM products")
                .fetch_one(&*pool)
                .await
                .map_err(map_sqlx_error)?;

        let counts: Vec<(String, i64)> =
            sqlx::query_as("SELECT category, COUNT(*) FROM products GROUP BY category")
                .fetch_all(&*pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(ProductStats {
            total: to_count(total),
            counts: counts
                .into_iter()
                .map(|(category, count)| (category, to_count(count)))
                .collect(),
            in_stock: to_count(in_stock),
            out_of_stock: to_count(total - in_stock),
        })
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &EntityId) -> Result<Option<Product>, ApplicationError> {
        let pool = self.pool()?;
        let row: Option<ProductRow> = sqlx::query_as(
            "SELECT id, name, description, price, category, in_stock FROM products WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(&*pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Product::from))
    }

    #[instrument(skip(self, draft))]
    async fn create(&self, draft: ProductDraft) -> Result<Product, ApplicationError> {
        let pool = self.pool()?;
        let row: ProductRow = sqlx::query_as(
            r"
            INSERT INTO products (
                name, description, price, category, in_stock,
                category_folded, name_folded, description_folded
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, description, price, category, in_stock
            ",
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(&draft.category)
        .bind(draft.in_stock)
        .bind(fold_case(&draft.category))
        .bind(fold_case(&draft.name))
        .bind(fold_case(&draft.description))
        .fetch_one(&*pool)
        .await
        .map_err(map_sqlx_error)?;

        debug!(id = %row.id, "Product inserted");
        Ok(row.into())
    }

    #[instrument(skip(self, draft))]
    async fn update(
        &self,
        id: &EntityId,
        draft: ProductDraft,
    ) -> Result<Option<Product>, ApplicationError> {
        let pool = self.pool()?;
        let row: Option<ProductRow> = sqlx::query_as(
            r"
            UPDATE products SET
                name = $2,
                description = $3,
                price = $4,
                category = $5,
                in_stock = $6,
                category_folded = $7,
                name_folded = $8,
                description_folded = $9
            WHERE id = $1
            RETURNING id, name, description, price, category, in_stock
            ",
        )
        .bind(id.as_str())
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(&draft.category)
        .bind(draft.in_stock)
        .bind(fold_case(&draft.category))
        .bind(fold_case(&draft.name))
        .bind(fold_case(&draft.description))
        .fetch_optional(&*pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Product::from))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &EntityId) -> Result<Option<Product>, ApplicationError> {
        let pool = self.pool()?;
        let row: Option<ProductRow> = sqlx::query_as(
            r"
            DELETE FROM products WHERE id = $1
            RETURNING id, name, description, price, category, in_stock
            ",
        )
        .bind(id.as_str())
        .fetch_optional(&*pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Product::from))
    }
}
