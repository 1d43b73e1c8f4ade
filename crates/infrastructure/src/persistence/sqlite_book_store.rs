//! SQLite book store using sqlx
//!
//! Listing, search and stats run in SQL against the `books` table. Filters and
//! search compare case-folded shadow columns written on insert and update, so
//! search terms are literal substrings and non-ASCII text folds the same way
//! as in the fallback store.

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{ResourceStore, StoreBackend},
};
use async_trait::async_trait;
use domain::{Book, BookDraft, BookStats, EntityId, ListQuery, Page, fold_case};
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::{connection::DatabaseHandle, error::map_sqlx_error};

/// Book store backed by the catalog database
#[derive(Debug, Clone)]
pub struct SqliteBookStore {
    handle: Arc<DatabaseHandle>,
}

impl SqliteBookStore {
    /// Create a store that reads the live pool from `handle` on every call
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
struct BookRow {
    id: String,
    title: String,
    author: String,
    genre: String,
    published_year: i64,
    price: f64,
    in_stock: bool,
    pages: i64,
    publisher: String,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: EntityId::new(row.id),
            title: row.title,
            author: row.author,
            genre: row.genre,
            published_year: row.published_year,
            price: row.price,
            in_stock: row.in_stock,
            pages: row.pages,
            publisher: row.publisher,
        }
    }
}

fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

#[async_trait]
impl ResourceStore<Book> for SqliteBookStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Database
    }

    fn is_available(&self) -> bool {
        self.handle.is_connected()
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ListQuery) -> Result<Page<Book>, ApplicationError> {
        let pool = self.pool()?;
        let genre = query.category.as_deref().map(fold_case);
        let term = query.term.as_deref().map(fold_case);

        let total: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*) FROM books
            WHERE ($1 IS NULL OR genre_folded = $1)
              AND ($2 IS NULL
                   OR instr(title_folded, $2) > 0
                   OR instr(author_folded, $2) > 0
                   OR instr(publisher_folded, $2) > 0)
            ",
        )
        .bind(genre.as_deref())
        .bind(term.as_deref())
        .fetch_one(&*pool)
        .await
        .map_err(map_sqlx_error)?;

        let rows: Vec<BookRow> = sqlx::query_as(
            r"
            SELECT id, title, author, genre, published_year, price, in_stock, pages, publisher
            FROM books
            WHERE ($1 IS NULL OR genre_folded = $1)
              AND ($2 IS NULL
                   OR instr(title_folded, $2) > 0
                   OR instr(author_folded, $2) > 0
                   OR instr(publisher_folded, $2) > 0)
            ORDER BY rowid
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(genre.as_deref())
        .bind(term.as_deref())
        .bind(i64::from(query.pagination.limit))
        .bind(i64::try_from(query.pagination.offset()).unwrap_or(i64::MAX))
        .fetch_all(&*pool)
        .await
        .map_err(map_sqlx_error)?;

        debug!(total, returned = rows.len(), "Listed books");
        Ok(Page {
            total: to_count(total),
            page: query.pagination.page,
            limit: query.pagination.limit,
            data: rows.into_iter().map(Book::from).collect(),
        })
    }

    #[instrument(skip(self))]
    async fn search(&self, term: &str) -> Result<Vec<Book>, ApplicationError> {
        if term.is_empty() {
            return Ok(Vec::new());
        }
        let pool = self.pool()?;
        let rows: Vec<BookRow> = sqlx::query_as(
            r"
            SELECT id, title, author, genre, published_year, price, in_stock, pages, publisher
            FROM books
            WHERE instr(title_folded, $1) > 0
               OR instr(author_folded, $1) > 0
               OR instr(publisher_folded, $1) > 0
            ORDER BY rowid
            ",
        )
        .bind(fold_case(term))
        .fetch_all(&*pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Book::from).collect())
    }

    #[instrument(skip(self))]
    async fn stats(&self) -> Result<BookStats, ApplicationError> {
        let pool = self.pool()?;

        let (total, in_stock): (i64, i64) =
            sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(in_stock), 0) FROM books")
                .fetch_one(&*pool)
                .await
                .map_err(map_sqlx_error)?;

        let by_genre: Vec<(String, i64)> =
            sqlx::query_as("SELECT genre, COUNT(*) FROM books GROUP BY genre")
                .fetch_all(&*pool)
                .await
                .map_err(map_sqlx_error)?;

        let by_year: Vec<(i64, i64)> = sqlx::query_as(
            "SELECT published_year, COUNT(*) FROM books GROUP BY published_year",
        )
        .fetch_all(&*pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(BookStats {
            total: to_count(total),
            by_genre: by_genre
                .into_iter()
                .map(|(genre, count)| (genre, to_count(count)))
                .collect(),
            by_year: by_year
                .into_iter()
                .map(|(year, count)| (year.to_string(), to_count(count)))
                .collect(),
            in_stock: to_count(in_stock),
            out_of_stock: to_count(total - in_stock),
        })
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &EntityId) -> Result<Option<Book>, ApplicationError> {
        let pool = self.pool()?;
        let row: Option<BookRow> = sqlx::query_as(
            r"
            SELECT id, title, author, genre, published_year, price, in_stock, pages, publisher
            FROM books WHERE id = $1
            ",
        )
        .bind(id.as_str())
        .fetch_optional(&*pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Book::from))
    }

    #[instrument(skip(self, draft))]
    async fn create(&self, draft: BookDraft) -> Result<Book, ApplicationError> {
        let pool = self.pool()?;
        let row: BookRow = sqlx::query_as(
            r"
            INSERT INTO books (
                title, author, genre, published_year, price, in_stock, pages, publisher,
                genre_folded, title_folded, author_folded, publisher_folded
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id, title, author, genre, published_year, price, in_stock, pages, publisher
            ",
        )
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.genre)
        .bind(draft.published_year)
        .bind(draft.price)
        .bind(draft.in_stock)
        .bind(draft.pages)
        .bind(&draft.publisher)
        .bind(fold_case(&draft.genre))
        .bind(fold_case(&draft.title))
        .bind(fold_case(&draft.author))
        .bind(fold_case(&draft.publisher))
        .fetch_one(&*pool)
        .await
        .map_err(map_sqlx_error)?;

        debug!(id = %row.id, "Book inserted");
        Ok(row.into())
    }

    #[instrument(skip(self, draft))]
    async fn update(
        &self,
        id: &EntityId,
        draft: BookDraft,
    ) -> Result<Option<Book>, ApplicationError> {
        let pool = self.pool()?;
        let row: Option<BookRow> = sqlx::query_as(
            r"
            UPDATE books SET
                title = $2,
                author = $3,
                genre = $4,
                published_year = $5,
                price = $6,
                in_stock = $7,
                pages = $8,
                publisher = $9,
                genre_folded = $10,
                title_folded = $11,
                author_folded = $12,
                publisher_folded = $13
            WHERE id = $1
            RETURNING id, title, author, genre, published_year, price, in_stock, pages, publisher
            ",
        )
        .bind(id.as_str())
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.genre)
        .bind(draft.published_year)
        .bind(draft.price)
        .bind(draft.in_stock)
        .bind(draft.pages)
        .bind(&draft.publisher)
        .bind(fold_case(&draft.genre))
        .bind(fold_case(&draft.title))
        .bind(fold_case(&draft.author))
        .bind(fold_case(&draft.publisher))
        .fetch_optional(&*pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Book::from))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &EntityId) -> Result<Option<Book>, ApplicationError> {
        let pool = self.pool()?;
        let row: Option<BookRow> = sqlx::query_as(
            r"
            DELETE FROM books WHERE id = $1
            RETURNING id, title, author, genre, published_year, price, in_stock, pages, publisher
            ",
        )
        .bind(id.as_str())
        .fetch_optional(&*pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Book::from))
    }
}
