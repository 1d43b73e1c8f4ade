//! Catalog handlers
//!
//! One set of handlers serves both collections. [`Collection`] tells each
//! handler which service to call and which query parameter filters it.

use application::CatalogService;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use domain::{Book, EntityId, ListQuery, Page, Pagination, Product, Resource};
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    middleware::{FirstValueQuery, ResourcePayload},
    state::AppState,
};

/// A resource kind exposed over HTTP
pub trait Collection: Resource {
    /// Service holding this collection
    fn service(state: &AppState) -> &CatalogService<Self>;

    /// Value of the category filter in a list request
    fn category_filter(params: &ListParams) -> Option<String>;
}

impl Collection for Book {
    fn service(state: &AppState) -> &CatalogService<Self> {
        &state.books
    }

    fn category_filter(params: &ListParams) -> Option<String> {
        params.genre.clone()
    }
}

impl Collection for Product {
    fn service(state: &AppState) -> &CatalogService<Self> {
        &state.products
    }

    fn category_filter(params: &ListParams) -> Option<String> {
        params.category.clone()
    }
}

/// List query string; every value is optional and coerced leniently
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Book genre filter
    pub genre: Option<String>,
    /// Product category filter
    pub category: Option<String>,
    /// Free-text search term
    pub q: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListParams {
    fn into_query<R: Collection>(self) -> ListQuery {
        let pagination = Pagination::from_raw(self.page.as_deref(), self.limit.as_deref());
        let category = R::category_filter(&self);
        ListQuery::new(pagination)
            .with_category(category)
            .with_term(self.q)
    }
}

/// Search query string
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Body returned by a successful delete
#[derive(Debug, Serialize)]
pub struct Deleted<R> {
    pub deleted: R,
}

/// `GET /` of a collection
pub async fn list<R: Collection>(
    State(state): State<AppState>,
    FirstValueQuery(params): FirstValueQuery<ListParams>,
) -> Result<Json<Page<R>>, ApiError> {
    let page = R::service(&state).list(&params.into_query::<R>()).await?;
    Ok(Json(page))
}

/// `GET /search?q=`
pub async fn search<R: Collection>(
    State(state): State<AppState>,
    FirstValueQuery(params): FirstValueQuery<SearchParams>,
) -> Result<Json<Vec<R>>, ApiError> {
    let term = params.q.unwrap_or_default();
    Ok(Json(R::service(&state).search(&term).await?))
}

/// `GET /stats`
pub async fn stats<R: Collection>(
    State(state): State<AppState>,
) -> Result<Json<R::Stats>, ApiError> {
    Ok(Json(R::service(&state).stats().await?))
}

/// `GET /{id}`
pub async fn get_one<R: Collection>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<R>, ApiError> {
    Ok(Json(R::service(&state).get(&EntityId::new(id)).await?))
}

/// `POST /`
pub async fn create<R: Collection>(
    State(state): State<AppState>,
    payload: ResourcePayload<R>,
) -> Result<(StatusCode, Json<R>), ApiError> {
    let created = R::service(&state).create(payload.into_inner()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /{id}`
pub async fn update<R: Collection>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: ResourcePayload<R>,
) -> Result<Json<R>, ApiError> {
    let updated = R::service(&state)
        .update(&EntityId::new(id), payload.into_inner())
        .await?;
    Ok(Json(updated))
}

/// `DELETE /{id}`
pub async fn delete<R: Collection>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Deleted<R>>, ApiError> {
    let deleted = R::service(&state).delete(&EntityId::new(id)).await?;
    Ok(Json(Deleted { deleted }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_list_uses_genre_parameter() {
        let params = ListParams {
            genre: Some("Fiction".to_string()),
            category: Some("ignored".to_string()),
            q: Some(String::new()),
            page: Some("0".to_string()),
            limit: Some("abc".to_string()),
        };
        let query = params.into_query::<Book>();
        assert_eq!(query.category.as_deref(), Some("Fiction"));
        assert!(query.term.is_none());
        assert_eq!(query.pagination, Pagination::new(1, 10));
    }

    #[test]
    fn product_list_uses_category_parameter() {
        let params = ListParams {
            genre: Some("ignored".to_string()),
            category: Some("kitchen".to_string()),
            q: Some("mug".to_string()),
            page: Some("2".to_string()),
            limit: Some("-4".to_string()),
        };
        let query = params.into_query::<Product>();
        assert_eq!(query.category.as_deref(), Some("kitchen"));
        assert_eq!(query.term.as_deref(), Some("mug"));
        assert_eq!(query.pagination, Pagination { page: 2, limit: 1 });
    }

    #[test]
    fn deleted_wraps_entity() {
        let body = serde_json::to_value(Deleted { deleted: 7 }).unwrap();
        assert_eq!(body, serde_json::json!({"deleted": 7}));
    }
}
