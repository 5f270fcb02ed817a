//! HTTP handlers shared by every mark collection. The collection served by a
//! router is injected as an `Extension` by [`super::routes`].

use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use libsql::Connection;
use serde::{Deserialize, Serialize};

use super::{Category, Collection, MarkPayload, MarkStore, MarkSummary, parse_mark_request};
use crate::error::MarkError;
use crate::handler::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub category: Option<Category>,
}

#[derive(Debug, Serialize)]
pub struct MarkCreated {
    pub external_id: i64,
    pub category: Category,
}

#[derive(Debug, Serialize)]
pub struct Removed {
    pub removed: bool,
}

async fn connect(state: &AppState) -> Result<Connection, MarkError> {
    state.db.connect().await.map_err(MarkError::Persistence)
}

async fn list_category(
    state: &AppState,
    collection: Collection,
    category: Option<Category>,
) -> Result<Json<Vec<MarkSummary>>, MarkError> {
    let conn = connect(state).await?;
    let marks = MarkStore::new(&conn, collection).list(category).await?;
    Ok(Json(marks))
}

pub async fn list_marks(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<MarkSummary>>, MarkError> {
    let Query(params) = params.map_err(|rejection| MarkError::Validation(rejection.body_text()))?;
    list_category(&state, collection, params.category).await
}

pub async fn list_movies(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
) -> Result<Json<Vec<MarkSummary>>, MarkError> {
    list_category(&state, collection, Some(Category::Movie)).await
}

pub async fn list_series(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
) -> Result<Json<Vec<MarkSummary>>, MarkError> {
    list_category(&state, collection, Some(Category::Series)).await
}

pub async fn create_mark(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    body: Result<Json<MarkPayload>, JsonRejection>,
) -> Result<Json<MarkCreated>, MarkError> {
    let input = parse_mark_request(body).inspect_err(|e| {
        tracing::info!(collection = collection.name(), error = %e, "rejected mark request");
    })?;

    let conn = connect(&state).await?;
    let mark = MarkStore::new(&conn, collection).mark(input).await?;

    Ok(Json(MarkCreated {
        external_id: mark.external_id,
        category: mark.category,
    }))
}

pub async fn delete_mark(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    path: Result<Path<(String, i64)>, PathRejection>,
) -> Result<Json<Removed>, MarkError> {
    let Path((category, external_id)) = path.map_err(|rejection| MarkError::Validation(rejection.body_text()))?;

    let conn = connect(&state).await?;
    let removed = MarkStore::new(&conn, collection).unmark(&category, external_id).await?;

    Ok(Json(Removed { removed }))
}
