use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::repository::{PersonRepository, RepositoryError};
use crate::structs::api::{CreatePersonBody, SearchPersonQuery};
use crate::validation::validate_create;

/// Shared by every handler; built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub persons: Arc<dyn PersonRepository>,
}

impl AppState {
    pub fn new(persons: Arc<dyn PersonRepository>) -> Self {
        Self { persons }
    }
}

pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

#[tracing::instrument(name = "create_person", skip(state, body))]
pub async fn create_person(
    State(state): State<AppState>,
    body: Result<Json<CreatePersonBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;
    let person = validate_create(body)?;

    let saved = state
        .persons
        .save(&person)
        .await
        .map_err(|error| match error {
            RepositoryError::DuplicateNickname => ApiError::DuplicateNickname,
            other => ApiError::Internal(other),
        })?;
    tracing::info!(id = %saved.id, "person created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/persons/{}", saved.id))],
    ))
}

#[tracing::instrument(name = "get_person", skip(state))]
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::NotFound)?;

    match state.persons.get_by_id(id).await {
        Ok(person) => Ok(Json(person)),
        Err(RepositoryError::NotFound) => Err(ApiError::NotFound),
        Err(error) => {
            tracing::error!(%error, "get_by_id failed");
            Err(ApiError::NotFound)
        }
    }
}

#[tracing::instrument(name = "search_persons", skip(state, query))]
pub async fn search_persons(
    State(state): State<AppState>,
    query: Result<Query<SearchPersonQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::MalformedQuery(rejection.body_text()))?;

    let found = state
        .persons
        .search_by_term(&query.search_term)
        .await
        .map_err(ApiError::QueryFailed)?;
    tracing::debug!(term = %query.search_term, matches = found.len(), "search done");

    Ok(Json(found))
}

#[tracing::instrument(name = "count_persons", skip(state))]
pub async fn count_persons(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let count = state.persons.count().await.map_err(ApiError::QueryFailed)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain")],
        count.to_string(),
    ))
}
