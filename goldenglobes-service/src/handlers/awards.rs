//! Read-only award record routes.
//!
//! Each filter route casts its path value, runs a single exact-match query and
//! maps both cast and query failures to a 400 carrying the route's message.

use crate::models::{cast_boolean, cast_number, AwardFilter, AwardRecord};
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use service_core::error::AppError;

pub const INVALID_INPUT: &str = "Invalid input";
// Spelling kept: clients match on this message.
pub const INVALID_FILM_NAME: &str = "Inavlid film name";
pub const INVALID_NOMINEE_NAME: &str = "Invalid nominee name";
pub const INVALID_FILM_TITLE: &str = "Invalid film title";
pub const NO_FILM_FOUND: &str = "No film found";

async fn find_by(
    state: &AppState,
    filter: AwardFilter,
    message: &'static str,
) -> Result<Json<Vec<AwardRecord>>, AppError> {
    let records = state.store.find_by(&filter).await.map_err(|e| {
        tracing::warn!(field = filter.field(), error = %e, "Award query failed");
        AppError::bad_request(message)
    })?;
    Ok(Json(records))
}

#[tracing::instrument(skip(state))]
pub async fn list_awards(
    State(state): State<AppState>,
) -> Result<Json<Vec<AwardRecord>>, AppError> {
    let records = state.store.find_all().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list award records");
        AppError::ServiceUnavailable
    })?;
    Ok(Json(records))
}

#[tracing::instrument(skip(state))]
pub async fn awards_by_year(
    State(state): State<AppState>,
    Path(year_award): Path<String>,
) -> Result<Json<Vec<AwardRecord>>, AppError> {
    let year = cast_number(&year_award).map_err(|_| AppError::bad_request(INVALID_INPUT))?;
    find_by(&state, AwardFilter::YearAward(year), INVALID_INPUT).await
}

#[tracing::instrument(skip(state))]
pub async fn awards_by_film(
    State(state): State<AppState>,
    Path(film): Path<String>,
) -> Result<Json<Vec<AwardRecord>>, AppError> {
    find_by(&state, AwardFilter::Film(film), INVALID_FILM_NAME).await
}

#[tracing::instrument(skip(state))]
pub async fn awards_by_nominee(
    State(state): State<AppState>,
    Path(nominee): Path<String>,
) -> Result<Json<Vec<AwardRecord>>, AppError> {
    find_by(&state, AwardFilter::Nominee(nominee), INVALID_NOMINEE_NAME).await
}

#[tracing::instrument(skip(state))]
pub async fn awards_by_win(
    State(state): State<AppState>,
    Path(win): Path<String>,
) -> Result<Json<Vec<AwardRecord>>, AppError> {
    let win = cast_boolean(&win).map_err(|_| AppError::bad_request(INVALID_INPUT))?;
    find_by(&state, AwardFilter::Win(win), INVALID_INPUT).await
}

#[tracing::instrument(skip(state))]
pub async fn release_by_year(
    State(state): State<AppState>,
    Path(year_film): Path<String>,
) -> Result<Json<AwardRecord>, AppError> {
    let year = cast_number(&year_film).map_err(|_| AppError::bad_request(INVALID_FILM_TITLE))?;

    let record = state
        .store
        .find_one_by(&AwardFilter::YearFilm(year))
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Release year lookup failed");
            AppError::bad_request(INVALID_FILM_TITLE)
        })?;

    record
        .map(Json)
        .ok_or_else(|| AppError::not_found(NO_FILM_FOUND))
}
