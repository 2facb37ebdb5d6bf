// src/handlers/city.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::city::{City, NewCity},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CityPayload {
    #[validate(length(min = 2, message = "O nome da cidade deve ter pelo menos 2 caracteres."))]
    #[schema(example = "Almaty")]
    pub name: String,
}

#[utoipa::path(
    post,
    path = "/api/v1/cities",
    tag = "Cities",
    request_body = CityPayload,
    responses(
        (status = 201, description = "Cidade criada", body = City),
        (status = 409, description = "Nome já existe")
    )
)]
pub async fn create_city(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CityPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let city = app_state
        .city_service
        .create(NewCity { name: payload.name })
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(city)))
}

#[utoipa::path(
    get,
    path = "/api/v1/cities",
    tag = "Cities",
    responses((status = 200, description = "Todas as cidades", body = Vec<City>))
)]
pub async fn list_cities(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let cities = app_state
        .city_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(cities))
}

#[utoipa::path(
    get,
    path = "/api/v1/cities/{id}",
    tag = "Cities",
    params(("id" = i64, Path, description = "ID da cidade")),
    responses(
        (status = 200, description = "Cidade", body = City),
        (status = 404, description = "Cidade não encontrada")
    )
)]
pub async fn get_city(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let city = app_state
        .city_service
        .get(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(city))
}

#[utoipa::path(
    put,
    path = "/api/v1/cities/{id}",
    tag = "Cities",
    request_body = CityPayload,
    params(("id" = i64, Path, description = "ID da cidade")),
    responses(
        (status = 200, description = "Cidade atualizada", body = City),
        (status = 404, description = "Cidade não encontrada"),
        (status = 409, description = "Nome já existe")
    )
)]
pub async fn update_city(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
    Json(payload): Json<CityPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let city = app_state
        .city_service
        .update(id, NewCity { name: payload.name })
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(city))
}

#[utoipa::path(
    delete,
    path = "/api/v1/cities/{id}",
    tag = "Cities",
    params(("id" = i64, Path, description = "ID da cidade")),
    responses(
        (status = 204, description = "Cidade removida"),
        (status = 404, description = "Cidade não encontrada"),
        (status = 409, description = "Ainda há restaurantes na cidade")
    )
)]
pub async fn delete_city(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .city_service
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
