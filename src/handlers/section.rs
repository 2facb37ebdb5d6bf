// src/handlers/section.rs

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
    models::restaurant::{NewSection, Section},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SectionPayload {
    #[validate(range(min = 1, message = "restaurant_id deve ser positivo."))]
    pub restaurant_id: i64,

    #[validate(length(min = 1, message = "O nome da seção é obrigatório."))]
    #[schema(example = "Terrace")]
    pub name: String,
}

impl From<SectionPayload> for NewSection {
    fn from(payload: SectionPayload) -> Self {
        NewSection {
            restaurant_id: payload.restaurant_id,
            name: payload.name,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/sections",
    tag = "Sections",
    request_body = SectionPayload,
    responses(
        (status = 201, description = "Seção criada", body = Section),
        (status = 404, description = "Restaurante não encontrado"),
        (status = 409, description = "Nome já usado neste restaurante")
    )
)]
pub async fn create_section(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<SectionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let section = app_state
        .section_service
        .create(payload.into())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(section)))
}

#[utoipa::path(
    get,
    path = "/api/v1/sections/restaurant/{restaurant_id}",
    tag = "Sections",
    params(("restaurant_id" = i64, Path, description = "ID do restaurante")),
    responses(
        (status = 200, description = "Seções do restaurante", body = Vec<Section>),
        (status = 404, description = "Restaurante não encontrado")
    )
)]
pub async fn list_sections_by_restaurant(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(restaurant_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let sections = app_state
        .section_service
        .list_by_restaurant(restaurant_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(sections))
}

#[utoipa::path(
    get,
    path = "/api/v1/sections/{id}",
    tag = "Sections",
    params(("id" = i64, Path, description = "ID da seção")),
    responses(
        (status = 200, description = "Seção", body = Section),
        (status = 404, description = "Seção não encontrada")
    )
)]
pub async fn get_section(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let section = app_state
        .section_service
        .get(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(section))
}

#[utoipa::path(
    put,
    path = "/api/v1/sections/{id}",
    tag = "Sections",
    request_body = SectionPayload,
    params(("id" = i64, Path, description = "ID da seção")),
    responses(
        (status = 200, description = "Seção atualizada", body = Section),
        (status = 404, description = "Seção ou restaurante não encontrado"),
        (status = 409, description = "Nome já usado neste restaurante")
    )
)]
pub async fn update_section(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
    Json(payload): Json<SectionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let section = app_state
        .section_service
        .update(id, payload.into())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(section))
}

#[utoipa::path(
    delete,
    path = "/api/v1/sections/{id}",
    tag = "Sections",
    params(("id" = i64, Path, description = "ID da seção")),
    responses(
        (status = 204, description = "Seção removida"),
        (status = 404, description = "Seção não encontrada"),
        (status = 409, description = "Ainda há mesas na seção")
    )
)]
pub async fn delete_section(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .section_service
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
