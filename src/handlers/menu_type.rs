// src/handlers/menu_type.rs

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
    models::menu::{MenuType, NewMenuType},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MenuTypePayload {
    #[validate(length(min = 2, message = "O nome deve ter pelo menos 2 caracteres."))]
    #[schema(example = "Breakfast")]
    pub name: String,
    pub img: Option<String>,
}

impl From<MenuTypePayload> for NewMenuType {
    fn from(payload: MenuTypePayload) -> Self {
        NewMenuType {
            name: payload.name,
            img: payload.img,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/menu-types",
    tag = "Menus",
    request_body = MenuTypePayload,
    responses(
        (status = 201, description = "Tipo de menu criado", body = MenuType),
        (status = 409, description = "Nome já existe")
    )
)]
pub async fn create_menu_type(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<MenuTypePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let menu_type = app_state
        .menu_type_service
        .create(payload.into())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(menu_type)))
}

#[utoipa::path(
    get,
    path = "/api/v1/menu-types",
    tag = "Menus",
    responses((status = 200, description = "Tipos de menu", body = Vec<MenuType>))
)]
pub async fn list_menu_types(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let menu_types = app_state
        .menu_type_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(menu_types))
}

#[utoipa::path(
    get,
    path = "/api/v1/menu-types/{id}",
    tag = "Menus",
    params(("id" = i64, Path, description = "ID do tipo de menu")),
    responses(
        (status = 200, description = "Tipo de menu", body = MenuType),
        (status = 404, description = "Tipo de menu não encontrado")
    )
)]
pub async fn get_menu_type(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let menu_type = app_state
        .menu_type_service
        .get(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(menu_type))
}

#[utoipa::path(
    put,
    path = "/api/v1/menu-types/{id}",
    tag = "Menus",
    request_body = MenuTypePayload,
    params(("id" = i64, Path, description = "ID do tipo de menu")),
    responses(
        (status = 200, description = "Tipo de menu atualizado", body = MenuType),
        (status = 404, description = "Tipo de menu não encontrado"),
        (status = 409, description = "Nome já existe")
    )
)]
pub async fn update_menu_type(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
    Json(payload): Json<MenuTypePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let menu_type = app_state
        .menu_type_service
        .update(id, payload.into())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(menu_type))
}

#[utoipa::path(
    delete,
    path = "/api/v1/menu-types/{id}",
    tag = "Menus",
    params(("id" = i64, Path, description = "ID do tipo de menu")),
    responses(
        (status = 204, description = "Tipo de menu removido"),
        (status = 404, description = "Tipo de menu não encontrado")
    )
)]
pub async fn delete_menu_type(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .menu_type_service
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
