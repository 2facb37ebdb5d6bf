// src/handlers/menu.rs

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
    models::menu::{Menu, NewMenu},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MenuPayload {
    #[validate(range(min = 1, message = "restaurant_id deve ser positivo."))]
    pub restaurant_id: i64,

    #[validate(length(min = 1, message = "O nome em russo é obrigatório."))]
    pub name_ru: String,

    pub name_kz: Option<String>,
    pub img: Option<String>,
}

impl From<MenuPayload> for NewMenu {
    fn from(payload: MenuPayload) -> Self {
        NewMenu {
            restaurant_id: payload.restaurant_id,
            name_ru: payload.name_ru,
            name_kz: payload.name_kz,
            img: payload.img,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/menus",
    tag = "Menus",
    request_body = MenuPayload,
    responses(
        (status = 201, description = "Menu criado", body = Menu),
        (status = 404, description = "Restaurante não encontrado")
    )
)]
pub async fn create_menu(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<MenuPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let menu = app_state
        .menu_service
        .create(payload.into())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(menu)))
}

#[utoipa::path(
    get,
    path = "/api/v1/menus/restaurant/{restaurant_id}",
    tag = "Menus",
    params(("restaurant_id" = i64, Path, description = "ID do restaurante")),
    responses(
        (status = 200, description = "Menus do restaurante", body = Vec<Menu>),
        (status = 404, description = "Restaurante não encontrado")
    )
)]
pub async fn list_menus_by_restaurant(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(restaurant_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let menus = app_state
        .menu_service
        .list_by_restaurant(restaurant_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(menus))
}

#[utoipa::path(
    get,
    path = "/api/v1/menus/{id}",
    tag = "Menus",
    params(("id" = i64, Path, description = "ID do menu")),
    responses(
        (status = 200, description = "Menu", body = Menu),
        (status = 404, description = "Menu não encontrado")
    )
)]
pub async fn get_menu(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let menu = app_state
        .menu_service
        .get(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(menu))
}

#[utoipa::path(
    put,
    path = "/api/v1/menus/{id}",
    tag = "Menus",
    request_body = MenuPayload,
    params(("id" = i64, Path, description = "ID do menu")),
    responses(
        (status = 200, description = "Menu atualizado", body = Menu),
        (status = 404, description = "Menu ou restaurante não encontrado")
    )
)]
pub async fn update_menu(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
    Json(payload): Json<MenuPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let menu = app_state
        .menu_service
        .update(id, payload.into())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(menu))
}

#[utoipa::path(
    delete,
    path = "/api/v1/menus/{id}",
    tag = "Menus",
    params(("id" = i64, Path, description = "ID do menu")),
    responses(
        (status = 204, description = "Menu removido"),
        (status = 404, description = "Menu não encontrado")
    )
)]
pub async fn delete_menu(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .menu_service
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
