// src/handlers/restaurant.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::restaurant::{NewRestaurant, Restaurant},
};

// ---
// Payload: RestaurantPayload
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RestaurantPayload {
    #[validate(length(min = 3, message = "O nome deve ter pelo menos 3 caracteres."))]
    pub name: String,

    #[validate(range(min = 1, message = "city_id deve ser positivo."))]
    pub city_id: i64,

    #[validate(length(min = 1, message = "O endereço em russo é obrigatório."))]
    pub address_ru: String,

    pub address_kz: Option<String>,

    // Ausente = ativo
    pub is_active: Option<bool>,

    // O app antigo envia o link do 2GIS como `_2gis_map`
    #[serde(alias = "_2gis_map")]
    pub map_link: Option<String>,
}

impl From<RestaurantPayload> for NewRestaurant {
    fn from(payload: RestaurantPayload) -> Self {
        NewRestaurant {
            name: payload.name,
            city_id: payload.city_id,
            address_ru: payload.address_ru,
            address_kz: payload.address_kz,
            is_active: payload.is_active.unwrap_or(true),
            map_link: payload.map_link,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListRestaurantsQuery {
    /// `true` inclui os restaurantes inativos
    pub all: Option<bool>,
}

#[utoipa::path(
    post,
    path = "/api/v1/restaurants",
    tag = "Restaurants",
    request_body = RestaurantPayload,
    responses(
        (status = 201, description = "Restaurante criado", body = Restaurant),
        (status = 404, description = "Cidade não encontrada")
    )
)]
pub async fn create_restaurant(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<RestaurantPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let restaurant = app_state
        .restaurant_service
        .create(payload.into())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(restaurant)))
}

#[utoipa::path(
    get,
    path = "/api/v1/restaurants",
    tag = "Restaurants",
    params(ListRestaurantsQuery),
    responses((status = 200, description = "Restaurantes", body = Vec<Restaurant>))
)]
pub async fn list_restaurants(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<ListRestaurantsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let restaurants = app_state
        .restaurant_service
        .list(query.all.unwrap_or(false))
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(restaurants))
}

#[utoipa::path(
    get,
    path = "/api/v1/restaurants/city/{city_id}",
    tag = "Restaurants",
    params(("city_id" = i64, Path, description = "ID da cidade")),
    responses(
        (status = 200, description = "Restaurantes da cidade", body = Vec<Restaurant>),
        (status = 404, description = "Cidade não encontrada")
    )
)]
pub async fn list_restaurants_by_city(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(city_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let restaurants = app_state
        .restaurant_service
        .list_by_city(city_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(restaurants))
}

#[utoipa::path(
    get,
    path = "/api/v1/restaurants/{id}",
    tag = "Restaurants",
    params(("id" = i64, Path, description = "ID do restaurante")),
    responses(
        (status = 200, description = "Restaurante", body = Restaurant),
        (status = 404, description = "Restaurante não encontrado")
    )
)]
pub async fn get_restaurant(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let restaurant = app_state
        .restaurant_service
        .get(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(restaurant))
}

#[utoipa::path(
    put,
    path = "/api/v1/restaurants/{id}",
    tag = "Restaurants",
    request_body = RestaurantPayload,
    params(("id" = i64, Path, description = "ID do restaurante")),
    responses(
        (status = 200, description = "Restaurante atualizado", body = Restaurant),
        (status = 404, description = "Restaurante ou cidade não encontrado")
    )
)]
pub async fn update_restaurant(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
    Json(payload): Json<RestaurantPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let restaurant = app_state
        .restaurant_service
        .update(id, payload.into())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(restaurant))
}

#[utoipa::path(
    delete,
    path = "/api/v1/restaurants/{id}",
    tag = "Restaurants",
    params(("id" = i64, Path, description = "ID do restaurante")),
    responses(
        (status = 204, description = "Restaurante removido"),
        (status = 404, description = "Restaurante não encontrado"),
        (status = 409, description = "Ainda há seções ou menus")
    )
)]
pub async fn delete_restaurant(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .restaurant_service
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
