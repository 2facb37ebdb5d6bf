// src/handlers/event.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::event::{EventType, NewRestaurantEvent, RestaurantEvent},
};

// ---
// Validação Customizada
// ---
fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O preço não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: EventPayload
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EventPayload {
    #[validate(length(min = 1, message = "O nome do evento é obrigatório."))]
    pub name: String,

    // Texto livre aqui; tipo desconhecido vira 400 `invalid_input`
    #[serde(alias = "eventtype")]
    #[schema(example = "wedding")]
    pub event_type: String,

    #[serde(alias = "desc")]
    pub description: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(value_type = f64, example = 150000.0)]
    pub price: Decimal,

    pub img: Option<String>,
}

impl EventPayload {
    fn into_new_event(self) -> Result<NewRestaurantEvent, AppError> {
        let event_type: EventType = self.event_type.parse().map_err(AppError::InvalidInput)?;

        Ok(NewRestaurantEvent {
            name: self.name,
            event_type,
            description: self.description,
            price: self.price,
            img: self.img,
        })
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/events",
    tag = "Events",
    request_body = EventPayload,
    responses(
        (status = 201, description = "Evento criado", body = RestaurantEvent),
        (status = 400, description = "Tipo de evento desconhecido ou preço negativo")
    )
)]
pub async fn create_event(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<EventPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let new_event = payload
        .into_new_event()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let event = app_state
        .event_service
        .create(new_event)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(event)))
}

#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "Events",
    responses((status = 200, description = "Eventos", body = Vec<RestaurantEvent>))
)]
pub async fn list_events(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let events = app_state
        .event_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(events))
}

#[utoipa::path(
    get,
    path = "/api/v1/events/type/{event_type}",
    tag = "Events",
    params(("event_type" = String, Path, description = "wedding, birthday ou corporate")),
    responses(
        (status = 200, description = "Eventos do tipo", body = Vec<RestaurantEvent>),
        (status = 400, description = "Tipo de evento desconhecido")
    )
)]
pub async fn list_events_by_type(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(event_type): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let events = app_state
        .event_service
        .list_by_type(&event_type)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(events))
}

#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    tag = "Events",
    params(("id" = i64, Path, description = "ID do evento")),
    responses(
        (status = 200, description = "Evento", body = RestaurantEvent),
        (status = 404, description = "Evento não encontrado")
    )
)]
pub async fn get_event(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .event_service
        .get(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(event))
}

#[utoipa::path(
    put,
    path = "/api/v1/events/{id}",
    tag = "Events",
    request_body = EventPayload,
    params(("id" = i64, Path, description = "ID do evento")),
    responses(
        (status = 200, description = "Evento atualizado", body = RestaurantEvent),
        (status = 404, description = "Evento não encontrado")
    )
)]
pub async fn update_event(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
    Json(payload): Json<EventPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let changes = payload
        .into_new_event()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let event = app_state
        .event_service
        .update(id, changes)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(event))
}

#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}",
    tag = "Events",
    params(("id" = i64, Path, description = "ID do evento")),
    responses(
        (status = 204, description = "Evento removido"),
        (status = 404, description = "Evento não encontrado"),
        (status = 409, description = "O evento tem reservas")
    )
)]
pub async fn delete_event(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .event_service
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
