// src/handlers/booking.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::{event::Booking, table::Table},
};

// ---
// Payload: BookingPayload (também é a chave usada no cancelamento)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookingPayload {
    #[validate(range(min = 1, message = "event_id deve ser positivo."))]
    pub event_id: i64,

    #[validate(range(min = 1, message = "table_id deve ser positivo."))]
    pub table_id: i64,

    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub booking_date: NaiveDate,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    pub table_id: i64,
    #[param(value_type = String, format = Date, example = "2024-06-01")]
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailableTablesQuery {
    pub section_id: i64,
    #[param(value_type = String, format = Date, example = "2024-06-01")]
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub table_id: i64,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub available: bool,
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    request_body = BookingPayload,
    responses(
        (status = 201, description = "Mesa reservada", body = Booking),
        (status = 200, description = "A mesma reserva já existia", body = Booking),
        (status = 404, description = "Evento ou mesa não encontrado"),
        (status = 409, description = "Mesa já reservada nesta data")
    )
)]
pub async fn book_table(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<BookingPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let outcome = app_state
        .booking_service
        .book_table(payload.event_id, payload.table_id, payload.booking_date)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    // Repetir a mesma reserva não grava nada: 200 com a reserva existente
    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome.booking)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/bookings",
    tag = "Bookings",
    request_body = BookingPayload,
    responses(
        (status = 204, description = "Reserva cancelada"),
        (status = 404, description = "Reserva não encontrada")
    )
)]
pub async fn cancel_booking(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<BookingPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    app_state
        .booking_service
        .cancel_booking(payload.event_id, payload.table_id, payload.booking_date)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/availability",
    tag = "Bookings",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Disponibilidade da mesa", body = AvailabilityResponse),
        (status = 404, description = "Mesa não encontrada")
    )
)]
pub async fn check_availability(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let available = app_state
        .booking_service
        .check_availability(query.table_id, query.date)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(AvailabilityResponse {
        table_id: query.table_id,
        date: query.date,
        available,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/available",
    tag = "Bookings",
    params(AvailableTablesQuery),
    responses(
        (status = 200, description = "Mesas livres da seção na data", body = Vec<Table>),
        (status = 404, description = "Seção não encontrada")
    )
)]
pub async fn list_available_tables(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<AvailableTablesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let tables = app_state
        .booking_service
        .get_available_tables(query.section_id, query.date)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(tables))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/table/{table_id}",
    tag = "Bookings",
    params(("table_id" = i64, Path, description = "ID da mesa")),
    responses(
        (status = 200, description = "Reservas da mesa por data", body = Vec<Booking>),
        (status = 404, description = "Mesa não encontrada")
    )
)]
pub async fn list_table_bookings(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(table_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let bookings = app_state
        .booking_service
        .get_table_bookings(table_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(bookings))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/event/{event_id}",
    tag = "Bookings",
    params(("event_id" = i64, Path, description = "ID do evento")),
    responses(
        (status = 200, description = "Reservas do evento por data", body = Vec<Booking>),
        (status = 404, description = "Evento não encontrado")
    )
)]
pub async fn list_event_bookings(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(event_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let bookings = app_state
        .booking_service
        .get_event_bookings(event_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(bookings))
}
