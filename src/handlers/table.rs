// src/handlers/table.rs

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::table::{NewTable, ProvisionedTable, Table},
};

// ---
// Payload: TablePayload
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TablePayload {
    #[validate(range(min = 1, message = "O número da mesa deve ser positivo."))]
    #[schema(example = 3)]
    pub number_of_table: i32,

    #[validate(range(min = 1, message = "section_id deve ser positivo."))]
    pub section_id: i64,

    // Normalmente ausente: o código é derivado do id
    pub qr: Option<String>,
}

impl From<TablePayload> for NewTable {
    fn from(payload: TablePayload) -> Self {
        NewTable {
            number_of_table: payload.number_of_table,
            section_id: payload.section_id,
            qr: payload.qr,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RepairedQrResponse {
    pub repaired: Vec<i64>,
}

#[utoipa::path(
    post,
    path = "/api/v1/tables",
    tag = "Tables",
    request_body = TablePayload,
    responses(
        (status = 201, description = "Mesa criada; `qr_pending` indica QR ainda não gravado", body = ProvisionedTable),
        (status = 404, description = "Seção não encontrada"),
        (status = 409, description = "Número já usado nesta seção")
    )
)]
pub async fn create_table(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<TablePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let provisioned = app_state
        .table_service
        .create(payload.into())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(provisioned)))
}

#[utoipa::path(
    get,
    path = "/api/v1/tables/section/{section_id}",
    tag = "Tables",
    params(("section_id" = i64, Path, description = "ID da seção")),
    responses(
        (status = 200, description = "Mesas da seção", body = Vec<Table>),
        (status = 404, description = "Seção não encontrada")
    )
)]
pub async fn list_tables_by_section(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(section_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let tables = app_state
        .table_service
        .list_by_section(section_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(tables))
}

#[utoipa::path(
    get,
    path = "/api/v1/tables/{id}",
    tag = "Tables",
    params(("id" = i64, Path, description = "ID da mesa")),
    responses(
        (status = 200, description = "Mesa", body = Table),
        (status = 404, description = "Mesa não encontrada")
    )
)]
pub async fn get_table(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let table = app_state
        .table_service
        .get(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(table))
}

#[utoipa::path(
    put,
    path = "/api/v1/tables/{id}",
    tag = "Tables",
    request_body = TablePayload,
    params(("id" = i64, Path, description = "ID da mesa")),
    responses(
        (status = 200, description = "Mesa atualizada", body = Table),
        (status = 404, description = "Mesa ou seção não encontrada"),
        (status = 409, description = "Número já usado nesta seção")
    )
)]
pub async fn update_table(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
    Json(payload): Json<TablePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let table = app_state
        .table_service
        .update(id, payload.into())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(table))
}

#[utoipa::path(
    delete,
    path = "/api/v1/tables/{id}",
    tag = "Tables",
    params(("id" = i64, Path, description = "ID da mesa")),
    responses(
        (status = 204, description = "Mesa removida"),
        (status = 404, description = "Mesa não encontrada"),
        (status = 409, description = "A mesa tem reservas")
    )
)]
pub async fn delete_table(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .table_service
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// ---
// QR
// ---

#[utoipa::path(
    post,
    path = "/api/v1/tables/{id}/qr",
    tag = "Tables",
    params(("id" = i64, Path, description = "ID da mesa")),
    responses(
        (status = 200, description = "QR gravado (idempotente)", body = Table),
        (status = 404, description = "Mesa não encontrada")
    )
)]
pub async fn generate_qr(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let table = app_state
        .qr_service
        .generate_qr(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(table))
}

#[utoipa::path(
    get,
    path = "/api/v1/tables/{id}/qr.png",
    tag = "Tables",
    params(("id" = i64, Path, description = "ID da mesa")),
    responses(
        (status = 200, description = "Imagem PNG do QR", body = [u8], content_type = "image/png"),
        (status = 404, description = "Mesa sem QR ou inexistente")
    )
)]
pub async fn render_qr_png(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let png = app_state
        .qr_service
        .render_qr_png(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}

#[utoipa::path(
    get,
    path = "/api/v1/tables/qr/missing",
    tag = "Tables",
    responses((status = 200, description = "Mesas sem QR", body = Vec<Table>))
)]
pub async fn list_missing_qr(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let tables = app_state
        .qr_service
        .list_missing_qr()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(tables))
}

#[utoipa::path(
    post,
    path = "/api/v1/tables/qr/repair",
    tag = "Tables",
    responses((status = 200, description = "IDs das mesas reparadas", body = RepairedQrResponse))
)]
pub async fn repair_missing_qr(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let repaired = app_state
        .qr_service
        .repair_missing_qr()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(RepairedQrResponse { repaired }))
}
