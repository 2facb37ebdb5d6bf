// src/common/error.rs

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// ---
// 1. AppError: o erro "de domínio"
// ---
// A classificação (404 / 400 / 409 / 504 / 500) é feita pela VARIANTE,
// nunca pelo texto da mensagem.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Entrada inválida: {0}")]
    InvalidInput(String),

    #[error("{entity} {key} não encontrado")]
    NotFound { entity: &'static str, key: String },

    #[error("{entity} '{value}' já existe neste escopo")]
    DuplicateInScope { entity: &'static str, value: String },

    #[error("Mesa {table_id} já está reservada em {date}")]
    SlotUnavailable { table_id: i64, date: NaiveDate },

    #[error("Reserva (evento {event_id}, mesa {table_id}, {date}) não encontrada")]
    BookingNotFound {
        event_id: i64,
        table_id: i64,
        date: NaiveDate,
    },

    #[error("{entity} {id} ainda possui registros dependentes")]
    HasDependents { entity: &'static str, id: i64 },

    #[error("Chamada ao banco excedeu {0:?}")]
    Timeout(Duration),

    // Falha de persistência, sempre com o contexto da operação
    #[error("Erro de banco de dados ao {context}: {source}")]
    StoreFailure {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        AppError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn duplicate(entity: &'static str, value: impl ToString) -> Self {
        AppError::DuplicateInScope {
            entity,
            value: value.to_string(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        AppError::InvalidInput(message.into())
    }

    /// Código estável exposto ao cliente (e chave do catálogo de traduções).
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_failed",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::NotFound { .. } => "not_found",
            AppError::DuplicateInScope { .. } => "duplicate_in_scope",
            AppError::SlotUnavailable { .. } => "slot_unavailable",
            AppError::BookingNotFound { .. } => "booking_not_found",
            AppError::HasDependents { .. } => "has_dependents",
            AppError::Timeout(_) => "timeout",
            AppError::StoreFailure { .. } | AppError::InternalServerError(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } | AppError::BookingNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::DuplicateInScope { .. }
            | AppError::SlotUnavailable { .. }
            | AppError::HasDependents { .. } => StatusCode::CONFLICT,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::StoreFailure { .. } | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn details(&self) -> Option<Value> {
        match self {
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), json!(messages));
                }
                Some(Value::Object(details))
            }
            AppError::InvalidInput(message) => Some(json!({ "reason": message })),
            AppError::NotFound { entity, key } => Some(json!({ "entity": entity, "key": key })),
            AppError::DuplicateInScope { entity, value } => {
                Some(json!({ "entity": entity, "value": value }))
            }
            AppError::SlotUnavailable { table_id, date } => {
                Some(json!({ "table_id": table_id, "date": date }))
            }
            AppError::BookingNotFound {
                event_id,
                table_id,
                date,
            } => Some(json!({ "event_id": event_id, "table_id": table_id, "date": date })),
            AppError::HasDependents { entity, id } => Some(json!({ "entity": entity, "id": id })),
            // Erros de servidor não vazam detalhes para o cliente
            _ => None,
        }
    }

    /// Converte o erro de domínio na resposta HTTP traduzida para o idioma do cliente.
    pub fn to_api_error(self, locale: &Locale, i18n_store: &I18nStore) -> ApiError {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        ApiError {
            status,
            error: i18n_store.translate(&locale.0, self.code()).to_string(),
            code: self.code(),
            details: self.details(),
        }
    }
}

// ---
// 2. ApiError: o que realmente vai para o cliente
// ---
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn classification_depends_on_variant_only() {
        assert_eq!(AppError::not_found("section", 7).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::invalid("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::duplicate("table", 3).status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::SlotUnavailable { table_id: 7, date: date() }.status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::BookingNotFound { event_id: 1, table_id: 7, date: date() }.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Timeout(Duration::from_millis(5)).status(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            AppError::InternalServerError(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn server_errors_hide_details() {
        let api = AppError::InternalServerError(anyhow::anyhow!("segredo"))
            .to_api_error(&Locale("en".into()), &I18nStore::default());

        assert_eq!(api.code, "internal_error");
        assert!(api.details.is_none());
        assert!(!api.error.contains("segredo"));
    }

    #[test]
    fn duplicate_carries_the_colliding_value() {
        let api = AppError::duplicate("section", "terrace")
            .to_api_error(&Locale("ru".into()), &I18nStore::default());

        assert_eq!(api.status, StatusCode::CONFLICT);
        assert_eq!(api.details, Some(json!({ "entity": "section", "value": "terrace" })));
    }
}
