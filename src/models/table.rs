// src/models/table.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Mesa física dentro de uma seção. `qr` fica nulo até ser provisionado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Table {
    pub id: i64,
    #[schema(example = 3)]
    pub number_of_table: i32,
    pub section_id: i64,
    #[schema(example = "table-100")]
    pub qr: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewTable {
    pub number_of_table: i32,
    pub section_id: i64,
    pub qr: Option<String>,
}

/// Resultado da criação em duas fases (linha + QR).
///
/// `qr_pending = true` significa que a mesa existe mas a gravação do código
/// falhou; `POST /tables/qr/repair` resolve depois.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProvisionedTable {
    #[serde(flatten)]
    pub table: Table,
    pub qr_pending: bool,
}
