// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

pub const DEFAULT_LANGUAGE: &str = "ru";

// Cliente do restaurante, identificado pelo telefone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    #[schema(example = "+77011234567")]
    pub phone_number: String,
    pub name: String,
    pub last_name: Option<String>,
    #[schema(example = "ru")]
    pub language: String,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub phone_number: String,
    pub name: String,
    pub last_name: Option<String>,
    pub language: String,
    pub is_active: bool,
}

/// Paginação da listagem de usuários.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub const DEFAULT_LIMIT: i64 = 10;

    // limit <= 0 vira o padrão, offset negativo vira 0
    pub fn normalized(limit: Option<i64>, offset: Option<i64>) -> Self {
        let limit = match limit {
            Some(l) if l > 0 => l,
            _ => Self::DEFAULT_LIMIT,
        };
        let offset = offset.unwrap_or(0).max(0);
        Self { limit, offset }
    }
}
