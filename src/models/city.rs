// src/models/city.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct City {
    pub id: i64,
    #[schema(example = "Almaty")]
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct NewCity {
    pub name: String,
}
