// src/models/menu.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MenuType {
    pub id: i64,
    #[schema(example = "Breakfast")]
    pub name: String,
    pub img: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewMenuType {
    pub name: String,
    pub img: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Menu {
    pub id: i64,
    pub restaurant_id: i64,
    pub name_ru: String,
    pub name_kz: Option<String>,
    pub img: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewMenu {
    pub restaurant_id: i64,
    pub name_ru: String,
    pub name_kz: Option<String>,
    pub img: Option<String>,
}
