// src/models/restaurant.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// ---
// 1. Restaurant
// ---
// Pertence a uma cidade; `is_active` controla a listagem padrão
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub city_id: i64,
    pub address_ru: String,
    pub address_kz: Option<String>,
    pub is_active: bool,
    // Link do mapa (2GIS)
    #[serde(alias = "_2gis_map")]
    pub map_link: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewRestaurant {
    pub name: String,
    pub city_id: i64,
    pub address_ru: String,
    pub address_kz: Option<String>,
    pub is_active: bool,
    pub map_link: Option<String>,
}

// ---
// 2. Section (salão, terraço, VIP...)
// ---
// O nome é único dentro do restaurante, sem diferenciar maiúsculas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Section {
    pub id: i64,
    pub restaurant_id: i64,
    #[schema(example = "Terrace")]
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct NewSection {
    pub restaurant_id: i64,
    pub name: String,
}
