// src/models/event.rs

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- Enums (Mapeando o Postgres) ---

// Mapeia o CREATE TYPE event_type do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "event_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Wedding,
    Birthday,
    Corporate,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Wedding => "wedding",
            EventType::Birthday => "birthday",
            EventType::Corporate => "corporate",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wedding" => Ok(EventType::Wedding),
            "birthday" => Ok(EventType::Birthday),
            "corporate" => Ok(EventType::Corporate),
            other => Err(format!("tipo de evento desconhecido: {other}")),
        }
    }
}

// --- Structs ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RestaurantEvent {
    pub id: i64,
    pub name: String,
    #[serde(alias = "eventtype")]
    pub event_type: EventType,
    #[serde(alias = "desc")]
    pub description: Option<String>,
    #[schema(value_type = f64, example = 150000.0)]
    pub price: Decimal,
    pub img: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewRestaurantEvent {
    pub name: String,
    pub event_type: EventType,
    pub description: Option<String>,
    pub price: Decimal,
    pub img: Option<String>,
}

// ---
// Reserva: a linha de restaurant_event_tables
// ---
// Chave (event_id, table_id, booking_date). Nunca é atualizada, só criada e apagada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub event_id: i64,
    pub table_id: i64,
    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub booking_date: NaiveDate,
}

/// Resultado de uma reserva. `created = false` quando exatamente a mesma
/// reserva já existia e foi devolvida sem gravar nada.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingOutcome {
    pub booking: Booking,
    pub created: bool,
}
