// src/db/event_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{
        pg_errors::{store_failure, violation, Violation},
        store::EventStore,
    },
    models::event::{EventType, NewRestaurantEvent, RestaurantEvent},
};

const COLUMNS: &str = "id, name, event_type, description, price, img";

#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| match violation(&e) {
        // restaurant_events_price_check
        Some(Violation::Check(_)) => AppError::invalid("o preço não pode ser negativo"),
        _ => store_failure(context)(e),
    }
}

#[async_trait]
impl EventStore for EventRepository {
    async fn insert(&self, event: &NewRestaurantEvent) -> Result<RestaurantEvent, AppError> {
        let sql = format!(
            r#"
            INSERT INTO restaurant_events (name, event_type, description, price, img)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, RestaurantEvent>(&sql)
            .bind(&event.name)
            .bind(event.event_type)
            .bind(&event.description)
            .bind(event.price)
            .bind(&event.img)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error("criar evento"))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<RestaurantEvent>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM restaurant_events WHERE id = $1");
        sqlx::query_as::<_, RestaurantEvent>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_failure("buscar evento"))
    }

    async fn list_by_type(
        &self,
        event_type: EventType,
    ) -> Result<Vec<RestaurantEvent>, AppError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM restaurant_events WHERE event_type = $1 ORDER BY id"
        );
        sqlx::query_as::<_, RestaurantEvent>(&sql)
            .bind(event_type)
            .fetch_all(&self.pool)
            .await
            .map_err(store_failure("listar eventos por tipo"))
    }

    async fn list(&self) -> Result<Vec<RestaurantEvent>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM restaurant_events ORDER BY id");
        sqlx::query_as::<_, RestaurantEvent>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(store_failure("listar eventos"))
    }

    async fn update(&self, event: &RestaurantEvent) -> Result<RestaurantEvent, AppError> {
        let sql = format!(
            r#"
            UPDATE restaurant_events
            SET name = $1, event_type = $2, description = $3, price = $4, img = $5
            WHERE id = $6
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, RestaurantEvent>(&sql)
            .bind(&event.name)
            .bind(event.event_type)
            .bind(&event.description)
            .bind(event.price)
            .bind(&event.img)
            .bind(event.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error("atualizar evento"))?
            .ok_or_else(|| AppError::not_found("event", event.id))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM restaurant_events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match violation(&e) {
                // Ainda há reservas para o evento
                Some(Violation::ForeignKey(_)) => AppError::HasDependents { entity: "event", id },
                _ => store_failure("remover evento")(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("event", id));
        }
        Ok(())
    }
}
