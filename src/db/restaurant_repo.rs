// src/db/restaurant_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{
        pg_errors::{store_failure, violation, Violation},
        store::RestaurantStore,
    },
    models::restaurant::{NewRestaurant, Restaurant},
};

const COLUMNS: &str = "id, name, city_id, address_ru, address_kz, is_active, map_link";

#[derive(Clone)]
pub struct RestaurantRepository {
    pool: PgPool,
}

impl RestaurantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// A cidade pode ter sido removida entre a checagem do serviço e a escrita
fn map_write_error(city_id: i64, context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| match violation(&e) {
        Some(Violation::ForeignKey(_)) => AppError::not_found("city", city_id),
        _ => store_failure(context)(e),
    }
}

#[async_trait]
impl RestaurantStore for RestaurantRepository {
    async fn insert(&self, restaurant: &NewRestaurant) -> Result<Restaurant, AppError> {
        let sql = format!(
            r#"
            INSERT INTO restaurants (name, city_id, address_ru, address_kz, is_active, map_link)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, Restaurant>(&sql)
            .bind(&restaurant.name)
            .bind(restaurant.city_id)
            .bind(&restaurant.address_ru)
            .bind(&restaurant.address_kz)
            .bind(restaurant.is_active)
            .bind(&restaurant.map_link)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error(restaurant.city_id, "criar restaurante"))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Restaurant>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM restaurants WHERE id = $1");
        sqlx::query_as::<_, Restaurant>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_failure("buscar restaurante"))
    }

    async fn list_by_city(&self, city_id: i64) -> Result<Vec<Restaurant>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM restaurants WHERE city_id = $1 ORDER BY name");
        sqlx::query_as::<_, Restaurant>(&sql)
            .bind(city_id)
            .fetch_all(&self.pool)
            .await
            .map_err(store_failure("listar restaurantes da cidade"))
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Restaurant>, AppError> {
        // `$1 = false` desliga o filtro
        let sql = format!(
            "SELECT {COLUMNS} FROM restaurants WHERE ($1 = false OR is_active) ORDER BY name"
        );
        sqlx::query_as::<_, Restaurant>(&sql)
            .bind(active_only)
            .fetch_all(&self.pool)
            .await
            .map_err(store_failure("listar restaurantes"))
    }

    async fn update(&self, restaurant: &Restaurant) -> Result<Restaurant, AppError> {
        let sql = format!(
            r#"
            UPDATE restaurants
            SET name = $1, city_id = $2, address_ru = $3, address_kz = $4,
                is_active = $5, map_link = $6
            WHERE id = $7
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, Restaurant>(&sql)
            .bind(&restaurant.name)
            .bind(restaurant.city_id)
            .bind(&restaurant.address_ru)
            .bind(&restaurant.address_kz)
            .bind(restaurant.is_active)
            .bind(&restaurant.map_link)
            .bind(restaurant.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error(restaurant.city_id, "atualizar restaurante"))?
            .ok_or_else(|| AppError::not_found("restaurant", restaurant.id))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM restaurants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match violation(&e) {
                // Seções ou menus ainda apontam para ele
                Some(Violation::ForeignKey(_)) => AppError::HasDependents {
                    entity: "restaurant",
                    id,
                },
                _ => store_failure("remover restaurante")(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("restaurant", id));
        }
        Ok(())
    }
}
