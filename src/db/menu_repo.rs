// src/db/menu_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{
        pg_errors::{store_failure, violation, Violation},
        store::MenuStore,
    },
    models::menu::{Menu, NewMenu},
};

#[derive(Clone)]
pub struct MenuRepository {
    pool: PgPool,
}

impl MenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(restaurant_id: i64, context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| match violation(&e) {
        Some(Violation::ForeignKey(_)) => AppError::not_found("restaurant", restaurant_id),
        _ => store_failure(context)(e),
    }
}

#[async_trait]
impl MenuStore for MenuRepository {
    async fn insert(&self, menu: &NewMenu) -> Result<Menu, AppError> {
        sqlx::query_as::<_, Menu>(
            r#"
            INSERT INTO menus (restaurant_id, name_ru, name_kz, img)
            VALUES ($1, $2, $3, $4)
            RETURNING id, restaurant_id, name_ru, name_kz, img
            "#,
        )
        .bind(menu.restaurant_id)
        .bind(&menu.name_ru)
        .bind(&menu.name_kz)
        .bind(&menu.img)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error(menu.restaurant_id, "criar menu"))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Menu>, AppError> {
        sqlx::query_as::<_, Menu>(
            "SELECT id, restaurant_id, name_ru, name_kz, img FROM menus WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_failure("buscar menu"))
    }

    async fn list_by_restaurant(&self, restaurant_id: i64) -> Result<Vec<Menu>, AppError> {
        sqlx::query_as::<_, Menu>(
            r#"
            SELECT id, restaurant_id, name_ru, name_kz, img
            FROM menus
            WHERE restaurant_id = $1
            ORDER BY id
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_failure("listar menus do restaurante"))
    }

    async fn update(&self, menu: &Menu) -> Result<Menu, AppError> {
        sqlx::query_as::<_, Menu>(
            r#"
            UPDATE menus SET restaurant_id = $1, name_ru = $2, name_kz = $3, img = $4
            WHERE id = $5
            RETURNING id, restaurant_id, name_ru, name_kz, img
            "#,
        )
        .bind(menu.restaurant_id)
        .bind(&menu.name_ru)
        .bind(&menu.name_kz)
        .bind(&menu.img)
        .bind(menu.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error(menu.restaurant_id, "atualizar menu"))?
        .ok_or_else(|| AppError::not_found("menu", menu.id))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM menus WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_failure("remover menu"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("menu", id));
        }
        Ok(())
    }
}
