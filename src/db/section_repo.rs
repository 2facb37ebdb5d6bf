// src/db/section_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{
        pg_errors::{store_failure, violation, Violation},
        store::SectionStore,
    },
    models::restaurant::{NewSection, Section},
};

#[derive(Clone)]
pub struct SectionRepository {
    pool: PgPool,
}

impl SectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// `sections_restaurant_name_key` = UNIQUE (restaurant_id, lower(name)).
// É ela que fecha a corrida entre duas criações concorrentes no mesmo restaurante.
fn map_write_error<'a>(
    restaurant_id: i64,
    name: &'a str,
    context: &'static str,
) -> impl FnOnce(sqlx::Error) -> AppError + 'a {
    move |e| match violation(&e) {
        Some(Violation::Unique(_)) => AppError::duplicate("section", name),
        Some(Violation::ForeignKey(_)) => AppError::not_found("restaurant", restaurant_id),
        _ => store_failure(context)(e),
    }
}

#[async_trait]
impl SectionStore for SectionRepository {
    async fn insert(&self, section: &NewSection) -> Result<Section, AppError> {
        sqlx::query_as::<_, Section>(
            r#"
            INSERT INTO sections (restaurant_id, name)
            VALUES ($1, $2)
            RETURNING id, restaurant_id, name
            "#,
        )
        .bind(section.restaurant_id)
        .bind(&section.name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error(section.restaurant_id, &section.name, "criar seção"))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Section>, AppError> {
        sqlx::query_as::<_, Section>("SELECT id, restaurant_id, name FROM sections WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_failure("buscar seção"))
    }

    async fn list_by_restaurant(&self, restaurant_id: i64) -> Result<Vec<Section>, AppError> {
        sqlx::query_as::<_, Section>(
            "SELECT id, restaurant_id, name FROM sections WHERE restaurant_id = $1 ORDER BY name",
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_failure("listar seções do restaurante"))
    }

    async fn update(&self, section: &Section) -> Result<Section, AppError> {
        sqlx::query_as::<_, Section>(
            r#"
            UPDATE sections SET restaurant_id = $1, name = $2
            WHERE id = $3
            RETURNING id, restaurant_id, name
            "#,
        )
        .bind(section.restaurant_id)
        .bind(&section.name)
        .bind(section.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error(section.restaurant_id, &section.name, "atualizar seção"))?
        .ok_or_else(|| AppError::not_found("section", section.id))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM sections WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match violation(&e) {
                Some(Violation::ForeignKey(_)) => AppError::HasDependents { entity: "section", id },
                _ => store_failure("remover seção")(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("section", id));
        }
        Ok(())
    }
}
