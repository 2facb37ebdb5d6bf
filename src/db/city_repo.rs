// src/db/city_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{
        pg_errors::{store_failure, violation, Violation},
        store::CityStore,
    },
    models::city::{City, NewCity},
};

#[derive(Clone)]
pub struct CityRepository {
    pool: PgPool,
}

impl CityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// `cities_name_lower_key` é o índice único sobre lower(name)
fn map_write_error<'a>(
    name: &'a str,
    context: &'static str,
) -> impl FnOnce(sqlx::Error) -> AppError + 'a {
    move |e| match violation(&e) {
        Some(Violation::Unique(_)) => AppError::duplicate("city", name),
        _ => store_failure(context)(e),
    }
}

#[async_trait]
impl CityStore for CityRepository {
    async fn insert(&self, city: &NewCity) -> Result<City, AppError> {
        sqlx::query_as::<_, City>("INSERT INTO cities (name) VALUES ($1) RETURNING id, name")
            .bind(&city.name)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error(&city.name, "criar cidade"))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<City>, AppError> {
        sqlx::query_as::<_, City>("SELECT id, name FROM cities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_failure("buscar cidade"))
    }

    async fn list(&self) -> Result<Vec<City>, AppError> {
        sqlx::query_as::<_, City>("SELECT id, name FROM cities ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(store_failure("listar cidades"))
    }

    async fn update(&self, city: &City) -> Result<City, AppError> {
        sqlx::query_as::<_, City>("UPDATE cities SET name = $1 WHERE id = $2 RETURNING id, name")
            .bind(&city.name)
            .bind(city.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error(&city.name, "atualizar cidade"))?
            .ok_or_else(|| AppError::not_found("city", city.id))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM cities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match violation(&e) {
                // Ainda há restaurantes apontando para a cidade (ON DELETE RESTRICT)
                Some(Violation::ForeignKey(_)) => AppError::HasDependents { entity: "city", id },
                _ => store_failure("remover cidade")(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("city", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pg_errors::testing::{db_error, Kind};

    #[test]
    fn unique_violation_reports_the_duplicate_name() {
        let name = String::from("Almaty");

        let err = map_write_error(&name, "criar cidade")(db_error(Kind::Unique, "cities_name_lower_key"));

        assert!(matches!(
            err,
            AppError::DuplicateInScope { entity: "city", ref value } if value == "Almaty"
        ));
    }

    #[test]
    fn other_failures_keep_the_context() {
        let name = String::from("Almaty");

        let err = map_write_error(&name, "criar cidade")(sqlx::Error::PoolTimedOut);

        assert!(matches!(err, AppError::StoreFailure { context: "criar cidade", .. }));
    }
}
