// src/db/menu_type_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{
        pg_errors::{store_failure, violation, Violation},
        store::MenuTypeStore,
    },
    models::menu::{MenuType, NewMenuType},
};

#[derive(Clone)]
pub struct MenuTypeRepository {
    pool: PgPool,
}

impl MenuTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// `menu_types_name_lower_key`: um nome por catálogo, sem diferenciar caixa
fn map_write_error<'a>(
    name: &'a str,
    context: &'static str,
) -> impl FnOnce(sqlx::Error) -> AppError + 'a {
    move |e| match violation(&e) {
        Some(Violation::Unique(_)) => AppError::duplicate("menu_type", name),
        _ => store_failure(context)(e),
    }
}

#[async_trait]
impl MenuTypeStore for MenuTypeRepository {
    async fn insert(&self, menu_type: &NewMenuType) -> Result<MenuType, AppError> {
        sqlx::query_as::<_, MenuType>(
            "INSERT INTO menu_types (name, img) VALUES ($1, $2) RETURNING id, name, img",
        )
        .bind(&menu_type.name)
        .bind(&menu_type.img)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error(&menu_type.name, "criar tipo de menu"))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<MenuType>, AppError> {
        sqlx::query_as::<_, MenuType>("SELECT id, name, img FROM menu_types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_failure("buscar tipo de menu"))
    }

    async fn list(&self) -> Result<Vec<MenuType>, AppError> {
        sqlx::query_as::<_, MenuType>("SELECT id, name, img FROM menu_types ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(store_failure("listar tipos de menu"))
    }

    async fn update(&self, menu_type: &MenuType) -> Result<MenuType, AppError> {
        sqlx::query_as::<_, MenuType>(
            "UPDATE menu_types SET name = $1, img = $2 WHERE id = $3 RETURNING id, name, img",
        )
        .bind(&menu_type.name)
        .bind(&menu_type.img)
        .bind(menu_type.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error(&menu_type.name, "atualizar tipo de menu"))?
        .ok_or_else(|| AppError::not_found("menu_type", menu_type.id))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM menu_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_failure("remover tipo de menu"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("menu_type", id));
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
        let name = String::from("Банкет");

        let err = map_write_error(&name, "criar tipo de menu")(db_error(Kind::Unique, "menu_types_name_lower_key"));

        assert!(matches!(
            err,
            AppError::DuplicateInScope { entity: "menu_type", ref value } if value == "Банкет"
        ));
    }

    #[test]
    fn other_failures_keep_the_context() {
        let name = String::from("Банкет");

        let err = map_write_error(&name, "criar tipo de menu")(sqlx::Error::PoolTimedOut);

        assert!(matches!(err, AppError::StoreFailure { context: "criar tipo de menu", .. }));
    }
}
