// src/db/user_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{
        pg_errors::{store_failure, violation, Violation},
        store::UserStore,
    },
    models::user::{NewUser, Page, User},
};

const COLUMNS: &str = "id, phone_number, name, last_name, language, is_active";

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// `users_phone_number_key`: o telefone identifica o cliente
fn map_write_error<'a>(
    phone: &'a str,
    context: &'static str,
) -> impl FnOnce(sqlx::Error) -> AppError + 'a {
    move |e| match violation(&e) {
        Some(Violation::Unique(_)) => AppError::duplicate("user", phone),
        _ => store_failure(context)(e),
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, AppError> {
        let sql = format!(
            r#"
            INSERT INTO users (phone_number, name, last_name, language, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(&user.phone_number)
            .bind(&user.name)
            .bind(&user.last_name)
            .bind(&user.language)
            .bind(user.is_active)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error(&user.phone_number, "criar usuário"))
    }

    // Busca um usuário pelo seu ID
    async fn get_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_failure("buscar usuário"))
    }

    // Busca um usuário pelo telefone
    async fn get_by_phone(&self, phone: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE phone_number = $1");
        sqlx::query_as::<_, User>(&sql)
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_failure("buscar usuário por telefone"))
    }

    async fn list(&self, page: Page) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM users ORDER BY id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, User>(&sql)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(store_failure("listar usuários"))
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let sql = format!(
            r#"
            UPDATE users
            SET phone_number = $1, name = $2, last_name = $3, language = $4, is_active = $5
            WHERE id = $6
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(&user.phone_number)
            .bind(&user.name)
            .bind(&user.last_name)
            .bind(&user.language)
            .bind(user.is_active)
            .bind(user.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error(&user.phone_number, "atualizar usuário"))?
            .ok_or_else(|| AppError::not_found("user", user.id))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_failure("remover usuário"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("user", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pg_errors::testing::{db_error, Kind};

    #[test]
    fn unique_violation_reports_the_duplicate_phone() {
        let phone = String::from("+77011234567");

        let err = map_write_error(&phone, "criar usuário")(db_error(Kind::Unique, "users_phone_number_key"));

        assert!(matches!(
            err,
            AppError::DuplicateInScope { entity: "user", ref value } if value == "+77011234567"
        ));
    }

    #[test]
    fn other_failures_keep_the_context() {
        let phone = String::from("+77011234567");

        let err = map_write_error(&phone, "criar usuário")(sqlx::Error::PoolTimedOut);

        assert!(matches!(err, AppError::StoreFailure { context: "criar usuário", .. }));
    }
}
