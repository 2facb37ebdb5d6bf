// src/db/table_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{
        pg_errors::{store_failure, violation, Violation},
        store::TableStore,
    },
    models::table::{NewTable, Table},
};

#[derive(Clone)]
pub struct TableRepository {
    pool: PgPool,
}

impl TableRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// `tables_section_number_key` = UNIQUE (section_id, number_of_table)
fn map_write_error(
    section_id: i64,
    number: i32,
    context: &'static str,
) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| match violation(&e) {
        Some(Violation::Unique(_)) => AppError::duplicate("table", number),
        Some(Violation::ForeignKey(_)) => AppError::not_found("section", section_id),
        Some(Violation::Check(_)) => {
            AppError::invalid("o número da mesa deve ser um inteiro positivo")
        }
        None => store_failure(context)(e),
    }
}

#[async_trait]
impl TableStore for TableRepository {
    async fn insert(&self, table: &NewTable) -> Result<Table, AppError> {
        sqlx::query_as::<_, Table>(
            r#"
            INSERT INTO tables (number_of_table, section_id, qr)
            VALUES ($1, $2, $3)
            RETURNING id, number_of_table, section_id, qr
            "#,
        )
        .bind(table.number_of_table)
        .bind(table.section_id)
        .bind(&table.qr)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error(table.section_id, table.number_of_table, "criar mesa"))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Table>, AppError> {
        sqlx::query_as::<_, Table>(
            "SELECT id, number_of_table, section_id, qr FROM tables WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_failure("buscar mesa"))
    }

    async fn list_by_section(&self, section_id: i64) -> Result<Vec<Table>, AppError> {
        sqlx::query_as::<_, Table>(
            r#"
            SELECT id, number_of_table, section_id, qr
            FROM tables
            WHERE section_id = $1
            ORDER BY number_of_table
            "#,
        )
        .bind(section_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_failure("listar mesas da seção"))
    }

    async fn update(&self, table: &Table) -> Result<Table, AppError> {
        sqlx::query_as::<_, Table>(
            r#"
            UPDATE tables
            SET number_of_table = $1, section_id = $2, qr = $3
            WHERE id = $4
            RETURNING id, number_of_table, section_id, qr
            "#,
        )
        .bind(table.number_of_table)
        .bind(table.section_id)
        .bind(&table.qr)
        .bind(table.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error(table.section_id, table.number_of_table, "atualizar mesa"))?
        .ok_or_else(|| AppError::not_found("table", table.id))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tables WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match violation(&e) {
                // Reservas ainda apontam para a mesa
                Some(Violation::ForeignKey(_)) => AppError::HasDependents { entity: "table", id },
                _ => store_failure("remover mesa")(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("table", id));
        }
        Ok(())
    }

    async fn set_qr(&self, id: i64, qr: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE tables SET qr = $1 WHERE id = $2")
            .bind(qr)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_failure("gravar QR da mesa"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("table", id));
        }
        Ok(())
    }

    async fn list_missing_qr(&self) -> Result<Vec<Table>, AppError> {
        sqlx::query_as::<_, Table>(
            r#"
            SELECT id, number_of_table, section_id, qr
            FROM tables
            WHERE qr IS NULL OR qr = ''
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_failure("listar mesas sem QR"))
    }
}
