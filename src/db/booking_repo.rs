// src/db/booking_repo.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{
        pg_errors::{store_failure, violation, Violation},
        store::BookingStore,
    },
    models::event::Booking,
};

#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Duas restrições protegem a vaga:
//   restaurant_event_tables_pkey      (event_id, table_id, booking_date)
//   restaurant_event_tables_slot_key  (table_id, booking_date)
// Qualquer uma das duas significa que a mesa já está ocupada nesse dia.
fn map_insert_error(booking: &Booking) -> impl FnOnce(sqlx::Error) -> AppError + '_ {
    move |e| match violation(&e) {
        Some(Violation::Unique(_)) => AppError::SlotUnavailable {
            table_id: booking.table_id,
            date: booking.booking_date,
        },
        Some(Violation::ForeignKey(constraint)) if constraint.ends_with("event_id_fkey") => {
            AppError::not_found("event", booking.event_id)
        }
        Some(Violation::ForeignKey(_)) => AppError::not_found("table", booking.table_id),
        _ => store_failure("criar reserva")(e),
    }
}

#[async_trait]
impl BookingStore for BookingRepository {
    async fn insert(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO restaurant_event_tables (event_id, table_id, booking_date)
            VALUES ($1, $2, $3)
            RETURNING event_id, table_id, booking_date
            "#,
        )
        .bind(booking.event_id)
        .bind(booking.table_id)
        .bind(booking.booking_date)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error(booking))
    }

    async fn delete(&self, booking: &Booking) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM restaurant_event_tables
            WHERE event_id = $1 AND table_id = $2 AND booking_date = $3
            "#,
        )
        .bind(booking.event_id)
        .bind(booking.table_id)
        .bind(booking.booking_date)
        .execute(&self.pool)
        .await
        .map_err(store_failure("cancelar reserva"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_slot(
        &self,
        table_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT event_id, table_id, booking_date
            FROM restaurant_event_tables
            WHERE table_id = $1 AND booking_date = $2
            "#,
        )
        .bind(table_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_failure("consultar disponibilidade"))
    }

    async fn list_by_table(&self, table_id: i64) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT event_id, table_id, booking_date
            FROM restaurant_event_tables
            WHERE table_id = $1
            ORDER BY booking_date, event_id
            "#,
        )
        .bind(table_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_failure("listar reservas da mesa"))
    }

    async fn list_by_event(&self, event_id: i64) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT event_id, table_id, booking_date
            FROM restaurant_event_tables
            WHERE event_id = $1
            ORDER BY booking_date, table_id
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_failure("listar reservas do evento"))
    }

    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT event_id, table_id, booking_date
            FROM restaurant_event_tables
            WHERE booking_date = $1
            ORDER BY table_id
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(store_failure("listar reservas do dia"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pg_errors::testing::{db_error, Kind};

    fn booking() -> Booking {
        Booking {
            event_id: 7,
            table_id: 3,
            booking_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        }
    }

    #[test]
    fn either_unique_constraint_means_the_slot_is_taken() {
        let booking = booking();
        for constraint in [
            "restaurant_event_tables_pkey",
            "restaurant_event_tables_slot_key",
        ] {
            let err = map_insert_error(&booking)(db_error(Kind::Unique, constraint));
            assert!(matches!(
                err,
                AppError::SlotUnavailable { table_id: 3, date } if date == booking.booking_date
            ));
        }
    }

    #[test]
    fn foreign_keys_point_at_the_missing_parent() {
        let booking = booking();

        let err = map_insert_error(&booking)(db_error(
            Kind::ForeignKey,
            "restaurant_event_tables_event_id_fkey",
        ));
        assert!(matches!(err, AppError::NotFound { entity: "event", .. }));

        let err = map_insert_error(&booking)(db_error(
            Kind::ForeignKey,
            "restaurant_event_tables_table_id_fkey",
        ));
        assert!(matches!(err, AppError::NotFound { entity: "table", .. }));
    }

    #[test]
    fn unrelated_failures_keep_their_source() {
        let err = map_insert_error(&booking())(sqlx::Error::PoolTimedOut);
        assert!(matches!(
            err,
            AppError::StoreFailure {
                context: "criar reserva",
                source: sqlx::Error::PoolTimedOut,
            }
        ));
    }
}
