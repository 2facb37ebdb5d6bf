// src/services/booking_service.rs

use std::{collections::HashSet, sync::Arc};

use chrono::NaiveDate;

use crate::{
    common::{deadline::Deadline, error::AppError},
    db::store::{BookingStore, EventStore, SectionStore, TableStore},
    models::{
        event::{Booking, BookingOutcome},
        table::Table,
    },
};

/// Reservas de mesa para eventos.
///
/// A granularidade é o dia: uma mesa atende no máximo um evento por data.
/// Não há retentativas; quem perde a corrida no banco recebe `SlotUnavailable`.
#[derive(Clone)]
pub struct BookingService {
    bookings: Arc<dyn BookingStore>,
    events: Arc<dyn EventStore>,
    tables: Arc<dyn TableStore>,
    sections: Arc<dyn SectionStore>,
    deadline: Deadline,
}

impl BookingService {
    pub fn new(
        bookings: Arc<dyn BookingStore>,
        events: Arc<dyn EventStore>,
        tables: Arc<dyn TableStore>,
        sections: Arc<dyn SectionStore>,
        deadline: Deadline,
    ) -> Self {
        Self {
            bookings,
            events,
            tables,
            sections,
            deadline,
        }
    }

    async fn ensure_event(&self, event_id: i64) -> Result<(), AppError> {
        self.deadline
            .run(self.events.get_by_id(event_id))
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("event", event_id))
    }

    async fn ensure_table(&self, table_id: i64) -> Result<(), AppError> {
        self.deadline
            .run(self.tables.get_by_id(table_id))
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("table", table_id))
    }

    /// Reserva a mesa para o evento na data.
    ///
    /// Reservar de novo o mesmo (evento, mesa, data) devolve a reserva
    /// existente com `created = false`. Outro evento na mesma mesa e data
    /// recebe `SlotUnavailable`.
    pub async fn book_table(
        &self,
        event_id: i64,
        table_id: i64,
        date: NaiveDate,
    ) -> Result<BookingOutcome, AppError> {
        // 1. Evento e mesa precisam existir
        self.ensure_event(event_id).await?;
        self.ensure_table(table_id).await?;

        let booking = Booking {
            event_id,
            table_id,
            booking_date: date,
        };

        // 2. A vaga está livre?
        if let Some(existing) = self.slot(table_id, date).await? {
            return Self::same_event_or_conflict(existing, booking);
        }

        // 3. Grava. Se outra requisição ocupou a vaga no meio tempo,
        //    a restrição do store responde e relemos a vaga.
        match self.deadline.run(self.bookings.insert(&booking)).await {
            Ok(created) => {
                tracing::info!(event_id, table_id, %date, "📅 Mesa reservada");
                Ok(BookingOutcome {
                    booking: created,
                    created: true,
                })
            }
            Err(AppError::SlotUnavailable { .. }) => match self.slot(table_id, date).await? {
                Some(existing) => Self::same_event_or_conflict(existing, booking),
                None => Err(AppError::SlotUnavailable { table_id, date }),
            },
            Err(e) => Err(e),
        }
    }

    fn same_event_or_conflict(
        existing: Booking,
        wanted: Booking,
    ) -> Result<BookingOutcome, AppError> {
        if existing == wanted {
            Ok(BookingOutcome {
                booking: existing,
                created: false,
            })
        } else {
            Err(AppError::SlotUnavailable {
                table_id: wanted.table_id,
                date: wanted.booking_date,
            })
        }
    }

    async fn slot(&self, table_id: i64, date: NaiveDate) -> Result<Option<Booking>, AppError> {
        self.deadline
            .run(self.bookings.find_by_slot(table_id, date))
            .await
    }

    /// `true` se nenhuma reserva ocupa a mesa na data.
    pub async fn check_availability(
        &self,
        table_id: i64,
        date: NaiveDate,
    ) -> Result<bool, AppError> {
        self.ensure_table(table_id).await?;
        Ok(self.slot(table_id, date).await?.is_none())
    }

    /// Apaga exatamente a reserva (evento, mesa, data).
    pub async fn cancel_booking(
        &self,
        event_id: i64,
        table_id: i64,
        date: NaiveDate,
    ) -> Result<(), AppError> {
        let booking = Booking {
            event_id,
            table_id,
            booking_date: date,
        };

        let deleted = self.deadline.run(self.bookings.delete(&booking)).await?;
        if !deleted {
            return Err(AppError::BookingNotFound {
                event_id,
                table_id,
                date,
            });
        }

        tracing::info!(event_id, table_id, %date, "🗑️ Reserva cancelada");
        Ok(())
    }

    pub async fn get_table_bookings(&self, table_id: i64) -> Result<Vec<Booking>, AppError> {
        self.ensure_table(table_id).await?;
        self.deadline.run(self.bookings.list_by_table(table_id)).await
    }

    pub async fn get_event_bookings(&self, event_id: i64) -> Result<Vec<Booking>, AppError> {
        self.ensure_event(event_id).await?;
        self.deadline.run(self.bookings.list_by_event(event_id)).await
    }

    /// Mesas da seção livres na data, em ordem de número.
    pub async fn get_available_tables(
        &self,
        section_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Table>, AppError> {
        self.deadline
            .run(self.sections.get_by_id(section_id))
            .await?
            .ok_or_else(|| AppError::not_found("section", section_id))?;

        let tables = self.deadline.run(self.tables.list_by_section(section_id)).await?;
        let taken: HashSet<i64> = self
            .deadline
            .run(self.bookings.list_by_date(date))
            .await?
            .into_iter()
            .map(|b| b.table_id)
            .collect();

        Ok(tables
            .into_iter()
            .filter(|t| !taken.contains(&t.id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    use crate::{
        db::{store::CityStore, store::RestaurantStore, MemoryStore},
        models::{
            city::NewCity,
            event::{EventType, NewRestaurantEvent},
            restaurant::{NewRestaurant, NewSection},
            table::NewTable,
        },
    };

    struct Fixture {
        store: Arc<MemoryStore>,
        service: BookingService,
        section_id: i64,
        tables: Vec<i64>,
        events: Vec<i64>,
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let city = CityStore::insert(store.as_ref(), &NewCity { name: "Almaty".into() })
            .await
            .unwrap();
        let restaurant = RestaurantStore::insert(
            store.as_ref(),
            &NewRestaurant {
                name: "Navat".into(),
                city_id: city.id,
                address_ru: "ул. Абая 1".into(),
                address_kz: None,
                is_active: true,
                map_link: None,
            },
        )
        .await
        .unwrap();
        let section = SectionStore::insert(
            store.as_ref(),
            &NewSection {
                restaurant_id: restaurant.id,
                name: "Hall".into(),
            },
        )
        .await
        .unwrap();

        let mut tables = Vec::new();
        for number in 1..=3 {
            let table = TableStore::insert(
                store.as_ref(),
                &NewTable {
                    number_of_table: number,
                    section_id: section.id,
                    qr: None,
                },
            )
            .await
            .unwrap();
            tables.push(table.id);
        }

        let mut events = Vec::new();
        for name in ["Свадьба", "День рождения"] {
            let event = EventStore::insert(
                store.as_ref(),
                &NewRestaurantEvent {
                    name: name.into(),
                    event_type: EventType::Wedding,
                    description: None,
                    price: Decimal::new(100_000, 0),
                    img: None,
                },
            )
            .await
            .unwrap();
            events.push(event.id);
        }

        let service = BookingService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            Deadline::default(),
        );
        Fixture {
            store,
            service,
            section_id: section.id,
            tables,
            events,
        }
    }

    #[tokio::test]
    async fn a_table_serves_one_event_per_day() {
        let f = fixture().await;
        let (first, second, table) = (f.events[0], f.events[1], f.tables[0]);

        f.service.book_table(first, table, date(1)).await.unwrap();

        let err = f.service.book_table(second, table, date(1)).await.unwrap_err();
        assert!(matches!(err, AppError::SlotUnavailable { .. }));

        f.service.book_table(second, table, date(2)).await.unwrap();
    }

    #[tokio::test]
    async fn rebooking_the_same_slot_returns_the_existing_booking() {
        let f = fixture().await;
        let (event, table) = (f.events[0], f.tables[0]);

        let first = f.service.book_table(event, table, date(1)).await.unwrap();
        let again = f.service.book_table(event, table, date(1)).await.unwrap();

        assert!(first.created);
        assert!(!again.created);
        assert_eq!(first.booking, again.booking);
        assert_eq!(f.service.get_table_bookings(table).await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_bookings_of_one_slot_leave_a_single_winner() {
        let f = fixture().await;
        let table = f.tables[0];

        let mut events = f.events.clone();
        for i in 0..14 {
            let event = EventStore::insert(
                f.store.as_ref(),
                &NewRestaurantEvent {
                    name: format!("Банкет {i}"),
                    event_type: EventType::Corporate,
                    description: None,
                    price: Decimal::new(50_000, 0),
                    img: None,
                },
            )
            .await
            .unwrap();
            events.push(event.id);
        }

        let attempts: Vec<_> = events
            .iter()
            .map(|&event| {
                let service = f.service.clone();
                tokio::spawn(async move { service.book_table(event, table, date(1)).await })
            })
            .collect();

        let (mut created, mut rejected) = (0, 0);
        for attempt in attempts {
            match attempt.await.unwrap() {
                Ok(outcome) => {
                    assert!(outcome.created);
                    created += 1;
                }
                Err(AppError::SlotUnavailable { .. }) => rejected += 1,
                Err(e) => panic!("erro inesperado: {e}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(rejected, events.len() - 1);
        assert_eq!(f.service.get_table_bookings(table).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn cancel_is_exact_and_not_repeatable() {
        let f = fixture().await;
        let (event, table) = (f.events[0], f.tables[0]);
        f.service.book_table(event, table, date(1)).await.unwrap();

        f.service.cancel_booking(event, table, date(1)).await.unwrap();

        let err = f
            .service
            .cancel_booking(event, table, date(1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BookingNotFound { .. }));
    }

    #[tokio::test]
    async fn availability_follows_book_and_cancel() {
        let f = fixture().await;
        let (event, table) = (f.events[0], f.tables[0]);

        assert!(f.service.check_availability(table, date(1)).await.unwrap());
        f.service.book_table(event, table, date(1)).await.unwrap();
        assert!(!f.service.check_availability(table, date(1)).await.unwrap());
        assert!(f.service.check_availability(table, date(2)).await.unwrap());
        f.service.cancel_booking(event, table, date(1)).await.unwrap();
        assert!(f.service.check_availability(table, date(1)).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_event_or_table_is_not_found() {
        let f = fixture().await;

        let err = f
            .service
            .book_table(9_999, f.tables[0], date(1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { entity: "event", .. }));

        let err = f
            .service
            .book_table(f.events[0], 9_999, date(1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { entity: "table", .. }));

        let err = f.service.check_availability(9_999, date(1)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn listings_are_ordered_by_date() {
        let f = fixture().await;
        let event = f.events[0];
        f.service.book_table(event, f.tables[1], date(5)).await.unwrap();
        f.service.book_table(event, f.tables[0], date(2)).await.unwrap();
        f.service.book_table(event, f.tables[0], date(5)).await.unwrap();

        let dates: Vec<_> = f
            .service
            .get_event_bookings(event)
            .await
            .unwrap()
            .iter()
            .map(|b| (b.booking_date, b.table_id))
            .collect();
        assert_eq!(
            dates,
            vec![
                (date(2), f.tables[0]),
                (date(5), f.tables[0]),
                (date(5), f.tables[1]),
            ]
        );
    }

    #[tokio::test]
    async fn available_tables_skip_booked_ones() {
        let f = fixture().await;
        f.service
            .book_table(f.events[0], f.tables[1], date(1))
            .await
            .unwrap();

        let free: Vec<i64> = f
            .service
            .get_available_tables(f.section_id, date(1))
            .await
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect();

        assert_eq!(free, vec![f.tables[0], f.tables[2]]);
        assert_eq!(
            f.service
                .get_available_tables(f.section_id, date(2))
                .await
                .unwrap()
                .len(),
            3
        );
    }
}
