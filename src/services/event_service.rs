// src/services/event_service.rs

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    common::{deadline::Deadline, error::AppError},
    db::store::EventStore,
    models::event::{EventType, NewRestaurantEvent, RestaurantEvent},
    services::{optional_text, required_text},
};

#[derive(Clone)]
pub struct EventService {
    events: Arc<dyn EventStore>,
    deadline: Deadline,
}

impl EventService {
    pub fn new(events: Arc<dyn EventStore>, deadline: Deadline) -> Self {
        Self { events, deadline }
    }

    fn prepare(event: NewRestaurantEvent) -> Result<NewRestaurantEvent, AppError> {
        let name = required_text("name", &event.name, 1)?;
        if event.price < Decimal::ZERO {
            return Err(AppError::invalid("price não pode ser negativo"));
        }

        Ok(NewRestaurantEvent {
            name,
            description: optional_text(event.description),
            img: optional_text(event.img),
            ..event
        })
    }

    pub async fn create(&self, event: NewRestaurantEvent) -> Result<RestaurantEvent, AppError> {
        let event = Self::prepare(event)?;
        self.deadline.run(self.events.insert(&event)).await
    }

    pub async fn get(&self, id: i64) -> Result<RestaurantEvent, AppError> {
        self.deadline
            .run(self.events.get_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found("event", id))
    }

    pub async fn list(&self) -> Result<Vec<RestaurantEvent>, AppError> {
        self.deadline.run(self.events.list()).await
    }

    /// Filtra pelo tipo recebido como texto (`wedding`, `birthday`, `corporate`).
    pub async fn list_by_type(&self, event_type: &str) -> Result<Vec<RestaurantEvent>, AppError> {
        let event_type: EventType = event_type.parse().map_err(AppError::InvalidInput)?;
        self.deadline.run(self.events.list_by_type(event_type)).await
    }

    pub async fn update(
        &self,
        id: i64,
        changes: NewRestaurantEvent,
    ) -> Result<RestaurantEvent, AppError> {
        let changes = Self::prepare(changes)?;
        self.get(id).await?;

        let event = RestaurantEvent {
            id,
            name: changes.name,
            event_type: changes.event_type,
            description: changes.description,
            price: changes.price,
            img: changes.img,
        };
        self.deadline.run(self.events.update(&event)).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.deadline.run(self.events.delete(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn event(name: &str, event_type: EventType, price: i64) -> NewRestaurantEvent {
        NewRestaurantEvent {
            name: name.into(),
            event_type,
            description: None,
            price: Decimal::new(price, 2),
            img: None,
        }
    }

    #[tokio::test]
    async fn lists_by_type_and_rejects_unknown_types() {
        let service = EventService::new(Arc::new(MemoryStore::new()), Deadline::default());
        let wedding = service
            .create(event("Той", EventType::Wedding, 15_000_000))
            .await
            .unwrap();
        service
            .create(event("Корпоратив", EventType::Corporate, 990_050))
            .await
            .unwrap();

        let weddings = service.list_by_type("Wedding").await.unwrap();
        assert_eq!(weddings, vec![wedding]);

        let err = service.list_by_type("funeral").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn negative_prices_are_rejected() {
        let service = EventService::new(Arc::new(MemoryStore::new()), Deadline::default());
        let err = service
            .create(event("Той", EventType::Wedding, -1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
