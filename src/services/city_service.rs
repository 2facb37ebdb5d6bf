// src/services/city_service.rs

use std::sync::Arc;

use crate::{
    common::{deadline::Deadline, error::AppError},
    db::store::CityStore,
    models::city::{City, NewCity},
    services::{
        required_text,
        uniqueness::{ensure_unique, needs_recheck, Name},
    },
};

#[derive(Clone)]
pub struct CityService {
    cities: Arc<dyn CityStore>,
    deadline: Deadline,
}

impl CityService {
    pub fn new(cities: Arc<dyn CityStore>, deadline: Deadline) -> Self {
        Self { cities, deadline }
    }

    /// Cria uma cidade. O nome é único no sistema, sem diferenciar maiúsculas.
    pub async fn create(&self, city: NewCity) -> Result<City, AppError> {
        let name = required_text("name", &city.name, 2)?;

        let existing = self.deadline.run(self.cities.list()).await?;
        ensure_unique(
            "city",
            None,
            &Name(&name),
            existing.iter().map(|c| (c.id, Name(&c.name))),
        )?;

        self.deadline.run(self.cities.insert(&NewCity { name })).await
    }

    pub async fn get(&self, id: i64) -> Result<City, AppError> {
        self.deadline
            .run(self.cities.get_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found("city", id))
    }

    pub async fn list(&self) -> Result<Vec<City>, AppError> {
        self.deadline.run(self.cities.list()).await
    }

    pub async fn update(&self, id: i64, changes: NewCity) -> Result<City, AppError> {
        let name = required_text("name", &changes.name, 2)?;
        let current = self.get(id).await?;

        if needs_recheck(0, 0, &Name(&current.name), &Name(&name)) {
            let existing = self.deadline.run(self.cities.list()).await?;
            ensure_unique(
                "city",
                Some(id),
                &Name(&name),
                existing.iter().map(|c| (c.id, Name(&c.name))),
            )?;
        }

        self.deadline.run(self.cities.update(&City { id, name })).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.deadline.run(self.cities.delete(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn service() -> CityService {
        CityService::new(Arc::new(MemoryStore::new()), Deadline::default())
    }

    #[tokio::test]
    async fn names_are_trimmed_and_unique() {
        let service = service();
        let almaty = service.create(NewCity { name: "  Almaty ".into() }).await.unwrap();
        assert_eq!(almaty.name, "Almaty");

        let err = service.create(NewCity { name: "ALMATY".into() }).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateInScope { .. }));
    }

    #[tokio::test]
    async fn short_names_are_rejected() {
        let err = service().create(NewCity { name: " A ".into() }).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn renaming_to_another_case_of_itself_is_allowed() {
        let service = service();
        let city = service.create(NewCity { name: "Astana".into() }).await.unwrap();

        let renamed = service
            .update(city.id, NewCity { name: "ASTANA".into() })
            .await
            .unwrap();

        assert_eq!(renamed.name, "ASTANA");
    }
}
