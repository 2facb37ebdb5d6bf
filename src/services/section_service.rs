// src/services/section_service.rs

use std::sync::Arc;

use crate::{
    common::{deadline::Deadline, error::AppError},
    db::store::{RestaurantStore, SectionStore},
    models::restaurant::{NewSection, Section},
    services::{
        required_text,
        uniqueness::{ensure_unique, needs_recheck, Name},
    },
};

/// Seções de um restaurante. O nome é único dentro do restaurante.
#[derive(Clone)]
pub struct SectionService {
    sections: Arc<dyn SectionStore>,
    restaurants: Arc<dyn RestaurantStore>,
    deadline: Deadline,
}

impl SectionService {
    pub fn new(
        sections: Arc<dyn SectionStore>,
        restaurants: Arc<dyn RestaurantStore>,
        deadline: Deadline,
    ) -> Self {
        Self {
            sections,
            restaurants,
            deadline,
        }
    }

    async fn ensure_restaurant(&self, restaurant_id: i64) -> Result<(), AppError> {
        self.deadline
            .run(self.restaurants.get_by_id(restaurant_id))
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("restaurant", restaurant_id))
    }

    async fn ensure_unique_name(
        &self,
        restaurant_id: i64,
        own_id: Option<i64>,
        name: &str,
    ) -> Result<(), AppError> {
        let siblings = self
            .deadline
            .run(self.sections.list_by_restaurant(restaurant_id))
            .await?;

        ensure_unique(
            "section",
            own_id,
            &Name(name),
            siblings.iter().map(|s| (s.id, Name(&s.name))),
        )
    }

    pub async fn create(&self, section: NewSection) -> Result<Section, AppError> {
        // 1. Valida o nome
        let name = required_text("name", &section.name, 1)?;

        // 2. O restaurante precisa existir
        self.ensure_restaurant(section.restaurant_id).await?;

        // 3. Checagem amigável; a restrição do store fecha a corrida
        self.ensure_unique_name(section.restaurant_id, None, &name).await?;

        // 4. Grava
        let section = NewSection {
            restaurant_id: section.restaurant_id,
            name,
        };
        self.deadline.run(self.sections.insert(&section)).await
    }

    pub async fn get(&self, id: i64) -> Result<Section, AppError> {
        self.deadline
            .run(self.sections.get_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found("section", id))
    }

    pub async fn list_by_restaurant(&self, restaurant_id: i64) -> Result<Vec<Section>, AppError> {
        self.ensure_restaurant(restaurant_id).await?;
        self.deadline
            .run(self.sections.list_by_restaurant(restaurant_id))
            .await
    }

    pub async fn update(&self, id: i64, changes: NewSection) -> Result<Section, AppError> {
        let name = required_text("name", &changes.name, 1)?;
        let current = self.get(id).await?;

        if current.restaurant_id != changes.restaurant_id {
            self.ensure_restaurant(changes.restaurant_id).await?;
        }

        if needs_recheck(
            current.restaurant_id,
            changes.restaurant_id,
            &Name(&current.name),
            &Name(&name),
        ) {
            self.ensure_unique_name(changes.restaurant_id, Some(id), &name)
                .await?;
        }

        let section = Section {
            id,
            restaurant_id: changes.restaurant_id,
            name,
        };
        self.deadline.run(self.sections.update(&section)).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.deadline.run(self.sections.delete(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::MemoryStore,
        models::{city::NewCity, restaurant::NewRestaurant},
        db::store::CityStore,
    };

    async fn setup() -> (SectionService, i64, i64) {
        let store = Arc::new(MemoryStore::new());
        let city = CityStore::insert(store.as_ref(), &NewCity { name: "Almaty".into() })
            .await
            .unwrap();
        let mut ids = Vec::new();
        for name in ["Navat", "Dastarkhan"] {
            let r = RestaurantStore::insert(
                store.as_ref(),
                &NewRestaurant {
                    name: name.into(),
                    city_id: city.id,
                    address_ru: "ул. Абая 1".into(),
                    address_kz: None,
                    is_active: true,
                    map_link: None,
                },
            )
            .await
            .unwrap();
            ids.push(r.id);
        }
        let service = SectionService::new(store.clone(), store, Deadline::default());
        (service, ids[0], ids[1])
    }

    fn section(restaurant_id: i64, name: &str) -> NewSection {
        NewSection {
            restaurant_id,
            name: name.into(),
        }
    }

    #[tokio::test]
    async fn duplicate_name_in_same_restaurant_is_rejected() {
        let (service, first, _) = setup().await;
        service.create(section(first, "Terrace")).await.unwrap();

        let err = service.create(section(first, "terrace")).await.unwrap_err();

        assert!(matches!(err, AppError::DuplicateInScope { entity: "section", .. }));
    }

    #[tokio::test]
    async fn same_name_in_another_restaurant_is_fine() {
        let (service, first, second) = setup().await;
        service.create(section(first, "Terrace")).await.unwrap();
        service.create(section(second, "Terrace")).await.unwrap();
    }

    #[tokio::test]
    async fn update_respects_scope() {
        let (service, first, second) = setup().await;
        let terrace = service.create(section(first, "Terrace")).await.unwrap();
        service.create(section(first, "Hall")).await.unwrap();
        service.create(section(second, "Garden")).await.unwrap();

        // Mudar só a caixa do próprio nome não é conflito
        let renamed = service.update(terrace.id, section(first, "TERRACE")).await.unwrap();
        assert_eq!(renamed.name, "TERRACE");

        let err = service.update(terrace.id, section(first, "hall")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateInScope { .. }));

        let err = service.update(terrace.id, section(second, "garden")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateInScope { .. }));

        let moved = service.update(terrace.id, section(second, "Terrace")).await.unwrap();
        assert_eq!(moved.restaurant_id, second);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_with_colliding_names_leave_one_section() {
        let (service, first, _) = setup().await;

        let attempts: Vec<_> = (0..32)
            .map(|i| {
                let service = service.clone();
                let name = if i % 2 == 0 { "Terrace" } else { "terrace" };
                tokio::spawn(async move { service.create(section(first, name)).await })
            })
            .collect();

        let mut created = 0;
        for attempt in attempts {
            match attempt.await.unwrap() {
                Ok(_) => created += 1,
                Err(AppError::DuplicateInScope { entity: "section", .. }) => {}
                Err(e) => panic!("erro inesperado: {e}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(service.list_by_restaurant(first).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn listing_needs_an_existing_restaurant() {
        let (service, first, _) = setup().await;
        let err = service.list_by_restaurant(first + 1000).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { entity: "restaurant", .. }));
    }
}
