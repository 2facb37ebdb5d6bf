// src/services/restaurant_service.rs

use std::sync::Arc;

use crate::{
    common::{deadline::Deadline, error::AppError},
    db::store::{CityStore, RestaurantStore},
    models::restaurant::{NewRestaurant, Restaurant},
    services::{optional_text, required_text},
};

#[derive(Clone)]
pub struct RestaurantService {
    restaurants: Arc<dyn RestaurantStore>,
    cities: Arc<dyn CityStore>,
    deadline: Deadline,
}

impl RestaurantService {
    pub fn new(
        restaurants: Arc<dyn RestaurantStore>,
        cities: Arc<dyn CityStore>,
        deadline: Deadline,
    ) -> Self {
        Self {
            restaurants,
            cities,
            deadline,
        }
    }

    // Normaliza os campos de texto e confere a cidade
    async fn prepare(&self, restaurant: NewRestaurant) -> Result<NewRestaurant, AppError> {
        let name = required_text("name", &restaurant.name, 3)?;
        let address_ru = required_text("address_ru", &restaurant.address_ru, 1)?;
        self.ensure_city(restaurant.city_id).await?;

        Ok(NewRestaurant {
            name,
            address_ru,
            address_kz: optional_text(restaurant.address_kz),
            map_link: optional_text(restaurant.map_link),
            ..restaurant
        })
    }

    async fn ensure_city(&self, city_id: i64) -> Result<(), AppError> {
        self.deadline
            .run(self.cities.get_by_id(city_id))
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("city", city_id))
    }

    pub async fn create(&self, restaurant: NewRestaurant) -> Result<Restaurant, AppError> {
        let restaurant = self.prepare(restaurant).await?;
        self.deadline.run(self.restaurants.insert(&restaurant)).await
    }

    pub async fn get(&self, id: i64) -> Result<Restaurant, AppError> {
        self.deadline
            .run(self.restaurants.get_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found("restaurant", id))
    }

    /// Por padrão só os restaurantes ativos; `include_inactive` devolve todos.
    pub async fn list(&self, include_inactive: bool) -> Result<Vec<Restaurant>, AppError> {
        self.deadline.run(self.restaurants.list(!include_inactive)).await
    }

    pub async fn list_by_city(&self, city_id: i64) -> Result<Vec<Restaurant>, AppError> {
        self.ensure_city(city_id).await?;
        self.deadline.run(self.restaurants.list_by_city(city_id)).await
    }

    pub async fn update(&self, id: i64, changes: NewRestaurant) -> Result<Restaurant, AppError> {
        self.get(id).await?;
        let changes = self.prepare(changes).await?;

        let restaurant = Restaurant {
            id,
            name: changes.name,
            city_id: changes.city_id,
            address_ru: changes.address_ru,
            address_kz: changes.address_kz,
            is_active: changes.is_active,
            map_link: changes.map_link,
        };
        self.deadline.run(self.restaurants.update(&restaurant)).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.deadline.run(self.restaurants.delete(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::MemoryStore, models::city::NewCity};

    async fn setup() -> (RestaurantService, i64) {
        let store = Arc::new(MemoryStore::new());
        let city = CityStore::insert(store.as_ref(), &NewCity { name: "Almaty".into() })
            .await
            .unwrap();
        let service = RestaurantService::new(store.clone(), store, Deadline::default());
        (service, city.id)
    }

    fn restaurant(name: &str, city_id: i64, is_active: bool) -> NewRestaurant {
        NewRestaurant {
            name: name.into(),
            city_id,
            address_ru: "ул. Панфилова 10".into(),
            address_kz: Some("  ".into()),
            is_active,
            map_link: None,
        }
    }

    #[tokio::test]
    async fn unknown_city_is_not_found() {
        let (service, city_id) = setup().await;

        let err = service
            .create(restaurant("Navat", city_id + 100, true))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { entity: "city", .. }));
    }

    #[tokio::test]
    async fn listing_hides_inactive_unless_asked() {
        let (service, city_id) = setup().await;
        let navat = service.create(restaurant("Navat", city_id, true)).await.unwrap();
        service.create(restaurant("Closed Place", city_id, false)).await.unwrap();

        assert_eq!(navat.address_kz, None);

        let active = service.list(false).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, navat.id);

        assert_eq!(service.list(true).await.unwrap().len(), 2);
        assert_eq!(service.list_by_city(city_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn names_shorter_than_three_chars_are_rejected() {
        let (service, city_id) = setup().await;
        let err = service.create(restaurant("ab", city_id, true)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
