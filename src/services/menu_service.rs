// src/services/menu_service.rs

use std::sync::Arc;

use crate::{
    common::{deadline::Deadline, error::AppError},
    db::store::{MenuStore, RestaurantStore},
    models::menu::{Menu, NewMenu},
    services::{optional_text, required_text},
};

#[derive(Clone)]
pub struct MenuService {
    menus: Arc<dyn MenuStore>,
    restaurants: Arc<dyn RestaurantStore>,
    deadline: Deadline,
}

impl MenuService {
    pub fn new(
        menus: Arc<dyn MenuStore>,
        restaurants: Arc<dyn RestaurantStore>,
        deadline: Deadline,
    ) -> Self {
        Self {
            menus,
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

    async fn prepare(&self, menu: NewMenu) -> Result<NewMenu, AppError> {
        let name_ru = required_text("name_ru", &menu.name_ru, 1)?;
        self.ensure_restaurant(menu.restaurant_id).await?;

        Ok(NewMenu {
            restaurant_id: menu.restaurant_id,
            name_ru,
            name_kz: optional_text(menu.name_kz),
            img: optional_text(menu.img),
        })
    }

    pub async fn create(&self, menu: NewMenu) -> Result<Menu, AppError> {
        let menu = self.prepare(menu).await?;
        self.deadline.run(self.menus.insert(&menu)).await
    }

    pub async fn get(&self, id: i64) -> Result<Menu, AppError> {
        self.deadline
            .run(self.menus.get_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found("menu", id))
    }

    pub async fn list_by_restaurant(&self, restaurant_id: i64) -> Result<Vec<Menu>, AppError> {
        self.ensure_restaurant(restaurant_id).await?;
        self.deadline.run(self.menus.list_by_restaurant(restaurant_id)).await
    }

    pub async fn update(&self, id: i64, changes: NewMenu) -> Result<Menu, AppError> {
        self.get(id).await?;
        let changes = self.prepare(changes).await?;

        let menu = Menu {
            id,
            restaurant_id: changes.restaurant_id,
            name_ru: changes.name_ru,
            name_kz: changes.name_kz,
            img: changes.img,
        };
        self.deadline.run(self.menus.update(&menu)).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.deadline.run(self.menus.delete(id)).await
    }
}
