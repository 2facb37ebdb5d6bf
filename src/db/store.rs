// src/db/store.rs

//! Os contratos de persistência consumidos pelos serviços.
//!
//! Cada entidade tem o seu trait; o Postgres (`*_repo.rs`) e o store em memória
//! (`memory.rs`) implementam todos eles. As duas implementações impõem as
//! mesmas restrições únicas no momento da escrita e as devolvem como erros
//! tipados (`DuplicateInScope`, `SlotUnavailable`, `HasDependents`), por isso a
//! checagem prévia dos serviços nunca é a única garantia.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{
        memory::MemoryStore, BookingRepository, CityRepository, EventRepository,
        MenuRepository, MenuTypeRepository, RestaurantRepository, SectionRepository,
        TableRepository, UserRepository,
    },
    models::{
        city::{City, NewCity},
        event::{Booking, EventType, NewRestaurantEvent, RestaurantEvent},
        menu::{Menu, MenuType, NewMenu, NewMenuType},
        restaurant::{NewRestaurant, NewSection, Restaurant, Section},
        table::{NewTable, Table},
        user::{NewUser, Page, User},
    },
};

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: &NewUser) -> Result<User, AppError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
    async fn get_by_phone(&self, phone: &str) -> Result<Option<User>, AppError>;
    async fn list(&self, page: Page) -> Result<Vec<User>, AppError>;
    async fn update(&self, user: &User) -> Result<User, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait CityStore: Send + Sync {
    async fn insert(&self, city: &NewCity) -> Result<City, AppError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<City>, AppError>;
    async fn list(&self) -> Result<Vec<City>, AppError>;
    async fn update(&self, city: &City) -> Result<City, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait RestaurantStore: Send + Sync {
    async fn insert(&self, restaurant: &NewRestaurant) -> Result<Restaurant, AppError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Restaurant>, AppError>;
    async fn list_by_city(&self, city_id: i64) -> Result<Vec<Restaurant>, AppError>;
    async fn list(&self, active_only: bool) -> Result<Vec<Restaurant>, AppError>;
    async fn update(&self, restaurant: &Restaurant) -> Result<Restaurant, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait SectionStore: Send + Sync {
    async fn insert(&self, section: &NewSection) -> Result<Section, AppError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Section>, AppError>;
    async fn list_by_restaurant(&self, restaurant_id: i64) -> Result<Vec<Section>, AppError>;
    async fn update(&self, section: &Section) -> Result<Section, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait TableStore: Send + Sync {
    async fn insert(&self, table: &NewTable) -> Result<Table, AppError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Table>, AppError>;
    async fn list_by_section(&self, section_id: i64) -> Result<Vec<Table>, AppError>;
    async fn update(&self, table: &Table) -> Result<Table, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
    /// Grava só o código QR. `NotFound` se a mesa não existir.
    async fn set_qr(&self, id: i64, qr: &str) -> Result<(), AppError>;
    /// Mesas cujo QR ainda não foi provisionado (nulo ou vazio).
    async fn list_missing_qr(&self) -> Result<Vec<Table>, AppError>;
}

#[async_trait]
pub trait MenuTypeStore: Send + Sync {
    async fn insert(&self, menu_type: &NewMenuType) -> Result<MenuType, AppError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<MenuType>, AppError>;
    async fn list(&self) -> Result<Vec<MenuType>, AppError>;
    async fn update(&self, menu_type: &MenuType) -> Result<MenuType, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait MenuStore: Send + Sync {
    async fn insert(&self, menu: &NewMenu) -> Result<Menu, AppError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Menu>, AppError>;
    async fn list_by_restaurant(&self, restaurant_id: i64) -> Result<Vec<Menu>, AppError>;
    async fn update(&self, menu: &Menu) -> Result<Menu, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait EventStore: Send + Sync {
    async fn insert(&self, event: &NewRestaurantEvent) -> Result<RestaurantEvent, AppError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<RestaurantEvent>, AppError>;
    async fn list_by_type(&self, event_type: EventType)
        -> Result<Vec<RestaurantEvent>, AppError>;
    async fn list(&self) -> Result<Vec<RestaurantEvent>, AppError>;
    async fn update(&self, event: &RestaurantEvent) -> Result<RestaurantEvent, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// `SlotUnavailable` se (mesa, data) já estiver ocupado.
    async fn insert(&self, booking: &Booking) -> Result<Booking, AppError>;
    /// Devolve `false` se a linha exata não existia.
    async fn delete(&self, booking: &Booking) -> Result<bool, AppError>;
    async fn find_by_slot(
        &self,
        table_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Booking>, AppError>;
    async fn list_by_table(&self, table_id: i64) -> Result<Vec<Booking>, AppError>;
    async fn list_by_event(&self, event_id: i64) -> Result<Vec<Booking>, AppError>;
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Booking>, AppError>;
}

// ---
// O conjunto de stores usado para montar os serviços
// ---
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub cities: Arc<dyn CityStore>,
    pub restaurants: Arc<dyn RestaurantStore>,
    pub sections: Arc<dyn SectionStore>,
    pub tables: Arc<dyn TableStore>,
    pub menu_types: Arc<dyn MenuTypeStore>,
    pub menus: Arc<dyn MenuStore>,
    pub events: Arc<dyn EventStore>,
    pub bookings: Arc<dyn BookingStore>,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            cities: Arc::new(CityRepository::new(pool.clone())),
            restaurants: Arc::new(RestaurantRepository::new(pool.clone())),
            sections: Arc::new(SectionRepository::new(pool.clone())),
            tables: Arc::new(TableRepository::new(pool.clone())),
            menu_types: Arc::new(MenuTypeRepository::new(pool.clone())),
            menus: Arc::new(MenuRepository::new(pool.clone())),
            events: Arc::new(EventRepository::new(pool.clone())),
            bookings: Arc::new(BookingRepository::new(pool)),
        }
    }

    pub fn memory() -> Self {
        Self::from_memory(Arc::new(MemoryStore::new()))
    }

    pub fn from_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            cities: store.clone(),
            restaurants: store.clone(),
            sections: store.clone(),
            tables: store.clone(),
            menu_types: store.clone(),
            menus: store.clone(),
            events: store.clone(),
            bookings: store,
        }
    }
}
