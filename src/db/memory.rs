// src/db/memory.rs

//! Store em memória com as mesmas restrições do esquema Postgres.
//!
//! Todo o estado fica atrás de um único `Mutex`: cada escrita verifica as
//! restrições e grava dentro da mesma seção crítica, então duas requisições
//! concorrentes nunca passam juntas pela mesma checagem.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use crate::{
    common::error::AppError,
    db::store::{
        BookingStore, CityStore, EventStore, MenuStore, MenuTypeStore, RestaurantStore,
        SectionStore, TableStore, UserStore,
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

#[derive(Default)]
struct State {
    next_id: i64,
    users: BTreeMap<i64, User>,
    cities: BTreeMap<i64, City>,
    restaurants: BTreeMap<i64, Restaurant>,
    sections: BTreeMap<i64, Section>,
    tables: BTreeMap<i64, Table>,
    menu_types: BTreeMap<i64, MenuType>,
    menus: BTreeMap<i64, Menu>,
    events: BTreeMap<i64, RestaurantEvent>,
    bookings: Vec<Booking>,
}

impl State {
    // Uma sequência só para todas as tabelas; os ids continuam únicos por entidade
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn city_name_taken(&self, name: &str, own_id: Option<i64>) -> bool {
        let name = name.to_lowercase();
        self.cities
            .values()
            .any(|c| Some(c.id) != own_id && c.name.to_lowercase() == name)
    }

    fn menu_type_name_taken(&self, name: &str, own_id: Option<i64>) -> bool {
        let name = name.to_lowercase();
        self.menu_types
            .values()
            .any(|m| Some(m.id) != own_id && m.name.to_lowercase() == name)
    }

    fn section_name_taken(&self, restaurant_id: i64, name: &str, own_id: Option<i64>) -> bool {
        let name = name.to_lowercase();
        self.sections.values().any(|s| {
            Some(s.id) != own_id && s.restaurant_id == restaurant_id && s.name.to_lowercase() == name
        })
    }

    fn table_number_taken(&self, section_id: i64, number: i32, own_id: Option<i64>) -> bool {
        self.tables.values().any(|t| {
            Some(t.id) != own_id && t.section_id == section_id && t.number_of_table == number
        })
    }

    fn phone_taken(&self, phone: &str, own_id: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| Some(u.id) != own_id && u.phone_number == phone)
    }

    fn slot(&self, table_id: i64, date: NaiveDate) -> Option<&Booking> {
        self.bookings
            .iter()
            .find(|b| b.table_id == table_id && b.booking_date == date)
    }
}

fn check_table_number(number: i32) -> Result<(), AppError> {
    if number <= 0 {
        return Err(AppError::invalid("o número da mesa deve ser um inteiro positivo"));
    }
    Ok(())
}

fn check_price(price: Decimal) -> Result<(), AppError> {
    if price < Decimal::ZERO {
        return Err(AppError::invalid("o preço não pode ser negativo"));
    }
    Ok(())
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

// ---
// Usuários
// ---
#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, user: &NewUser) -> Result<User, AppError> {
        let mut state = self.state.lock().await;
        if state.phone_taken(&user.phone_number, None) {
            return Err(AppError::duplicate("user", &user.phone_number));
        }

        let created = User {
            id: state.next_id(),
            phone_number: user.phone_number.clone(),
            name: user.name.clone(),
            last_name: user.last_name.clone(),
            language: user.language.clone(),
            is_active: user.is_active,
        };
        state.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn get_by_phone(&self, phone: &str) -> Result<Option<User>, AppError> {
        let state = self.state.lock().await;
        Ok(state.users.values().find(|u| u.phone_number == phone).cloned())
    }

    async fn list(&self, page: Page) -> Result<Vec<User>, AppError> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .values()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&user.id) {
            return Err(AppError::not_found("user", user.id));
        }
        if state.phone_taken(&user.phone_number, Some(user.id)) {
            return Err(AppError::duplicate("user", &user.phone_number));
        }
        state.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.state
            .lock()
            .await
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("user", id))
    }
}

// ---
// Cidades
// ---
#[async_trait]
impl CityStore for MemoryStore {
    async fn insert(&self, city: &NewCity) -> Result<City, AppError> {
        let mut state = self.state.lock().await;
        if state.city_name_taken(&city.name, None) {
            return Err(AppError::duplicate("city", &city.name));
        }

        let created = City {
            id: state.next_id(),
            name: city.name.clone(),
        };
        state.cities.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<City>, AppError> {
        Ok(self.state.lock().await.cities.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<City>, AppError> {
        let state = self.state.lock().await;
        let mut cities: Vec<City> = state.cities.values().cloned().collect();
        cities.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(cities)
    }

    async fn update(&self, city: &City) -> Result<City, AppError> {
        let mut state = self.state.lock().await;
        if !state.cities.contains_key(&city.id) {
            return Err(AppError::not_found("city", city.id));
        }
        if state.city_name_taken(&city.name, Some(city.id)) {
            return Err(AppError::duplicate("city", &city.name));
        }
        state.cities.insert(city.id, city.clone());
        Ok(city.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        if !state.cities.contains_key(&id) {
            return Err(AppError::not_found("city", id));
        }
        if state.restaurants.values().any(|r| r.city_id == id) {
            return Err(AppError::HasDependents { entity: "city", id });
        }
        state.cities.remove(&id);
        Ok(())
    }
}

// ---
// Restaurantes
// ---
#[async_trait]
impl RestaurantStore for MemoryStore {
    async fn insert(&self, restaurant: &NewRestaurant) -> Result<Restaurant, AppError> {
        let mut state = self.state.lock().await;
        if !state.cities.contains_key(&restaurant.city_id) {
            return Err(AppError::not_found("city", restaurant.city_id));
        }

        let created = Restaurant {
            id: state.next_id(),
            name: restaurant.name.clone(),
            city_id: restaurant.city_id,
            address_ru: restaurant.address_ru.clone(),
            address_kz: restaurant.address_kz.clone(),
            is_active: restaurant.is_active,
            map_link: restaurant.map_link.clone(),
        };
        state.restaurants.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Restaurant>, AppError> {
        Ok(self.state.lock().await.restaurants.get(&id).cloned())
    }

    async fn list_by_city(&self, city_id: i64) -> Result<Vec<Restaurant>, AppError> {
        let state = self.state.lock().await;
        let mut restaurants: Vec<Restaurant> = state
            .restaurants
            .values()
            .filter(|r| r.city_id == city_id)
            .cloned()
            .collect();
        restaurants.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(restaurants)
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Restaurant>, AppError> {
        let state = self.state.lock().await;
        let mut restaurants: Vec<Restaurant> = state
            .restaurants
            .values()
            .filter(|r| !active_only || r.is_active)
            .cloned()
            .collect();
        restaurants.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(restaurants)
    }

    async fn update(&self, restaurant: &Restaurant) -> Result<Restaurant, AppError> {
        let mut state = self.state.lock().await;
        if !state.restaurants.contains_key(&restaurant.id) {
            return Err(AppError::not_found("restaurant", restaurant.id));
        }
        if !state.cities.contains_key(&restaurant.city_id) {
            return Err(AppError::not_found("city", restaurant.city_id));
        }
        state.restaurants.insert(restaurant.id, restaurant.clone());
        Ok(restaurant.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        if !state.restaurants.contains_key(&id) {
            return Err(AppError::not_found("restaurant", id));
        }
        let has_children = state.sections.values().any(|s| s.restaurant_id == id)
            || state.menus.values().any(|m| m.restaurant_id == id);
        if has_children {
            return Err(AppError::HasDependents { entity: "restaurant", id });
        }
        state.restaurants.remove(&id);
        Ok(())
    }
}

// ---
// Seções
// ---
#[async_trait]
impl SectionStore for MemoryStore {
    async fn insert(&self, section: &NewSection) -> Result<Section, AppError> {
        let mut state = self.state.lock().await;
        if !state.restaurants.contains_key(&section.restaurant_id) {
            return Err(AppError::not_found("restaurant", section.restaurant_id));
        }
        if state.section_name_taken(section.restaurant_id, &section.name, None) {
            return Err(AppError::duplicate("section", &section.name));
        }

        let created = Section {
            id: state.next_id(),
            restaurant_id: section.restaurant_id,
            name: section.name.clone(),
        };
        state.sections.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Section>, AppError> {
        Ok(self.state.lock().await.sections.get(&id).cloned())
    }

    async fn list_by_restaurant(&self, restaurant_id: i64) -> Result<Vec<Section>, AppError> {
        let state = self.state.lock().await;
        let mut sections: Vec<Section> = state
            .sections
            .values()
            .filter(|s| s.restaurant_id == restaurant_id)
            .cloned()
            .collect();
        sections.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sections)
    }

    async fn update(&self, section: &Section) -> Result<Section, AppError> {
        let mut state = self.state.lock().await;
        if !state.sections.contains_key(&section.id) {
            return Err(AppError::not_found("section", section.id));
        }
        if !state.restaurants.contains_key(&section.restaurant_id) {
            return Err(AppError::not_found("restaurant", section.restaurant_id));
        }
        if state.section_name_taken(section.restaurant_id, &section.name, Some(section.id)) {
            return Err(AppError::duplicate("section", &section.name));
        }
        state.sections.insert(section.id, section.clone());
        Ok(section.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        if !state.sections.contains_key(&id) {
            return Err(AppError::not_found("section", id));
        }
        if state.tables.values().any(|t| t.section_id == id) {
            return Err(AppError::HasDependents { entity: "section", id });
        }
        state.sections.remove(&id);
        Ok(())
    }
}

// ---
// Mesas
// ---
#[async_trait]
impl TableStore for MemoryStore {
    async fn insert(&self, table: &NewTable) -> Result<Table, AppError> {
        check_table_number(table.number_of_table)?;
        let mut state = self.state.lock().await;
        if !state.sections.contains_key(&table.section_id) {
            return Err(AppError::not_found("section", table.section_id));
        }
        if state.table_number_taken(table.section_id, table.number_of_table, None) {
            return Err(AppError::duplicate("table", table.number_of_table));
        }

        let created = Table {
            id: state.next_id(),
            number_of_table: table.number_of_table,
            section_id: table.section_id,
            qr: table.qr.clone(),
        };
        state.tables.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Table>, AppError> {
        Ok(self.state.lock().await.tables.get(&id).cloned())
    }

    async fn list_by_section(&self, section_id: i64) -> Result<Vec<Table>, AppError> {
        let state = self.state.lock().await;
        let mut tables: Vec<Table> = state
            .tables
            .values()
            .filter(|t| t.section_id == section_id)
            .cloned()
            .collect();
        tables.sort_by_key(|t| t.number_of_table);
        Ok(tables)
    }

    async fn update(&self, table: &Table) -> Result<Table, AppError> {
        check_table_number(table.number_of_table)?;
        let mut state = self.state.lock().await;
        if !state.tables.contains_key(&table.id) {
            return Err(AppError::not_found("table", table.id));
        }
        if !state.sections.contains_key(&table.section_id) {
            return Err(AppError::not_found("section", table.section_id));
        }
        if state.table_number_taken(table.section_id, table.number_of_table, Some(table.id)) {
            return Err(AppError::duplicate("table", table.number_of_table));
        }
        state.tables.insert(table.id, table.clone());
        Ok(table.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        if !state.tables.contains_key(&id) {
            return Err(AppError::not_found("table", id));
        }
        if state.bookings.iter().any(|b| b.table_id == id) {
            return Err(AppError::HasDependents { entity: "table", id });
        }
        state.tables.remove(&id);
        Ok(())
    }

    async fn set_qr(&self, id: i64, qr: &str) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        let table = state
            .tables
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("table", id))?;
        table.qr = Some(qr.to_string());
        Ok(())
    }

    async fn list_missing_qr(&self) -> Result<Vec<Table>, AppError> {
        let state = self.state.lock().await;
        Ok(state
            .tables
            .values()
            .filter(|t| t.qr.as_deref().is_none_or(str::is_empty))
            .cloned()
            .collect())
    }
}

// ---
// Tipos de menu e menus
// ---
#[async_trait]
impl MenuTypeStore for MemoryStore {
    async fn insert(&self, menu_type: &NewMenuType) -> Result<MenuType, AppError> {
        let mut state = self.state.lock().await;
        if state.menu_type_name_taken(&menu_type.name, None) {
            return Err(AppError::duplicate("menu_type", &menu_type.name));
        }

        let created = MenuType {
            id: state.next_id(),
            name: menu_type.name.clone(),
            img: menu_type.img.clone(),
        };
        state.menu_types.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<MenuType>, AppError> {
        Ok(self.state.lock().await.menu_types.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<MenuType>, AppError> {
        let state = self.state.lock().await;
        let mut menu_types: Vec<MenuType> = state.menu_types.values().cloned().collect();
        menu_types.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(menu_types)
    }

    async fn update(&self, menu_type: &MenuType) -> Result<MenuType, AppError> {
        let mut state = self.state.lock().await;
        if !state.menu_types.contains_key(&menu_type.id) {
            return Err(AppError::not_found("menu_type", menu_type.id));
        }
        if state.menu_type_name_taken(&menu_type.name, Some(menu_type.id)) {
            return Err(AppError::duplicate("menu_type", &menu_type.name));
        }
        state.menu_types.insert(menu_type.id, menu_type.clone());
        Ok(menu_type.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.state
            .lock()
            .await
            .menu_types
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("menu_type", id))
    }
}

#[async_trait]
impl MenuStore for MemoryStore {
    async fn insert(&self, menu: &NewMenu) -> Result<Menu, AppError> {
        let mut state = self.state.lock().await;
        if !state.restaurants.contains_key(&menu.restaurant_id) {
            return Err(AppError::not_found("restaurant", menu.restaurant_id));
        }

        let created = Menu {
            id: state.next_id(),
            restaurant_id: menu.restaurant_id,
            name_ru: menu.name_ru.clone(),
            name_kz: menu.name_kz.clone(),
            img: menu.img.clone(),
        };
        state.menus.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Menu>, AppError> {
        Ok(self.state.lock().await.menus.get(&id).cloned())
    }

    async fn list_by_restaurant(&self, restaurant_id: i64) -> Result<Vec<Menu>, AppError> {
        let state = self.state.lock().await;
        Ok(state
            .menus
            .values()
            .filter(|m| m.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }

    async fn update(&self, menu: &Menu) -> Result<Menu, AppError> {
        let mut state = self.state.lock().await;
        if !state.menus.contains_key(&menu.id) {
            return Err(AppError::not_found("menu", menu.id));
        }
        if !state.restaurants.contains_key(&menu.restaurant_id) {
            return Err(AppError::not_found("restaurant", menu.restaurant_id));
        }
        state.menus.insert(menu.id, menu.clone());
        Ok(menu.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.state
            .lock()
            .await
            .menus
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("menu", id))
    }
}

// ---
// Eventos
// ---
#[async_trait]
impl EventStore for MemoryStore {
    async fn insert(&self, event: &NewRestaurantEvent) -> Result<RestaurantEvent, AppError> {
        check_price(event.price)?;
        let mut state = self.state.lock().await;

        let created = RestaurantEvent {
            id: state.next_id(),
            name: event.name.clone(),
            event_type: event.event_type,
            description: event.description.clone(),
            price: event.price,
            img: event.img.clone(),
        };
        state.events.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<RestaurantEvent>, AppError> {
        Ok(self.state.lock().await.events.get(&id).cloned())
    }

    async fn list_by_type(
        &self,
        event_type: EventType,
    ) -> Result<Vec<RestaurantEvent>, AppError> {
        let state = self.state.lock().await;
        Ok(state
            .events
            .values()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<RestaurantEvent>, AppError> {
        Ok(self.state.lock().await.events.values().cloned().collect())
    }

    async fn update(&self, event: &RestaurantEvent) -> Result<RestaurantEvent, AppError> {
        check_price(event.price)?;
        let mut state = self.state.lock().await;
        if !state.events.contains_key(&event.id) {
            return Err(AppError::not_found("event", event.id));
        }
        state.events.insert(event.id, event.clone());
        Ok(event.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        if !state.events.contains_key(&id) {
            return Err(AppError::not_found("event", id));
        }
        if state.bookings.iter().any(|b| b.event_id == id) {
            return Err(AppError::HasDependents { entity: "event", id });
        }
        state.events.remove(&id);
        Ok(())
    }
}

// ---
// Reservas
// ---
#[async_trait]
impl BookingStore for MemoryStore {
    async fn insert(&self, booking: &Booking) -> Result<Booking, AppError> {
        let mut state = self.state.lock().await;
        if !state.events.contains_key(&booking.event_id) {
            return Err(AppError::not_found("event", booking.event_id));
        }
        if !state.tables.contains_key(&booking.table_id) {
            return Err(AppError::not_found("table", booking.table_id));
        }
        // Cobre a chave primária e a restrição (table_id, booking_date)
        if state.slot(booking.table_id, booking.booking_date).is_some() {
            return Err(AppError::SlotUnavailable {
                table_id: booking.table_id,
                date: booking.booking_date,
            });
        }
        state.bookings.push(*booking);
        Ok(*booking)
    }

    async fn delete(&self, booking: &Booking) -> Result<bool, AppError> {
        let mut state = self.state.lock().await;
        let before = state.bookings.len();
        state.bookings.retain(|b| b != booking);
        Ok(state.bookings.len() < before)
    }

    async fn find_by_slot(
        &self,
        table_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Booking>, AppError> {
        Ok(self.state.lock().await.slot(table_id, date).copied())
    }

    async fn list_by_table(&self, table_id: i64) -> Result<Vec<Booking>, AppError> {
        let state = self.state.lock().await;
        let mut bookings: Vec<Booking> = state
            .bookings
            .iter()
            .filter(|b| b.table_id == table_id)
            .copied()
            .collect();
        bookings.sort_by_key(|b| (b.booking_date, b.event_id));
        Ok(bookings)
    }

    async fn list_by_event(&self, event_id: i64) -> Result<Vec<Booking>, AppError> {
        let state = self.state.lock().await;
        let mut bookings: Vec<Booking> = state
            .bookings
            .iter()
            .filter(|b| b.event_id == event_id)
            .copied()
            .collect();
        bookings.sort_by_key(|b| (b.booking_date, b.table_id));
        Ok(bookings)
    }

    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Booking>, AppError> {
        let state = self.state.lock().await;
        let mut bookings: Vec<Booking> = state
            .bookings
            .iter()
            .filter(|b| b.booking_date == date)
            .copied()
            .collect();
        bookings.sort_by_key(|b| b.table_id);
        Ok(bookings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    async fn seed_table(store: &MemoryStore) -> (Restaurant, Section, Table) {
        let city = CityStore::insert(store, &NewCity { name: "Almaty".into() })
            .await
            .unwrap();
        let restaurant = RestaurantStore::insert(
            store,
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
            store,
            &NewSection {
                restaurant_id: restaurant.id,
                name: "Terrace".into(),
            },
        )
        .await
        .unwrap();
        let table = TableStore::insert(
            store,
            &NewTable {
                number_of_table: 1,
                section_id: section.id,
                qr: None,
            },
        )
        .await
        .unwrap();
        (restaurant, section, table)
    }

    async fn seed_event(store: &MemoryStore) -> RestaurantEvent {
        EventStore::insert(
            store,
            &NewRestaurantEvent {
                name: "Той".into(),
                event_type: EventType::Wedding,
                description: None,
                price: Decimal::new(150_000, 0),
                img: None,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn city_names_are_unique_ignoring_case() {
        let store = MemoryStore::new();
        CityStore::insert(&store, &NewCity { name: "Астана".into() })
            .await
            .unwrap();

        let err = CityStore::insert(&store, &NewCity { name: "АСТАНА".into() })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DuplicateInScope { entity: "city", .. }));
    }

    #[tokio::test]
    async fn section_names_are_scoped_to_the_restaurant() {
        let store = MemoryStore::new();
        let (restaurant, _, _) = seed_table(&store).await;

        let err = SectionStore::insert(
            &store,
            &NewSection {
                restaurant_id: restaurant.id,
                name: "terrace".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::DuplicateInScope { entity: "section", .. }));

        let other = RestaurantStore::insert(
            &store,
            &NewRestaurant {
                name: "Dastarkhan".into(),
                city_id: restaurant.city_id,
                address_ru: "пр. Достык 5".into(),
                address_kz: None,
                is_active: true,
                map_link: None,
            },
        )
        .await
        .unwrap();
        SectionStore::insert(
            &store,
            &NewSection {
                restaurant_id: other.id,
                name: "Terrace".into(),
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn a_slot_holds_a_single_booking() {
        let store = MemoryStore::new();
        let (_, _, table) = seed_table(&store).await;
        let first = seed_event(&store).await;
        let second = seed_event(&store).await;

        BookingStore::insert(
            &store,
            &Booking {
                event_id: first.id,
                table_id: table.id,
                booking_date: date(1),
            },
        )
        .await
        .unwrap();

        let err = BookingStore::insert(
            &store,
            &Booking {
                event_id: second.id,
                table_id: table.id,
                booking_date: date(1),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::SlotUnavailable { .. }));

        let found = store.find_by_slot(table.id, date(1)).await.unwrap();
        assert_eq!(found.map(|b| b.event_id), Some(first.id));
    }

    #[tokio::test]
    async fn deletes_are_restricted_while_children_exist() {
        let store = MemoryStore::new();
        let (restaurant, section, table) = seed_table(&store).await;
        let event = seed_event(&store).await;
        let booking = Booking {
            event_id: event.id,
            table_id: table.id,
            booking_date: date(3),
        };
        BookingStore::insert(&store, &booking).await.unwrap();

        let err = CityStore::delete(&store, restaurant.city_id).await.unwrap_err();
        assert!(matches!(err, AppError::HasDependents { entity: "city", .. }));
        let err = SectionStore::delete(&store, section.id).await.unwrap_err();
        assert!(matches!(err, AppError::HasDependents { entity: "section", .. }));
        let err = TableStore::delete(&store, table.id).await.unwrap_err();
        assert!(matches!(err, AppError::HasDependents { entity: "table", .. }));

        assert!(BookingStore::delete(&store, &booking).await.unwrap());
        TableStore::delete(&store, table.id).await.unwrap();
        SectionStore::delete(&store, section.id).await.unwrap();
    }

    #[tokio::test]
    async fn non_positive_table_numbers_are_rejected() {
        let store = MemoryStore::new();
        let (_, section, _) = seed_table(&store).await;

        let err = TableStore::insert(
            &store,
            &NewTable {
                number_of_table: 0,
                section_id: section.id,
                qr: None,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
