// src/config.rs

pub mod settings;

use std::sync::Arc;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::{deadline::Deadline, i18n::I18nStore},
    db::Stores,
    services::{
        BookingService, CityService, EventService, MenuService, MenuTypeService, QrService,
        RestaurantService, SectionService, TableService, UserService,
    },
};

use settings::{Config, StorageBackend};

#[derive(Clone)]
pub struct AppState {
    // Só existe no backend Postgres (usado para as migrações)
    pub db_pool: Option<PgPool>,
    pub i18n_store: Arc<I18nStore>,
    pub user_service: UserService,
    pub city_service: CityService,
    pub restaurant_service: RestaurantService,
    pub section_service: SectionService,
    pub table_service: TableService,
    pub qr_service: QrService,
    pub menu_type_service: MenuTypeService,
    pub menu_service: MenuService,
    pub event_service: EventService,
    pub booking_service: BookingService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let deadline = Deadline::new(config.store_timeout);

        match &config.storage {
            StorageBackend::Postgres { database_url } => {
                // Conecta ao banco de dados, usando '?' para propagar erros
                let db_pool = PgPoolOptions::new()
                    .max_connections(config.db_max_connections)
                    .acquire_timeout(config.db_acquire_timeout)
                    .connect(database_url)
                    .await?;

                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

                let mut state = Self::from_stores(Stores::postgres(db_pool.clone()), deadline);
                state.db_pool = Some(db_pool);
                Ok(state)
            }
            StorageBackend::Memory => {
                tracing::warn!("⚠️ Usando o store em memória: nada será persistido");
                Ok(Self::from_stores(Stores::memory(), deadline))
            }
        }
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_stores(stores: Stores, deadline: Deadline) -> Self {
        let qr_service = QrService::new(stores.tables.clone(), deadline);

        Self {
            db_pool: None,
            i18n_store: Arc::new(I18nStore::default()),
            user_service: UserService::new(stores.users.clone(), deadline),
            city_service: CityService::new(stores.cities.clone(), deadline),
            restaurant_service: RestaurantService::new(
                stores.restaurants.clone(),
                stores.cities.clone(),
                deadline,
            ),
            section_service: SectionService::new(
                stores.sections.clone(),
                stores.restaurants.clone(),
                deadline,
            ),
            table_service: TableService::new(
                stores.tables.clone(),
                stores.sections.clone(),
                qr_service.clone(),
                deadline,
            ),
            qr_service,
            menu_type_service: MenuTypeService::new(stores.menu_types.clone(), deadline),
            menu_service: MenuService::new(
                stores.menus.clone(),
                stores.restaurants.clone(),
                deadline,
            ),
            event_service: EventService::new(stores.events.clone(), deadline),
            booking_service: BookingService::new(
                stores.bookings,
                stores.events,
                stores.tables,
                stores.sections,
                deadline,
            ),
        }
    }
}
