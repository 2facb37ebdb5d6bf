// src/services/table_service.rs

use std::sync::Arc;

use crate::{
    common::{deadline::Deadline, error::AppError},
    db::store::{SectionStore, TableStore},
    models::table::{NewTable, ProvisionedTable, Table},
    services::{
        optional_text,
        qr_service::QrService,
        uniqueness::{ensure_unique, needs_recheck},
    },
};

/// Mesas de uma seção. O número é único dentro da seção e o QR é
/// provisionado logo depois da criação.
#[derive(Clone)]
pub struct TableService {
    tables: Arc<dyn TableStore>,
    sections: Arc<dyn SectionStore>,
    qr_service: QrService,
    deadline: Deadline,
}

impl TableService {
    pub fn new(
        tables: Arc<dyn TableStore>,
        sections: Arc<dyn SectionStore>,
        qr_service: QrService,
        deadline: Deadline,
    ) -> Self {
        Self {
            tables,
            sections,
            qr_service,
            deadline,
        }
    }

    fn validate(table: &NewTable) -> Result<(), AppError> {
        if table.section_id <= 0 {
            return Err(AppError::invalid("section_id deve ser positivo"));
        }
        if table.number_of_table <= 0 {
            return Err(AppError::invalid(
                "number_of_table deve ser um inteiro positivo",
            ));
        }
        Ok(())
    }

    async fn ensure_section(&self, section_id: i64) -> Result<(), AppError> {
        self.deadline
            .run(self.sections.get_by_id(section_id))
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("section", section_id))
    }

    async fn ensure_unique_number(
        &self,
        section_id: i64,
        own_id: Option<i64>,
        number: i32,
    ) -> Result<(), AppError> {
        let siblings = self
            .deadline
            .run(self.tables.list_by_section(section_id))
            .await?;

        ensure_unique(
            "table",
            own_id,
            &number,
            siblings.iter().map(|t| (t.id, t.number_of_table)),
        )
    }

    /// Cria a mesa em duas fases.
    ///
    /// Fase 1 grava a linha; fase 2 grava o código `table-{id}` quando o
    /// chamador não enviou um. Falha na fase 2 não desfaz a criação: a mesa
    /// volta com `qr_pending = true` e o reparo resolve depois.
    pub async fn create(&self, table: NewTable) -> Result<ProvisionedTable, AppError> {
        // 1. Validações e escopo
        Self::validate(&table)?;
        self.ensure_section(table.section_id).await?;
        self.ensure_unique_number(table.section_id, None, table.number_of_table)
            .await?;

        // 2. Fase 1: a linha
        let table = NewTable {
            qr: optional_text(table.qr),
            ..table
        };
        let created = self.deadline.run(self.tables.insert(&table)).await?;

        if created.qr.is_some() {
            return Ok(ProvisionedTable {
                table: created,
                qr_pending: false,
            });
        }

        // 3. Fase 2: o QR
        match self.qr_service.generate_qr(created.id).await {
            Ok(table) => Ok(ProvisionedTable {
                table,
                qr_pending: false,
            }),
            Err(e) => {
                tracing::warn!(
                    table_id = %created.id,
                    error = %e,
                    "⚠️ Mesa criada, mas o QR não foi gravado"
                );
                Ok(ProvisionedTable {
                    table: created,
                    qr_pending: true,
                })
            }
        }
    }

    pub async fn get(&self, id: i64) -> Result<Table, AppError> {
        self.deadline
            .run(self.tables.get_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found("table", id))
    }

    pub async fn list_by_section(&self, section_id: i64) -> Result<Vec<Table>, AppError> {
        self.ensure_section(section_id).await?;
        self.deadline.run(self.tables.list_by_section(section_id)).await
    }

    /// Atualiza número e seção. Sem `qr` no payload, o código atual fica.
    pub async fn update(&self, id: i64, changes: NewTable) -> Result<Table, AppError> {
        Self::validate(&changes)?;
        let current = self.get(id).await?;

        if current.section_id != changes.section_id {
            self.ensure_section(changes.section_id).await?;
        }

        if needs_recheck(
            current.section_id,
            changes.section_id,
            &current.number_of_table,
            &changes.number_of_table,
        ) {
            self.ensure_unique_number(changes.section_id, Some(id), changes.number_of_table)
                .await?;
        }

        let table = Table {
            id,
            number_of_table: changes.number_of_table,
            section_id: changes.section_id,
            qr: optional_text(changes.qr).or(current.qr),
        };
        self.deadline.run(self.tables.update(&table)).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.deadline.run(self.tables.delete(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::{
        db::{
            store::{CityStore, RestaurantStore},
            MemoryStore,
        },
        models::{
            city::NewCity,
            restaurant::{NewRestaurant, NewSection},
        },
    };

    // Store que perde toda gravação de QR
    struct QrWriteFails(Arc<MemoryStore>);

    #[async_trait]
    impl TableStore for QrWriteFails {
        async fn insert(&self, table: &NewTable) -> Result<Table, AppError> {
            TableStore::insert(self.0.as_ref(), table).await
        }
        async fn get_by_id(&self, id: i64) -> Result<Option<Table>, AppError> {
            TableStore::get_by_id(self.0.as_ref(), id).await
        }
        async fn list_by_section(&self, section_id: i64) -> Result<Vec<Table>, AppError> {
            self.0.list_by_section(section_id).await
        }
        async fn update(&self, table: &Table) -> Result<Table, AppError> {
            TableStore::update(self.0.as_ref(), table).await
        }
        async fn delete(&self, id: i64) -> Result<(), AppError> {
            TableStore::delete(self.0.as_ref(), id).await
        }
        async fn set_qr(&self, _id: i64, _qr: &str) -> Result<(), AppError> {
            Err(AppError::StoreFailure {
                context: "gravar QR da mesa",
                source: sqlx::Error::PoolTimedOut,
            })
        }
        async fn list_missing_qr(&self) -> Result<Vec<Table>, AppError> {
            self.0.list_missing_qr().await
        }
    }

    async fn seed_sections(store: &MemoryStore) -> (i64, i64) {
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
        let mut ids = Vec::new();
        for name in ["Terrace", "Hall"] {
            let section = SectionStore::insert(
                store,
                &NewSection {
                    restaurant_id: restaurant.id,
                    name: name.into(),
                },
            )
            .await
            .unwrap();
            ids.push(section.id);
        }
        (ids[0], ids[1])
    }

    fn service_over(store: Arc<MemoryStore>, tables: Arc<dyn TableStore>) -> TableService {
        let deadline = Deadline::default();
        TableService::new(
            tables.clone(),
            store,
            QrService::new(tables, deadline),
            deadline,
        )
    }

    fn table(section_id: i64, number: i32) -> NewTable {
        NewTable {
            number_of_table: number,
            section_id,
            qr: None,
        }
    }

    #[tokio::test]
    async fn creation_provisions_the_qr_code() {
        let store = Arc::new(MemoryStore::new());
        let (terrace, _) = seed_sections(&store).await;
        let service = service_over(store.clone(), store);

        let created = service.create(table(terrace, 3)).await.unwrap();

        assert!(!created.qr_pending);
        assert_eq!(created.table.qr, Some(format!("table-{}", created.table.id)));

        let err = service.create(table(terrace, 3)).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateInScope { entity: "table", .. }));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_of_one_number_leave_one_table() {
        let store = Arc::new(MemoryStore::new());
        let (terrace, _) = seed_sections(&store).await;
        let service = service_over(store.clone(), store);

        let attempts: Vec<_> = (0..32)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.create(table(terrace, 4)).await })
            })
            .collect();

        let mut winners = Vec::new();
        for attempt in attempts {
            match attempt.await.unwrap() {
                Ok(created) => winners.push(created),
                Err(AppError::DuplicateInScope { entity: "table", .. }) => {}
                Err(e) => panic!("erro inesperado: {e}"),
            }
        }

        assert_eq!(winners.len(), 1);
        let winner = &winners[0];
        assert!(!winner.qr_pending);
        assert_eq!(winner.table.qr, Some(format!("table-{}", winner.table.id)));
        assert_eq!(service.list_by_section(terrace).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn qr_failure_keeps_the_table_and_flags_it() {
        let store = Arc::new(MemoryStore::new());
        let (terrace, _) = seed_sections(&store).await;
        let service = service_over(store.clone(), Arc::new(QrWriteFails(store.clone())));

        let created = service.create(table(terrace, 1)).await.unwrap();

        assert!(created.qr_pending);
        assert_eq!(created.table.qr, None);

        let stored = TableStore::get_by_id(store.as_ref(), created.table.id)
            .await
            .unwrap();
        assert!(stored.is_some());
        assert_eq!(store.list_missing_qr().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_numbers_and_unknown_sections_are_rejected() {
        let store = Arc::new(MemoryStore::new());
        let (terrace, _) = seed_sections(&store).await;
        let service = service_over(store.clone(), store);

        let err = service.create(table(terrace, 0)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        let err = service.create(table(terrace + 1000, 1)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { entity: "section", .. }));
    }

    #[tokio::test]
    async fn update_keeps_qr_and_checks_number_scope() {
        let store = Arc::new(MemoryStore::new());
        let (terrace, hall) = seed_sections(&store).await;
        let service = service_over(store.clone(), store);

        let one = service.create(table(terrace, 1)).await.unwrap().table;
        service.create(table(terrace, 2)).await.unwrap();
        service.create(table(hall, 5)).await.unwrap();

        let err = service.update(one.id, table(terrace, 2)).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateInScope { .. }));

        let err = service.update(one.id, table(hall, 5)).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateInScope { .. }));

        let moved = service.update(one.id, table(hall, 1)).await.unwrap();
        assert_eq!(moved.section_id, hall);
        assert_eq!(moved.qr, one.qr);
    }
}
