// src/services/qr_service.rs

use std::sync::Arc;

use anyhow::anyhow;
use image::Luma;
use qrcode::QrCode;

use crate::{
    common::{deadline::Deadline, error::AppError},
    db::store::TableStore,
    models::table::Table,
};

/// Código QR de uma mesa. Determinístico: só depende do id.
pub fn qr_code_for(table_id: i64) -> String {
    format!("table-{table_id}")
}

#[derive(Clone)]
pub struct QrService {
    tables: Arc<dyn TableStore>,
    deadline: Deadline,
}

impl QrService {
    pub fn new(tables: Arc<dyn TableStore>, deadline: Deadline) -> Self {
        Self { tables, deadline }
    }

    async fn find_table(&self, table_id: i64) -> Result<Table, AppError> {
        self.deadline
            .run(self.tables.get_by_id(table_id))
            .await?
            .ok_or_else(|| AppError::not_found("table", table_id))
    }

    /// Deriva e grava o código da mesa. Chamar de novo não muda nada.
    pub async fn generate_qr(&self, table_id: i64) -> Result<Table, AppError> {
        let mut table = self.find_table(table_id).await?;
        let code = qr_code_for(table.id);

        if table.qr.as_deref() != Some(code.as_str()) {
            self.deadline.run(self.tables.set_qr(table.id, &code)).await?;
            table.qr = Some(code);
        }
        Ok(table)
    }

    pub async fn list_missing_qr(&self) -> Result<Vec<Table>, AppError> {
        self.deadline.run(self.tables.list_missing_qr()).await
    }

    /// Reprovisiona todas as mesas sem código e devolve os ids reparados.
    pub async fn repair_missing_qr(&self) -> Result<Vec<i64>, AppError> {
        let missing = self.list_missing_qr().await?;
        let mut repaired = Vec::with_capacity(missing.len());

        for table in missing {
            self.deadline
                .run(self.tables.set_qr(table.id, &qr_code_for(table.id)))
                .await?;
            repaired.push(table.id);
        }

        if !repaired.is_empty() {
            tracing::info!(count = repaired.len(), "🔧 QR das mesas reparado");
        }
        Ok(repaired)
    }

    /// Renderiza o código gravado da mesa como PNG.
    pub async fn render_qr_png(&self, table_id: i64) -> Result<Vec<u8>, AppError> {
        let table = self.find_table(table_id).await?;
        let code = table
            .qr
            .filter(|qr| !qr.is_empty())
            .ok_or_else(|| AppError::not_found("qr", table_id))?;

        render_png(&code)
    }
}

// Renderiza para imagem e codifica como PNG
fn render_png(payload: &str) -> Result<Vec<u8>, AppError> {
    let code = QrCode::new(payload.as_bytes())
        .map_err(|e| anyhow!("falha ao gerar o QR code: {e}"))?;

    let image_buffer = code.render::<Luma<u8>>().build();
    let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

    let mut png = Vec::new();
    dynamic_image
        .write_to(&mut png, image::ImageOutputFormat::Png)
        .map_err(|e| anyhow!("falha ao codificar o PNG: {e}"))?;

    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::MemoryStore,
        models::{
            city::NewCity,
            restaurant::{NewRestaurant, NewSection},
            table::NewTable,
        },
        db::store::{CityStore, RestaurantStore, SectionStore},
    };

    async fn setup() -> (QrService, Arc<MemoryStore>, i64) {
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
        (QrService::new(store.clone(), Deadline::default()), store, section.id)
    }

    async fn bare_table(store: &MemoryStore, section_id: i64, number: i32) -> Table {
        TableStore::insert(
            store,
            &NewTable {
                number_of_table: number,
                section_id,
                qr: None,
            },
        )
        .await
        .unwrap()
    }

    #[test]
    fn code_is_derived_from_the_id() {
        assert_eq!(qr_code_for(42), "table-42");
    }

    #[tokio::test]
    async fn generate_is_idempotent() {
        let (service, store, section_id) = setup().await;
        let table = bare_table(&store, section_id, 1).await;

        let first = service.generate_qr(table.id).await.unwrap();
        let second = service.generate_qr(table.id).await.unwrap();

        assert_eq!(first.qr, Some(format!("table-{}", table.id)));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn generate_for_unknown_table_is_not_found() {
        let (service, _, _) = setup().await;
        let err = service.generate_qr(999).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { entity: "table", .. }));
    }

    #[tokio::test]
    async fn repair_provisions_only_missing_codes() {
        let (service, store, section_id) = setup().await;
        let missing = bare_table(&store, section_id, 1).await;
        let done = bare_table(&store, section_id, 2).await;
        service.generate_qr(done.id).await.unwrap();

        assert_eq!(service.repair_missing_qr().await.unwrap(), vec![missing.id]);
        assert!(service.list_missing_qr().await.unwrap().is_empty());
        assert!(service.repair_missing_qr().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn renders_a_png() {
        let (service, store, section_id) = setup().await;
        let table = bare_table(&store, section_id, 1).await;

        let err = service.render_qr_png(table.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));

        service.generate_qr(table.id).await.unwrap();
        let png = service.render_qr_png(table.id).await.unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
