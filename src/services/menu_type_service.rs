// src/services/menu_type_service.rs

use std::sync::Arc;

use crate::{
    common::{deadline::Deadline, error::AppError},
    db::store::MenuTypeStore,
    models::menu::{MenuType, NewMenuType},
    services::{
        optional_text, required_text,
        uniqueness::{ensure_unique, needs_recheck, Name},
    },
};

#[derive(Clone)]
pub struct MenuTypeService {
    menu_types: Arc<dyn MenuTypeStore>,
    deadline: Deadline,
}

impl MenuTypeService {
    pub fn new(menu_types: Arc<dyn MenuTypeStore>, deadline: Deadline) -> Self {
        Self {
            menu_types,
            deadline,
        }
    }

    async fn ensure_unique_name(&self, own_id: Option<i64>, name: &str) -> Result<(), AppError> {
        let existing = self.deadline.run(self.menu_types.list()).await?;
        ensure_unique(
            "menu_type",
            own_id,
            &Name(name),
            existing.iter().map(|m| (m.id, Name(&m.name))),
        )
    }

    pub async fn create(&self, menu_type: NewMenuType) -> Result<MenuType, AppError> {
        let name = required_text("name", &menu_type.name, 2)?;
        self.ensure_unique_name(None, &name).await?;

        let menu_type = NewMenuType {
            name,
            img: optional_text(menu_type.img),
        };
        self.deadline.run(self.menu_types.insert(&menu_type)).await
    }

    pub async fn get(&self, id: i64) -> Result<MenuType, AppError> {
        self.deadline
            .run(self.menu_types.get_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found("menu_type", id))
    }

    pub async fn list(&self) -> Result<Vec<MenuType>, AppError> {
        self.deadline.run(self.menu_types.list()).await
    }

    pub async fn update(&self, id: i64, changes: NewMenuType) -> Result<MenuType, AppError> {
        let name = required_text("name", &changes.name, 2)?;
        let current = self.get(id).await?;

        if needs_recheck(0, 0, &Name(&current.name), &Name(&name)) {
            self.ensure_unique_name(Some(id), &name).await?;
        }

        let menu_type = MenuType {
            id,
            name,
            img: optional_text(changes.img),
        };
        self.deadline.run(self.menu_types.update(&menu_type)).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.deadline.run(self.menu_types.delete(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    #[tokio::test]
    async fn names_are_globally_unique() {
        let service = MenuTypeService::new(Arc::new(MemoryStore::new()), Deadline::default());
        let breakfast = service
            .create(NewMenuType {
                name: "Завтрак".into(),
                img: None,
            })
            .await
            .unwrap();

        let err = service
            .create(NewMenuType {
                name: "завтрак".into(),
                img: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateInScope { entity: "menu_type", .. }));

        let lunch = service
            .create(NewMenuType {
                name: "Обед".into(),
                img: Some("lunch.png".into()),
            })
            .await
            .unwrap();
        let err = service
            .update(
                lunch.id,
                NewMenuType {
                    name: breakfast.name.clone(),
                    img: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateInScope { .. }));
    }
}
