// src/services/user_service.rs

use std::sync::Arc;

use crate::{
    common::{deadline::Deadline, error::AppError},
    db::store::UserStore,
    models::user::{NewUser, Page, User, DEFAULT_LANGUAGE},
    services::{
        optional_text, required_text,
        uniqueness::{ensure_unique, needs_recheck, Phone},
    },
};

const MIN_PHONE_CHARS: usize = 10;

// O serviço de usuários (clientes identificados pelo telefone)
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    deadline: Deadline,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, deadline: Deadline) -> Self {
        Self { users, deadline }
    }

    // Telefone sem espaços, nome obrigatório, idioma com padrão "ru"
    fn prepare(user: NewUser) -> Result<NewUser, AppError> {
        let phone_number = required_text("phone_number", &user.phone_number, MIN_PHONE_CHARS)?;
        let name = required_text("name", &user.name, 1)?;
        let language = optional_text(Some(user.language))
            .map(|l| l.to_lowercase())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        Ok(NewUser {
            phone_number,
            name,
            last_name: optional_text(user.last_name),
            language,
            is_active: user.is_active,
        })
    }

    async fn ensure_phone_free(&self, own_id: Option<i64>, phone: &str) -> Result<(), AppError> {
        let holder = self.deadline.run(self.users.get_by_phone(phone)).await?;
        ensure_unique(
            "user",
            own_id,
            &Phone(phone),
            holder.iter().map(|u| (u.id, Phone(&u.phone_number))),
        )
    }

    /// Cadastra um usuário. Todo usuário novo nasce ativo.
    pub async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let user = NewUser {
            is_active: true,
            ..Self::prepare(user)?
        };
        self.ensure_phone_free(None, &user.phone_number).await?;

        self.deadline.run(self.users.insert(&user)).await
    }

    pub async fn get(&self, id: i64) -> Result<User, AppError> {
        self.deadline
            .run(self.users.get_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found("user", id))
    }

    pub async fn get_by_phone(&self, phone: &str) -> Result<User, AppError> {
        let phone = phone.trim();
        self.deadline
            .run(self.users.get_by_phone(phone))
            .await?
            .ok_or_else(|| AppError::not_found("user", phone))
    }

    /// Lista paginada. `limit <= 0` vira 10 e `offset` negativo vira 0.
    pub async fn list(&self, limit: Option<i64>, offset: Option<i64>) -> Result<Vec<User>, AppError> {
        let page = Page::normalized(limit, offset);
        self.deadline.run(self.users.list(page)).await
    }

    pub async fn update(&self, id: i64, changes: NewUser) -> Result<User, AppError> {
        let changes = Self::prepare(changes)?;
        let current = self.get(id).await?;

        if needs_recheck(
            0,
            0,
            &Phone(&current.phone_number),
            &Phone(&changes.phone_number),
        ) {
            self.ensure_phone_free(Some(id), &changes.phone_number).await?;
        }

        let user = User {
            id,
            phone_number: changes.phone_number,
            name: changes.name,
            last_name: changes.last_name,
            language: changes.language,
            is_active: changes.is_active,
        };
        self.deadline.run(self.users.update(&user)).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.deadline.run(self.users.delete(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryStore::new()), Deadline::default())
    }

    fn new_user(phone: &str, language: &str) -> NewUser {
        NewUser {
            phone_number: phone.into(),
            name: "Айгерим".into(),
            last_name: None,
            language: language.into(),
            is_active: false,
        }
    }

    #[tokio::test]
    async fn create_applies_defaults() {
        let user = service().create(new_user(" +77011234567 ", "")).await.unwrap();

        assert_eq!(user.phone_number, "+77011234567");
        assert_eq!(user.language, "ru");
        assert!(user.is_active);
    }

    #[tokio::test]
    async fn phone_numbers_are_unique_and_long_enough() {
        let service = service();
        service.create(new_user("+77011234567", "kk")).await.unwrap();

        let err = service.create(new_user("+77011234567", "ru")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateInScope { entity: "user", .. }));

        let err = service.create(new_user("12345", "ru")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn list_normalizes_paging() {
        let service = service();
        for i in 0..12 {
            service
                .create(new_user(&format!("+7701000{i:04}"), "ru"))
                .await
                .unwrap();
        }

        assert_eq!(service.list(None, None).await.unwrap().len(), 10);
        assert_eq!(service.list(Some(0), Some(-5)).await.unwrap().len(), 10);
        assert_eq!(service.list(Some(5), Some(10)).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn lookup_by_phone() {
        let service = service();
        let created = service.create(new_user("+77011234567", "ru")).await.unwrap();

        assert_eq!(service.get_by_phone("+77011234567").await.unwrap(), created);
        let err = service.get_by_phone("+70000000000").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
