use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;

use quickdesk_core::error::AppError;
use quickdesk_core::result::AppResult;
use quickdesk_core::types::UserId;
use quickdesk_entity::user::{CreateUser, UpdateUser, User, UserRole};

use super::store::{newest_first, values, MemoryStore};
use crate::repositories::UserRepository;

const EMAIL_TAKEN: &str = "Email already exists";

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.tables.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let owner = self.tables.emails.get(&email.to_lowercase()).map(|id| *id);
        match owner {
            Some(id) => self.find_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> AppResult<Vec<User>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.tables.users.get(id).map(|u| u.clone()))
            .collect())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let mut users = values(&self.tables.users);
        newest_first(&mut users, |u| u.created_at);
        Ok(users)
    }

    async fn find_by_roles(&self, roles: &[UserRole]) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = values(&self.tables.users)
            .into_iter()
            .filter(|u| roles.contains(&u.role))
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn find_recent(&self, limit: u64) -> AppResult<Vec<User>> {
        let mut users = self.find_all().await?;
        users.truncate(limit as usize);
        Ok(users)
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let email = data.email.to_lowercase();
        match self.tables.emails.entry(email.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(EMAIL_TAKEN)),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let user = User {
                    id: UserId::new(),
                    name: data.name.clone(),
                    email,
                    password_hash: data.password_hash.clone(),
                    role: data.role,
                    language: data.language.clone(),
                    categories_of_interest: data.categories_of_interest.clone(),
                    created_at: now,
                    updated_at: now,
                };
                slot.insert(user.id);
                self.tables.users.insert(user.id, user.clone());
                Ok(user)
            }
        }
    }

    async fn update(&self, id: UserId, data: &UpdateUser) -> AppResult<Option<User>> {
        let Some(mut user) = self.tables.users.get_mut(&id) else {
            return Ok(None);
        };

        let mut released = None;
        if let Some(email) = &data.email {
            let email = email.to_lowercase();
            if email != user.email {
                match self.tables.emails.entry(email) {
                    Entry::Occupied(_) => return Err(AppError::conflict(EMAIL_TAKEN)),
                    Entry::Vacant(slot) => {
                        slot.insert(id);
                    }
                }
                released = Some(user.email.clone());
            }
        }
        if let Some(old) = released {
            self.tables.emails.remove(&old);
        }

        data.apply_to(&mut user);
        user.email = user.email.to_lowercase();
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> AppResult<bool> {
        Ok(match self.tables.users.get_mut(&id) {
            Some(mut user) => {
                user.password_hash = password_hash.to_string();
                user.updated_at = Utc::now();
                true
            }
            None => false,
        })
    }

    async fn delete(&self, id: UserId) -> AppResult<bool> {
        Ok(match self.tables.users.remove(&id) {
            Some((_, user)) => {
                self.tables.emails.remove(&user.email);
                true
            }
            None => false,
        })
    }

    async fn delete_many(&self, ids: &[UserId]) -> AppResult<u64> {
        let _guard = self.tables.write_lock.lock();
        let mut deleted = 0;
        for id in ids {
            if let Some((_, user)) = self.tables.users.remove(id) {
                self.tables.emails.remove(&user.email);
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    async fn set_role_many(&self, ids: &[UserId], role: UserRole) -> AppResult<u64> {
        let _guard = self.tables.write_lock.lock();
        let now = Utc::now();
        let mut modified = 0;
        for id in ids {
            if let Some(mut user) = self.tables.users.get_mut(id) {
                if user.role != role {
                    user.role = role;
                    user.updated_at = now;
                    modified += 1;
                }
            }
        }
        Ok(modified)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.tables.users.len() as u64)
    }

    async fn count_by_role(&self, role: UserRole) -> AppResult<u64> {
        Ok(self.tables.users.iter().filter(|u| u.role == role).count() as u64)
    }
}
