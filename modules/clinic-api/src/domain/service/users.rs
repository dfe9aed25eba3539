use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::audit::AuditRecorder;
use crate::domain::error::DomainError;
use crate::domain::model::{AuditAction, NewUser, ResourceKind, User, UserPatch};
use crate::domain::repo::UsersRepository;
use crate::domain::service::customers::{validate_email, validate_name};

#[derive(Clone)]
pub struct UsersService {
    repo: Arc<dyn UsersRepository>,
    audit: AuditRecorder,
}

impl UsersService {
    pub fn new(repo: Arc<dyn UsersRepository>, audit: AuditRecorder) -> Self {
        Self { repo, audit }
    }

    #[instrument(name = "clinic.users.list", skip(self))]
    pub async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        self.repo
            .list_all()
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }

    #[instrument(name = "clinic.users.create", skip(self, new), fields(email = %new.email))]
    pub async fn create(&self, new: NewUser, actor: Option<i64>) -> Result<User, DomainError> {
        info!("Creating user");

        validate_name(&new.name)?;
        validate_email(&new.email)?;

        let created = self
            .repo
            .insert(new)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        self.audit
            .record(
                actor,
                AuditAction::Create,
                ResourceKind::User,
                created.id,
                format!("Created new user: {}", created.name),
            )
            .await;

        info!("Successfully created user with id={}", created.id);
        Ok(created)
    }

    #[instrument(name = "clinic.users.update", skip(self, patch), fields(user_id = %id))]
    pub async fn update(
        &self,
        id: i64,
        patch: UserPatch,
        actor: Option<i64>,
    ) -> Result<User, DomainError> {
        info!("Updating user");

        if let Some(ref name) = patch.name {
            validate_name(name)?;
        }
        if let Some(ref email) = patch.email {
            validate_email(email)?;
        }

        let mut current = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(id))?;

        if let Some(name) = patch.name {
            current.name = name;
        }
        if let Some(email) = patch.email {
            current.email = email;
        }
        if let Some(phone_number) = patch.phone_number {
            current.phone_number = phone_number;
        }
        if let Some(role) = patch.role {
            current.role = role;
        }
        if let Some(password) = patch.password {
            current.password = password;
        }

        self.repo
            .update(current.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        self.audit
            .record(
                actor,
                AuditAction::Update,
                ResourceKind::User,
                current.id,
                format!("Updated user: {}", current.name),
            )
            .await;

        info!("Successfully updated user");
        Ok(current)
    }

    #[instrument(name = "clinic.users.delete", skip(self), fields(user_id = %id))]
    pub async fn delete(&self, id: i64, actor: Option<i64>) -> Result<(), DomainError> {
        info!("Deleting user");

        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        if !deleted {
            return Err(DomainError::user_not_found(id));
        }

        self.audit
            .record(
                actor,
                AuditAction::Delete,
                ResourceKind::User,
                id,
                format!("Deleted user with ID: {}", id),
            )
            .await;

        info!("Successfully deleted user");
        Ok(())
    }

    /// Credential check against the stored row. Plaintext comparison, as in
    /// the legacy schema; not recorded in the audit trail.
    #[instrument(name = "clinic.users.login", skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let user = self
            .repo
            .find_by_email(email)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        match user {
            Some(user) if user.password == password => {
                info!("Login successful for user id={}", user.id);
                Ok(user)
            }
            _ => {
                warn!("Login failed");
                Err(DomainError::InvalidCredentials)
            }
        }
    }
}
