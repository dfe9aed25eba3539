use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::domain::audit::AuditRecorder;
use crate::domain::error::DomainError;
use crate::domain::model::{AuditAction, Customer, CustomerPatch, NewCustomer, ResourceKind};
use crate::domain::repo::CustomersRepository;

/// Business rules for customer management. Depends only on the repository
/// port and the audit recorder, not on infra types.
#[derive(Clone)]
pub struct CustomersService {
    repo: Arc<dyn CustomersRepository>,
    audit: AuditRecorder,
}

impl CustomersService {
    pub fn new(repo: Arc<dyn CustomersRepository>, audit: AuditRecorder) -> Self {
        Self { repo, audit }
    }

    #[instrument(name = "clinic.customers.get", skip(self), fields(customer_id = %id))]
    pub async fn get(&self, id: i64) -> Result<Customer, DomainError> {
        debug!("Getting customer by id");

        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::customer_not_found(id))
    }

    #[instrument(name = "clinic.customers.list", skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Customer>, DomainError> {
        self.repo
            .list_all()
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }

    #[instrument(
        name = "clinic.customers.create",
        skip(self, new),
        fields(email = %new.email)
    )]
    pub async fn create(
        &self,
        new: NewCustomer,
        actor: Option<i64>,
    ) -> Result<Customer, DomainError> {
        info!("Creating customer");

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
                ResourceKind::Customer,
                created.id,
                format!("Added customer {}", created.name),
            )
            .await;

        info!("Successfully created customer with id={}", created.id);
        Ok(created)
    }

    #[instrument(name = "clinic.customers.update", skip(self, patch), fields(customer_id = %id))]
    pub async fn update(
        &self,
        id: i64,
        patch: CustomerPatch,
        actor: Option<i64>,
    ) -> Result<Customer, DomainError> {
        info!("Updating customer");

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
            .ok_or_else(|| DomainError::customer_not_found(id))?;

        if let Some(name) = patch.name {
            current.name = name;
        }
        if let Some(email) = patch.email {
            current.email = email;
        }
        if let Some(phone) = patch.phone {
            current.phone = phone;
        }
        if let Some(address) = patch.address {
            current.address = address;
        }
        if let Some(dob) = patch.dob {
            current.dob = dob;
        }
        if let Some(place_of_birth) = patch.place_of_birth {
            current.place_of_birth = place_of_birth;
        }

        self.repo
            .update(current.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        self.audit
            .record(
                actor,
                AuditAction::Update,
                ResourceKind::Customer,
                current.id,
                format!("Updated customer {}", current.name),
            )
            .await;

        info!("Successfully updated customer");
        Ok(current)
    }

    #[instrument(name = "clinic.customers.delete", skip(self), fields(customer_id = %id))]
    pub async fn delete(&self, id: i64, actor: Option<i64>) -> Result<(), DomainError> {
        info!("Deleting customer");

        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        if !deleted {
            return Err(DomainError::customer_not_found(id));
        }

        self.audit
            .record(
                actor,
                AuditAction::Delete,
                ResourceKind::Customer,
                id,
                format!("Deleted customer with ID {}", id),
            )
            .await;

        info!("Successfully deleted customer");
        Ok(())
    }
}

pub(crate) fn validate_email(email: &str) -> Result<(), DomainError> {
    if email.is_empty() || !email.contains('@') || !email.contains('.') {
        return Err(DomainError::invalid_email(email));
    }
    Ok(())
}

pub(crate) fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name", "name cannot be empty"));
    }
    Ok(())
}
