use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::domain::audit::AuditRecorder;
use crate::domain::error::DomainError;
use crate::domain::model::{AuditAction, Doctor, DoctorPatch, NewDoctor, ResourceKind};
use crate::domain::repo::DoctorsRepository;
use crate::domain::service::customers::{validate_email, validate_name};

#[derive(Clone)]
pub struct DoctorsService {
    repo: Arc<dyn DoctorsRepository>,
    audit: AuditRecorder,
}

impl DoctorsService {
    pub fn new(repo: Arc<dyn DoctorsRepository>, audit: AuditRecorder) -> Self {
        Self { repo, audit }
    }

    #[instrument(name = "clinic.doctors.get", skip(self), fields(doctor_id = %id))]
    pub async fn get(&self, id: i64) -> Result<Doctor, DomainError> {
        debug!("Getting doctor by id");

        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::doctor_not_found(id))
    }

    #[instrument(name = "clinic.doctors.list", skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Doctor>, DomainError> {
        self.repo
            .list_all()
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }

    #[instrument(
        name = "clinic.doctors.create",
        skip(self, new),
        fields(email = %new.email)
    )]
    pub async fn create(&self, new: NewDoctor, actor: Option<i64>) -> Result<Doctor, DomainError> {
        info!("Creating doctor");

        self.validate_new(&new)?;

        let created = self
            .repo
            .insert(new)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        self.audit
            .record(
                actor,
                AuditAction::Create,
                ResourceKind::Doctor,
                created.id,
                format!("Added new doctor: {}", created.name),
            )
            .await;

        info!("Successfully created doctor with id={}", created.id);
        Ok(created)
    }

    #[instrument(name = "clinic.doctors.update", skip(self, patch), fields(doctor_id = %id))]
    pub async fn update(
        &self,
        id: i64,
        patch: DoctorPatch,
        actor: Option<i64>,
    ) -> Result<Doctor, DomainError> {
        info!("Updating doctor");

        if let Some(ref name) = patch.name {
            validate_name(name)?;
        }
        if let Some(ref email) = patch.email {
            validate_email(email)?;
        }
        if let Some(rating) = patch.rating {
            validate_rating(rating)?;
        }

        let mut current = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::doctor_not_found(id))?;

        if let Some(name) = patch.name {
            current.name = name;
        }
        if let Some(specialization) = patch.specialization {
            current.specialization = specialization;
        }
        if let Some(email) = patch.email {
            current.email = email;
        }
        if let Some(phone_number) = patch.phone_number {
            current.phone_number = phone_number;
        }
        if let Some(rating) = patch.rating {
            current.rating = rating;
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
                ResourceKind::Doctor,
                current.id,
                format!("Updated doctor details for ID {}", current.id),
            )
            .await;

        info!("Successfully updated doctor");
        Ok(current)
    }

    #[instrument(name = "clinic.doctors.delete", skip(self), fields(doctor_id = %id))]
    pub async fn delete(&self, id: i64, actor: Option<i64>) -> Result<(), DomainError> {
        info!("Deleting doctor");

        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        if !deleted {
            return Err(DomainError::doctor_not_found(id));
        }

        self.audit
            .record(
                actor,
                AuditAction::Delete,
                ResourceKind::Doctor,
                id,
                format!("Deleted doctor with ID: {}", id),
            )
            .await;

        info!("Successfully deleted doctor");
        Ok(())
    }

    // --- validation helpers ---

    fn validate_new(&self, new: &NewDoctor) -> Result<(), DomainError> {
        validate_name(&new.name)?;
        validate_email(&new.email)?;
        validate_rating(new.rating)?;
        if new.specialization.trim().is_empty() {
            return Err(DomainError::validation(
                "specialization",
                "specialization cannot be empty",
            ));
        }
        if new.phone_number.trim().is_empty() {
            return Err(DomainError::validation(
                "phone_number",
                "phone number cannot be empty",
            ));
        }
        if new.password.is_empty() {
            return Err(DomainError::validation(
                "password",
                "password cannot be empty",
            ));
        }
        Ok(())
    }
}

fn validate_rating(rating: f32) -> Result<(), DomainError> {
    if !(0.0..=5.0).contains(&rating) {
        return Err(DomainError::rating_out_of_range(rating));
    }
    Ok(())
}
