use std::sync::Arc;

use tracing::{info, instrument};

use crate::domain::audit::AuditRecorder;
use crate::domain::error::DomainError;
use crate::domain::model::{
    Appointment, AppointmentDetails, AppointmentPatch, AuditAction, NewAppointment, ResourceKind,
};
use crate::domain::repo::AppointmentsRepository;

#[derive(Clone)]
pub struct AppointmentsService {
    repo: Arc<dyn AppointmentsRepository>,
    audit: AuditRecorder,
}

impl AppointmentsService {
    pub fn new(repo: Arc<dyn AppointmentsRepository>, audit: AuditRecorder) -> Self {
        Self { repo, audit }
    }

    /// Appointments joined with doctor and customer names.
    #[instrument(name = "clinic.appointments.list", skip(self))]
    pub async fn list_detailed(&self) -> Result<Vec<AppointmentDetails>, DomainError> {
        self.repo
            .list_detailed()
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }

    /// Book an appointment. Referential integrity (doctor/patient ids) is
    /// delegated to the store's foreign keys.
    #[instrument(
        name = "clinic.appointments.create",
        skip(self, new),
        fields(doctor_id = %new.doctor_id, patient_id = %new.patient_id)
    )]
    pub async fn create(
        &self,
        new: NewAppointment,
        actor: Option<i64>,
    ) -> Result<Appointment, DomainError> {
        info!("Booking appointment");

        let created = self
            .repo
            .insert(new)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        self.audit
            .record(
                actor,
                AuditAction::Create,
                ResourceKind::Appointment,
                created.id,
                format!("Booked appointment with doctor ID: {}", created.doctor_id),
            )
            .await;

        info!("Successfully booked appointment with id={}", created.id);
        Ok(created)
    }

    #[instrument(name = "clinic.appointments.update", skip(self, patch), fields(appointment_id = %id))]
    pub async fn update(
        &self,
        id: i64,
        patch: AppointmentPatch,
        actor: Option<i64>,
    ) -> Result<Appointment, DomainError> {
        info!("Updating appointment");

        let mut current = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::appointment_not_found(id))?;

        if let Some(doctor_id) = patch.doctor_id {
            current.doctor_id = doctor_id;
        }
        if let Some(patient_id) = patch.patient_id {
            current.patient_id = patient_id;
        }
        if let Some(appointment_date) = patch.appointment_date {
            current.appointment_date = appointment_date;
        }
        if let Some(status) = patch.status {
            current.status = status;
        }

        self.repo
            .update(current.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        self.audit
            .record(
                actor,
                AuditAction::Update,
                ResourceKind::Appointment,
                current.id,
                format!("Updated appointment {}", current.id),
            )
            .await;

        info!("Successfully updated appointment");
        Ok(current)
    }

    #[instrument(name = "clinic.appointments.delete", skip(self), fields(appointment_id = %id))]
    pub async fn delete(&self, id: i64, actor: Option<i64>) -> Result<(), DomainError> {
        info!("Deleting appointment");

        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        if !deleted {
            return Err(DomainError::appointment_not_found(id));
        }

        self.audit
            .record(
                actor,
                AuditAction::Delete,
                ResourceKind::Appointment,
                id,
                format!("Deleted appointment with ID: {}", id),
            )
            .await;

        info!("Successfully deleted appointment");
        Ok(())
    }
}
