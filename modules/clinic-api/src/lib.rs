//! Clinic management module: customers, doctors, appointments, users and
//! the audit trail behind them.
//!
//! Layout follows a layered module structure:
//! - `api` — REST surface (DTOs, handlers, routes, Problem responses)
//! - `domain` — models, services, repository ports, audit recorder
//! - `infra` — SeaORM entities, repositories and migrations

pub mod api;
pub mod domain;
pub mod infra;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::domain::audit::AuditRecorder;
use crate::domain::service::{
    AppointmentsService, AuditService, CustomersService, DoctorsService, Services, UsersService,
};
use crate::infra::storage::repo::{
    SeaOrmAppointmentsRepository, SeaOrmAuditLogRepository, SeaOrmCustomersRepository,
    SeaOrmDoctorsRepository, SeaOrmUsersRepository,
};

/// Wire the SeaORM repositories and domain services against a live
/// database connection. Called once at startup.
pub fn build_services(db: DatabaseConnection) -> Arc<Services> {
    let audit_repo = Arc::new(SeaOrmAuditLogRepository::new(db.clone()));
    let audit = AuditRecorder::new(audit_repo.clone());

    Arc::new(Services {
        customers: CustomersService::new(
            Arc::new(SeaOrmCustomersRepository::new(db.clone())),
            audit.clone(),
        ),
        doctors: DoctorsService::new(
            Arc::new(SeaOrmDoctorsRepository::new(db.clone())),
            audit.clone(),
        ),
        appointments: AppointmentsService::new(
            Arc::new(SeaOrmAppointmentsRepository::new(db.clone())),
            audit.clone(),
        ),
        users: UsersService::new(Arc::new(SeaOrmUsersRepository::new(db)), audit),
        audit: AuditService::new(audit_repo),
    })
}
