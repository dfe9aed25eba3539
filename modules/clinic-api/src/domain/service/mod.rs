pub mod appointments;
pub mod customers;
pub mod doctors;
pub mod users;

pub use appointments::AppointmentsService;
pub use customers::CustomersService;
pub use doctors::DoctorsService;
pub use users::UsersService;

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::error::DomainError;
use crate::domain::model::AuditRecord;
use crate::domain::repo::AuditLogRepository;

/// How many audit records `/audit/recent` returns.
pub const RECENT_AUDIT_LIMIT: u64 = 50;

/// Read side of the audit trail.
#[derive(Clone)]
pub struct AuditService {
    repo: Arc<dyn AuditLogRepository>,
}

impl AuditService {
    pub fn new(repo: Arc<dyn AuditLogRepository>) -> Self {
        Self { repo }
    }

    #[instrument(name = "clinic.audit.recent", skip(self))]
    pub async fn recent(&self) -> Result<Vec<AuditRecord>, DomainError> {
        debug!("Fetching recent audit records");

        self.repo
            .recent(RECENT_AUDIT_LIMIT)
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }
}

/// All domain services, wired once at startup and shared via `Extension`.
#[derive(Clone)]
pub struct Services {
    pub customers: CustomersService,
    pub doctors: DoctorsService,
    pub appointments: AppointmentsService,
    pub users: UsersService,
    pub audit: AuditService,
}
