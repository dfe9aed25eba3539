use async_trait::async_trait;

use crate::domain::model::{
    Appointment, AppointmentDetails, AuditRecord, Customer, Doctor, NewAppointment, NewAuditRecord,
    NewCustomer, NewDoctor, NewUser, User,
};

/// Persistence port for customers. Object-safe and async-friendly via `async_trait`.
///
/// Services compute timestamps and apply validation/patches; repos persist.
#[async_trait]
pub trait CustomersRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Customer>>;
    async fn list_all(&self) -> anyhow::Result<Vec<Customer>>;
    /// Insert and return the stored row (with its generated id).
    async fn insert(&self, c: NewCustomer) -> anyhow::Result<Customer>;
    /// Update an existing customer (by primary key in `c.id`).
    async fn update(&self, c: Customer) -> anyhow::Result<()>;
    /// Delete by id. Returns true if a row was deleted.
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait DoctorsRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Doctor>>;
    async fn list_all(&self) -> anyhow::Result<Vec<Doctor>>;
    async fn insert(&self, d: NewDoctor) -> anyhow::Result<Doctor>;
    async fn update(&self, d: Doctor) -> anyhow::Result<()>;
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait AppointmentsRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Appointment>>;
    /// List appointments joined with doctor and customer names.
    async fn list_detailed(&self) -> anyhow::Result<Vec<AppointmentDetails>>;
    async fn insert(&self, a: NewAppointment) -> anyhow::Result<Appointment>;
    async fn update(&self, a: Appointment) -> anyhow::Result<()>;
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn list_all(&self) -> anyhow::Result<Vec<User>>;
    async fn insert(&self, u: NewUser) -> anyhow::Result<User>;
    async fn update(&self, u: User) -> anyhow::Result<()>;
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
}

/// Append-only port for the audit trail.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn append(&self, rec: NewAuditRecord) -> anyhow::Result<()>;
    /// Most recent records, newest first.
    async fn recent(&self, limit: u64) -> anyhow::Result<Vec<AuditRecord>>;
}
