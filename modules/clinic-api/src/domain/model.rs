use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Pure customer model (no serde; REST DTOs live in the api layer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub dob: NaiveDate,
    pub place_of_birth: String,
}

/// Data for creating a new customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub dob: NaiveDate,
    pub place_of_birth: String,
}

/// Partial update data for a customer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub dob: Option<NaiveDate>,
    pub place_of_birth: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub specialization: String,
    pub email: String,
    pub phone_number: String,
    pub rating: f32,
    /// Stored as-is; never leaves the domain through a REST DTO.
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDoctor {
    pub name: String,
    pub specialization: String,
    pub email: String,
    pub phone_number: String,
    pub rating: f32,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DoctorPatch {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub rating: Option<f32>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub role: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: i64,
    pub doctor_id: i64,
    pub patient_id: i64,
    pub appointment_date: NaiveDateTime,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub doctor_id: i64,
    pub patient_id: i64,
    pub appointment_date: NaiveDateTime,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppointmentPatch {
    pub doctor_id: Option<i64>,
    pub patient_id: Option<i64>,
    pub appointment_date: Option<NaiveDateTime>,
    pub status: Option<String>,
}

/// Appointment row joined with the doctor and customer names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentDetails {
    pub id: i64,
    pub doctor_name: String,
    pub customer_name: String,
    pub appointment_date: NaiveDateTime,
    pub status: String,
}

/// What a mutating operation did, for the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
        }
    }
}

/// Which table a recorded mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Customer,
    Doctor,
    Appointment,
    User,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Customer => "customer",
            ResourceKind::Doctor => "doctor",
            ResourceKind::Appointment => "appointment",
            ResourceKind::User => "user",
        }
    }
}

/// A persisted audit record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub id: i64,
    pub user_id: i64,
    pub action: String,
    pub description: String,
    pub resource_type: String,
    pub resource_id: i64,
    pub timestamp: DateTime<Utc>,
}

/// Data for appending a new audit record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditRecord {
    pub user_id: i64,
    pub action: AuditAction,
    pub description: String,
    pub resource_type: ResourceKind,
    pub resource_id: i64,
    pub timestamp: DateTime<Utc>,
}
