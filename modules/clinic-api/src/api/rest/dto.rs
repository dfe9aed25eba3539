use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::model::{
    Appointment, AppointmentDetails, AppointmentPatch, AuditRecord, Customer, CustomerPatch,
    Doctor, DoctorPatch, NewAppointment, NewCustomer, NewDoctor, NewUser, User, UserPatch,
};

// ---------- customers ----------

/// REST DTO for customer representation with serde/schemars
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CustomerDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub dob: NaiveDate,
    pub place_of_birth: String,
}

/// REST DTO for creating a new customer.
/// `user_id` identifies the acting user for the audit trail and is required.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateCustomerReq {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub dob: NaiveDate,
    pub place_of_birth: String,
    pub user_id: i64,
}

/// REST DTO for updating a customer (partial)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct UpdateCustomerReq {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub dob: Option<NaiveDate>,
    pub place_of_birth: Option<String>,
    pub user_id: Option<i64>,
}

/// Query parameters for customer deletion; the actor is required here.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteCustomerQuery {
    pub user_id: i64,
}

/// Optional acting user for the other audited deletes.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ActorQuery {
    pub user_id: Option<i64>,
}

// ---------- doctors ----------

/// REST DTO for doctor representation. The stored password never leaves
/// the domain through this type.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DoctorDto {
    pub id: i64,
    pub name: String,
    pub specialization: String,
    pub email: String,
    pub phone_number: String,
    pub rating: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateDoctorReq {
    pub name: String,
    pub specialization: String,
    pub email: String,
    pub phone_number: String,
    pub rating: f32,
    pub password: String,
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct UpdateDoctorReq {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub rating: Option<f32>,
    pub password: Option<String>,
    pub user_id: Option<i64>,
}

// ---------- appointments ----------

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AppointmentDto {
    pub id: i64,
    pub doctor_id: i64,
    pub patient_id: i64,
    pub appointment_date: NaiveDateTime,
    pub status: String,
}

/// Appointment joined with doctor and customer names.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AppointmentDetailsDto {
    pub id: i64,
    pub doctor_name: String,
    pub customer_name: String,
    pub appointment_date: NaiveDateTime,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateAppointmentReq {
    pub doctor_id: i64,
    pub patient_id: i64,
    pub appointment_date: NaiveDateTime,
    pub status: String,
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct UpdateAppointmentReq {
    pub doctor_id: Option<i64>,
    pub patient_id: Option<i64>,
    pub appointment_date: Option<NaiveDateTime>,
    pub status: Option<String>,
    pub user_id: Option<i64>,
}

// ---------- users ----------

/// REST DTO for user representation; passwords are never serialized out.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateUserReq {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
    pub password: String,
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct UpdateUserReq {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub role: Option<String>,
    pub password: Option<String>,
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LoginReq {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LoginResp {
    pub role: String,
    pub message: String,
}

// ---------- audit ----------

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AuditRecordDto {
    pub id: i64,
    pub user_id: i64,
    pub action: String,
    pub description: String,
    pub resource_type: String,
    pub resource_id: i64,
    pub timestamp: DateTime<Utc>,
}

// Conversion implementations between REST DTOs and domain models

impl From<Customer> for CustomerDto {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            phone: c.phone,
            address: c.address,
            dob: c.dob,
            place_of_birth: c.place_of_birth,
        }
    }
}

impl From<CreateCustomerReq> for NewCustomer {
    fn from(req: CreateCustomerReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            address: req.address,
            dob: req.dob,
            place_of_birth: req.place_of_birth,
        }
    }
}

impl From<UpdateCustomerReq> for CustomerPatch {
    fn from(req: UpdateCustomerReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            address: req.address,
            dob: req.dob,
            place_of_birth: req.place_of_birth,
        }
    }
}

impl From<Doctor> for DoctorDto {
    fn from(d: Doctor) -> Self {
        Self {
            id: d.id,
            name: d.name,
            specialization: d.specialization,
            email: d.email,
            phone_number: d.phone_number,
            rating: d.rating,
        }
    }
}

impl From<CreateDoctorReq> for NewDoctor {
    fn from(req: CreateDoctorReq) -> Self {
        Self {
            name: req.name,
            specialization: req.specialization,
            email: req.email,
            phone_number: req.phone_number,
            rating: req.rating,
            password: req.password,
        }
    }
}

impl From<UpdateDoctorReq> for DoctorPatch {
    fn from(req: UpdateDoctorReq) -> Self {
        Self {
            name: req.name,
            specialization: req.specialization,
            email: req.email,
            phone_number: req.phone_number,
            rating: req.rating,
            password: req.password,
        }
    }
}

impl From<Appointment> for AppointmentDto {
    fn from(a: Appointment) -> Self {
        Self {
            id: a.id,
            doctor_id: a.doctor_id,
            patient_id: a.patient_id,
            appointment_date: a.appointment_date,
            status: a.status,
        }
    }
}

impl From<AppointmentDetails> for AppointmentDetailsDto {
    fn from(a: AppointmentDetails) -> Self {
        Self {
            id: a.id,
            doctor_name: a.doctor_name,
            customer_name: a.customer_name,
            appointment_date: a.appointment_date,
            status: a.status,
        }
    }
}

impl From<CreateAppointmentReq> for NewAppointment {
    fn from(req: CreateAppointmentReq) -> Self {
        Self {
            doctor_id: req.doctor_id,
            patient_id: req.patient_id,
            appointment_date: req.appointment_date,
            status: req.status,
        }
    }
}

impl From<UpdateAppointmentReq> for AppointmentPatch {
    fn from(req: UpdateAppointmentReq) -> Self {
        Self {
            doctor_id: req.doctor_id,
            patient_id: req.patient_id,
            appointment_date: req.appointment_date,
            status: req.status,
        }
    }
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            phone_number: u.phone_number,
            role: u.role,
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone_number: req.phone_number,
            role: req.role,
            password: req.password,
        }
    }
}

impl From<UpdateUserReq> for UserPatch {
    fn from(req: UpdateUserReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone_number: req.phone_number,
            role: req.role,
            password: req.password,
        }
    }
}

impl From<AuditRecord> for AuditRecordDto {
    fn from(r: AuditRecord) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            action: r.action,
            description: r.description,
            resource_type: r.resource_type,
            resource_id: r.resource_id,
            timestamp: r.timestamp,
        }
    }
}
