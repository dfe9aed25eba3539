//! Entity → domain model conversions.

use crate::domain::model::{Appointment, AuditRecord, Customer, Doctor, User};
use crate::infra::storage::entity::{appointment, audit_log, customer, doctor, user};

impl From<customer::Model> for Customer {
    fn from(m: customer::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            address: m.address,
            dob: m.dob,
            place_of_birth: m.place_of_birth,
        }
    }
}

impl From<doctor::Model> for Doctor {
    fn from(m: doctor::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            specialization: m.specialization,
            email: m.email,
            phone_number: m.phone_number,
            rating: m.rating,
            password: m.password,
        }
    }
}

impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone_number: m.phone_number,
            role: m.role,
            password: m.password,
        }
    }
}

impl From<appointment::Model> for Appointment {
    fn from(m: appointment::Model) -> Self {
        Self {
            id: m.id,
            doctor_id: m.doctor_id,
            patient_id: m.patient_id,
            appointment_date: m.appointment_date,
            status: m.status,
        }
    }
}

impl From<audit_log::Model> for AuditRecord {
    fn from(m: audit_log::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            action: m.action,
            description: m.description,
            resource_type: m.resource_type,
            resource_id: m.resource_id,
            timestamp: m.timestamp,
        }
    }
}
