use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Customer not found: {id}")]
    CustomerNotFound { id: i64 },

    #[error("Doctor not found: {id}")]
    DoctorNotFound { id: i64 },

    #[error("Appointment not found: {id}")]
    AppointmentNotFound { id: i64 },

    #[error("User not found: {id}")]
    UserNotFound { id: i64 },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid email format: '{email}'")]
    InvalidEmail { email: String },

    #[error("Rating out of range: {rating} (expected 0.0..=5.0)")]
    RatingOutOfRange { rating: f32 },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn customer_not_found(id: i64) -> Self {
        Self::CustomerNotFound { id }
    }

    pub fn doctor_not_found(id: i64) -> Self {
        Self::DoctorNotFound { id }
    }

    pub fn appointment_not_found(id: i64) -> Self {
        Self::AppointmentNotFound { id }
    }

    pub fn user_not_found(id: i64) -> Self {
        Self::UserNotFound { id }
    }

    pub fn invalid_email(email: impl Into<String>) -> Self {
        Self::InvalidEmail {
            email: email.into(),
        }
    }

    pub fn rating_out_of_range(rating: f32) -> Self {
        Self::RatingOutOfRange { rating }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
