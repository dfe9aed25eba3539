use axum::http::StatusCode;

use crate::api::problem::{Problem, ProblemResponse};
use crate::domain::error::DomainError;

/// Helper to create a ProblemResponse with less boilerplate
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    let problem = Problem::new(status, title, detail)
        .with_type(format!("https://errors.clinic-server.dev/{}", code))
        .with_code(code)
        .with_instance(instance);

    ProblemResponse(problem)
}

/// Map domain error to RFC9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::CustomerNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "CLINIC_CUSTOMER_NOT_FOUND",
            "Customer not found",
            format!("Customer with id {} was not found", id),
            instance,
        ),
        DomainError::DoctorNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "CLINIC_DOCTOR_NOT_FOUND",
            "Doctor not found",
            format!("Doctor with id {} was not found", id),
            instance,
        ),
        DomainError::AppointmentNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "CLINIC_APPOINTMENT_NOT_FOUND",
            "Appointment not found",
            format!("Appointment with id {} was not found", id),
            instance,
        ),
        DomainError::UserNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "CLINIC_USER_NOT_FOUND",
            "User not found",
            format!("User with id {} was not found", id),
            instance,
        ),
        DomainError::InvalidCredentials => from_parts(
            StatusCode::UNAUTHORIZED,
            "CLINIC_INVALID_CREDENTIALS",
            "Unauthorized",
            "Invalid email or password",
            instance,
        ),
        DomainError::InvalidEmail { email } => from_parts(
            StatusCode::BAD_REQUEST,
            "CLINIC_INVALID_EMAIL",
            "Invalid email",
            format!("Email '{}' is invalid", email),
            instance,
        ),
        DomainError::RatingOutOfRange { .. } | DomainError::Validation { .. } => from_parts(
            StatusCode::BAD_REQUEST,
            "CLINIC_VALIDATION",
            "Validation error",
            format!("{}", e),
            instance,
        ),
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "CLINIC_INTERNAL_DB",
                "Internal error",
                "An internal database error occurred",
                instance,
            )
        }
    }
}
