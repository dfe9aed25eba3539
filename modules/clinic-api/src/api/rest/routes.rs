use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Services;

/// Build the REST router with all clinic routes and shared services.
pub fn router(services: Arc<Services>) -> Router {
    Router::new()
        // customers
        .route("/customers", post(handlers::create_customer))
        .route("/customers/all", get(handlers::list_customers))
        .route(
            "/customers/{id}",
            get(handlers::get_customer)
                .put(handlers::update_customer)
                .delete(handlers::delete_customer),
        )
        // doctors
        .route("/doctors/add", post(handlers::create_doctor))
        .route("/doctors", get(handlers::list_doctors))
        .route(
            "/doctors/{id}",
            get(handlers::get_doctor)
                .put(handlers::update_doctor)
                .delete(handlers::delete_doctor),
        )
        // appointments
        .route("/appointments/add", post(handlers::create_appointment))
        .route("/appointments", get(handlers::list_appointments))
        .route(
            "/appointments/{id}",
            put(handlers::update_appointment).delete(handlers::delete_appointment),
        )
        // users & auth
        .route("/users", post(handlers::create_user).get(handlers::list_users))
        .route(
            "/users/{id}",
            put(handlers::update_user).delete(handlers::delete_user),
        )
        .route("/login", post(handlers::login))
        // audit trail
        .route("/audit/recent", get(handlers::recent_audit))
        .layer(Extension(services))
}
