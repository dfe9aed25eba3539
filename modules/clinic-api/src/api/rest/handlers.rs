use std::sync::Arc;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{OriginalUri, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

use crate::api::problem::bad_request;
use crate::api::rest::dto::{
    ActorQuery, AppointmentDetailsDto, AppointmentDto, AuditRecordDto, CreateAppointmentReq,
    CreateCustomerReq, CreateDoctorReq, CreateUserReq, CustomerDto, DeleteCustomerQuery, DoctorDto,
    LoginReq, LoginResp, UpdateAppointmentReq, UpdateCustomerReq, UpdateDoctorReq, UpdateUserReq,
    UserDto,
};
use crate::api::rest::error::map_domain_error;
use crate::domain::service::Services;

// ---------- customers ----------

pub async fn create_customer(
    Extension(services): Extension<Arc<Services>>,
    OriginalUri(uri): OriginalUri,
    body: Result<Json<CreateCustomerReq>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match body {
        Ok(b) => b,
        Err(rej) => return bad_request(rej.body_text()).into_response(),
    };

    let actor = Some(req.user_id);
    match services.customers.create(req.into(), actor).await {
        Ok(customer) => {
            (StatusCode::CREATED, Json(CustomerDto::from(customer))).into_response()
        }
        Err(e) => map_domain_error(&e, uri.path()).into_response(),
    }
}

pub async fn list_customers(
    Extension(services): Extension<Arc<Services>>,
    OriginalUri(uri): OriginalUri,
) -> impl IntoResponse {
    match services.customers.list_all().await {
        Ok(customers) => {
            let dtos: Vec<CustomerDto> = customers.into_iter().map(Into::into).collect();
            Json(dtos).into_response()
        }
        Err(e) => map_domain_error(&e, uri.path()).into_response(),
    }
}

pub async fn get_customer(
    Extension(services): Extension<Arc<Services>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match services.customers.get(id).await {
        Ok(customer) => Json(CustomerDto::from(customer)).into_response(),
        Err(e) => map_domain_error(&e, uri.path()).into_response(),
    }
}

pub async fn update_customer(
    Extension(services): Extension<Arc<Services>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
    body: Result<Json<UpdateCustomerReq>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match body {
        Ok(b) => b,
        Err(rej) => return bad_request(rej.body_text()).into_response(),
    };

    let actor = req.user_id;
    match services.customers.update(id, req.into(), actor).await {
        Ok(customer) => Json(CustomerDto::from(customer)).into_response(),
        Err(e) => map_domain_error(&e, uri.path()).into_response(),
    }
}

pub async fn delete_customer(
    Extension(services): Extension<Arc<Services>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
    query: Result<Query<DeleteCustomerQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Query(q) = match query {
        Ok(q) => q,
        Err(rej) => return bad_request(rej.body_text()).into_response(),
    };

    match services.customers.delete(id, Some(q.user_id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => map_domain_error(&e, uri.path()).into_response(),
    }
}

// ---------- doctors ----------

pub async fn create_doctor(
    Extension(services): Extension<Arc<Services>>,
    OriginalUri(uri): OriginalUri,
    body: Result<Json<CreateDoctorReq>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match body {
        Ok(b) => b,
        Err(rej) => return bad_request(rej.body_text()).into_response(),
    };

    let actor = req.user_id;
    match services.doctors.create(req.into(), actor).await {
        Ok(doctor) => (StatusCode::CREATED, Json(DoctorDto::from(doctor))).into_response(),
        Err(e) => map_domain_error(&e, uri.path()).into_response(),
    }
}

pub async fn list_doctors(
    Extension(services): Extension<Arc<Services>>,
    OriginalUri(uri): OriginalUri,
) -> impl IntoResponse {
    match services.doctors.list_all().await {
        Ok(doctors) => {
            let dtos: Vec<DoctorDto> = doctors.into_iter().map(Into::into).collect();
            Json(dtos).into_response()
        }
        Err(e) => map_domain_error(&e, uri.path()).into_response(),
    }
}

pub async fn get_doctor(
    Extension(services): Extension<Arc<Services>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match services.doctors.get(id).await {
        Ok(doctor) => Json(DoctorDto::from(doctor)).into_response(),
        Err(e) => map_domain_error(&e, uri.path()).into_response(),
    }
}

pub async fn update_doctor(
    Extension(services): Extension<Arc<Services>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
    body: Result<Json<UpdateDoctorReq>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match body {
        Ok(b) => b,
        Err(rej) => return bad_request(rej.body_text()).into_response(),
    };

    let actor = req.user_id;
    match services.doctors.update(id, req.into(), actor).await {
        Ok(doctor) => Json(DoctorDto::from(doctor)).into_response(),
        Err(e) => map_domain_error(&e, uri.path()).into_response(),
    }
}

pub async fn delete_doctor(
    Extension(services): Extension<Arc<Services>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
    query: Result<Query<ActorQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Query(q) = match query {
        Ok(q) => q,
        Err(rej) => return bad_request(rej.body_text()).into_response(),
    };

    match services.doctors.delete(id, q.user_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => map_domain_error(&e, uri.path()).into_response(),
    }
}

// ---------- appointments ----------

pub async fn create_appointment(
    Extension(services): Extension<Arc<Services>>,
    OriginalUri(uri): OriginalUri,
    body: Result<Json<CreateAppointmentReq>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match body {
        Ok(b) => b,
        Err(rej) => return bad_request(rej.body_text()).into_response(),
    };

    let actor = req.user_id;
    match services.appointments.create(req.into(), actor).await {
        Ok(appointment) => {
            (StatusCode::CREATED, Json(AppointmentDto::from(appointment))).into_response()
        }
        Err(e) => map_domain_error(&e, uri.path()).into_response(),
    }
}

pub async fn list_appointments(
    Extension(services): Extension<Arc<Services>>,
    OriginalUri(uri): OriginalUri,
) -> impl IntoResponse {
    match services.appointments.list_detailed().await {
        Ok(details) => {
            let dtos: Vec<AppointmentDetailsDto> = details.into_iter().map(Into::into).collect();
            Json(dtos).into_response()
        }
        Err(e) => map_domain_error(&e, uri.path()).into_response(),
    }
}

pub async fn update_appointment(
    Extension(services): Extension<Arc<Services>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
    body: Result<Json<UpdateAppointmentReq>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match body {
        Ok(b) => b,
        Err(rej) => return bad_request(rej.body_text()).into_response(),
    };

    let actor = req.user_id;
    match services.appointments.update(id, req.into(), actor).await {
        Ok(appointment) => Json(AppointmentDto::from(appointment)).into_response(),
        Err(e) => map_domain_error(&e, uri.path()).into_response(),
    }
}

pub async fn delete_appointment(
    Extension(services): Extension<Arc<Services>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
    query: Result<Query<ActorQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Query(q) = match query {
        Ok(q) => q,
        Err(rej) => return bad_request(rej.body_text()).into_response(),
    };

    match services.appointments.delete(id, q.user_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => map_domain_error(&e, uri.path()).into_response(),
    }
}

// ---------- users ----------

pub async fn create_user(
    Extension(services): Extension<Arc<Services>>,
    OriginalUri(uri): OriginalUri,
    body: Result<Json<CreateUserReq>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match body {
        Ok(b) => b,
        Err(rej) => return bad_request(rej.body_text()).into_response(),
    };

    let actor = req.user_id;
    match services.users.create(req.into(), actor).await {
        Ok(user) => (StatusCode::CREATED, Json(UserDto::from(user))).into_response(),
        Err(e) => map_domain_error(&e, uri.path()).into_response(),
    }
}

pub async fn list_users(
    Extension(services): Extension<Arc<Services>>,
    OriginalUri(uri): OriginalUri,
) -> impl IntoResponse {
    match services.users.list_all().await {
        Ok(users) => {
            let dtos: Vec<UserDto> = users.into_iter().map(Into::into).collect();
            Json(dtos).into_response()
        }
        Err(e) => map_domain_error(&e, uri.path()).into_response(),
    }
}

pub async fn update_user(
    Extension(services): Extension<Arc<Services>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
    body: Result<Json<UpdateUserReq>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match body {
        Ok(b) => b,
        Err(rej) => return bad_request(rej.body_text()).into_response(),
    };

    let actor = req.user_id;
    match services.users.update(id, req.into(), actor).await {
        Ok(user) => Json(UserDto::from(user)).into_response(),
        Err(e) => map_domain_error(&e, uri.path()).into_response(),
    }
}

pub async fn delete_user(
    Extension(services): Extension<Arc<Services>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
    query: Result<Query<ActorQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Query(q) = match query {
        Ok(q) => q,
        Err(rej) => return bad_request(rej.body_text()).into_response(),
    };

    match services.users.delete(id, q.user_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => map_domain_error(&e, uri.path()).into_response(),
    }
}

pub async fn login(
    Extension(services): Extension<Arc<Services>>,
    OriginalUri(uri): OriginalUri,
    body: Result<Json<LoginReq>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match body {
        Ok(b) => b,
        Err(rej) => return bad_request(rej.body_text()).into_response(),
    };

    match services.users.login(&req.email, &req.password).await {
        Ok(user) => Json(LoginResp {
            role: user.role,
            message: "Login successful".to_string(),
        })
        .into_response(),
        Err(e) => map_domain_error(&e, uri.path()).into_response(),
    }
}

// ---------- audit ----------

pub async fn recent_audit(
    Extension(services): Extension<Arc<Services>>,
    OriginalUri(uri): OriginalUri,
) -> impl IntoResponse {
    match services.audit.recent().await {
        Ok(records) => {
            let dtos: Vec<AuditRecordDto> = records.into_iter().map(Into::into).collect();
            Json(dtos).into_response()
        }
        Err(e) => map_domain_error(&e, uri.path()).into_response(),
    }
}
