//! Audit trail behavior: every successful mutation with a known actor
//! leaves exactly one record, actorless mutations leave none, and
//! `/audit/recent` serves newest-first with a fixed cap.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tower::ServiceExt;

use clinic_api::api::rest::routes;
use clinic_api::domain::error::DomainError;
use clinic_api::domain::model::{
    AuditAction, CustomerPatch, NewAppointment, NewAuditRecord, NewCustomer, NewDoctor, NewUser,
    ResourceKind,
};
use clinic_api::domain::repo::AuditLogRepository;
use clinic_api::domain::service::{Services, RECENT_AUDIT_LIMIT};
use clinic_api::infra::storage::migrations::Migrator;
use clinic_api::infra::storage::repo::SeaOrmAuditLogRepository;

async fn setup() -> (Arc<Services>, SeaOrmAuditLogRepository) {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    let audit_repo = SeaOrmAuditLogRepository::new(db.clone());
    (clinic_api::build_services(db), audit_repo)
}

fn sample_customer() -> NewCustomer {
    NewCustomer {
        name: "Alice Bauer".to_string(),
        email: "alice@example.com".to_string(),
        phone: "555-0101".to_string(),
        address: "12 Main St".to_string(),
        dob: NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
        place_of_birth: "Vienna".to_string(),
    }
}

#[tokio::test]
async fn customer_create_records_one_audit_entry() {
    let (services, _) = setup().await;

    let created = services
        .customers
        .create(sample_customer(), Some(7))
        .await
        .expect("create customer");

    let records = services.audit.recent().await.expect("recent");
    assert_eq!(records.len(), 1);

    let rec = &records[0];
    assert_eq!(rec.user_id, 7);
    assert_eq!(rec.action, "create");
    assert_eq!(rec.resource_type, "customer");
    assert_eq!(rec.resource_id, created.id);
    assert_eq!(rec.description, "Added customer Alice Bauer");
}

#[tokio::test]
async fn full_customer_lifecycle_records_three_entries() {
    let (services, _) = setup().await;

    let created = services
        .customers
        .create(sample_customer(), Some(3))
        .await
        .expect("create");
    services
        .customers
        .update(
            created.id,
            CustomerPatch {
                phone: Some("555-7777".to_string()),
                ..Default::default()
            },
            Some(3),
        )
        .await
        .expect("update");
    services
        .customers
        .delete(created.id, Some(3))
        .await
        .expect("delete");

    let records = services.audit.recent().await.expect("recent");
    assert_eq!(records.len(), 3);

    // newest first
    assert_eq!(records[0].action, "delete");
    assert_eq!(records[1].action, "update");
    assert_eq!(records[2].action, "create");
    assert!(records.iter().all(|r| r.resource_type == "customer"));
    assert!(records.iter().all(|r| r.resource_id == created.id));
}

#[tokio::test]
async fn actorless_mutation_skips_audit_but_succeeds() {
    let (services, _) = setup().await;

    let doctor = services
        .doctors
        .create(
            NewDoctor {
                name: "Dr. Benoit".to_string(),
                specialization: "Cardiology".to_string(),
                email: "benoit@clinic.example".to_string(),
                phone_number: "555-0202".to_string(),
                rating: 4.5,
                password: "s3cret".to_string(),
            },
            None,
        )
        .await
        .expect("doctor create without actor");
    assert!(doctor.id > 0);

    let records = services.audit.recent().await.expect("recent");
    assert!(records.is_empty());
}

#[tokio::test]
async fn http_deletes_are_audited_when_user_id_is_supplied() {
    let (services, _) = setup().await;

    let customer = services
        .customers
        .create(sample_customer(), None)
        .await
        .expect("customer");
    let doctor = services
        .doctors
        .create(
            NewDoctor {
                name: "Dr. Benoit".to_string(),
                specialization: "Cardiology".to_string(),
                email: "benoit@clinic.example".to_string(),
                phone_number: "555-0202".to_string(),
                rating: 4.5,
                password: "s3cret".to_string(),
            },
            None,
        )
        .await
        .expect("doctor");
    let user = services
        .users
        .create(
            NewUser {
                name: "Admin".to_string(),
                email: "admin@clinic.example".to_string(),
                phone_number: "555-0303".to_string(),
                role: "admin".to_string(),
                password: "hunter2".to_string(),
            },
            None,
        )
        .await
        .expect("user");
    let when = NaiveDateTime::parse_from_str("2026-09-01 10:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
    let appointment = services
        .appointments
        .create(
            NewAppointment {
                doctor_id: doctor.id,
                patient_id: customer.id,
                appointment_date: when,
                status: "scheduled".to_string(),
            },
            None,
        )
        .await
        .expect("appointment");

    let app = routes::router(services.clone());

    // Appointment first so the doctor delete does not hit its foreign keys.
    for uri in [
        format!("/appointments/{}?user_id=9", appointment.id),
        format!("/doctors/{}?user_id=9", doctor.id),
        format!("/users/{}?user_id=9", user.id),
    ] {
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(&uri)
                    .body(Body::empty())
                    .expect("build request"),
            )
            .await
            .expect("response");
        assert_eq!(resp.status(), StatusCode::NO_CONTENT, "DELETE {}", uri);
    }

    let records = services.audit.recent().await.expect("recent");
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.action == "delete"));
    assert!(records.iter().all(|r| r.user_id == 9));

    let mut kinds: Vec<&str> = records.iter().map(|r| r.resource_type.as_str()).collect();
    kinds.sort_unstable();
    assert_eq!(kinds, ["appointment", "doctor", "user"]);
}

#[tokio::test]
async fn failed_mutations_record_nothing() {
    let (services, _) = setup().await;

    // Delete of a missing row fails before anything is written.
    let err = services.customers.delete(999, Some(1)).await.unwrap_err();
    assert!(matches!(err, DomainError::CustomerNotFound { .. }));

    // Validation rejects the create before the primary write.
    let mut bad = sample_customer();
    bad.email = "not-an-email".to_string();
    let err = services.customers.create(bad, Some(1)).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidEmail { .. }));

    // Same over HTTP: a 404 delete leaves no record even with an actor.
    let app = routes::router(services.clone());
    let resp = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/doctors/999?user_id=1")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("response");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let records = services.audit.recent().await.expect("recent");
    assert!(records.is_empty());
}

#[tokio::test]
async fn recent_is_capped_and_newest_first() {
    let (services, audit_repo) = setup().await;

    let total = RECENT_AUDIT_LIMIT + 10;
    for i in 0..total {
        audit_repo
            .append(NewAuditRecord {
                user_id: 1,
                action: AuditAction::Create,
                description: format!("entry {}", i),
                resource_type: ResourceKind::Customer,
                resource_id: i as i64,
                timestamp: Utc::now(),
            })
            .await
            .expect("append");
    }

    let records = services.audit.recent().await.expect("recent");
    assert_eq!(records.len(), RECENT_AUDIT_LIMIT as usize);

    // The newest appended entry comes back first.
    assert_eq!(records[0].resource_id, (total - 1) as i64);
    for pair in records.windows(2) {
        assert!(pair[0].id > pair[1].id);
    }
}
