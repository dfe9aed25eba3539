//! SeaORM-backed implementations of the domain repository ports.

use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryOrder,
    QuerySelect, RelationTrait, Set,
};

use crate::domain::model::{
    Appointment, AppointmentDetails, AuditRecord, Customer, Doctor, NewAppointment, NewAuditRecord,
    NewCustomer, NewDoctor, NewUser, User,
};
use crate::domain::repo::{
    AppointmentsRepository, AuditLogRepository, CustomersRepository, DoctorsRepository,
    UsersRepository,
};
use crate::infra::storage::entity::{appointment, audit_log, customer, doctor, user};

pub struct SeaOrmCustomersRepository {
    db: DatabaseConnection,
}

impl SeaOrmCustomersRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomersRepository for SeaOrmCustomersRepository {
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Customer>> {
        let found = customer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("customers find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Customer>> {
        let rows = customer::Entity::find()
            .order_by_asc(customer::Column::Id)
            .all(&self.db)
            .await
            .context("customers list_all failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, c: NewCustomer) -> anyhow::Result<Customer> {
        let m = customer::ActiveModel {
            name: Set(c.name),
            email: Set(c.email),
            phone: Set(c.phone),
            address: Set(c.address),
            dob: Set(c.dob),
            place_of_birth: Set(c.place_of_birth),
            ..Default::default()
        };
        let inserted = m.insert(&self.db).await.context("customers insert failed")?;
        Ok(inserted.into())
    }

    async fn update(&self, c: Customer) -> anyhow::Result<()> {
        let m = customer::ActiveModel {
            id: Set(c.id),
            name: Set(c.name),
            email: Set(c.email),
            phone: Set(c.phone),
            address: Set(c.address),
            dob: Set(c.dob),
            place_of_birth: Set(c.place_of_birth),
        };
        let _ = m.update(&self.db).await.context("customers update failed")?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = customer::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("customers delete failed")?;
        Ok(res.rows_affected > 0)
    }
}

pub struct SeaOrmDoctorsRepository {
    db: DatabaseConnection,
}

impl SeaOrmDoctorsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DoctorsRepository for SeaOrmDoctorsRepository {
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Doctor>> {
        let found = doctor::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("doctors find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Doctor>> {
        let rows = doctor::Entity::find()
            .order_by_asc(doctor::Column::Id)
            .all(&self.db)
            .await
            .context("doctors list_all failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, d: NewDoctor) -> anyhow::Result<Doctor> {
        let m = doctor::ActiveModel {
            name: Set(d.name),
            specialization: Set(d.specialization),
            email: Set(d.email),
            phone_number: Set(d.phone_number),
            rating: Set(d.rating),
            password: Set(d.password),
            ..Default::default()
        };
        let inserted = m.insert(&self.db).await.context("doctors insert failed")?;
        Ok(inserted.into())
    }

    async fn update(&self, d: Doctor) -> anyhow::Result<()> {
        let m = doctor::ActiveModel {
            id: Set(d.id),
            name: Set(d.name),
            specialization: Set(d.specialization),
            email: Set(d.email),
            phone_number: Set(d.phone_number),
            rating: Set(d.rating),
            password: Set(d.password),
        };
        let _ = m.update(&self.db).await.context("doctors update failed")?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = doctor::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("doctors delete failed")?;
        Ok(res.rows_affected > 0)
    }
}

/// Row shape for the joined appointment listing.
#[derive(Debug, FromQueryResult)]
struct AppointmentDetailsRow {
    id: i64,
    doctor_name: String,
    customer_name: String,
    appointment_date: NaiveDateTime,
    status: String,
}

pub struct SeaOrmAppointmentsRepository {
    db: DatabaseConnection,
}

impl SeaOrmAppointmentsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AppointmentsRepository for SeaOrmAppointmentsRepository {
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Appointment>> {
        let found = appointment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("appointments find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn list_detailed(&self) -> anyhow::Result<Vec<AppointmentDetails>> {
        let rows = appointment::Entity::find()
            .join(JoinType::InnerJoin, appointment::Relation::Doctor.def())
            .join(JoinType::InnerJoin, appointment::Relation::Customer.def())
            .select_only()
            .column(appointment::Column::Id)
            .column_as(doctor::Column::Name, "doctor_name")
            .column_as(customer::Column::Name, "customer_name")
            .column(appointment::Column::AppointmentDate)
            .column(appointment::Column::Status)
            .order_by_asc(appointment::Column::Id)
            .into_model::<AppointmentDetailsRow>()
            .all(&self.db)
            .await
            .context("appointments list_detailed failed")?;

        Ok(rows
            .into_iter()
            .map(|r| AppointmentDetails {
                id: r.id,
                doctor_name: r.doctor_name,
                customer_name: r.customer_name,
                appointment_date: r.appointment_date,
                status: r.status,
            })
            .collect())
    }

    async fn insert(&self, a: NewAppointment) -> anyhow::Result<Appointment> {
        let m = appointment::ActiveModel {
            doctor_id: Set(a.doctor_id),
            patient_id: Set(a.patient_id),
            appointment_date: Set(a.appointment_date),
            status: Set(a.status),
            ..Default::default()
        };
        let inserted = m
            .insert(&self.db)
            .await
            .context("appointments insert failed")?;
        Ok(inserted.into())
    }

    async fn update(&self, a: Appointment) -> anyhow::Result<()> {
        let m = appointment::ActiveModel {
            id: Set(a.id),
            doctor_id: Set(a.doctor_id),
            patient_id: Set(a.patient_id),
            appointment_date: Set(a.appointment_date),
            status: Set(a.status),
        };
        let _ = m
            .update(&self.db)
            .await
            .context("appointments update failed")?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = appointment::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("appointments delete failed")?;
        Ok(res.rows_affected > 0)
    }
}

pub struct SeaOrmUsersRepository {
    db: DatabaseConnection,
}

impl SeaOrmUsersRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UsersRepository for SeaOrmUsersRepository {
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        let found = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("users find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        use sea_orm::{ColumnTrait, QueryFilter};

        let found = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("users find_by_email failed")?;
        Ok(found.map(Into::into))
    }

    async fn list_all(&self) -> anyhow::Result<Vec<User>> {
        let rows = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .context("users list_all failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, u: NewUser) -> anyhow::Result<User> {
        let m = user::ActiveModel {
            name: Set(u.name),
            email: Set(u.email),
            phone_number: Set(u.phone_number),
            role: Set(u.role),
            password: Set(u.password),
            ..Default::default()
        };
        let inserted = m.insert(&self.db).await.context("users insert failed")?;
        Ok(inserted.into())
    }

    async fn update(&self, u: User) -> anyhow::Result<()> {
        let m = user::ActiveModel {
            id: Set(u.id),
            name: Set(u.name),
            email: Set(u.email),
            phone_number: Set(u.phone_number),
            role: Set(u.role),
            password: Set(u.password),
        };
        let _ = m.update(&self.db).await.context("users update failed")?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("users delete failed")?;
        Ok(res.rows_affected > 0)
    }
}

pub struct SeaOrmAuditLogRepository {
    db: DatabaseConnection,
}

impl SeaOrmAuditLogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuditLogRepository for SeaOrmAuditLogRepository {
    async fn append(&self, rec: NewAuditRecord) -> anyhow::Result<()> {
        let m = audit_log::ActiveModel {
            user_id: Set(rec.user_id),
            action: Set(rec.action.as_str().to_string()),
            description: Set(rec.description),
            resource_type: Set(rec.resource_type.as_str().to_string()),
            resource_id: Set(rec.resource_id),
            timestamp: Set(rec.timestamp),
            ..Default::default()
        };
        let _ = m.insert(&self.db).await.context("audit append failed")?;
        Ok(())
    }

    async fn recent(&self, limit: u64) -> anyhow::Result<Vec<AuditRecord>> {
        let rows = audit_log::Entity::find()
            .order_by_desc(audit_log::Column::Timestamp)
            .order_by_desc(audit_log::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .context("audit recent failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
