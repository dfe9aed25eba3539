pub mod appointment;
pub mod audit_log;
pub mod customer;
pub mod doctor;
pub mod user;
