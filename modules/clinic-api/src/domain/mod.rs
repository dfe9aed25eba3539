pub mod audit;
pub mod error;
pub mod model;
pub mod repo;
pub mod service;
