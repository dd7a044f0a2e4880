// Library for tests to access modules

pub mod config;
pub mod error;
pub mod host_repo;
pub mod models;
pub mod telemetry_client;
pub mod worker;
