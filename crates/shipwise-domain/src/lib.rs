//! Domain layer for courier rate selection: models, pure services, and the
//! traits the outside world (rating service, order service, warehouse
//! directory) is reached through.

pub mod model;
pub mod repository;
pub mod service;
