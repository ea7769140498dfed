//! Application use cases. Orchestrate domain logic via ports.

pub mod relay_service;

pub use relay_service::RelayService;
