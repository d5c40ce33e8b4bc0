//! Application service layer - config, rate coordination, shipping workflow

pub mod config;
pub mod rate_coordinator;
pub mod repository;
pub mod workflow;

pub use config::Config;
pub use rate_coordinator::RateQueryCoordinator;
pub use workflow::{
    RateOutcome, ShipmentInputs, ShippingWorkflow, SubmitError, WorkflowError, WorkflowPhase,
};
