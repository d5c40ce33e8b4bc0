//! Traits for the collaborators the workflow talks to

use async_trait::async_trait;
use serde_json::Value;

use crate::model::{OrderHandoffRequest, RateRequest, Warehouse};
use shipwise_types::{Error, HandoffError, RateFetchError};

/// External rating service
#[async_trait]
pub trait RateService: Send + Sync {
    /// Send one pricing request and return the raw response body.
    ///
    /// The body is unchecked; callers normalize it before use.
    async fn calculate(&self, request: &RateRequest) -> Result<Value, RateFetchError>;
}

/// Order creation / payment collaborator that receives the chosen charges
#[async_trait]
pub trait OrderHandoff: Send + Sync {
    async fn hand_off(&self, order: &OrderHandoffRequest) -> Result<(), HandoffError>;
}

/// Directory of pickup warehouses
pub trait WarehouseRepository {
    /// All warehouses, in file order
    fn find_all(&self) -> Result<Vec<Warehouse>, Error>;

    /// Find a warehouse by id
    fn find_by_id(&self, id: &str) -> Result<Option<Warehouse>, Error>;

    /// The warehouse flagged as default, if any
    fn find_default(&self) -> Result<Option<Warehouse>, Error>;
}
