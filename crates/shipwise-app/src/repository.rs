//! Wiring of infra adapters from [`Config`]

use std::sync::Arc;

use shipwise_infra::http::{HttpOrderHandoff, HttpRateService};
use shipwise_infra::persistence::FileWarehouseRepository;
use shipwise_types::Result;
use tracing::debug;

use crate::config::Config;
use crate::rate_coordinator::RateQueryCoordinator;
use crate::workflow::ShippingWorkflow;

/// Open the warehouse directory; a missing file yields an empty directory
pub fn open_warehouse_repo(config: &Config) -> Result<FileWarehouseRepository> {
    let path = config.warehouses_path()?;
    if !path.exists() {
        debug!(path = %path.display(), "no warehouse file, using empty directory");
        return Ok(FileWarehouseRepository::empty());
    }
    FileWarehouseRepository::new(path)
}

/// Open the HTTP rating client
pub fn open_rate_service(config: &Config) -> Result<HttpRateService> {
    HttpRateService::from_config(&config.api_config()?).map_err(Into::into)
}

/// Open the HTTP order hand-off client
pub fn open_order_handoff(config: &Config) -> Result<HttpOrderHandoff> {
    HttpOrderHandoff::from_config(&config.api_config()?).map_err(Into::into)
}

pub fn open_rate_coordinator(config: &Config) -> Result<RateQueryCoordinator> {
    let service = open_rate_service(config)?;
    Ok(RateQueryCoordinator::new(Arc::new(service)).with_include_rto(config.include_rto))
}

/// Build a workflow backed by the configured HTTP services
pub fn open_workflow(config: &Config) -> Result<ShippingWorkflow> {
    let coordinator = open_rate_coordinator(config)?;
    let handoff = open_order_handoff(config)?;
    Ok(ShippingWorkflow::new(coordinator, Arc::new(handoff)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipwise_domain::repository::WarehouseRepository;

    #[test]
    fn test_missing_warehouse_file_is_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            warehouses_file: Some(dir.path().join("warehouses.toml")),
            ..Config::default()
        };
        let repo = open_warehouse_repo(&config).unwrap();
        assert!(repo.find_all().unwrap().is_empty());
    }

    #[test]
    fn test_warehouse_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warehouses.toml");
        std::fs::write(
            &path,
            "[[warehouses]]\nid = \"WH-1\"\nname = \"Main\"\npincode = \"110020\"\ndefault = true\n",
        )
        .unwrap();
        let config = Config {
            warehouses_file: Some(path),
            ..Config::default()
        };
        let repo = open_warehouse_repo(&config).unwrap();
        assert_eq!(repo.find_default().unwrap().unwrap().id, "WH-1");
    }

    #[test]
    fn test_workflow_wiring_rejects_bad_url() {
        let config = Config {
            api_base_url: "nope".into(),
            ..Config::default()
        };
        assert!(open_workflow(&config).is_err());
        assert!(open_rate_coordinator(&Config::default()).is_ok());
    }
}
