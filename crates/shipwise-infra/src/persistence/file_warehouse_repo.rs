//! File-based implementation of WarehouseRepository

use std::path::PathBuf;

use shipwise_domain::model::Warehouse;
use shipwise_domain::repository::WarehouseRepository;
use shipwise_types::Error;

use crate::warehouse_loader::WarehouseLoader;

/// File-based warehouse repository (TOML)
pub struct FileWarehouseRepository {
    toml_path: PathBuf,
    loader: WarehouseLoader,
}

impl FileWarehouseRepository {
    /// Create a new repository from a TOML file path
    pub fn new(toml_path: PathBuf) -> Result<Self, Error> {
        let loader = WarehouseLoader::load_from_file(&toml_path)?;
        Ok(Self { toml_path, loader })
    }

    /// An empty directory, used when no warehouse file is configured
    pub fn empty() -> Self {
        Self {
            toml_path: PathBuf::new(),
            loader: WarehouseLoader::default(),
        }
    }

    /// Reload data from TOML
    pub fn reload(&mut self) -> Result<(), Error> {
        self.loader = WarehouseLoader::load_from_file(&self.toml_path)?;
        Ok(())
    }
}

impl WarehouseRepository for FileWarehouseRepository {
    fn find_all(&self) -> Result<Vec<Warehouse>, Error> {
        Ok(self.loader.all().to_vec())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Warehouse>, Error> {
        Ok(self.loader.get(id).cloned())
    }

    fn find_default(&self) -> Result<Option<Warehouse>, Error> {
        Ok(self.loader.default_warehouse().cloned())
    }
}
