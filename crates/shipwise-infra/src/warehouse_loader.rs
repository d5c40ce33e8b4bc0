//! Warehouse directory loaded from TOML
//!
//! ```toml
//! [[warehouses]]
//! id = "WH-DEL-01"
//! name = "Okhla Phase II"
//! pincode = "110020"
//! default = true
//! ```

use serde::Deserialize;
use shipwise_domain::model::Warehouse;
use shipwise_types::{ConfigError, Error, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Container for parsing warehouses.toml
#[derive(Debug, Deserialize)]
struct WarehouseFile {
    #[serde(default)]
    warehouses: Vec<Warehouse>,
}

/// Pickup warehouses in file order
#[derive(Debug, Clone, Default)]
pub struct WarehouseLoader {
    warehouses: Vec<Warehouse>,
}

impl WarehouseLoader {
    /// Load the directory from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to read warehouse file: {}",
                e
            )))
        })?;

        Self::load_from_str(&content)
    }

    /// Load the directory from a TOML string
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let file: WarehouseFile = toml::from_str(toml_content).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to parse warehouse TOML: {}",
                e
            )))
        })?;

        let mut seen = HashSet::new();
        for w in &file.warehouses {
            if !seen.insert(w.id.as_str()) {
                return Err(ConfigError::ParseError(format!("duplicate warehouse id {:?}", w.id)).into());
            }
        }
        if file.warehouses.iter().filter(|w| w.default).count() > 1 {
            return Err(
                ConfigError::ParseError("more than one warehouse is marked default".into()).into(),
            );
        }

        Ok(Self {
            warehouses: file.warehouses,
        })
    }

    pub fn get(&self, id: &str) -> Option<&Warehouse> {
        self.warehouses.iter().find(|w| w.id == id)
    }

    pub fn default_warehouse(&self) -> Option<&Warehouse> {
        self.warehouses.iter().find(|w| w.default)
    }

    pub fn all(&self) -> &[Warehouse] {
        &self.warehouses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[warehouses]]
id = "WH-DEL-01"
name = "Okhla Phase II"
pincode = "110020"
default = true

[[warehouses]]
id = "WH-BLR-02"
name = "Peenya"
pincode = "560058"
"#;

    #[test]
    fn test_load_from_str() {
        let loader = WarehouseLoader::load_from_str(SAMPLE).unwrap();
        assert_eq!(loader.all().len(), 2);
        assert_eq!(loader.all()[0].id, "WH-DEL-01");
        assert_eq!(loader.get("WH-BLR-02").unwrap().pincode.as_str(), "560058");
        assert!(loader.get("missing").is_none());
        assert_eq!(loader.default_warehouse().unwrap().id, "WH-DEL-01");
    }

    #[test]
    fn test_empty_file_is_empty_directory() {
        let loader = WarehouseLoader::load_from_str("").unwrap();
        assert!(loader.all().is_empty());
        assert!(loader.default_warehouse().is_none());
    }

    #[test]
    fn test_invalid_pincode_is_rejected() {
        let toml = r#"
[[warehouses]]
id = "X"
name = "Bad"
pincode = "1100"
"#;
        let err = WarehouseLoader::load_from_str(toml).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let toml = r#"
[[warehouses]]
id = "X"
name = "A"
pincode = "110001"

[[warehouses]]
id = "X"
name = "B"
pincode = "110002"
"#;
        assert!(WarehouseLoader::load_from_str(toml).is_err());
    }

    #[test]
    fn test_two_defaults_rejected() {
        let toml = r#"
[[warehouses]]
id = "A"
name = "A"
pincode = "110001"
default = true

[[warehouses]]
id = "B"
name = "B"
pincode = "110002"
default = true
"#;
        assert!(WarehouseLoader::load_from_str(toml).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = WarehouseLoader::load_from_file(Path::new("/nonexistent/warehouses.toml"))
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }
}
