//! Catalog seed file
//!
//! JSON document loaded by the store binary at startup:
//!
//! ```json
//! {
//!   "restaurants": [{ "id": 1, "name": "Trattoria" }],
//!   "tables": [{ "id": 5, "restaurantId": 1, "capacity": 4, "depositAmount": 10 }],
//!   "services": [{ "id": 3, "restaurantId": 1, "name": "Cake", "price": 25 }]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use shared::models::{DiningTable, Restaurant, ServiceItem};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid seed file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub restaurants: Vec<Restaurant>,
    #[serde(default)]
    pub tables: Vec<DiningTable>,
    #[serde(default)]
    pub services: Vec<ServiceItem>,
}

impl CatalogSeed {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
            path: display,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "restaurants": [{{ "id": 1, "name": "Trattoria" }}],
                "tables": [{{ "id": 5, "restaurantId": 1, "capacity": 4, "depositAmount": 10 }}]
            }}"#
        )
        .unwrap();

        let seed = CatalogSeed::from_file(file.path()).unwrap();
        assert_eq!(seed.restaurants.len(), 1);
        assert_eq!(seed.tables[0].capacity, 4);
        assert!(seed.services.is_empty());
    }

    #[test]
    fn test_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(CatalogSeed::from_file(&missing), Err(SeedError::Io { .. })));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(CatalogSeed::from_file(&bad), Err(SeedError::Parse { .. })));
    }
}
