//! Loading a machine's initial load-out from a JSON file.
//!
//! ```json
//! {
//!   "productList": [{ "id": "A1", "name": "Water", "price": 120, "stock": 5 }],
//!   "coinInventory": { "100": 10, "50": 10 }
//! }
//! ```

use std::path::{Path, PathBuf};
use tracing::info;
use vending_core::{MachineConfig, VendingError};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid configuration in {path}: {source}")]
    Invalid { path: PathBuf, source: VendingError },
}

/// Reads and validates a [`MachineConfig`].
pub fn load_config(path: &Path) -> Result<MachineConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: MachineConfig = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate().map_err(|source| ConfigError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        products = config.product_list.len(),
        "Loaded machine config"
    );
    Ok(config)
}
