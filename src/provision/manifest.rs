//! Package Manifests
//!
//! The fixed package sets installed by the provisioning workflow, kept as
//! static configuration data rather than logic. A JSON file passed via
//! `--manifest` overrides any subset of the tables; omitted fields keep
//! their built-in values.

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// Channel added to the environment's configuration before installing.
const DEFAULT_CHANNEL: &str = "conda-forge";

/// Base packages installed in every run, with fixed version pins.
const BASE_PACKAGES: &[&str] = &[
    "python=3.10",
    "pip=23.0",
    "gdal=3.6.2",
    "geopandas=0.12.2",
    "owslib=0.27.2",
    "pillow=9.4.0",
    "pyproj=3.4.1",
    "rasterio=1.3.4",
];

/// Development-only tooling, installed in dev mode.
const DEV_TOOLS: &[&str] = &["pylint=2.16.1", "pytest=7.2.1", "rope=1.7.0"];

/// Packages unavailable through the primary channel, installed from PyPI
/// in dev mode. Version ranges rather than pins.
const PIP_PACKAGES: &[&str] = &[
    "segmentation-models>=1.0,<1.1",
    "tensorflow>=2.11,<2.12",
    "pygeoops>=0.2,<1",
];

/// The downstream application package, installed in release mode.
const APPLICATION_PACKAGE: &str = "orthoseg";

/// Package manifests consumed by the provisioning workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifests {
    /// Additional channel configured for the environment.
    #[serde(default = "default_channel")]
    pub channel: String,

    /// Pinned base packages, installed in every run.
    #[serde(default = "default_base")]
    pub base: Vec<String>,

    /// Development tooling, dev mode only.
    #[serde(default = "default_dev_tools")]
    pub dev_tools: Vec<String>,

    /// Secondary-index (PyPI) packages with version ranges, dev mode only.
    #[serde(default = "default_pip")]
    pub pip: Vec<String>,

    /// Application package, release mode only.
    #[serde(default = "default_application")]
    pub application: String,
}

fn default_channel() -> String {
    DEFAULT_CHANNEL.to_string()
}

fn default_base() -> Vec<String> {
    BASE_PACKAGES.iter().map(|s| s.to_string()).collect()
}

fn default_dev_tools() -> Vec<String> {
    DEV_TOOLS.iter().map(|s| s.to_string()).collect()
}

fn default_pip() -> Vec<String> {
    PIP_PACKAGES.iter().map(|s| s.to_string()).collect()
}

fn default_application() -> String {
    APPLICATION_PACKAGE.to_string()
}

impl Default for Manifests {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            base: default_base(),
            dev_tools: default_dev_tools(),
            pip: default_pip(),
            application: default_application(),
        }
    }
}

impl Manifests {
    /// Loads manifests from a JSON override file.
    ///
    /// Fields absent from the file keep their built-in values.
    pub fn from_file(path: &Path) -> Result<Self, SetupError> {
        let content = fs::read_to_string(path)?;
        let manifests = serde_json::from_str(&content).map_err(|source| {
            SetupError::ManifestParse {
                path: path.to_path_buf(),
                source,
            }
        })?;

        info!("Loaded manifest override from {}", path.display());
        Ok(manifests)
    }

    /// Resolves manifests: the override file when given, the built-in
    /// tables otherwise.
    pub fn resolve(path: Option<&Path>) -> Result<Self, SetupError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
