//! OrthoSetup - Interactive Conda Environment Provisioning
//!
//! A command-line tool that provisions the conda environment for the
//! orthoseg segmentation toolkit: it resolves a run configuration from
//! flags and defaults, confirms it with the operator, optionally clones a
//! pre-existing environment as a backup, then recreates the environment
//! and installs its packages through a fixed sequence of delegated conda
//! commands.
//!
//! # Architecture
//!
//! The library is organized into five modules:
//!
//! - [`config`]: command-line argument and default resolution
//! - [`prompt`]: interactive confirmation gates
//! - [`provision`]: the backup-then-provision workflow, package
//!   manifests, and bash script execution
//! - [`environment`]: conda install validation and command composition
//! - [`error`]: the crate-wide error taxonomy
//!
//! # Example
//!
//! ```rust,no_run
//! use orthosetup::config::{resolve_arguments, Resolution};
//! use orthosetup::provision::{Manifests, Provisioner};
//!
//! fn main() -> Result<(), orthosetup::SetupError> {
//!     let args: Vec<String> = std::env::args().collect();
//!
//!     if let Resolution::Run(config) = resolve_arguments(&args)? {
//!         let manifests = Manifests::resolve(config.manifest_path.as_deref())?;
//!         Provisioner::new(config, manifests).run()?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod environment;
pub mod error;
pub mod prompt;
pub mod provision;

// Re-export commonly used types
pub use config::{resolve_arguments, Resolution, RunConfig};
pub use environment::conda::CondaInstall;
pub use error::SetupError;
pub use provision::{Manifests, Provisioner};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "OrthoSetup";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_app_name() {
        assert_eq!(APP_NAME, "OrthoSetup");
    }

    #[test]
    fn test_module_exports_config() {
        let args = vec!["orthosetup".to_string()];
        let resolution = resolve_arguments(&args).unwrap();
        assert!(matches!(resolution, Resolution::Run(_)));
    }

    #[test]
    fn test_module_exports_manifests() {
        let manifests = Manifests::default();
        assert!(!manifests.base.is_empty());
    }

    #[test]
    fn test_version_format() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
        for part in parts {
            assert!(part.parse::<u32>().is_ok(), "Version components should be numeric");
        }
    }
}
