//! Conda Installation Access
//!
//! Validates the conda install root this tool provisions into and composes
//! the command lines delegated to conda. The commands themselves run inside
//! a generated bash script that sources the installation's activation
//! script first, so activation and deactivation behave as they would in an
//! interactive shell.
//!
//! Environment existence is a directory check under `envs/`; there is no
//! introspection beyond that.

use std::path::{Path, PathBuf};

use log::debug;

use crate::error::SetupError;

/// Location of the activation script relative to the install root.
pub const ACTIVATION_SCRIPT_RELPATH: &str = "etc/profile.d/conda.sh";

/// A validated conda installation.
///
/// Construction fails if the install root does not contain the activation
/// script, which every delegated command depends on.
#[derive(Debug, Clone)]
pub struct CondaInstall {
    root: PathBuf,
}

impl CondaInstall {
    /// Validates `root` as a conda installation.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::CondaNotFound`] when
    /// `<root>/etc/profile.d/conda.sh` does not exist.
    pub fn locate(root: impl Into<PathBuf>) -> Result<Self, SetupError> {
        let root = root.into();
        let script = root.join(ACTIVATION_SCRIPT_RELPATH);

        if !script.is_file() {
            return Err(SetupError::CondaNotFound(script));
        }

        debug!("Using conda installation at {}", root.display());
        Ok(Self { root })
    }

    /// The install root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the activation script sourced at the top of every
    /// generated provisioning script.
    pub fn activation_script(&self) -> PathBuf {
        self.root.join(ACTIVATION_SCRIPT_RELPATH)
    }

    /// Directory holding named environments.
    pub fn envs_dir(&self) -> PathBuf {
        self.root.join("envs")
    }

    /// On-disk path of a named environment.
    pub fn env_path(&self, name: &str) -> PathBuf {
        self.envs_dir().join(name)
    }

    /// Whether a named environment already exists.
    pub fn env_exists(&self, name: &str) -> bool {
        self.env_path(name).is_dir()
    }
}

/// Single-quotes an argument for the generated bash script.
fn quoted(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', "'\\''"))
}

/// Joins package specifications into one quoted argument list.
fn quoted_list(specs: &[String]) -> String {
    specs
        .iter()
        .map(|spec| quoted(spec))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Command creating (or destructively recreating) a named environment.
pub fn create_command(env_name: &str) -> String {
    format!("conda create -y --name {}", quoted(env_name))
}

/// Command cloning `source` into `backup`.
pub fn clone_command(source: &str, backup: &str) -> String {
    format!(
        "conda create -y --name {} --clone {}",
        quoted(backup),
        quoted(source)
    )
}

/// Command activating a named environment.
pub fn activate_command(env_name: &str) -> String {
    format!("conda activate {}", quoted(env_name))
}

/// Command unwinding one level of environment activation.
pub fn deactivate_command() -> String {
    "conda deactivate".to_string()
}

/// Command adding a channel to the active environment's configuration.
pub fn add_channel_command(channel: &str) -> String {
    format!("conda config --env --add channels {}", quoted(channel))
}

/// Command enabling strict channel priority for the active environment.
pub fn strict_priority_command() -> String {
    "conda config --env --set channel_priority strict".to_string()
}

/// Command installing packages into the active environment.
pub fn install_command(specs: &[String]) -> String {
    format!("conda install -y {}", quoted_list(specs))
}

/// Command installing packages from the secondary index (PyPI) into the
/// active environment.
pub fn pip_install_command(specs: &[String]) -> String {
    format!("python -m pip install {}", quoted_list(specs))
}
