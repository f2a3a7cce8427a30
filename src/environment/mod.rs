//! Environment Management Module
//!
//! Handles the conda installation this tool provisions into: install-root
//! validation, environment existence checks, and composition of the
//! delegated conda command lines.

pub mod conda;

pub use conda::{
    activate_command, add_channel_command, clone_command, create_command, deactivate_command,
    install_command, pip_install_command, strict_priority_command, CondaInstall,
    ACTIVATION_SCRIPT_RELPATH,
};
