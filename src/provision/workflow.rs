//! Backup-Then-Provision Workflow
//!
//! The linear driver behind one provisioning run:
//!
//! 1. Validate the conda install root.
//! 2. If the target environment already exists, offer a backup clone,
//!    a skip, or an abort.
//! 3. Recreate the environment and install its packages as one bash
//!    stage: create, activate, channel configuration, pinned base
//!    packages, then either the development tooling plus secondary-index
//!    packages or the application package.
//! 4. Unwind both levels of activation and wait for a final keystroke.
//!
//! Every delegated command is fatal on failure; there is no retry and no
//! rollback of partially created environments.

use log::info;

use crate::config::RunConfig;
use crate::environment::conda::{self, CondaInstall};
use crate::error::SetupError;
use crate::prompt::{self, BackupChoice};

use super::manifest::Manifests;
use super::script;

/// Drives one provisioning run for a confirmed configuration.
pub struct Provisioner {
    config: RunConfig,
    manifests: Manifests,
}

impl Provisioner {
    /// Creates a provisioner for a confirmed configuration.
    pub fn new(config: RunConfig, manifests: Manifests) -> Self {
        Self { config, manifests }
    }

    /// Runs the workflow to completion.
    ///
    /// # Errors
    ///
    /// * [`SetupError::CondaNotFound`] - install root has no activation script
    /// * [`SetupError::Aborted`] - operator chose to abort at the backup prompt
    /// * [`SetupError::StageFailed`] - a delegated conda command failed
    pub fn run(&self) -> Result<(), SetupError> {
        let conda = CondaInstall::locate(self.config.conda_dir.clone())?;

        if self.needs_backup_prompt(&conda) {
            let target_exists = conda.env_exists(&self.config.backup_name);
            match prompt::ask_backup(
                &self.config.env_name,
                &self.config.backup_name,
                target_exists,
            )? {
                BackupChoice::Backup => self.backup(&conda)?,
                BackupChoice::Skip => info!("Proceeding without a backup"),
                BackupChoice::Abort => return Err(SetupError::Aborted),
            }
        } else {
            info!(
                "Environment '{}' does not exist yet - nothing to back up",
                self.config.env_name
            );
        }

        info!(
            "Provisioning environment '{}' ({} dependencies)",
            self.config.env_name,
            if self.config.dev_mode { "development" } else { "release" }
        );
        script::run_stage(
            "provision",
            &conda.activation_script(),
            &self.provision_commands(),
        )?;

        info!("Environment '{}' is ready", self.config.env_name);
        prompt::wait_for_enter()?;
        Ok(())
    }

    /// The backup prompt is only presented when the target environment
    /// already exists.
    pub fn needs_backup_prompt(&self, conda: &CondaInstall) -> bool {
        conda.env_exists(&self.config.env_name)
    }

    /// Clones the existing environment into the backup name.
    fn backup(&self, conda: &CondaInstall) -> Result<(), SetupError> {
        info!(
            "Backing up '{}' as '{}'",
            self.config.env_name, self.config.backup_name
        );
        script::run_stage(
            "backup",
            &conda.activation_script(),
            &[conda::clone_command(
                &self.config.env_name,
                &self.config.backup_name,
            )],
        )
    }

    /// Composes the command sequence for the provisioning stage.
    ///
    /// The environment is recreated unconditionally, channel settings are
    /// configured before any install, and the stage always ends with two
    /// deactivations unwinding the created environment and base.
    pub fn provision_commands(&self) -> Vec<String> {
        let mut commands = vec![
            conda::activate_command("base"),
            conda::create_command(&self.config.env_name),
            conda::activate_command(&self.config.env_name),
            conda::add_channel_command(&self.manifests.channel),
            conda::strict_priority_command(),
            conda::install_command(&self.manifests.base),
        ];

        if self.config.dev_mode {
            commands.push(conda::install_command(&self.manifests.dev_tools));
            commands.push(conda::pip_install_command(&self.manifests.pip));
        } else {
            commands.push(conda::install_command(&[self.manifests.application.clone()]));
        }

        commands.push(conda::deactivate_command());
        commands.push(conda::deactivate_command());
        commands
    }
}
