//! Provisioning Script Execution
//!
//! Runs each workflow stage as a throwaway bash script so that conda
//! activation behaves exactly as it does in an interactive shell: the
//! script sources the installation's activation script first, `set -e`
//! stops at the first failing command, and the whole activate → install →
//! deactivate sequence shares one shell process.
//!
//! Script output is inherited rather than captured, so the operator
//! watches conda's own progress and diagnostics live.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, warn};

use crate::error::SetupError;

/// Directory under the system temp dir holding generated scripts.
const SCRIPT_DIR_NAME: &str = "orthosetup_scripts";

/// Writes the bash script for one stage.
///
/// The script sources `activation_script` before the stage commands so
/// `conda activate`/`conda deactivate` are available.
pub fn create_stage_script(
    tag: &str,
    activation_script: &Path,
    commands: &[String],
) -> Result<PathBuf, SetupError> {
    let script_dir = std::env::temp_dir().join(SCRIPT_DIR_NAME);
    fs::create_dir_all(&script_dir)?;

    let script_path = script_dir.join(format!("{}.sh", tag));
    let mut file = File::create(&script_path)?;

    writeln!(file, "#!/bin/bash")?;
    writeln!(file, "set -e")?;
    writeln!(file, "source '{}'", activation_script.display())?;
    for command in commands {
        writeln!(file, "{}", command)?;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&script_path, fs::Permissions::from_mode(0o755))?;
    }

    Ok(script_path)
}

/// Runs one workflow stage to completion.
///
/// # Errors
///
/// Returns [`SetupError::StageFailed`] with the script's exit code when
/// any command in the stage fails. No cleanup of partially created state
/// is attempted.
pub fn run_stage(
    tag: &str,
    activation_script: &Path,
    commands: &[String],
) -> Result<(), SetupError> {
    let script_path = create_stage_script(tag, activation_script, commands)?;
    debug!("Running {} stage script: {}", tag, script_path.display());

    let status = Command::new("bash").arg(&script_path).status()?;

    if let Err(e) = fs::remove_file(&script_path) {
        warn!("Failed to clean up script {}: {}", script_path.display(), e);
    }

    if status.success() {
        debug!("Stage '{}' completed successfully", tag);
        Ok(())
    } else {
        Err(SetupError::StageFailed {
            stage: tag.to_string(),
            code: status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Writes a no-op activation script usable by the generated scripts.
    fn stub_activation(dir: &Path) -> PathBuf {
        let script = dir.join("conda.sh");
        fs::write(&script, "# stub activation\n").unwrap();
        script
    }

    #[test]
    fn test_create_stage_script_content() {
        let temp_dir = tempdir().unwrap();
        let activation = stub_activation(temp_dir.path());

        let commands = vec![
            "conda activate 'base'".to_string(),
            "conda create -y --name 'demo'".to_string(),
        ];
        let script_path =
            create_stage_script("test_content", &activation, &commands).unwrap();

        let content = fs::read_to_string(&script_path).unwrap();
        assert!(content.starts_with("#!/bin/bash\n"));
        assert!(content.contains("set -e"));
        assert!(content.contains(&format!("source '{}'", activation.display())));
        assert!(content.contains("conda create -y --name 'demo'"));

        fs::remove_file(script_path).unwrap();
    }

    #[test]
    fn test_run_stage_success() {
        let temp_dir = tempdir().unwrap();
        let activation = stub_activation(temp_dir.path());
        let marker = temp_dir.path().join("ran.txt");

        let commands = vec![format!("echo done > '{}'", marker.display())];
        let result = run_stage("test_success", &activation, &commands);

        assert!(result.is_ok());
        assert!(marker.exists());
    }

    #[test]
    fn test_run_stage_failure_propagates_exit_code() {
        let temp_dir = tempdir().unwrap();
        let activation = stub_activation(temp_dir.path());

        let commands = vec!["exit 3".to_string()];
        let result = run_stage("test_failure", &activation, &commands);

        match result {
            Err(SetupError::StageFailed { stage, code }) => {
                assert_eq!(stage, "test_failure");
                assert_eq!(code, Some(3));
            }
            other => panic!("expected StageFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_run_stage_stops_at_first_failure() {
        let temp_dir = tempdir().unwrap();
        let activation = stub_activation(temp_dir.path());
        let marker = temp_dir.path().join("after_failure.txt");

        let commands = vec![
            "false".to_string(),
            format!("echo reached > '{}'", marker.display()),
        ];
        let result = run_stage("test_set_e", &activation, &commands);

        assert!(result.is_err());
        assert!(!marker.exists());
    }

    #[test]
    fn test_run_stage_removes_script() {
        let temp_dir = tempdir().unwrap();
        let activation = stub_activation(temp_dir.path());

        run_stage("test_cleanup", &activation, &["true".to_string()]).unwrap();

        let script_path = std::env::temp_dir()
            .join(SCRIPT_DIR_NAME)
            .join("test_cleanup.sh");
        assert!(!script_path.exists());
    }
}
