//! Argument & Default Resolver
//!
//! Parses the flat `--flag value` argument list into a [`RunConfig`] and
//! backfills unset fields with defaults computed at resolution time.
//!
//! All flags are optional and last-value-wins on repeat. An unrecognized
//! flag is a fatal error reported with the offending token. The backup
//! environment name defaults to `<envname>_bck_<YYYY-MM-DD>`, derived from
//! the resolved environment name and the current calendar date.

use std::path::PathBuf;

use chrono::Local;
use log::debug;
use once_cell::sync::Lazy;

use crate::error::SetupError;

/// Environment name used when `--envname` is not given.
pub const DEFAULT_ENV_NAME: &str = "orthoseg";

/// Directory name of the default conda installation under the home dir.
const DEFAULT_CONDA_DIRNAME: &str = "Miniconda3";

/// Lazily-resolved home directory, used for the default install root.
/// Falls back to USERPROFILE so the default also resolves on Windows.
static HOME_DIR: Lazy<Option<PathBuf>> = Lazy::new(|| {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .ok()
        .map(PathBuf::from)
});

/// Fully resolved configuration for one provisioning run.
///
/// Constructed by [`resolve_arguments`], presented to the operator for
/// confirmation, then consumed read-only. Never persisted.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Name of the environment to (re)create.
    pub env_name: String,

    /// Name of the backup environment used when cloning.
    pub backup_name: String,

    /// Conda installation root; must contain the activation script.
    pub conda_dir: PathBuf,

    /// Install development tooling instead of the application package.
    pub dev_mode: bool,

    /// Optional JSON file overriding the built-in package manifests.
    pub manifest_path: Option<PathBuf>,

    /// Enable debug-level logging.
    pub verbose: bool,
}

/// Outcome of argument resolution.
#[derive(Debug)]
pub enum Resolution {
    /// Run the provisioning workflow with this configuration.
    Run(RunConfig),
    /// Print usage and exit successfully.
    Help,
    /// Print version and exit successfully.
    Version,
}

/// Returns today's date formatted for backup environment names.
fn today_stamp() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Computes the default backup name for an environment name.
fn default_backup_name(env_name: &str) -> String {
    format!("{}_bck_{}", env_name, today_stamp())
}

/// Computes the default conda install root (`$HOME/Miniconda3`).
fn default_conda_dir() -> Result<PathBuf, SetupError> {
    HOME_DIR
        .as_ref()
        .map(|home| home.join(DEFAULT_CONDA_DIRNAME))
        .ok_or(SetupError::HomeNotSet)
}

/// Consumes the value following a flag, rejecting missing or empty values.
fn take_value(args: &[String], index: &mut usize, flag: &str) -> Result<String, SetupError> {
    *index += 1;
    let value = args
        .get(*index)
        .ok_or_else(|| SetupError::MissingValue(flag.to_string()))?;
    if value.is_empty() {
        return Err(SetupError::EmptyValue(flag.to_string()));
    }
    Ok(value.clone())
}

/// Parses a case-insensitive Y/N value into a boolean.
fn parse_dev_mode(flag: &str, value: &str) -> Result<bool, SetupError> {
    match value {
        v if v.eq_ignore_ascii_case("y") => Ok(true),
        v if v.eq_ignore_ascii_case("n") => Ok(false),
        _ => Err(SetupError::InvalidDevMode {
            flag: flag.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Parses command-line arguments into a [`Resolution`].
///
/// `args` is the full argument vector including the program name at
/// index 0. Recognized flags (long / short):
///
/// | Flag | Effect |
/// |---|---|
/// | `--envname` / `-e` | environment name |
/// | `--envname_backup` / `-eb` | backup environment name |
/// | `--condadir` / `-cd` | conda install root |
/// | `--fordev` / `-od` | `Y` or `N`; dev vs. release dependencies |
/// | `--manifest` / `-m` | JSON manifest override file |
/// | `--verbose` / `-v` | debug logging |
/// | `--help` / `-h` | usage |
/// | `--version` / `-V` | version |
///
/// # Errors
///
/// Returns a usage error for an unrecognized flag, a flag missing its
/// value, an empty name/path value, or a `--fordev` value other than
/// case-insensitive `y`/`n`.
pub fn resolve_arguments(args: &[String]) -> Result<Resolution, SetupError> {
    let mut env_name: Option<String> = None;
    let mut backup_name: Option<String> = None;
    let mut conda_dir: Option<PathBuf> = None;
    let mut dev_mode = false;
    let mut manifest_path: Option<PathBuf> = None;
    let mut verbose = false;

    let mut i = 1; // Skip program name
    while i < args.len() {
        let arg = args[i].as_str();

        match arg {
            "--help" | "-h" => return Ok(Resolution::Help),
            "--version" | "-V" => return Ok(Resolution::Version),
            "--verbose" | "-v" => {
                verbose = true;
            }
            "--envname" | "-e" => {
                env_name = Some(take_value(args, &mut i, arg)?);
            }
            "--envname_backup" | "-eb" => {
                backup_name = Some(take_value(args, &mut i, arg)?);
            }
            "--condadir" | "-cd" => {
                conda_dir = Some(PathBuf::from(take_value(args, &mut i, arg)?));
            }
            "--fordev" | "-od" => {
                let value = take_value(args, &mut i, arg)?;
                dev_mode = parse_dev_mode(arg, &value)?;
            }
            "--manifest" | "-m" => {
                manifest_path = Some(PathBuf::from(take_value(args, &mut i, arg)?));
            }
            _ => {
                return Err(SetupError::UnknownFlag(arg.to_string()));
            }
        }
        i += 1;
    }

    // Backfill defaults. The backup name depends on the resolved
    // environment name, so it is derived after all flags are consumed.
    let env_name = env_name.unwrap_or_else(|| DEFAULT_ENV_NAME.to_string());
    let backup_name = backup_name.unwrap_or_else(|| default_backup_name(&env_name));
    let conda_dir = match conda_dir {
        Some(dir) => dir,
        None => default_conda_dir()?,
    };

    debug!(
        "Resolved configuration: env='{}' backup='{}' condadir='{}' dev={}",
        env_name,
        backup_name,
        conda_dir.display(),
        dev_mode
    );

    Ok(Resolution::Run(RunConfig {
        env_name,
        backup_name,
        conda_dir,
        dev_mode,
        manifest_path,
        verbose,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(tail: &[&str]) -> Vec<String> {
        std::iter::once("orthosetup")
            .chain(tail.iter().copied())
            .map(String::from)
            .collect()
    }

    fn resolve(tail: &[&str]) -> RunConfig {
        match resolve_arguments(&argv(tail)).unwrap() {
            Resolution::Run(config) => config,
            other => panic!("expected Run, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults_with_no_flags() {
        let config = resolve(&[]);

        assert_eq!(config.env_name, "orthoseg");
        assert_eq!(config.backup_name, format!("orthoseg_bck_{}", today_stamp()));
        assert!(!config.dev_mode);
        assert!(config.manifest_path.is_none());
        assert!(!config.verbose);
        assert!(config.conda_dir.ends_with("Miniconda3"));
    }

    #[test]
    fn test_backup_default_follows_envname() {
        let config = resolve(&["--envname", "demo"]);

        assert_eq!(config.env_name, "demo");
        assert_eq!(config.backup_name, format!("demo_bck_{}", today_stamp()));
    }

    #[test]
    fn test_explicit_backup_name() {
        let config = resolve(&["--envname", "demo", "--envname_backup", "demo_keep"]);
        assert_eq!(config.backup_name, "demo_keep");
    }

    #[test]
    fn test_short_aliases() {
        let config = resolve(&["-e", "demo", "-eb", "bck", "-cd", "/opt/conda", "-od", "y"]);

        assert_eq!(config.env_name, "demo");
        assert_eq!(config.backup_name, "bck");
        assert_eq!(config.conda_dir, PathBuf::from("/opt/conda"));
        assert!(config.dev_mode);
    }

    #[test]
    fn test_last_value_wins() {
        let config = resolve(&["--envname", "first", "--envname", "second"]);
        assert_eq!(config.env_name, "second");
    }

    #[test]
    fn test_fordev_case_insensitive() {
        assert!(resolve(&["--fordev", "Y"]).dev_mode);
        assert!(resolve(&["--fordev", "y"]).dev_mode);
        assert!(!resolve(&["--fordev", "N"]).dev_mode);
        assert!(!resolve(&["--fordev", "n"]).dev_mode);
    }

    #[test]
    fn test_fordev_invalid_value() {
        let result = resolve_arguments(&argv(&["--fordev", "maybe"]));
        assert!(matches!(
            result,
            Err(SetupError::InvalidDevMode { ref value, .. }) if value == "maybe"
        ));
    }

    #[test]
    fn test_unknown_flag_is_fatal() {
        let result = resolve_arguments(&argv(&["--bogus"]));
        assert!(matches!(
            result,
            Err(SetupError::UnknownFlag(ref flag)) if flag == "--bogus"
        ));
    }

    #[test]
    fn test_missing_value() {
        let result = resolve_arguments(&argv(&["--envname"]));
        assert!(matches!(result, Err(SetupError::MissingValue(_))));
    }

    #[test]
    fn test_empty_value_rejected() {
        let result = resolve_arguments(&argv(&["--envname", ""]));
        assert!(matches!(result, Err(SetupError::EmptyValue(_))));
    }

    #[test]
    fn test_help_and_version() {
        assert!(matches!(
            resolve_arguments(&argv(&["--help"])).unwrap(),
            Resolution::Help
        ));
        assert!(matches!(
            resolve_arguments(&argv(&["-V"])).unwrap(),
            Resolution::Version
        ));
    }

    #[test]
    fn test_manifest_and_verbose() {
        let config = resolve(&["--manifest", "custom.json", "--verbose"]);
        assert_eq!(config.manifest_path, Some(PathBuf::from("custom.json")));
        assert!(config.verbose);
    }

    #[test]
    fn test_parse_dev_mode_direct() {
        assert!(parse_dev_mode("--fordev", "Y").unwrap());
        assert!(!parse_dev_mode("--fordev", "n").unwrap());
        assert!(parse_dev_mode("--fordev", "yes").is_err());
    }

    #[test]
    fn test_default_backup_name_format() {
        let name = default_backup_name("demo");
        assert!(name.starts_with("demo_bck_"));
        // YYYY-MM-DD suffix
        let stamp = name.trim_start_matches("demo_bck_");
        assert_eq!(stamp.len(), 10);
        assert_eq!(stamp.chars().filter(|c| *c == '-').count(), 2);
    }
}
