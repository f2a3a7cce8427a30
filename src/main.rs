//! OrthoSetup CLI Entry Point
//!
//! Provisions the conda environment for the orthoseg toolkit.
//!
//! # Usage
//!
//! ```bash
//! # Provision with defaults (environment "orthoseg", ~/Miniconda3)
//! orthosetup
//!
//! # Custom environment name; backup name defaults to demo_bck_<date>
//! orthosetup --envname demo
//!
//! # Development mode: tooling + source dependencies instead of the
//! # application package
//! orthosetup --envname demo --fordev Y
//!
//! # Non-default conda installation
//! orthosetup --condadir /opt/miniconda3
//! ```

use std::env;
use std::process::ExitCode;

use log::info;

use orthosetup::config::{resolve_arguments, Resolution};
use orthosetup::error::SetupError;
use orthosetup::prompt;
use orthosetup::provision::{Manifests, Provisioner};
use orthosetup::{APP_NAME, VERSION};

/// Configures the logging system with appropriate formatting.
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            use std::io::Write;

            match record.level() {
                log::Level::Warn | log::Level::Error => {
                    writeln!(buf, "[{}] {}", record.level(), record.args())
                }
                _ => writeln!(buf, "{}", record.args()),
            }
        })
        .init();
}

/// Prints the application banner with version information.
fn print_banner() {
    println!();
    println!("{} v{}", APP_NAME, VERSION);
    println!("Conda Environment Provisioning for orthoseg");
    println!();
}

/// Prints usage information.
fn print_usage() {
    println!("Usage: orthosetup [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --envname, -e NAME         Environment name (default: orthoseg)");
    println!("  --envname_backup, -eb NAME Backup environment name");
    println!("                             (default: <envname>_bck_<today>)");
    println!("  --condadir, -cd PATH       Conda install root (default: ~/Miniconda3)");
    println!("  --fordev, -od Y|N          Install development dependencies (default: N)");
    println!("  --manifest, -m FILE        JSON file overriding the package manifests");
    println!("  --verbose, -v              Enable debug logging");
    println!("  --help, -h                 Show this help message");
    println!("  --version, -V              Show version information");
    println!();
    println!("Examples:");
    println!("  orthosetup");
    println!("  orthosetup --envname demo --fordev Y");
    println!("  orthosetup -e demo -cd /opt/miniconda3");
}

/// Main application flow.
fn run() -> Result<(), SetupError> {
    let args: Vec<String> = env::args().collect();

    let config = match resolve_arguments(&args).map_err(|e| {
        eprintln!("Error: {}", e);
        eprintln!();
        print_usage();
        e
    })? {
        Resolution::Run(config) => config,
        Resolution::Help => {
            print_usage();
            return Ok(());
        }
        Resolution::Version => {
            println!("{} {}", APP_NAME, VERSION);
            return Ok(());
        }
    };

    setup_logging(config.verbose);
    print_banner();

    let manifests = Manifests::resolve(config.manifest_path.as_deref())?;

    prompt::print_config_summary(&config);
    if !prompt::confirm("Continue with this setup?")? {
        return Err(SetupError::Aborted);
    }

    info!("Configuration confirmed");
    Provisioner::new(config, manifests).run()
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_abort() => {
            println!();
            println!("{}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!();
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
