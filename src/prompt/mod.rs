//! Interactive Confirmation Gates
//!
//! Operator-facing prompts for the provisioning workflow: the initial
//! configuration confirmation, the three-way backup decision, and the
//! final keystroke wait that keeps a terminal window open.
//!
//! Answers are returned as explicit values; there is no shared prompt
//! state. Only the first character of a reply is considered, so a full
//! word like `yes` counts the same as `y`.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use log::warn;

use crate::config::RunConfig;

/// Operator decision at the backup prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupChoice {
    /// Clone the existing environment before recreating it.
    Backup,
    /// Proceed without a backup.
    Skip,
    /// Stop the run entirely.
    Abort,
}

/// Interprets a confirmation reply. Only an answer whose first character
/// is `y`/`Y` is affirmative; everything else declines.
pub fn parse_yes_no(reply: &str) -> bool {
    matches!(reply.trim().chars().next(), Some(c) if c.eq_ignore_ascii_case(&'y'))
}

/// Interprets a backup-prompt reply, `None` for unrecognized input.
pub fn parse_backup_choice(reply: &str) -> Option<BackupChoice> {
    match reply.trim().chars().next() {
        Some(c) if c.eq_ignore_ascii_case(&'b') => Some(BackupChoice::Backup),
        Some(c) if c.eq_ignore_ascii_case(&'s') => Some(BackupChoice::Skip),
        Some(c) if c.eq_ignore_ascii_case(&'a') => Some(BackupChoice::Abort),
        _ => None,
    }
}

/// Reads one reply line from stdin.
fn read_reply() -> io::Result<String> {
    let mut reply = String::new();
    io::stdin().lock().read_line(&mut reply)?;
    Ok(reply)
}

/// Prints a question and flushes so the cursor sits after the prompt.
fn ask(question: &str) -> io::Result<()> {
    print!("{} ", question.cyan().bold());
    io::stdout().flush()
}

/// Prints the resolved configuration for operator review.
pub fn print_config_summary(config: &RunConfig) {
    println!();
    println!("{}", "Resolved configuration:".bold());
    println!("  environment name:  {}", config.env_name.green());
    println!("  backup name:       {}", config.backup_name.green());
    println!("  conda install dir: {}", config.conda_dir.display());
    println!(
        "  development mode:  {}",
        if config.dev_mode { "Y".yellow() } else { "N".normal() }
    );
    println!();
}

/// Asks a yes/no question. Anything other than an affirmative first
/// keystroke declines.
pub fn confirm(question: &str) -> io::Result<bool> {
    ask(&format!("{} [y/n]", question))?;
    Ok(parse_yes_no(&read_reply()?))
}

/// Asks the three-way backup question, re-prompting until the reply is
/// one of `b`ackup, `s`kip, or `a`bort.
///
/// Warns when the backup target already exists, since the clone will
/// overwrite it.
pub fn ask_backup(env_name: &str, backup_name: &str, target_exists: bool) -> io::Result<BackupChoice> {
    println!(
        "Environment '{}' already exists and will be recreated from scratch.",
        env_name
    );
    if target_exists {
        warn!(
            "Backup environment '{}' already exists and will be overwritten",
            backup_name
        );
    }

    loop {
        ask(&format!(
            "[b]ackup to '{}', [s]kip backup, or [a]bort?",
            backup_name
        ))?;
        if let Some(choice) = parse_backup_choice(&read_reply()?) {
            return Ok(choice);
        }
        println!("Please answer b, s, or a.");
    }
}

/// Waits for one keystroke so a terminal window stays open long enough
/// for the operator to read the final output.
pub fn wait_for_enter() -> io::Result<()> {
    ask("Press Enter to close.")?;
    read_reply()?;
    Ok(())
}
