//! Shell command execution for install and build steps.

use crate::error::{MirrorError, Result};
use std::path::Path;
use std::process::Command;

/// Runs `command` through the platform shell in `cwd`.
///
/// Output is inherited from the current process. A non-zero exit status is
/// an error.
pub fn run(command: &str, cwd: &Path) -> Result<()> {
    log::info!("Running command: \"{}\" in \"{}\"", command, cwd.display());

    let status = shell(command).current_dir(cwd).status()?;
    if !status.success() {
        return Err(MirrorError::CommandFailed {
            command: command.to_string(),
            status,
        });
    }
    Ok(())
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", command]);
    cmd
}

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", command]);
    cmd
}
