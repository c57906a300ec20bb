use std::process::{Command, Stdio};

use log::{info, warn};

use crate::error::{Error, Result};

/// Exit code reported when the subprocess was ended by a signal.
pub const SIGNALLED_EXIT_CODE: i32 = 1;

/// Runs `command_text` through `shell -c`, blocking until it finishes.
///
/// The child inherits the terminal, so interactive commands work as they
/// would when typed by hand.
///
/// # Errors
///
/// Returns an error if the shell could not be launched or waited on. A
/// command that runs and exits non-zero is not an error; its exit code is
/// returned.
pub fn run_in_shell(shell: &str, command_text: &str) -> Result<i32> {
    info!("Executing `{command_text}` with shell `{shell}`");

    let mut command = Command::new(shell);
    command
        .args(["-c", command_text])
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    let status = command
        .spawn()
        .and_then(|mut child| child.wait())
        .map_err(|e| Error::sub_process(command_text, e))?;

    let code = status.code().unwrap_or(SIGNALLED_EXIT_CODE);
    if !status.success() {
        warn!("`{command_text}` exited with status {code}");
    }

    Ok(code)
}
