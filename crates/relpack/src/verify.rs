//! External test verification.
//!
//! The test command is fixed and non-configurable: clean, then run tests, in
//! batch mode. Its exit status is the only signal consumed; stdout/stderr
//! are inherited so the operator sees the test output directly. There is no
//! timeout — a hung test suite hangs the assembly.

use std::path::Path;
use std::process::Command;
use tracing::info;

use crate::error::{EngineError, Result};

/// Test runner program.
pub const TEST_PROGRAM: &str = "mvn";

/// Fixed argument list for the test runner.
pub const TEST_ARGS: &[&str] = &["clean", "test", "-B"];

/// Run the test suite against the filtered workspace.
///
/// Non-zero exit is fatal: [`EngineError::TestFailure`].
pub fn run_tests(workspace_root: &Path) -> Result<()> {
    run_command(TEST_PROGRAM, TEST_ARGS, workspace_root)
}

fn run_command(program: &str, args: &[&str], dir: &Path) -> Result<()> {
    let command = display_command(program, args);
    info!("Executing tests: {command}");

    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .status()
        .map_err(|source| EngineError::TestLaunch { command, source })?;

    if !status.success() {
        return Err(EngineError::TestFailure { status });
    }

    info!("Tests passed");
    Ok(())
}

fn display_command(program: &str, args: &[&str]) -> String {
    let mut command = String::from(program);
    for arg in args {
        command.push(' ');
        command.push_str(arg);
    }
    command
}
