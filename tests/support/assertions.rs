//! Checks on a finished keysmith run.
//!
//! Failure messages dump both streams, since a prompt on stderr usually
//! explains an unexpected stdout.

use std::process::Output;

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn transcript(output: &Output) -> String {
    format!(
        "exit: {:?}\n--- stdout ---\n{}--- stderr ---\n{}",
        output.status.code(),
        stdout(output),
        stderr(output)
    )
}

pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "keysmith failed\n{}",
        transcript(output)
    );
}

/// Runtime errors exit with 1, usage errors (from clap) with 2.
pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "keysmith unexpectedly succeeded\n{}",
        transcript(output)
    );
}

pub fn assert_exit(output: &Output, code: i32) {
    assert_eq!(
        output.status.code(),
        Some(code),
        "unexpected exit status\n{}",
        transcript(output)
    );
}

pub fn assert_stderr_contains(output: &Output, needle: &str) {
    assert!(
        stderr(output).contains(needle),
        "stderr lacks {:?}\n{}",
        needle,
        transcript(output)
    );
}

pub fn assert_stdout_contains(output: &Output, needle: &str) {
    assert!(
        stdout(output).contains(needle),
        "stdout lacks {:?}\n{}",
        needle,
        transcript(output)
    );
}
