//! Process execution for the `security` tool.
//!
//! The keychain client only needs "run this program with these arguments and
//! hand me its combined output and exit code". [`Runner`] is that seam;
//! tests substitute a scripted implementation.

use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use tracing::debug;

/// Exit code reported when the process was terminated by a signal.
pub const SIGNALLED: i32 = -1;

/// Captured result of one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub code: i32,
    /// stdout and stderr, interleaved in the order chunks arrived.
    pub output: String,
}

impl ToolOutput {
    pub fn new(code: i32, output: impl Into<String>) -> Self {
        Self {
            code,
            output: output.into(),
        }
    }
}

/// Runs an external program to completion.
pub trait Runner {
    /// Spawn `program` with `args` and wait for it.
    ///
    /// # Errors
    ///
    /// Returns the io error when the program cannot be launched.
    fn run(&self, program: &Path, args: &[String]) -> io::Result<ToolOutput>;
}

/// Runs programs as child processes of the current process.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&self, program: &Path, args: &[String]) -> io::Result<ToolOutput> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        debug!(program = %program.display(), pid = child.id(), "spawned");

        let (tx, rx) = mpsc::channel();
        let mut readers = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            let tx = tx.clone();
            readers.push(thread::spawn(move || pump(stdout, tx)));
        }
        if let Some(stderr) = child.stderr.take() {
            let tx = tx.clone();
            readers.push(thread::spawn(move || pump(stderr, tx)));
        }
        drop(tx);

        // The channel closes only once both streams hit EOF, so every chunk
        // is captured before the exit status is read.
        let mut captured = Vec::new();
        for chunk in rx {
            captured.extend_from_slice(&chunk);
        }
        let status = reap(&mut child, readers)?;
        let code = status.code().unwrap_or(SIGNALLED);
        debug!(code, bytes = captured.len(), "process closed");

        Ok(ToolOutput {
            code,
            output: String::from_utf8_lossy(&captured).into_owned(),
        })
    }
}

/// Join the reader threads and wait for the child.
///
/// The child is always waited on, so a failed reader never leaves a zombie
/// behind; the reader error is reported after the wait.
fn reap(child: &mut Child, readers: Vec<JoinHandle<io::Result<()>>>) -> io::Result<ExitStatus> {
    let mut first_error = None;
    for reader in readers {
        let result = reader
            .join()
            .unwrap_or_else(|_| {
                Err(io::Error::new(
                    io::ErrorKind::Other,
                    "output reader panicked",
                ))
            });
        if let Err(e) = result {
            first_error.get_or_insert(e);
        }
    }

    let status = child.wait()?;
    match first_error {
        Some(e) => Err(e),
        None => Ok(status),
    }
}

/// Forward a stream to the collector chunk by chunk until EOF.
fn pump(mut stream: impl Read, tx: Sender<Vec<u8>>) -> io::Result<()> {
    let mut buf = [0u8; 4096];
    loop {
        let n = match stream.read(&mut buf) {
            Ok(0) => return Ok(()),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if tx.send(buf[..n].to_vec()).is_err() {
            return Ok(());
        }
    }
}
