//! Run an oracle executable with the buffer on stdin.

use std::io::{self, Write};
use std::path::Path;
use std::process::{Command as ProcessCommand, Stdio};
use std::thread;

/// Captured result of one oracle process run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub exit_code: Option<i32>,
    /// Captured stdout (lossy UTF-8).
    pub stdout: String,
    /// Captured stderr (lossy UTF-8).
    pub stderr: String,
}

/// Spawn `program`, write `input` to its stdin, and wait for it to exit.
///
/// stdin is written from a helper thread so a process that produces a lot of output before
/// reading its input cannot deadlock against us. A process that exits without reading stdin
/// is not an error.
pub fn run_with_stdin(program: &Path, input: &str) -> io::Result<ProcessOutput> {
    let mut child = ProcessCommand::new(program)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| io::Error::other("Failed to open oracle stdin"))?;
    let input = input.to_owned();
    let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));

    let output = child.wait_with_output()?;

    match writer.join() {
        Ok(Ok(())) => {}
        Ok(Err(err)) if err.kind() == io::ErrorKind::BrokenPipe => {}
        Ok(Err(err)) => return Err(err),
        Err(_) => return Err(io::Error::other("oracle stdin writer panicked")),
    }

    Ok(ProcessOutput {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
