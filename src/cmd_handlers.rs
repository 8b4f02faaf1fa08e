use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::process::Command;

/// captured output of a finished subprocess. status is None when the
/// child was killed by a signal
pub struct CmdCapture {
    pub status: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// run a command and capture everything. blocks until the child exits,
/// no timeout is enforced
pub fn run(bin: &str, args: &[&str]) -> io::Result<CmdCapture> {
    let output = Command::new(bin).args(args).output()?;
    Ok(CmdCapture {
        status: output.status.code(),
        stdout: output.stdout,
        stderr: output.stderr,
    })
}

/// run a command with combined stdout+stderr redirected into `path`,
/// returning the exit code. tool output is captured verbatim and never
/// interpreted here
pub fn run_to_file(bin: &str, args: &[&str], path: &Path) -> io::Result<Option<i32>> {
    let capture = run(bin, args)?;
    let mut file = File::create(path)?;
    file.write_all(&capture.stdout)?;
    file.write_all(&capture.stderr)?;
    Ok(capture.status)
}
