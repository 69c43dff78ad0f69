//! Applying patch files with the external `patch` tool
//!
//! Each strip level is checked with `--dry-run` before the real run, so a
//! level that does not fit never leaves rejected hunks behind.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Strip levels in the order they are tried
pub const PATCH_LEVELS: [&str; 4] = ["-p1", "-p0", "-p2", "-p4"];

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// One invocation of the patch tool
#[derive(Debug, Clone, Copy)]
pub struct PatchInvocation<'a> {
    pub level: &'static str,
    pub target_dir: &'a Path,
    pub patch_file: &'a Path,
    pub dry_run: bool,
}

/// Something that can run a single patch invocation
pub trait PatchRunner {
    /// Returns `true` when the tool exited successfully
    fn run(&self, invocation: &PatchInvocation<'_>) -> bool;
}

/// Runs an external `patch` binary with a timeout
#[derive(Debug, Clone)]
pub struct PatchCommand {
    program: PathBuf,
    timeout: Duration,
}

impl PatchCommand {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    fn command(&self, invocation: &PatchInvocation<'_>) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg(invocation.level)
            .arg("--force")
            .arg("--no-backup-if-mismatch")
            .arg("-d")
            .arg(invocation.target_dir)
            .arg("-i")
            .arg(invocation.patch_file);
        if invocation.dry_run {
            command.arg("--dry-run");
        }
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }

    /// Wait for the child, killing it once the timeout expires.
    ///
    /// Returns `None` when the child was killed or could not be waited on.
    fn wait_with_timeout(&self, child: &mut Child) -> Option<std::process::ExitStatus> {
        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Some(status),
                Ok(None) if Instant::now() >= deadline => {
                    tracing::warn!(
                        timeout_secs = self.timeout.as_secs(),
                        "patch timed out, killing process"
                    );
                    let _ = child.kill();
                    let _ = child.wait();
                    return None;
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    tracing::warn!(error = %e, "failed waiting for patch");
                    let _ = child.kill();
                    return None;
                }
            }
        }
    }
}

fn drain<R: Read + Send + 'static>(stream: Option<R>) -> Option<JoinHandle<String>> {
    stream.map(|mut stream| {
        thread::spawn(move || {
            let mut output = String::new();
            let _ = stream.read_to_string(&mut output);
            output
        })
    })
}

fn collect(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

impl PatchRunner for PatchCommand {
    fn run(&self, invocation: &PatchInvocation<'_>) -> bool {
        let mut command = self.command(invocation);
        tracing::debug!(command = ?command, "running patch");

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!(program = %self.program.display(), error = %e, "cannot start patch");
                return false;
            }
        };

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());
        let status = self.wait_with_timeout(&mut child);
        let stdout = collect(stdout);
        let stderr = collect(stderr);

        tracing::debug!(
            level = invocation.level,
            dry_run = invocation.dry_run,
            status = ?status,
            stdout = stdout.trim_end(),
            stderr = stderr.trim_end(),
            "patch finished"
        );

        status.is_some_and(|s| s.success())
    }
}

/// Apply `patch_file` inside `target_dir`, trying each strip level in turn.
///
/// Returns the level that applied, or `None` when every level failed.
pub fn apply_patch(
    runner: &dyn PatchRunner,
    target_dir: &Path,
    patch_file: &Path,
) -> Option<&'static str> {
    PATCH_LEVELS.into_iter().find(|&level| {
        let mut invocation = PatchInvocation {
            level,
            target_dir,
            patch_file,
            dry_run: true,
        };
        if !runner.run(&invocation) {
            return false;
        }
        invocation.dry_run = false;
        runner.run(&invocation)
    })
}
