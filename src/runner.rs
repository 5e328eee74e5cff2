//! External process boundary.
//!
//! Detectors never spawn processes directly; they go through a
//! `CommandRunner` so tests can substitute canned compiler output.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Default)]
/// Captured result of a finished process.
pub struct CommandOutput {
    /// Exit code; `None` when the process was ended by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },

    #[error("`{program}` timed out after {}s", .timeout.as_secs())]
    TimedOut { program: String, timeout: Duration },

    #[error("waiting for `{program}` failed: {source}")]
    Wait {
        program: String,
        source: std::io::Error,
    },
}

/// Runs a program to completion and captures its output streams.
pub trait CommandRunner: Send + Sync {
    fn run(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
        timeout: Option<Duration>,
    ) -> Result<CommandOutput, RunError>;
}

/// Spawns real processes. A timed-out child is killed.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
        timeout: Option<Duration>,
    ) -> Result<CommandOutput, RunError> {
        tracing::debug!(program, ?args, cwd = %cwd.display(), "spawning");
        let mut child = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RunError::Launch {
                program: program.to_string(),
                source,
            })?;

        // Drain both pipes on their own threads so a chatty build cannot
        // block on a full pipe while we poll for exit.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match timeout {
            Some(limit) => wait_with_deadline(&mut child, program, limit)?,
            None => child.wait().map_err(|source| RunError::Wait {
                program: program.to_string(),
                source,
            })?,
        };

        Ok(CommandOutput {
            code: status.code(),
            stdout: join(stdout),
            stderr: join(stderr),
        })
    }
}

fn wait_with_deadline(
    child: &mut Child,
    program: &str,
    limit: Duration,
) -> Result<ExitStatus, RunError> {
    let started = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if started.elapsed() > limit {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(RunError::TimedOut {
                        program: program.to_string(),
                        timeout: limit,
                    });
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(source) => {
                return Err(RunError::Wait {
                    program: program.to_string(),
                    source,
                })
            }
        }
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    let mut pipe = pipe?;
    Some(thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }))
}

fn join(handle: Option<JoinHandle<String>>) -> String {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_a_launch_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SystemRunner
            .run("repowatch-no-such-program", &[], dir.path(), None)
            .unwrap_err();
        assert!(matches!(err, RunError::Launch { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stderr_and_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let args = vec!["-c".to_string(), "echo oops >&2; exit 3".to_string()];
        let out = SystemRunner.run("sh", &args, dir.path(), None).unwrap();
        assert_eq!(out.code, Some(3));
        assert!(!out.success());
        assert_eq!(out.stderr.trim(), "oops");
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_kills_child() {
        let dir = tempfile::tempdir().unwrap();
        let args = vec!["-c".to_string(), "sleep 5".to_string()];
        let started = Instant::now();
        let err = SystemRunner
            .run("sh", &args, dir.path(), Some(Duration::from_millis(200)))
            .unwrap_err();
        assert!(matches!(err, RunError::TimedOut { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }
}
