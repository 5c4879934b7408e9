//! Completion chime.
//!
//! The chime is an injected capability: the timer only knows it can call
//! [`Chime::ring`]. Whatever happens inside, failures are contained by
//! [`ring_contained`] and never reach timer state or history.

use std::io::Write;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::process::{Command, Stdio};

use crate::error::ChimeError;
use crate::storage::ChimeConfig;

pub trait Chime: Send {
    fn ring(&self) -> Result<(), ChimeError>;
}

/// Silent fallback when no playback facility is wanted or available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopChime;

impl Chime for NoopChime {
    fn ring(&self) -> Result<(), ChimeError> {
        Ok(())
    }
}

/// Writes the ASCII bell to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl Chime for TerminalBell {
    fn ring(&self) -> Result<(), ChimeError> {
        let mut stderr = std::io::stderr().lock();
        stderr
            .write_all(b"\x07")
            .and_then(|_| stderr.flush())
            .map_err(|e| ChimeError::Unavailable(e.to_string()))
    }
}

/// Runs a shell command, e.g. a sound player.
///
/// The command is spawned and reaped on a background thread so a slow
/// player never holds up the timer. A non-zero exit is logged.
#[derive(Debug, Clone)]
pub struct CommandChime {
    command: String,
}

impl CommandChime {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    fn shell(&self) -> Command {
        #[cfg(windows)]
        {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", &self.command]);
            cmd
        }
        #[cfg(not(windows))]
        {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", &self.command]);
            cmd
        }
    }
}

impl Chime for CommandChime {
    fn ring(&self) -> Result<(), ChimeError> {
        let mut child = self
            .shell()
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ChimeError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        let command = self.command.clone();
        std::thread::spawn(move || match child.wait() {
            Ok(status) if status.success() => {}
            Ok(status) => {
                let err = ChimeError::Failed { status };
                tracing::warn!(%command, error = %err, "chime command failed");
            }
            Err(e) => tracing::warn!(%command, error = %e, "could not wait for chime command"),
        });
        Ok(())
    }
}

/// Build the chime described by the configuration.
pub fn from_config(config: &ChimeConfig) -> Box<dyn Chime> {
    if !config.enabled {
        return Box::new(NoopChime);
    }
    match config.command.as_deref().map(str::trim) {
        Some(cmd) if !cmd.is_empty() => Box::new(CommandChime::new(cmd)),
        _ => Box::new(TerminalBell),
    }
}

/// Ring the chime, swallowing errors and panics. Returns whether it rang.
pub fn ring_contained(chime: &dyn Chime) -> bool {
    match catch_unwind(AssertUnwindSafe(|| chime.ring())) {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "chime failed");
            false
        }
        Err(_) => {
            tracing::warn!("chime panicked");
            false
        }
    }
}
