//! Text-to-speech through the platform synthesiser
//!
//! Playback is fire-and-forget: the synthesiser runs as a detached child
//! process and nothing waits for it to finish. Text is written to the
//! child's stdin, never passed as an argument.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};

/// Synthesisers tried in order when none is configured, with the arguments
/// that make each read its text from stdin
const CANDIDATES: &[(&str, &[&str])] = &[
    ("say", &["-f", "-"]),
    ("spd-say", &["-e"]),
    ("espeak-ng", &["--stdin"]),
    ("espeak", &["--stdin"]),
];

/// Errors starting speech playback
#[derive(Debug, Error)]
pub enum SpeechError {
    /// No configured or known synthesiser on this system
    #[error("No speech synthesiser found (tried say, spd-say, espeak-ng, espeak)")]
    NotAvailable,

    /// Configured command is empty
    #[error("speech_command is empty")]
    EmptyCommand,

    /// Synthesiser could not be started
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Something that can read text aloud
pub trait Speaker {
    /// Start reading `text`; returns once playback has been started
    fn speak(&self, text: &str) -> Result<(), SpeechError>;
}

/// Speaks by running a command-line synthesiser that reads text from stdin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemSpeaker {
    program: PathBuf,
    args: Vec<String>,
}

impl SystemSpeaker {
    /// Use `command` (program followed by arguments) if given, otherwise the
    /// first synthesiser found on `PATH`
    ///
    /// A configured command must read the text to speak from stdin.
    pub fn from_config(command: Option<&[String]>) -> Result<Self, SpeechError> {
        match command {
            Some([program, args @ ..]) => {
                Ok(Self { program: PathBuf::from(program), args: args.to_vec() })
            }
            Some([]) => Err(SpeechError::EmptyCommand),
            None => Self::detect(std::env::var_os("PATH").as_deref()),
        }
    }

    /// First known synthesiser in the given `PATH` value
    fn detect(path_var: Option<&std::ffi::OsStr>) -> Result<Self, SpeechError> {
        let path_var = path_var.ok_or(SpeechError::NotAvailable)?;
        let dirs: Vec<PathBuf> = std::env::split_paths(path_var).collect();

        CANDIDATES
            .iter()
            .find_map(|(name, args)| {
                let program = dirs.iter().map(|dir| dir.join(name)).find(|p| is_executable(p))?;
                tracing::debug!(program = %program.display(), "speech synthesiser detected");
                Some(Self { program, args: args.iter().map(|a| a.to_string()).collect() })
            })
            .ok_or(SpeechError::NotAvailable)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Synthesiser command; the text goes to its stdin
    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).stdin(Stdio::piped()).stdout(Stdio::null()).stderr(Stdio::null());
        cmd
    }

    /// Start reading `text` and hand back the child process
    ///
    /// The text is fed to the child from a background task, so this must run
    /// inside a tokio runtime.
    pub fn spawn(&self, text: &str) -> Result<Child, SpeechError> {
        tracing::info!(program = %self.program.display(), chars = text.chars().count(), "starting speech");
        let mut child = self.command().spawn().map_err(|source| SpeechError::Spawn {
            program: self.program.display().to_string(),
            source,
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            let text = text.to_owned();
            tokio::spawn(async move {
                // Dropping stdin afterwards closes the pipe and ends the input
                if let Err(e) = stdin.write_all(text.as_bytes()).await {
                    tracing::warn!(error = %e, "failed writing text to speech synthesiser");
                }
            });
        }
        Ok(child)
    }
}

impl Speaker for SystemSpeaker {
    fn speak(&self, text: &str) -> Result<(), SpeechError> {
        if text.is_empty() {
            return Ok(());
        }
        let mut child = self.spawn(text)?;
        // Reap the process in the background so it does not linger as a zombie
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if !status.success() => {
                    tracing::warn!(%status, "speech synthesiser exited with failure")
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "failed waiting for speech synthesiser"),
            }
        });
        Ok(())
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata().map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0).unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file() || path.with_extension("exe").is_file()
}
