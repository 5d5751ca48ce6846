//! Snapshot produced by an external command.
//!
//! The command is expected to print one snapshot JSON document to stdout,
//! for instance a scraper that reads the upstream site. A non-zero exit,
//! a timeout, or unparseable stdout makes the data unavailable.

use super::error::ProviderError;
use crate::consts::cli_consts::provider::STDERR_TAIL_LINES;
use crate::snapshot::SentimentSnapshot;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalProcessProvider {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ExternalProcessProvider {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub async fn snapshot(&self) -> Result<SentimentSnapshot, ProviderError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|source| ProviderError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ProviderError::Timeout {
                program: self.program.clone(),
                secs: self.timeout.as_secs(),
            })?
            .map_err(|source| ProviderError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProviderError::ProcessFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: stderr_tail(&output.stderr),
            });
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

/// Last few lines of stderr, enough to explain a failure in the server log.
fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}
