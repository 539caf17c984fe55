//! Subprocess execution for the Docker CLI

use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::{Error, Result};

/// Result of a finished command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    /// Human readable exit status, e.g. "exit status: 1"
    pub status: String,
    /// stdout followed by stderr
    pub output: String,
}

impl CommandOutput {
    pub fn ok(output: &str) -> Self {
        Self {
            success: true,
            status: "exit status: 0".to_string(),
            output: output.to_string(),
        }
    }

    pub fn failed(code: i32, output: &str) -> Self {
        Self {
            success: false,
            status: format!("exit status: {}", code),
            output: output.to_string(),
        }
    }
}

/// Runs external programs and captures their combined output
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`. When `stdin` is given it is written to the
    /// child's standard input, which is then closed.
    async fn run(&self, program: &str, args: &[String], stdin: Option<&str>) -> Result<CommandOutput>;
}

/// Runs commands on the host with tokio
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[String], stdin: Option<&str>) -> Result<CommandOutput> {
        let spawn_error = |source| Error::Spawn {
            program: program.to_string(),
            source,
        };

        let mut child = Command::new(program)
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(spawn_error)?;

        if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
            pipe.write_all(input.as_bytes()).await.map_err(spawn_error)?;
            // Dropping the handle closes the pipe so the child sees EOF
            drop(pipe);
        }

        let output = child.wait_with_output().await.map_err(spawn_error)?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(CommandOutput {
            success: output.status.success(),
            status: output.status.to_string(),
            output: combined,
        })
    }
}
