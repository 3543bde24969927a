//! Helpers for running the `liftsync` binary

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Command builder for the `liftsync` binary
pub struct LiftsyncCommand {
    args: Vec<String>,
    config: Option<PathBuf>,
    stdin_data: Option<String>,
}

impl LiftsyncCommand {
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            config: None,
            stdin_data: None,
        }
    }

    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Use `path` instead of the user's config file
    pub fn config(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.config = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn stdin(&mut self, data: &str) -> &mut Self {
        self.stdin_data = Some(data.to_string());
        self
    }

    pub fn execute(&self) -> Result<CommandResult> {
        let mut command = Command::new(env!("CARGO_BIN_EXE_liftsync"));
        command
            .args(&self.args)
            .env("RUST_LOG", "warn")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(config) = &self.config {
            command.arg("--config").arg(config);
        }

        let mut child = command.spawn().context("Failed to spawn liftsync")?;
        if let Some(mut stdin) = child.stdin.take() {
            if let Some(data) = &self.stdin_data {
                stdin.write_all(data.as_bytes())?;
            }
            // Dropping stdin closes it so the script ends
        }
        let output = child
            .wait_with_output()
            .context("Failed to wait for liftsync")?;

        Ok(CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }

    pub fn assert_success(&self) -> Result<CommandResult> {
        let result = self.execute()?;
        if !result.success() {
            anyhow::bail!(
                "Command failed (exit code: {}):\nArgs: {:?}\nStdout: {}\nStderr: {}",
                result.exit_code,
                self.args,
                result.stdout,
                result.stderr
            );
        }
        Ok(result)
    }

    pub fn assert_failure(&self) -> Result<CommandResult> {
        let result = self.execute()?;
        if result.success() {
            anyhow::bail!(
                "Command should have failed but succeeded:\nArgs: {:?}\nStdout: {}",
                self.args,
                result.stdout
            );
        }
        Ok(result)
    }
}

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn contains_stdout(&self, text: &str) -> bool {
        self.stdout.contains(text)
    }

    pub fn contains_stderr(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }

    /// Final snapshot JSON printed for the group on the line tagged `tag`
    pub fn final_snapshot(&self, tag: &str) -> Option<serde_json::Value> {
        let section = self.stdout.split("Final snapshots").nth(1)?;
        section
            .lines()
            .find(|line| line.contains(tag))
            .and_then(|line| line.find('{').map(|idx| &line[idx..]))
            .and_then(|json| serde_json::from_str(json).ok())
    }
}

/// Usage: `liftsync!("config", "get", "server.base_url").config(&path)`
#[macro_export]
macro_rules! liftsync {
    ($($arg:expr),*) => {{
        let mut cmd = $crate::common::cli::LiftsyncCommand::new();
        cmd.args(&[$($arg),*]);
        cmd
    }};
}
