//! Running the `fieldcheck` binary
//!
//! Every invocation points `FIELDCHECK_CONFIG` at the test's own config file
//! so tests never see the user's configuration.

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Captured outcome of one invocation
#[derive(Debug)]
pub struct Run {
    pub args: Vec<String>,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    #[allow(dead_code)]
    pub elapsed: Duration,
}

impl Run {
    /// Require a zero exit code
    pub fn ok(self) -> Result<Self> {
        if self.code != Some(0) {
            anyhow::bail!(
                "fieldcheck {:?} exited with {:?}\nstdout:\n{}\nstderr:\n{}",
                self.args,
                self.code,
                self.stdout,
                self.stderr
            );
        }
        Ok(self)
    }

    /// Require a non-zero exit code
    pub fn failed(self) -> Result<Self> {
        if self.code == Some(0) {
            anyhow::bail!("fieldcheck {:?} should have failed\nstdout:\n{}", self.args, self.stdout);
        }
        Ok(self)
    }

    /// Stdout without surrounding whitespace, for single-value commands
    pub fn value(&self) -> &str {
        self.stdout.trim()
    }

    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.stdout)
            .with_context(|| format!("stdout is not a JSON report:\n{}", self.stdout))
    }
}

/// Run the binary with `args`, feeding `input` on stdin when given
pub fn run(config_file: &Path, args: &[&str], input: Option<&str>) -> Result<Run> {
    let started = Instant::now();

    let mut child = Command::new(env!("CARGO_BIN_EXE_fieldcheck"))
        .args(args)
        .env("FIELDCHECK_CONFIG", config_file)
        .env_remove("RUST_LOG")
        .stdin(if input.is_some() { Stdio::piped() } else { Stdio::null() })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("Failed to start fieldcheck")?;

    if let (Some(input), Some(mut stdin)) = (input, child.stdin.take()) {
        stdin.write_all(input.as_bytes())?;
    }

    let output = child.wait_with_output().context("Failed to wait for fieldcheck")?;

    Ok(Run {
        args: args.iter().map(|a| a.to_string()).collect(),
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        elapsed: started.elapsed(),
    })
}
