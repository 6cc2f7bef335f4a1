//! Test fixtures: isolated config locations and a stub check backend

use super::cli::{self, Run};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::TempDir;

/// Temporary directory holding the config file for one test
pub struct TestEnv {
    _dir: TempDir,
    config_file: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config_file = dir.path().join("fieldcheck").join("config.toml");
        Self {
            _dir: dir,
            config_file,
        }
    }

    pub fn config_file(&self) -> &PathBuf {
        &self.config_file
    }

    pub fn run(&self, args: &[&str]) -> anyhow::Result<Run> {
        cli::run(&self.config_file, args, None)
    }

    /// Run with `input` piped to stdin, one keystroke per line
    pub fn run_with_input(&self, args: &[&str], input: &str) -> anyhow::Result<Run> {
        cli::run(&self.config_file, args, Some(input))
    }

    /// `simulate --json` with the given script, returning the report
    pub fn simulate(&self, keys: &str, extra: &[&str]) -> anyhow::Result<serde_json::Value> {
        let mut args = vec!["simulate", "--keys", keys, "--json"];
        args.extend_from_slice(extra);
        self.run(&args)?.ok()?.json()
    }
}

/// Minimal HTTP backend answering every request with the same response
pub struct StubBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubBackend {
    pub fn start(status_line: &'static str, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind stub backend");
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };

                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let request = String::from_utf8_lossy(&request).to_string();
                if let Some(line) = request.lines().next() {
                    seen.lock().unwrap().push(line.to_string());
                }

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: text/plain;charset=UTF-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        Self { base_url, requests }
    }

    /// Request lines received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}
