//! Interactive availability check against the backend
//!
//! Every stdin line is the field's new value, as if typed. `:off` and `:on`
//! close and open the gate, an empty line clears the field. On end of input
//! the last check is allowed to settle before the final state is printed.

use crate::render;
use crate::system_config;
use anyhow::{Context, Result};
use check_core::SharedCheck;
use controller::{drive, InputEvent, ValidationController};
use owo_colors::OwoColorize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;

pub struct CheckArgs {
    /// Field name, e.g. `username` or `email`
    pub field: String,
    pub path: Option<String>,
    pub param: Option<String>,
    pub base_url: Option<String>,
    pub delay_ms: Option<u64>,
    pub wait: Duration,
}

/// Turn one line of input into an event
pub fn line_event(line: &str) -> InputEvent {
    match line {
        ":off" => InputEvent::Gate(false),
        ":on" => InputEvent::Gate(true),
        "" => InputEvent::Value(None),
        value => InputEvent::Value(Some(value.to_string())),
    }
}

pub async fn run(args: CheckArgs) -> Result<()> {
    let config = system_config::load()?;

    let mut remote = config.remote.clone();
    if let Some(base_url) = args.base_url {
        remote.base_url = base_url;
    }
    let path = args
        .path
        .unwrap_or_else(|| format!("/api/user/check/{}", args.field));
    let param = args.param.unwrap_or_else(|| args.field.clone());

    let http = remote
        .check(&path, &param)
        .build()
        .context("Failed to build HTTP check")?;
    info!(url = %http.url(), param = %param, "checking field {}", args.field);
    let check: SharedCheck = Arc::new(http);

    let mut controller_config = config.controller;
    if let Some(delay_ms) = args.delay_ms {
        controller_config.delay_ms = delay_ms;
    }
    let controller = ValidationController::new(check, controller_config)?;

    let start = Instant::now();
    let printer = render::follow(controller.subscribe(), start, false);
    let mut results = controller.subscribe();

    let (tx, rx) = mpsc::channel(64);
    let driver = tokio::spawn(drive(controller, rx));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        tx.send(line_event(line.trim_end_matches('\r')))
            .await
            .context("Controller stopped accepting input")?;
    }
    drop(tx);

    let controller = driver.await.context("Input driver panicked")?;
    let final_result = render::settle(&mut results, args.wait).await;
    let dispatched = controller.dispatched();
    controller.shutdown();
    printer.await.context("Result printer panicked")?;

    println!("{} {}", "final:".bold(), render::format_result(&final_result));
    println!("{} {}", "checks sent:".bold(), dispatched);
    if final_result.status.blocks_submission() {
        println!("{}", "submission blocked".red());
    }

    Ok(())
}
