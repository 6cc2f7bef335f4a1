//! Scripted typing session against a local check function
//!
//! `--keys "ab@0,abc@40"` replays the value `ab` at t=0ms and `abc` at
//! t=40ms. `:off` / `:on` close and open the gate, `:clear` empties the
//! field. The check answers with `--reply` (or fails with `--fail`) after
//! `--latency-ms`.

use crate::render::{self, Transition};
use crate::system_config;
use anyhow::{Context, Result};
use check_core::{from_fn, CheckError, CheckResult, SharedCheck};
use controller::{drive, InputEvent, ValidationController};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::mpsc;

/// One scheduled input event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub at: Duration,
    pub event: InputEvent,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("empty script")]
    Empty,

    #[error("step `{0}` is missing its `@<ms>` offset")]
    MissingOffset(String),

    #[error("step `{step}` has an invalid offset")]
    BadOffset { step: String },

    #[error("step `{step}` goes back in time ({at_ms}ms after {previous_ms}ms)")]
    OutOfOrder {
        step: String,
        at_ms: u64,
        previous_ms: u64,
    },
}

/// Parse a `value@ms,value@ms,...` script
pub fn parse_script(script: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    let mut previous_ms = 0u64;

    for raw in script.split(',').filter(|s| !s.trim().is_empty()) {
        let (token, offset) = raw
            .rsplit_once('@')
            .ok_or_else(|| ScriptError::MissingOffset(raw.to_string()))?;
        let at_ms: u64 = offset.trim().parse().map_err(|_| ScriptError::BadOffset {
            step: raw.to_string(),
        })?;

        if at_ms < previous_ms {
            return Err(ScriptError::OutOfOrder {
                step: raw.to_string(),
                at_ms,
                previous_ms,
            });
        }
        previous_ms = at_ms;

        let event = match token {
            ":off" => InputEvent::Gate(false),
            ":on" => InputEvent::Gate(true),
            ":clear" => InputEvent::Value(None),
            value => InputEvent::Value(Some(value.to_string())),
        };
        steps.push(Step {
            at: Duration::from_millis(at_ms),
            event,
        });
    }

    if steps.is_empty() {
        return Err(ScriptError::Empty);
    }
    Ok(steps)
}

/// What the local check function does
#[derive(Debug, Clone)]
pub enum Responder {
    Reply(String),
    Fail(String),
}

#[derive(Debug, Serialize)]
struct Report {
    transitions: Vec<Transition>,
    #[serde(rename = "final")]
    final_result: CheckResult,
    calls: Vec<String>,
}

pub struct SimulateArgs {
    pub keys: String,
    pub responder: Responder,
    pub latency: Duration,
    pub delay_ms: Option<u64>,
    pub json: bool,
}

pub async fn run(args: SimulateArgs) -> Result<()> {
    let steps = parse_script(&args.keys).context("Invalid --keys script")?;

    let mut config = system_config::load()?.controller;
    if let Some(delay_ms) = args.delay_ms {
        config.delay_ms = delay_ms;
    }
    let quiet_period = config.delay();

    let calls = Arc::new(Mutex::new(Vec::new()));
    let check = local_check(Arc::clone(&calls), args.responder, args.latency);
    let controller = ValidationController::new(check, config)?;

    let start = Instant::now();
    let printer = render::follow(controller.subscribe(), start, args.json);
    let mut results = controller.subscribe();

    let (tx, rx) = mpsc::channel(steps.len().max(1));
    let driver = tokio::spawn(drive(controller, rx));

    for step in steps {
        tokio::time::sleep_until((start + step.at).into()).await;
        tx.send(step.event)
            .await
            .context("Controller stopped accepting input")?;
    }
    drop(tx);

    let controller = driver.await.context("Input driver panicked")?;
    let final_result =
        render::settle(&mut results, quiet_period + args.latency + Duration::from_secs(1)).await;
    controller.shutdown();

    let transitions = printer.await.context("Result printer panicked")?;
    let calls = calls.lock().clone();

    if args.json {
        let report = Report {
            transitions,
            final_result,
            calls,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} {}", "final:".bold(), render::format_result(&final_result));
        println!("{} {} {:?}", "calls:".bold(), calls.len(), calls);
    }

    Ok(())
}

fn local_check(calls: Arc<Mutex<Vec<String>>>, responder: Responder, latency: Duration) -> SharedCheck {
    Arc::new(from_fn(move |value: String| {
        let calls = Arc::clone(&calls);
        let responder = responder.clone();
        async move {
            calls.lock().push(value);
            tokio::time::sleep(latency).await;
            match responder {
                Responder::Reply(text) => Ok(text),
                Responder::Fail(text) => Err(CheckError::rejected(text)),
            }
        }
    }))
}
