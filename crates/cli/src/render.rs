//! Terminal rendering of check results

use check_core::{CheckResult, CheckStatus};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// A published result, stamped with the time since the session started
#[derive(Debug, Clone, Serialize)]
pub struct Transition {
    pub at_ms: u64,
    #[serde(flatten)]
    pub result: CheckResult,
}

/// Render a result the way the registration form shows it
pub fn format_result(result: &CheckResult) -> String {
    match result.status {
        CheckStatus::Idle => "idle".dimmed().to_string(),
        CheckStatus::Loading => format!("{} {}", "loading".cyan(), "检查中...".dimmed()),
        CheckStatus::Available => format!("{} {}", "available".green(), result.message.green()),
        CheckStatus::Taken => format!("{} {}", "taken".red(), result.message.red()),
        CheckStatus::Error => format!("{} {}", "error".yellow(), result.message.yellow()),
    }
}

pub fn print_transition(transition: &Transition) {
    println!(
        "{} {}",
        format!("[{:>6}ms]", transition.at_ms).dimmed(),
        format_result(&transition.result)
    );
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Follow a controller's published results until it is dropped
///
/// Prints each change as it arrives unless `quiet`, and returns every
/// transition seen.
pub fn follow(
    mut rx: watch::Receiver<CheckResult>,
    start: Instant,
    quiet: bool,
) -> JoinHandle<Vec<Transition>> {
    tokio::spawn(async move {
        let mut transitions = Vec::new();
        while rx.changed().await.is_ok() {
            let transition = Transition {
                at_ms: elapsed_ms(start),
                result: rx.borrow_and_update().clone(),
            };
            if !quiet {
                print_transition(&transition);
            }
            transitions.push(transition);
        }
        transitions
    })
}

/// Wait until the result leaves `loading`, or give up after `limit`
pub async fn settle(rx: &mut watch::Receiver<CheckResult>, limit: Duration) -> CheckResult {
    let settled = match tokio::time::timeout(
        limit,
        rx.wait_for(|result| result.status != CheckStatus::Loading),
    )
    .await
    {
        Ok(Ok(result)) => Some(result.clone()),
        _ => None,
    };

    settled.unwrap_or_else(|| rx.borrow().clone())
}
