//! `fieldcheck check` against a stub backend
//!
//! Keystrokes are fed over stdin, one value per line.

use crate::common::{StubBackend, TestEnv};
use anyhow::Result;

fn check_args<'a>(field: &'a str, base_url: &'a str, delay_ms: &'a str) -> Vec<&'a str> {
    vec!["check", field, "--base-url", base_url, "--delay-ms", delay_ms]
}

#[test]
fn test_taken_value_blocks_submission() -> Result<()> {
    let env = TestEnv::new();
    let backend = StubBackend::start("200 OK", "用户名已存在");

    let run = env
        .run_with_input(&check_args("username", &backend.base_url, "100"), "a\nal\nali\nalice\n")?
        .ok()?;

    assert!(run.stdout.contains("taken"));
    assert!(run.stdout.contains("用户名已存在"));
    assert!(run.stdout.contains("checks sent:"));
    assert!(run.stdout.contains("submission blocked"));

    let requests = backend.requests();
    assert_eq!(requests.len(), 1, "{requests:?}");
    assert!(requests[0].starts_with("GET /api/user/check/username?username=alice "));

    Ok(())
}

#[test]
fn test_available_value_allows_submission() -> Result<()> {
    let env = TestEnv::new();
    let backend = StubBackend::start("200 OK", "邮箱可用");

    let run = env
        .run_with_input(&check_args("email", &backend.base_url, "50"), "bob@shop.test\n")?
        .ok()?;

    assert!(run.stdout.contains("available"));
    assert!(!run.stdout.contains("submission blocked"));

    let requests = backend.requests();
    assert_eq!(requests.len(), 1, "{requests:?}");
    assert!(requests[0].starts_with("GET /api/user/check/email?email=bob%40shop.test "));

    Ok(())
}

#[test]
fn test_custom_endpoint() -> Result<()> {
    let env = TestEnv::new();
    let backend = StubBackend::start("200 OK", "可用");

    let mut args = check_args("nickname", &backend.base_url, "20");
    args.extend(["--path", "/api/profile/nick", "--param", "nick"]);
    env.run_with_input(&args, "neo\n")?.ok()?;

    let requests = backend.requests();
    assert!(requests[0].starts_with("GET /api/profile/nick?nick=neo "));

    Ok(())
}

#[test]
fn test_rejection_body_becomes_the_message() -> Result<()> {
    let env = TestEnv::new();
    let backend = StubBackend::start("400 Bad Request", "用户名格式不正确");

    let run = env
        .run_with_input(&check_args("username", &backend.base_url, "50"), "a b\n")?
        .ok()?;

    assert!(run.stdout.contains("error"));
    assert!(run.stdout.contains("用户名格式不正确"));
    assert!(run.stdout.contains("submission blocked"));

    Ok(())
}

#[test]
fn test_unreachable_backend_is_an_error() -> Result<()> {
    let env = TestEnv::new();

    let run = env
        .run_with_input(&check_args("username", "http://127.0.0.1:1", "20"), "alice\n")?
        .ok()?;

    assert!(run.stdout.contains("error"));
    assert!(run.stdout.contains("submission blocked"));

    Ok(())
}

#[test]
fn test_closed_gate_sends_nothing() -> Result<()> {
    let env = TestEnv::new();
    let backend = StubBackend::start("200 OK", "用户名可用");

    let run = env
        .run_with_input(&check_args("username", &backend.base_url, "200"), ":off\nalice\n")?
        .ok()?;

    assert!(run.stdout.contains("idle"));
    assert!(!run.stdout.contains("submission blocked"));
    assert!(backend.requests().is_empty());

    Ok(())
}
