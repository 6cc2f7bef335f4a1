//! Configuration management workflows
//!
//! Config lives in a TOML file whose location is overridden per test with
//! `FIELDCHECK_CONFIG`.

use crate::common::TestEnv;
use anyhow::Result;

#[test]
fn test_defaults_without_a_file() -> Result<()> {
    let env = TestEnv::new();

    for (key, expected) in [
        ("controller.delay_ms", "1000"),
        ("controller.abort_in_flight", "false"),
        ("controller.markers.available", "可用"),
        ("controller.markers.taken", "存在"),
        ("remote.timeout_ms", "none"),
    ] {
        let run = env.run(&["config", "get", key])?.ok()?;
        assert_eq!(run.value(), expected, "{key}");
    }

    assert!(!env.config_file().exists());

    Ok(())
}

#[test]
fn test_set_then_get() -> Result<()> {
    let env = TestEnv::new();

    env.run(&["config", "set", "controller.delay_ms", "250"])?.ok()?;
    env.run(&["config", "set", "remote.base_url", "http://shop.test"])?.ok()?;

    assert!(env.config_file().exists());
    assert_eq!(env.run(&["config", "get", "controller.delay_ms"])?.ok()?.value(), "250");
    assert_eq!(env.run(&["config", "get", "remote.base_url"])?.ok()?.value(), "http://shop.test");

    let contents = std::fs::read_to_string(env.config_file())?;
    assert!(contents.contains("delay_ms = 250"));

    Ok(())
}

#[test]
fn test_invalid_values_are_not_saved() -> Result<()> {
    let env = TestEnv::new();

    env.run(&["config", "set", "controller.delay_ms", "999999"])?.failed()?;
    env.run(&["config", "set", "controller.delay_ms", "soon"])?.failed()?;
    env.run(&["config", "set", "controller.markers.taken", ""])?.failed()?;
    env.run(&["config", "set", "controller.markers.taken", "可用"])?.failed()?;

    assert_eq!(env.run(&["config", "get", "controller.delay_ms"])?.ok()?.value(), "1000");
    assert!(!env.config_file().exists());

    Ok(())
}

#[test]
fn test_unknown_key() -> Result<()> {
    let env = TestEnv::new();

    let run = env.run(&["config", "get", "controller.speed"])?.failed()?;
    assert!(run.stderr.contains("Unknown config key"));
    assert!(run.stderr.contains("controller.delay_ms"));

    env.run(&["config", "set", "controller.speed", "1"])?.failed()?;

    Ok(())
}

#[test]
fn test_path_and_create() -> Result<()> {
    let env = TestEnv::new();
    let path = env.config_file().display().to_string();

    let run = env.run(&["config", "path"])?.ok()?;
    assert!(run.stdout.contains(&path));
    assert!(run.stdout.contains("does not exist"));

    env.run(&["config", "path", "--create"])?.ok()?;
    assert!(env.config_file().exists());

    let run = env.run(&["config", "path"])?.ok()?;
    assert_eq!(run.value(), path);

    Ok(())
}

#[test]
fn test_list_and_example() -> Result<()> {
    let env = TestEnv::new();

    let run = env.run(&["config", "list"])?.ok()?;
    assert!(run.stdout.contains("[controller]"));
    assert!(run.stdout.contains("[remote]"));

    let run = env.run(&["config", "example"])?.ok()?;
    assert!(run.stdout.contains("[controller.markers]"));
    assert!(run.stdout.contains("delay_ms"));

    Ok(())
}

#[test]
fn test_broken_config_file_is_reported() -> Result<()> {
    let env = TestEnv::new();

    if let Some(dir) = env.config_file().parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(env.config_file(), "[controller\ndelay_ms = ")?;

    let run = env.run(&["config", "list"])?.failed()?;
    assert!(run.stderr.contains("Failed to parse config file"));

    env.run(&["simulate", "--keys", "a@0"])?.failed()?;

    Ok(())
}
