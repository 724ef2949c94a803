use anyhow::{Context, Result};
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "\u{2713} Created .cmergerc.json\n"
    );

    let content = test.read_file(".cmergerc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["output"], "main.cpp");
    assert_eq!(
        parsed["directories"],
        serde_json::json!(["sim/include", "sim/common", "sim/simx"])
    );
    assert_eq!(parsed["priorityDirectory"], "sim/include");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".cmergerc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        String::from_utf8_lossy(&output.stderr),
        "Error: .cmergerc.json already exists\n"
    );
    assert_eq!(test.read_file(".cmergerc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::sample_project()?;

    test.command().arg("init").output()?;

    let output = test.merge_command().output()?;
    assert!(
        output.status.success(),
        "Merge should work with initialized config. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(test.read_file("main.cpp")?.contains("const int V=1;"));

    Ok(())
}
