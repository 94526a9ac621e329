//! End-to-end tests for the usb-inspector binary
//!
//! Runs the compiled binary against saved reports so no system_profiler is
//! needed:
//! - Text and JSON output
//! - Filters from flags and from the config file
//! - Error reporting and exit status

use common::test_utils::SAMPLE_REPORT_JSON;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::{TempDir, tempdir};

fn inspector() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_usb-inspector"));
    // Keep user and system config files out of the picture
    cmd.env("HOME", "/nonexistent-usb-inspector-home")
        .env_remove("RUST_LOG");
    cmd
}

fn write_report(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("report.json");
    std::fs::write(&path, content).unwrap();
    path
}

fn run_with_input(path: &Path, extra: &[&str]) -> Output {
    inspector()
        .arg("--input")
        .arg(path)
        .args(extra)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

// ============================================================================
// Output formats
// ============================================================================

mod output {
    use super::*;

    #[test]
    fn test_text_report() {
        let dir = tempdir().unwrap();
        let output = run_with_input(&write_report(&dir, SAMPLE_REPORT_JSON), &[]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let text = stdout(&output);
        assert!(text.contains("=== USB Devices ==="));
        assert!(text.contains("• Portable SSD T7"));
        assert!(text.contains("  Transport: USB 3.1"));
        assert!(text.contains("=== USB4 / Thunderbolt Cables ==="));
        assert!(text.contains("  Protocols: USB4, DisplayPort, PCIe"));
    }

    #[test]
    fn test_json_report() {
        let dir = tempdir().unwrap();
        let output = run_with_input(&write_report(&dir, SAMPLE_REPORT_JSON), &["--json"]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["devices"].as_array().unwrap().len(), 6);
        assert_eq!(value["cables"].as_array().unwrap().len(), 2);
        assert_eq!(value["devices"][1]["transport"], "usb1");
    }

    #[test]
    fn test_report_from_stdin() {
        let mut child = inspector()
            .args(["--input", "-", "--json"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        child
            .stdin
            .take()
            .unwrap()
            .write_all(SAMPLE_REPORT_JSON.as_bytes())
            .unwrap();
        let output = child.wait_with_output().unwrap();

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["cables"][0]["serial_number"], "C4ABC123");
    }

    #[test]
    fn test_empty_report_messages() {
        let dir = tempdir().unwrap();
        let output = run_with_input(&write_report(&dir, "{}"), &[]);

        assert!(output.status.success());
        let text = stdout(&output);
        assert!(text.contains("No USB devices were reported by system_profiler."));
        assert!(text.contains("No smart USB-C / Thunderbolt cables detected"));
    }

    #[test]
    fn test_logs_stay_off_stdout() {
        let dir = tempdir().unwrap();
        let output = run_with_input(
            &write_report(&dir, SAMPLE_REPORT_JSON),
            &["--json", "--log-level", "debug"],
        );

        assert!(output.status.success());
        // stdout must still be a single JSON document
        serde_json::from_slice::<serde_json::Value>(&output.stdout).unwrap();
        assert!(stderr(&output).contains("usb-inspector v"));
    }
}

// ============================================================================
// Filters
// ============================================================================

mod filters {
    use super::*;

    fn device_names(output: &Output) -> Vec<String> {
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        value["devices"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_hide_built_in_flag() {
        let dir = tempdir().unwrap();
        let output = run_with_input(
            &write_report(&dir, SAMPLE_REPORT_JSON),
            &["--json", "--hide-built-in"],
        );

        assert_eq!(
            device_names(&output),
            vec![
                "Anker Charger",
                "Logitech USB Mouse",
                "LG UltraFine Display Controls",
                "Portable SSD T7",
            ]
        );
    }

    #[test]
    fn test_search_flag() {
        let dir = tempdir().unwrap();
        let output = run_with_input(
            &write_report(&dir, SAMPLE_REPORT_JSON),
            &["--json", "--search", "samsung"],
        );

        assert_eq!(device_names(&output), vec!["Portable SSD T7"]);
    }

    #[test]
    fn test_config_file_settings() {
        let dir = tempdir().unwrap();
        let report = write_report(&dir, SAMPLE_REPORT_JSON);
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "[display]\nformat = \"json\"\nhide_built_in = true\n").unwrap();

        let output = inspector()
            .arg("--config")
            .arg(&config)
            .arg("--input")
            .arg(&report)
            .output()
            .unwrap();

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert_eq!(device_names(&output).len(), 4);
    }
}

// ============================================================================
// Errors
// ============================================================================

mod errors {
    use super::*;

    #[test]
    fn test_malformed_report() {
        let dir = tempdir().unwrap();
        let output = run_with_input(&write_report(&dir, "[1, 2, 3]"), &[]);

        assert!(!output.status.success());
        assert!(stderr(&output).contains("Failed to decode system_profiler JSON payload."));
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempdir().unwrap();
        let output = run_with_input(&write_report(&dir, "{ not json"), &[]);

        assert!(!output.status.success());
        assert!(stderr(&output).starts_with("Error: "));
    }

    #[test]
    fn test_missing_input_file() {
        let dir = tempdir().unwrap();
        let output = run_with_input(&dir.path().join("absent.json"), &[]);

        assert!(!output.status.success());
        assert!(stderr(&output).contains("Failed to read report from"));
    }

    #[test]
    fn test_missing_profiler() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "[profiler]\npath = \"/nonexistent/system_profiler\"\n").unwrap();

        let output = inspector().arg("--config").arg(&config).output().unwrap();

        assert!(!output.status.success());
        assert!(stderr(&output).contains("/nonexistent/system_profiler"));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let dir = tempdir().unwrap();
        let output = run_with_input(
            &write_report(&dir, SAMPLE_REPORT_JSON),
            &["--timeout", "0"],
        );

        assert!(!output.status.success());
        assert!(stderr(&output).contains("timeout"));
    }

    #[test]
    fn test_invalid_config_file() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "[general]\nlog_level = \"chatty\"\n").unwrap();

        let output = inspector().arg("--config").arg(&config).output().unwrap();

        assert!(!output.status.success());
        assert!(stderr(&output).contains("Invalid log level 'chatty'"));
    }
}
