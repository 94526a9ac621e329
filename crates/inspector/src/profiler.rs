//! Report sources
//!
//! A report comes either from running system_profiler or from a JSON file
//! saved earlier (or piped in on stdin). Either way the bytes are decoded
//! into a [`SystemReport`] and classified off the async runtime.

use crate::config::ProfilerSettings;
use anyhow::{Context, Result};
use classifier::{Inventory, classify_cables, classify_devices};
use model::{ReportError, SystemReport, THUNDERBOLT_DATA_TYPE, USB_DATA_TYPE};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::{debug, info};

/// Where the raw JSON report is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSource {
    /// Run the enumeration tool
    Profiler { path: PathBuf, timeout: Duration },
    /// Read a saved report
    File(PathBuf),
    /// Read a report piped in on stdin
    Stdin,
}

impl ReportSource {
    /// Source for the `--input` argument; `-` means stdin
    pub fn from_input(input: &str) -> Self {
        if input == "-" {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(shellexpand::tilde(input).as_ref()))
        }
    }

    /// Source running the configured profiler
    pub fn profiler(settings: &ProfilerSettings) -> Self {
        Self::Profiler {
            path: settings.resolved_path(),
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Profiler { path, .. } => path.display().to_string(),
            Self::File(path) => path.display().to_string(),
            Self::Stdin => "stdin".to_string(),
        }
    }

    /// Raw JSON bytes from this source
    pub async fn read_payload(&self) -> model::Result<Vec<u8>> {
        match self {
            Self::Profiler { path, timeout } => run_profiler(path, *timeout).await,
            Self::File(path) => Ok(tokio::fs::read(path).await?),
            Self::Stdin => {
                let mut payload = Vec::new();
                tokio::io::stdin().read_to_end(&mut payload).await?;
                Ok(payload)
            }
        }
    }

    /// Read and decode a report
    pub async fn collect(&self) -> model::Result<SystemReport> {
        let payload = self.read_payload().await?;
        debug!("Read {} bytes from {}", payload.len(), self.describe());
        SystemReport::from_json(&payload)
    }
}

/// Run `<path> -json SPUSBDataType SPThunderboltDataType` and capture stdout
///
/// The child is killed if it outlives `timeout`. A non-zero exit reports the
/// trimmed stderr.
pub async fn run_profiler(path: &Path, timeout: Duration) -> model::Result<Vec<u8>> {
    info!(
        "Running {} -json {} {}",
        path.display(),
        USB_DATA_TYPE,
        THUNDERBOLT_DATA_TYPE
    );

    let child = Command::new(path)
        .args(["-json", USB_DATA_TYPE, THUNDERBOLT_DATA_TYPE])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(ReportError::Launch)?;

    let output = tokio::time::timeout(timeout, child.wait_with_output())
        .await
        .map_err(|_| ReportError::Timeout {
            secs: timeout.as_secs(),
        })??;

    if !output.status.success() {
        return Err(ReportError::CommandFailed {
            // Killed by a signal: no exit code
            status: output.status.code().unwrap_or(-1),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output.stdout)
}

/// Collect a report and classify both trees
///
/// Devices and cables come from disjoint parts of the report, so the two
/// passes run in parallel on the blocking pool.
pub async fn inspect(source: &ReportSource) -> Result<Inventory> {
    let report = source
        .collect()
        .await
        .with_context(|| format!("Failed to read report from {}", source.describe()))?;
    let report = Arc::new(report);

    let devices = tokio::task::spawn_blocking({
        let report = Arc::clone(&report);
        move || classify_devices(&report.usb_nodes)
    });
    let cables = tokio::task::spawn_blocking({
        let report = Arc::clone(&report);
        move || classify_cables(&report.thunderbolt_nodes)
    });

    let (devices, cables) =
        tokio::try_join!(devices, cables).context("Classification task failed")?;
    info!("Found {} devices and {} cables", devices.len(), cables.len());

    Ok(Inventory { devices, cables })
}
