// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::error::ProbeError;
use std::io::ErrorKind;
use std::process::{Command, Stdio};
use tracing::{info, warn};

/// Run `<program> --version` and return the first line it prints.
pub fn probe_version(program: &str) -> Result<String, ProbeError> {
    let output = Command::new(program)
        .arg("--version")
        .stdin(Stdio::null())
        .output()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => ProbeError::NotFound(program.to_string()),
            _ => ProbeError::Io {
                program: program.to_string(),
                source: e,
            },
        })?;

    if !output.status.success() {
        return Err(ProbeError::Failed {
            program: program.to_string(),
            status: output.status,
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
}

/// Like [`probe_version`], but any failure is logged and swallowed.
pub fn probe_version_best_effort(program: &str) -> Option<String> {
    match probe_version(program) {
        Ok(version) => {
            info!("Emulator: {}", version);
            Some(version)
        }
        Err(e) => {
            warn!("Emulator probe failed (continuing): {}", e);
            None
        }
    }
}
