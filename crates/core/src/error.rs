// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use std::process::ExitStatus;

/// Errors that prevent a launch target from being built or registered.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl LaunchError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

pub type LaunchResult<T> = Result<T, LaunchError>;

/// Failures of the emulator version probe. These are reported, never fatal.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Emulator executable '{0}' not found")]
    NotFound(String),
    #[error("'{program} --version' exited with {status}")]
    Failed { program: String, status: ExitStatus },
    #[error("Failed to run '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
