// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use labwired_qemu::machine::DEFAULT_ARTIFACT;
use labwired_qemu::{
    DebugServerCommand, LaunchError, LaunchMode, LaunchResult, LaunchSetup, MachineProfile,
    TargetMetadata,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "qemu.yaml";

/// Default schema version for YAML configs
fn default_schema_version() -> String {
    "1.0".to_string()
}

fn default_artifact() -> String {
    DEFAULT_ARTIFACT.to_string()
}

fn default_true() -> bool {
    true
}

/// Host serial device used by `serial_redirect` when `serial_port` is unset.
///
/// `COM3` on Windows, `/dev/ttyACM0` everywhere else. The device is not checked
/// for existence; QEMU reports a missing device when the target runs.
pub fn default_serial_port() -> &'static str {
    if cfg!(windows) {
        "COM3"
    } else {
        "/dev/ttyACM0"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchModeKind {
    #[default]
    SerialRedirect,
    #[serde(alias = "semihost")]
    Semihosting,
    #[serde(alias = "debug_server")]
    ExternalDebugServer,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineOverrides {
    #[serde(default)]
    pub emulator: Option<String>,
    #[serde(default)]
    pub machine: Option<String>,
    #[serde(default)]
    pub cpu: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LaunchConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    #[serde(default)]
    pub mode: LaunchModeKind,
    #[serde(default)]
    pub serial_port: Option<String>,
    #[serde(default)]
    pub debug_server: Option<DebugServerCommand>,
    #[serde(default = "default_artifact")]
    pub artifact: String,
    #[serde(default = "default_true")]
    pub probe: bool,
    #[serde(default)]
    pub machine: MachineOverrides,
    #[serde(default)]
    pub target: TargetMetadata,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            mode: LaunchModeKind::default(),
            serial_port: None,
            debug_server: None,
            artifact: default_artifact(),
            probe: true,
            machine: MachineOverrides::default(),
            target: TargetMetadata::default(),
        }
    }
}

impl LaunchConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read launch config at {:?}", path.as_ref()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid launch config {:?}", path.as_ref()))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).context("Failed to parse Launch Config YAML")?;
        config.validate()?;
        Ok(config)
    }

    /// Structural checks. The shape of `debug_server` is left to the command
    /// builder so that it is reported as a configuration error at registration.
    pub fn validate(&self) -> Result<()> {
        if self.schema_version != "1.0" {
            anyhow::bail!(
                "Unsupported schema_version '{}'. Supported versions: '1.0'",
                self.schema_version
            );
        }

        if self.artifact.trim().is_empty() {
            anyhow::bail!("'artifact' path cannot be empty");
        }

        if let Some(port) = &self.serial_port {
            if port.trim().is_empty() {
                anyhow::bail!("'serial_port' cannot be empty");
            }
        }

        for (field, value) in [
            ("emulator", &self.machine.emulator),
            ("machine", &self.machine.machine),
            ("cpu", &self.machine.cpu),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                anyhow::bail!("'machine.{}' cannot be empty", field);
            }
        }

        if self.mode != LaunchModeKind::ExternalDebugServer && self.debug_server.is_some() {
            tracing::warn!("'debug_server' is only used in external_debug_server mode; ignoring it");
        }
        if self.mode != LaunchModeKind::SerialRedirect && self.serial_port.is_some() {
            tracing::warn!("'serial_port' is only used in serial_redirect mode; ignoring it");
        }

        Ok(())
    }

    pub fn serial_port(&self) -> &str {
        self.serial_port.as_deref().unwrap_or(default_serial_port())
    }

    pub fn launch_mode(&self) -> LaunchResult<LaunchMode> {
        match self.mode {
            LaunchModeKind::SerialRedirect => Ok(LaunchMode::SerialRedirect {
                serial_port: self.serial_port().to_string(),
            }),
            LaunchModeKind::Semihosting => Ok(LaunchMode::Semihosting),
            LaunchModeKind::ExternalDebugServer => match &self.debug_server {
                Some(raw) => Ok(LaunchMode::ExternalDebugServer {
                    raw_command: raw.clone(),
                }),
                None => Err(LaunchError::configuration(
                    "mode 'external_debug_server' requires 'debug_server' \
                     (a shell command string or a list of strings)",
                )),
            },
        }
    }

    pub fn machine_profile(&self) -> MachineProfile {
        let defaults = MachineProfile::default();
        MachineProfile {
            emulator: self.machine.emulator.clone().unwrap_or(defaults.emulator),
            machine: self.machine.machine.clone().unwrap_or(defaults.machine),
            cpu: self.machine.cpu.clone().unwrap_or(defaults.cpu),
        }
    }

    pub fn launch_setup(&self) -> LaunchResult<LaunchSetup> {
        Ok(LaunchSetup {
            profile: self.machine_profile(),
            mode: self.launch_mode()?,
            artifact: self.artifact.clone(),
            metadata: self.target.clone(),
            probe: self.probe,
        })
    }
}
