// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::error::LaunchResult;
use crate::invocation::{build_command_for, EmulatorInvocation};
use crate::machine::MachineProfile;
use crate::mode::LaunchMode;
use crate::probe::probe_version_best_effort;
use serde::{Deserialize, Serialize};
use tracing::info;

pub const DEFAULT_TARGET_NAME: &str = "qemu";
pub const DEFAULT_TARGET_TITLE: &str = "Run in QEMU";
pub const DEFAULT_TARGET_DESCRIPTION: &str = "Launch QEMU emulator";
pub const DEFAULT_TARGET_GROUP: &str = "Platform";

/// Display metadata attached to a registered target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetMetadata {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_group")]
    pub group: String,
}

fn default_title() -> String {
    DEFAULT_TARGET_TITLE.to_string()
}

fn default_description() -> String {
    DEFAULT_TARGET_DESCRIPTION.to_string()
}

fn default_group() -> String {
    DEFAULT_TARGET_GROUP.to_string()
}

impl Default for TargetMetadata {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            group: default_group(),
        }
    }
}

/// A named, user-invokable action handed to the build environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomTarget {
    pub name: String,
    pub invocation: EmulatorInvocation,
    #[serde(flatten)]
    pub metadata: TargetMetadata,
}

/// Boundary to the host build system.
///
/// The launcher never assumes a registered target is later executed.
pub trait TargetRegistrar {
    fn register(&mut self, target: CustomTarget);
}

/// In-memory registrar. Registration order is preserved; registering an
/// existing name replaces the earlier entry in place.
#[derive(Debug, Default)]
pub struct TargetRegistry {
    targets: Vec<CustomTarget>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&CustomTarget> {
        self.targets.iter().find(|t| t.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CustomTarget> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl TargetRegistrar for TargetRegistry {
    fn register(&mut self, target: CustomTarget) {
        match self.targets.iter_mut().find(|t| t.name == target.name) {
            Some(existing) => *existing = target,
            None => self.targets.push(target),
        }
    }
}

/// Everything needed to register the emulator target once.
#[derive(Debug, Clone)]
pub struct LaunchSetup {
    pub profile: MachineProfile,
    pub mode: LaunchMode,
    pub artifact: String,
    pub metadata: TargetMetadata,
    /// Run `<emulator> --version` before building the command.
    pub probe: bool,
}

/// Build the emulator invocation and register it under `qemu`.
///
/// The registrar is called exactly once on success and never on error.
pub fn configure<R: TargetRegistrar + ?Sized>(
    registrar: &mut R,
    setup: &LaunchSetup,
) -> LaunchResult<()> {
    if setup.probe && !matches!(setup.mode, LaunchMode::ExternalDebugServer { .. }) {
        probe_version_best_effort(&setup.profile.emulator);
    }

    let invocation = build_command_for(&setup.profile, &setup.mode, &setup.artifact)?;

    info!(
        "Registering target '{}' ({} mode)",
        DEFAULT_TARGET_NAME,
        setup.mode.name()
    );
    registrar.register(CustomTarget {
        name: DEFAULT_TARGET_NAME.to_string(),
        invocation,
        metadata: setup.metadata.clone(),
    });
    Ok(())
}
