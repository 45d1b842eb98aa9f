// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Emulator launch targets for LabWired firmware.
//!
//! Builds the `qemu-system-arm` command line for a firmware image in one of
//! three launch modes and registers it with a build environment as the `qemu`
//! target.

pub mod error;
pub mod invocation;
pub mod machine;
pub mod mode;
pub mod probe;
pub mod registrar;

pub use error::{LaunchError, LaunchResult, ProbeError};
pub use invocation::{build_command, build_command_for, EmulatorInvocation};
pub use machine::MachineProfile;
pub use mode::{DebugServerCommand, LaunchMode};
pub use registrar::{
    configure, CustomTarget, LaunchSetup, TargetMetadata, TargetRegistrar, TargetRegistry,
};
