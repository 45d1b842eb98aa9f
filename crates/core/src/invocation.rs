// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::error::LaunchResult;
use crate::machine::{MachineProfile, GDB_PORT};
use crate::mode::LaunchMode;
use serde::Serialize;
use std::fmt;

/// An external-process command line. The first token is the program.
///
/// Token order is significant: QEMU options take their value from the next
/// token, so the builder never reorders or interleaves pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EmulatorInvocation(Vec<String>);

impl EmulatorInvocation {
    pub fn program(&self) -> &str {
        &self.0[0]
    }

    pub fn args(&self) -> &[String] {
        &self.0[1..]
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.0
    }

    /// Value following the first occurrence of `flag`, if any.
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.0
            .windows(2)
            .find(|pair| pair[0] == flag)
            .map(|pair| pair[1].as_str())
    }

    /// Apply `f` to every token, keeping order. Used by the build environment
    /// to resolve path templates.
    pub fn map_tokens<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&str) -> String,
    {
        Self(self.0.iter().map(|t| f(t)).collect())
    }

    /// Shell-quoted form suitable for logs and copy/paste.
    pub fn to_command_line(&self) -> String {
        self.0
            .iter()
            .map(|t| match shlex::try_quote(t) {
                Ok(quoted) => quoted.into_owned(),
                Err(_) => t.clone(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for EmulatorInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_command_line())
    }
}

/// Non-empty token list, first token being the program.
struct CommandBuilder(Vec<String>);

impl CommandBuilder {
    fn new(program: &str) -> Self {
        Self(vec![program.to_string()])
    }

    fn flag(mut self, flag: &str) -> Self {
        self.0.push(flag.to_string());
        self
    }

    fn opt(mut self, flag: &str, value: impl Into<String>) -> Self {
        self.0.push(flag.to_string());
        self.0.push(value.into());
        self
    }

    fn build(self) -> EmulatorInvocation {
        EmulatorInvocation(self.0)
    }
}

/// Build the emulator command line for the stock netduinoplus2 / Cortex-M3 board.
pub fn build_command(mode: &LaunchMode, artifact_path: &str) -> LaunchResult<EmulatorInvocation> {
    build_command_for(&MachineProfile::default(), mode, artifact_path)
}

/// Build the emulator command line for `profile`.
///
/// `artifact_path` is passed through untouched; templates like `$BUILD_DIR`
/// are resolved by whoever eventually runs the command.
pub fn build_command_for(
    profile: &MachineProfile,
    mode: &LaunchMode,
    artifact_path: &str,
) -> LaunchResult<EmulatorInvocation> {
    let board = || {
        CommandBuilder::new(&profile.emulator)
            .opt("-machine", &profile.machine)
            .opt("-cpu", &profile.cpu)
    };

    let invocation = match mode {
        LaunchMode::SerialRedirect { serial_port } => board()
            .opt("-gdb", format!("tcp::{}", GDB_PORT))
            .flag("-nographic")
            .opt("-kernel", artifact_path)
            .opt(
                "-serial",
                format!("chardev:serdev,path={},id=serdev", serial_port),
            )
            .opt("-monitor", "none")
            .build(),
        LaunchMode::Semihosting => board()
            .flag("-nographic")
            .opt("-kernel", artifact_path)
            .opt("-serial", "stdio")
            .opt("-semihosting-config", "enable=on,target=native")
            .build(),
        LaunchMode::ExternalDebugServer { raw_command } => {
            EmulatorInvocation(raw_command.tokens()?)
        }
    };

    tracing::debug!(mode = mode.name(), "Built emulator command: {}", invocation);
    Ok(invocation)
}
