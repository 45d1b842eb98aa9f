// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::error::{LaunchError, LaunchResult};
use serde::{Deserialize, Serialize};

/// How the emulated board is wired to the host when the target runs.
#[derive(Debug, Clone, PartialEq)]
pub enum LaunchMode {
    /// GDB server on the fixed local port, emulated UART bridged to a host serial device.
    SerialRedirect { serial_port: String },
    /// UART on the emulator's stdio, semihosting enabled, no GDB server.
    Semihosting,
    /// The whole command line comes from the `debug_server` option.
    ExternalDebugServer { raw_command: DebugServerCommand },
}

impl LaunchMode {
    pub fn name(&self) -> &'static str {
        match self {
            LaunchMode::SerialRedirect { .. } => "serial_redirect",
            LaunchMode::Semihosting => "semihosting",
            LaunchMode::ExternalDebugServer { .. } => "external_debug_server",
        }
    }
}

/// A user supplied debug-server command, exactly as it appeared in configuration.
///
/// Any YAML shape is accepted at load time; shapes other than a string or a list
/// of strings land in `Unsupported` and are rejected when the command is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DebugServerCommand {
    Shell(String),
    Argv(Vec<String>),
    Unsupported(serde_yaml::Value),
}

impl DebugServerCommand {
    /// Split the command into process arguments.
    ///
    /// Strings follow POSIX shell quoting rules; lists are taken verbatim.
    pub fn tokens(&self) -> LaunchResult<Vec<String>> {
        match self {
            DebugServerCommand::Shell(cmd) => {
                let tokens = shlex::split(cmd).ok_or_else(|| {
                    LaunchError::configuration(format!(
                        "debug_server command {:?} has an unterminated quote or a trailing escape",
                        cmd
                    ))
                })?;
                match tokens.first().map(|program| program.trim().is_empty()) {
                    None => Err(LaunchError::configuration(
                        "debug_server command is empty; expected a shell command string",
                    )),
                    Some(true) => Err(LaunchError::configuration(
                        "debug_server command starts with an empty program name",
                    )),
                    Some(false) => Ok(tokens),
                }
            }
            DebugServerCommand::Argv(argv) => match argv.first() {
                None => Err(LaunchError::configuration(
                    "debug_server list is empty; expected at least the program name",
                )),
                Some(program) if program.trim().is_empty() => Err(LaunchError::configuration(
                    "debug_server list starts with an empty program name",
                )),
                Some(_) => Ok(argv.clone()),
            },
            DebugServerCommand::Unsupported(value) => Err(LaunchError::configuration(format!(
                "debug_server must be a shell command string or a list of strings, found {}",
                describe_yaml(value)
            ))),
        }
    }
}

impl From<&str> for DebugServerCommand {
    fn from(cmd: &str) -> Self {
        DebugServerCommand::Shell(cmd.to_string())
    }
}

impl From<String> for DebugServerCommand {
    fn from(cmd: String) -> Self {
        DebugServerCommand::Shell(cmd)
    }
}

impl From<Vec<String>> for DebugServerCommand {
    fn from(argv: Vec<String>) -> Self {
        DebugServerCommand::Argv(argv)
    }
}

fn describe_yaml(value: &serde_yaml::Value) -> String {
    use serde_yaml::Value;
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean `{}`", b),
        Value::Number(n) => format!("number `{}`", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Sequence(_) => "a list with non-string items".to_string(),
        Value::Mapping(_) => "a mapping".to_string(),
        Value::Tagged(t) => format!("tagged value `{}`", t.tag),
    }
}
