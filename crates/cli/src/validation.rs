// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::{EXIT_CONFIG_ERROR, EXIT_PASS};
use labwired_qemu::machine::DEFAULT_ARTIFACT;
use labwired_qemu::{configure, LaunchMode, TargetRegistry};
use labwired_qemu_config::LaunchConfig;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    mode: Option<String>,
    command: Option<Vec<String>>,
    errors: Vec<String>,
    warnings: Vec<String>,
    context: String,
}

impl ValidationResult {
    fn new(context: impl Into<String>) -> Self {
        Self {
            valid: true,
            mode: None,
            command: None,
            errors: Vec::new(),
            warnings: Vec::new(),
            context: context.into(),
        }
    }

    fn error(&mut self, msg: impl Into<String>) {
        self.valid = false;
        self.errors.push(msg.into());
    }

    fn warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

/// Load, validate and dry-run the launch config; print a JSON report.
///
/// The emulator is never probed or started.
pub fn run_validate(config: &LaunchConfig, source: Option<&Path>) -> ExitCode {
    let context = match source {
        Some(path) => format!("LaunchConfig: {:?}", path),
        None => "LaunchConfig: <defaults>".to_string(),
    };
    let mut result = ValidationResult::new(context);

    let mut setup = match config.launch_setup() {
        Ok(s) => s,
        Err(e) => {
            result.error(e.to_string());
            return print_result(&result);
        }
    };
    setup.probe = false;
    result.mode = Some(setup.mode.name().to_string());

    match &setup.mode {
        LaunchMode::SerialRedirect { serial_port } if config.serial_port.is_none() => {
            result.warning(format!(
                "'serial_port' not set; using platform default '{}'",
                serial_port
            ));
        }
        LaunchMode::ExternalDebugServer { .. } if config.artifact != DEFAULT_ARTIFACT => {
            result.warning("'artifact' is not used in external_debug_server mode");
        }
        _ => {}
    }

    let mut registry = TargetRegistry::new();
    match configure(&mut registry, &setup) {
        Ok(()) => {
            result.command = registry
                .iter()
                .next()
                .map(|t| t.invocation.tokens().to_vec());
        }
        Err(e) => result.error(e.to_string()),
    }

    print_result(&result)
}

fn print_result(result: &ValidationResult) -> ExitCode {
    let json = serde_json::to_string_pretty(result).unwrap_or_default();
    println!("{}", json);

    if result.valid {
        ExitCode::from(EXIT_PASS)
    } else {
        ExitCode::from(EXIT_CONFIG_ERROR)
    }
}
