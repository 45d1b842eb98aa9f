// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

pub const DEFAULT_EMULATOR: &str = "qemu-system-arm";
pub const DEFAULT_MACHINE: &str = "netduinoplus2";
pub const DEFAULT_CPU: &str = "cortex-m3";

/// Local TCP port of the emulator's GDB stub in serial-redirect mode.
pub const GDB_PORT: u16 = 1234;

/// Firmware image location, resolved later by the build environment.
pub const DEFAULT_ARTIFACT: &str = "$BUILD_DIR/${PROGNAME}.elf";

/// Emulator executable plus the board and core it is asked to model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineProfile {
    pub emulator: String,
    pub machine: String,
    pub cpu: String,
}

impl Default for MachineProfile {
    fn default() -> Self {
        Self {
            emulator: DEFAULT_EMULATOR.to_string(),
            machine: DEFAULT_MACHINE.to_string(),
            cpu: DEFAULT_CPU.to_string(),
        }
    }
}
