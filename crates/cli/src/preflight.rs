// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use goblin::elf::header::EM_ARM;
use goblin::elf::Elf;
use std::path::Path;
use tracing::{debug, warn};

/// Check the resolved `-kernel` image before handing it to QEMU.
///
/// A missing file is an error. Anything QEMU might still accept (non-ELF
/// images, ELF for another machine) only produces a warning.
pub fn check_firmware(path: &Path) -> Result<()> {
    let buffer = std::fs::read(path)
        .with_context(|| format!("Firmware image {:?} is not readable; build it first", path))?;

    match Elf::parse(&buffer) {
        Ok(elf) if elf.header.e_machine == EM_ARM => {
            debug!("Firmware {:?}: ARM ELF, entry {:#x}", path, elf.entry);
        }
        Ok(elf) => warn!(
            "Firmware {:?} targets ELF machine {} but the emulator is ARM",
            path, elf.header.e_machine
        ),
        Err(e) => warn!("Firmware {:?} is not a valid ELF ({}); passing it to QEMU anyway", path, e),
    }

    Ok(())
}
