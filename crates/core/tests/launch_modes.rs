// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use labwired_qemu::probe::probe_version_best_effort;
use labwired_qemu::{build_command, DebugServerCommand, LaunchError, LaunchMode};

const ARTIFACT: &str = "build/env/firmware.elf";

#[test]
fn test_serial_redirect_command() {
    let mode = LaunchMode::SerialRedirect {
        serial_port: "/dev/ttyUSB0".to_string(),
    };
    let inv = build_command(&mode, ARTIFACT).unwrap();
    assert_eq!(
        inv.tokens(),
        [
            "qemu-system-arm",
            "-machine",
            "netduinoplus2",
            "-cpu",
            "cortex-m3",
            "-gdb",
            "tcp::1234",
            "-nographic",
            "-kernel",
            "build/env/firmware.elf",
            "-serial",
            "chardev:serdev,path=/dev/ttyUSB0,id=serdev",
            "-monitor",
            "none",
        ]
    );
}

#[test]
fn test_semihosting_command() {
    let inv = build_command(&LaunchMode::Semihosting, ARTIFACT).unwrap();
    assert_eq!(
        inv.tokens(),
        [
            "qemu-system-arm",
            "-machine",
            "netduinoplus2",
            "-cpu",
            "cortex-m3",
            "-nographic",
            "-kernel",
            "build/env/firmware.elf",
            "-serial",
            "stdio",
            "-semihosting-config",
            "enable=on,target=native",
        ]
    );
}

#[test]
fn test_external_debug_server_string() {
    let mode = LaunchMode::ExternalDebugServer {
        raw_command: DebugServerCommand::from("gdbserver :3333 --wait"),
    };
    let inv = build_command(&mode, ARTIFACT).unwrap();
    assert_eq!(inv.tokens(), ["gdbserver", ":3333", "--wait"]);
}

#[test]
fn test_external_debug_server_list() {
    let mode = LaunchMode::ExternalDebugServer {
        raw_command: DebugServerCommand::Argv(vec![
            "qemu-system-arm".to_string(),
            "-M".to_string(),
            "mps2-an385".to_string(),
        ]),
    };
    let inv = build_command(&mode, ARTIFACT).unwrap();
    assert_eq!(inv.tokens(), ["qemu-system-arm", "-M", "mps2-an385"]);
}

#[test]
fn test_external_debug_server_wrong_shape() {
    let raw: DebugServerCommand = serde_yaml::from_str("42").unwrap();
    let mode = LaunchMode::ExternalDebugServer { raw_command: raw };
    let err = build_command(&mode, ARTIFACT).unwrap_err();
    assert!(matches!(err, LaunchError::Configuration(_)));
}

#[test]
fn test_build_command_is_deterministic() {
    let modes = [
        LaunchMode::SerialRedirect {
            serial_port: "COM3".to_string(),
        },
        LaunchMode::Semihosting,
        LaunchMode::ExternalDebugServer {
            raw_command: DebugServerCommand::from("openocd -f \"board/st nucleo.cfg\""),
        },
    ];
    for mode in &modes {
        let a = build_command(mode, ARTIFACT).unwrap();
        let b = build_command(mode, ARTIFACT).unwrap();
        assert_eq!(a, b, "mode {} is not deterministic", mode.name());
    }
}

#[test]
fn test_artifact_template_passes_through() {
    let inv = build_command(&LaunchMode::Semihosting, "$BUILD_DIR/${PROGNAME}.elf").unwrap();
    assert_eq!(inv.flag_value("-kernel"), Some("$BUILD_DIR/${PROGNAME}.elf"));
}

#[test]
fn test_failed_probe_then_build_succeeds() {
    assert!(probe_version_best_effort("labwired-no-such-qemu-binary").is_none());
    let inv = build_command(&LaunchMode::Semihosting, ARTIFACT).unwrap();
    assert_eq!(inv.program(), "qemu-system-arm");
}
