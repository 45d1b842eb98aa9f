// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use labwired_qemu::{build_command_for, configure, LaunchError, LaunchMode, TargetRegistry};
use labwired_qemu_config::{LaunchConfig, LaunchModeKind};
use std::time::{SystemTime, UNIX_EPOCH};

#[test]
fn test_serial_redirect_profile() {
    let yaml = r#"
schema_version: "1.0"
mode: serial_redirect
serial_port: /dev/ttyUSB0
artifact: build/env/firmware.elf
probe: false
"#;
    let config = LaunchConfig::from_yaml(yaml).unwrap();
    let setup = config.launch_setup().unwrap();
    let inv = build_command_for(&setup.profile, &setup.mode, &setup.artifact).unwrap();
    assert_eq!(
        inv.flag_value("-serial"),
        Some("chardev:serdev,path=/dev/ttyUSB0,id=serdev")
    );
    assert_eq!(inv.flag_value("-kernel"), Some("build/env/firmware.elf"));
}

#[test]
fn test_semihosting_profile_with_machine_override() {
    let yaml = r#"
mode: semihosting
machine:
  machine: mps2-an385
target:
  title: "Run in QEMU (semihosting)"
"#;
    let config = LaunchConfig::from_yaml(yaml).unwrap();
    assert_eq!(config.mode, LaunchModeKind::Semihosting);

    let setup = config.launch_setup().unwrap();
    assert_eq!(setup.profile.machine, "mps2-an385");
    assert_eq!(setup.profile.cpu, "cortex-m3");
    assert_eq!(setup.metadata.title, "Run in QEMU (semihosting)");
    assert_eq!(setup.metadata.description, "Launch QEMU emulator");
}

#[test]
fn test_debug_server_string_and_list() {
    let as_string = LaunchConfig::from_yaml(
        "mode: external_debug_server\ndebug_server: \"gdbserver :3333 --wait\"\n",
    )
    .unwrap();
    let as_list = LaunchConfig::from_yaml(
        "mode: external_debug_server\ndebug_server: [gdbserver, \":3333\", --wait]\n",
    )
    .unwrap();

    let a = as_string.launch_setup().unwrap();
    let b = as_list.launch_setup().unwrap();
    let inv_a = build_command_for(&a.profile, &a.mode, &a.artifact).unwrap();
    let inv_b = build_command_for(&b.profile, &b.mode, &b.artifact).unwrap();
    assert_eq!(inv_a.tokens(), ["gdbserver", ":3333", "--wait"]);
    assert_eq!(inv_a, inv_b);
}

#[test]
fn test_numeric_debug_server_fails_at_registration() {
    let config =
        LaunchConfig::from_yaml("mode: external_debug_server\ndebug_server: 42\nprobe: false\n")
            .unwrap();
    let setup = config.launch_setup().unwrap();
    assert!(matches!(setup.mode, LaunchMode::ExternalDebugServer { .. }));

    let mut registry = TargetRegistry::new();
    let err = configure(&mut registry, &setup).unwrap_err();
    assert!(matches!(err, LaunchError::Configuration(_)));
    assert!(registry.is_empty());
}

#[test]
fn test_from_file_reports_path() {
    let mut dir = std::env::temp_dir();
    dir.push("labwired-qemu-config-tests");
    let _ = std::fs::create_dir_all(&dir);
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = dir.join(format!("bad-{}.yaml", nonce));
    std::fs::write(&path, "schema_version: \"9\"\n").unwrap();

    let err = LaunchConfig::from_file(&path).unwrap_err();
    let msg = format!("{:#}", err);
    assert!(msg.contains("Invalid launch config"));
    assert!(msg.contains("Unsupported schema_version"));

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_missing_file() {
    let err = LaunchConfig::from_file("/nonexistent/labwired/qemu.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read launch config"));
}

#[test]
fn test_example_profile_parses() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let example = manifest_dir
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("configs/qemu.example.yaml");

    let config = LaunchConfig::from_file(&example).unwrap();
    assert_eq!(config.mode, LaunchModeKind::SerialRedirect);
    assert_eq!(config.serial_port(), "/dev/ttyACM0");
    assert!(config.debug_server.is_none());
}
