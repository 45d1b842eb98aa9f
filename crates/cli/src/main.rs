// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use clap::{Parser, Subcommand};
use labwired_qemu::{configure, CustomTarget, TargetRegistry};
use labwired_qemu_config::{LaunchConfig, DEFAULT_CONFIG_FILE};
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};
use tracing::{error, info};

mod build_env;
mod preflight;
mod validation;

use build_env::BuildEnv;

const EXIT_PASS: u8 = 0;
const EXIT_CONFIG_ERROR: u8 = 2;
const EXIT_RUNTIME_ERROR: u8 = 3;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "LabWired QEMU launcher",
    long_about = "Registers a `qemu` target that runs LabWired firmware in qemu-system-arm, \
                  then lists, prints or runs it."
)]
struct Cli {
    /// Path to the launch config (YAML). Defaults to ./qemu.yaml when it exists.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Build directory substituted for $BUILD_DIR
    #[arg(long, global = true, default_value = "build")]
    build_dir: PathBuf,

    /// Program name substituted for $PROGNAME
    #[arg(long, global = true, default_value = "firmware")]
    progname: String,

    /// Skip the emulator version probe
    #[arg(long, global = true)]
    no_probe: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered targets.
    Targets(TargetsArgs),

    /// Print a target's command line, shell quoted.
    Print(PrintArgs),

    /// Run a target; the emulator's exit status is returned unchanged.
    Run(RunArgs),

    /// Ask the emulator for its version.
    Probe,

    /// Validate the launch config and report the resulting command (JSON).
    Validate,
}

#[derive(Parser, Debug)]
struct TargetsArgs {
    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    format: String,

    /// Substitute $BUILD_DIR / $PROGNAME in the listed commands
    #[arg(long)]
    resolved: bool,
}

#[derive(Parser, Debug)]
struct PrintArgs {
    /// Target name
    #[arg(default_value = "qemu")]
    name: String,

    /// Substitute $BUILD_DIR / $PROGNAME
    #[arg(long)]
    resolved: bool,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Target name
    #[arg(default_value = "qemu")]
    name: String,

    /// Do not check the firmware image before launching
    #[arg(long)]
    no_check: bool,
}

#[derive(Serialize)]
struct TargetReport<'a> {
    #[serde(flatten)]
    target: &'a CustomTarget,
    command_line: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.trace {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    // stdout is reserved for command output.
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Targets(args) => run_targets(&cli, args),
        Commands::Print(args) => run_print(&cli, args),
        Commands::Run(args) => run_target(&cli, args),
        Commands::Probe => run_probe(&cli),
        Commands::Validate => match load_config(&cli) {
            Ok(config) => validation::run_validate(&config, config_path(&cli).as_deref()),
            Err(e) => {
                error!("{:#}", e);
                ExitCode::from(EXIT_CONFIG_ERROR)
            }
        },
    }
}

fn config_path(cli: &Cli) -> Option<PathBuf> {
    match &cli.config {
        Some(path) => Some(path.clone()),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            default.exists().then(|| default.to_path_buf())
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<LaunchConfig> {
    match config_path(cli) {
        Some(path) => {
            info!("Loading launch config: {:?}", path);
            LaunchConfig::from_file(&path)
        }
        None => {
            info!(
                "No {} found; using the stock serial_redirect target",
                DEFAULT_CONFIG_FILE
            );
            Ok(LaunchConfig::default())
        }
    }
}

/// One configuration load: probe (optional), build, register.
fn load_registry(cli: &Cli) -> anyhow::Result<TargetRegistry> {
    let config = load_config(cli)?;
    let mut setup = config.launch_setup()?;
    if cli.no_probe {
        setup.probe = false;
    }

    let mut registry = TargetRegistry::new();
    configure(&mut registry, &setup)?;
    Ok(registry)
}

fn build_env(cli: &Cli) -> BuildEnv {
    BuildEnv {
        build_dir: cli.build_dir.to_string_lossy().into_owned(),
        progname: cli.progname.clone(),
    }
}

fn lookup<'a>(registry: &'a TargetRegistry, name: &str) -> Option<&'a CustomTarget> {
    let target = registry.get(name);
    if target.is_none() {
        let known: Vec<_> = registry.iter().map(|t| t.name.as_str()).collect();
        error!("Unknown target '{}'. Registered targets: {}", name, known.join(", "));
    }
    target
}

fn run_targets(cli: &Cli, args: &TargetsArgs) -> ExitCode {
    let registry = match load_registry(cli) {
        Ok(r) => r,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    let env = build_env(cli);
    let resolved: Vec<CustomTarget> = registry
        .iter()
        .map(|t| {
            let mut t = t.clone();
            if args.resolved {
                t.invocation = env.resolve(&t.invocation);
            }
            t
        })
        .collect();

    if args.format == "json" {
        let reports: Vec<_> = resolved
            .iter()
            .map(|t| TargetReport {
                target: t,
                command_line: t.invocation.to_command_line(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports).unwrap_or_default());
    } else {
        println!("Registered Targets:");
        for t in &resolved {
            println!("- {} \"{}\" [{}]", t.name, t.metadata.title, t.metadata.group);
            println!("    {}", t.metadata.description);
            println!("    $ {}", t.invocation);
        }
    }

    ExitCode::from(EXIT_PASS)
}

fn run_print(cli: &Cli, args: &PrintArgs) -> ExitCode {
    let registry = match load_registry(cli) {
        Ok(r) => r,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };
    let Some(target) = lookup(&registry, &args.name) else {
        return ExitCode::from(EXIT_CONFIG_ERROR);
    };

    let invocation = if args.resolved {
        build_env(cli).resolve(&target.invocation)
    } else {
        target.invocation.clone()
    };
    println!("{}", invocation);
    ExitCode::from(EXIT_PASS)
}

fn run_target(cli: &Cli, args: &RunArgs) -> ExitCode {
    let registry = match load_registry(cli) {
        Ok(r) => r,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };
    let Some(target) = lookup(&registry, &args.name) else {
        return ExitCode::from(EXIT_CONFIG_ERROR);
    };

    let invocation = build_env(cli).resolve(&target.invocation);

    if !args.no_check {
        if let Some(kernel) = invocation.flag_value("-kernel") {
            if let Err(e) = preflight::check_firmware(Path::new(kernel)) {
                error!("{:#}", e);
                return ExitCode::from(EXIT_CONFIG_ERROR);
            }
        }
    }

    info!("{}: {}", target.metadata.title, invocation);
    let status = Command::new(invocation.program())
        .args(invocation.args())
        .status();

    match status {
        Ok(status) => match status.code() {
            Some(code) => {
                info!("'{}' exited with {}", invocation.program(), status);
                passthrough_exit(code)
            }
            None => {
                error!("'{}' terminated by signal ({})", invocation.program(), status);
                ExitCode::from(EXIT_RUNTIME_ERROR)
            }
        },
        Err(e) if e.kind() == ErrorKind::NotFound => {
            error!(
                "'{}' not found; install QEMU or set machine.emulator in the launch config",
                invocation.program()
            );
            ExitCode::from(EXIT_RUNTIME_ERROR)
        }
        Err(e) => {
            error!("Failed to launch '{}': {}", invocation.program(), e);
            ExitCode::from(EXIT_RUNTIME_ERROR)
        }
    }
}

/// Exit with the emulator's status. Codes outside 0..=255 (Windows) cannot be
/// carried by `ExitCode` and are handed to the OS directly.
fn passthrough_exit(code: i32) -> ExitCode {
    match exit_code_byte(code) {
        Some(byte) => ExitCode::from(byte),
        None => std::process::exit(code),
    }
}

fn exit_code_byte(code: i32) -> Option<u8> {
    u8::try_from(code).ok()
}

fn run_probe(cli: &Cli) -> ExitCode {
    let config = match load_config(cli) {
        Ok(c) => c,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    let emulator = config.machine_profile().emulator;
    match labwired_qemu::probe::probe_version(&emulator) {
        Ok(version) => {
            println!("{}", version);
            ExitCode::from(EXIT_PASS)
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(EXIT_RUNTIME_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_in_byte_range_pass_through() {
        assert_eq!(exit_code_byte(0), Some(0));
        assert_eq!(exit_code_byte(7), Some(7));
        assert_eq!(exit_code_byte(255), Some(255));
    }

    #[test]
    fn test_wide_exit_codes_are_not_truncated() {
        // 256 would truncate to 0 (success); 0xC0000005 to 5.
        assert_eq!(exit_code_byte(256), None);
        assert_eq!(exit_code_byte(0xC000_0005_u32 as i32), None);
        assert_eq!(exit_code_byte(-1), None);
    }
}
