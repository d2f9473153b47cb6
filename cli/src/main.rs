//! sb-ctl: one-shot client for the settings broker
//!
//! Builds one command from the command line, sends it through the
//! elevation bridge to a broker process, and prints the response line.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use sb_engine::domain::codec::encode_response;
use sb_engine::{
    BridgeConfig, BrokerLaunch, Command, CommandChannel, ElevationBridge, RegistryHive,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sb-ctl", version, about = "Send one command to the settings broker")]
struct Cli {
    /// Broker executable; defaults to the configured program
    #[arg(long)]
    broker: Option<PathBuf>,

    /// Round-trip timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HiveArg {
    ClassesRoot,
    CurrentUser,
    LocalMachine,
    Users,
    CurrentConfig,
}

impl From<HiveArg> for RegistryHive {
    fn from(hive: HiveArg) -> Self {
        match hive {
            HiveArg::ClassesRoot => RegistryHive::ClassesRoot,
            HiveArg::CurrentUser => RegistryHive::CurrentUser,
            HiveArg::LocalMachine => RegistryHive::LocalMachine,
            HiveArg::Users => RegistryHive::Users,
            HiveArg::CurrentConfig => RegistryHive::CurrentConfig,
        }
    }
}

#[derive(Subcommand)]
enum CliCommand {
    /// Round-trip check against the broker
    Echo { message: String },

    /// Read an integer registry value
    ReadInt {
        hive: HiveArg,
        key: String,
        value_name: String,
        #[arg(default_value_t = -1, allow_hyphen_values = true)]
        default_value: i32,
    },

    /// Read a string registry value
    ReadString {
        hive: HiveArg,
        key: String,
        value_name: String,
        #[arg(default_value = "")]
        default_value: String,
    },

    /// Write an integer registry value
    WriteInt {
        hive: HiveArg,
        key: String,
        value_name: String,
        #[arg(allow_hyphen_values = true)]
        value: i32,
    },

    /// Write a string registry value
    WriteString {
        hive: HiveArg,
        key: String,
        value_name: String,
        value: String,
    },

    /// Copy a file
    FileCopy {
        source: PathBuf,
        destination: PathBuf,
        #[arg(long)]
        overwrite: bool,
    },

    /// Query a system parameter by action code
    SysparamGet { action: u32 },

    /// Set a system parameter by action code
    SysparamSet {
        action: u32,
        value: String,
        #[arg(long)]
        update_profile: bool,
    },

    /// Stop the broker
    Shutdown,
}

impl CliCommand {
    fn to_command(&self) -> Command {
        match self {
            CliCommand::Echo { message } => Command::Echo {
                message: message.clone(),
            },
            CliCommand::ReadInt {
                hive,
                key,
                value_name,
                default_value,
            } => Command::RegistryReadIntValue {
                hive: (*hive).into(),
                key: key.clone(),
                value_name: value_name.clone(),
                default_value: *default_value,
            },
            CliCommand::ReadString {
                hive,
                key,
                value_name,
                default_value,
            } => Command::RegistryReadStringValue {
                hive: (*hive).into(),
                key: key.clone(),
                value_name: value_name.clone(),
                default_value: default_value.clone(),
            },
            CliCommand::WriteInt {
                hive,
                key,
                value_name,
                value,
            } => Command::RegistryWriteIntValue {
                hive: (*hive).into(),
                key: key.clone(),
                value_name: value_name.clone(),
                value: *value,
            },
            CliCommand::WriteString {
                hive,
                key,
                value_name,
                value,
            } => Command::RegistryWriteStringValue {
                hive: (*hive).into(),
                key: key.clone(),
                value_name: value_name.clone(),
                value: value.clone(),
            },
            CliCommand::FileCopy {
                source,
                destination,
                overwrite,
            } => Command::FileCopy {
                source_path: source.display().to_string(),
                destination_path: destination.display().to_string(),
                overwrite: *overwrite,
            },
            CliCommand::SysparamGet { action } => {
                Command::SystemParametersInfoGetValue { action: *action }
            }
            CliCommand::SysparamSet {
                action,
                value,
                update_profile,
            } => Command::SystemParametersInfoSetValue {
                action: *action,
                value: value.clone(),
                update_profile: *update_profile,
            },
            CliCommand::Shutdown => Command::ShutdownServer,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = BridgeConfig::load()?;
    if let Some(broker) = &cli.broker {
        config.broker_program = broker.display().to_string();
    }
    if let Some(timeout) = cli.timeout {
        config.round_trip_timeout_secs = timeout;
    }

    let bridge = ElevationBridge::new(BrokerLaunch::from_config(&config));
    let command = cli.command.to_command();

    let response = match cli.command {
        CliCommand::Shutdown => bridge.shutdown().await,
        _ => {
            let response = bridge.send_command(&command).await;
            // One command per invocation; stop the broker we spawned
            bridge.shutdown().await;
            response
        }
    };

    println!("{}", encode_response(&response)?);
    if response.is_success() {
        eprintln!("{}", "ok".green());
        Ok(())
    } else {
        eprintln!(
            "{}: {}",
            "error".red(),
            response.error_message().unwrap_or("unspecified failure")
        );
        std::process::exit(1);
    }
}
