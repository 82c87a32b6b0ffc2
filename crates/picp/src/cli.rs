//! Clap derive structures for the `picp` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// picp -- console for picp appliances
#[derive(Debug, Parser)]
#[command(
    name = "picp",
    version,
    about = "Manage a picp appliance from the command line",
    long_about = "Talks to the appliance console REST API: network devices, client-mode\n\
        Wi-Fi, fan, OLED display, access-point settings, and console login.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Appliance profile to use
    #[arg(long, short = 'p', env = "PICP_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Appliance URL (overrides profile)
    #[arg(long, short = 'a', env = "PICP_APPLIANCE", global = true)]
    pub appliance: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PICP_OUTPUT",
        default_value = "json",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "PICP_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (0 waits indefinitely)
    #[arg(long, env = "PICP_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List network interfaces
    #[command(alias = "dev")]
    Devices,

    /// Scan and manage client-mode Wi-Fi connections
    #[command(alias = "w")]
    Wifi(WifiArgs),

    /// Fan channel settings
    Fan(ConfigFileArgs),

    /// OLED display settings
    Display(ConfigFileArgs),

    /// Access-point-mode Wi-Fi settings
    WifiConfig(ConfigFileArgs),

    /// Log in to the appliance console
    Login(LoginArgs),

    /// Console login settings
    LoginSetting(LoginSettingArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Wi-Fi ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WifiArgs {
    #[command(subcommand)]
    pub command: WifiCommand,
}

#[derive(Debug, Subcommand)]
pub enum WifiCommand {
    /// List access points visible from a wireless interface
    #[command(alias = "ls")]
    List {
        /// Interface name (e.g. wlan0)
        device: String,
    },

    /// Connect an interface to an access point
    Connect(WifiConnectArgs),

    /// Bring a saved connection up
    Up {
        /// Connection UUID
        connection_uuid: String,
    },

    /// Bring a saved connection down
    Down {
        /// Connection UUID
        connection_uuid: String,
    },

    /// Forget a saved connection
    #[command(alias = "rm")]
    Delete {
        /// Connection UUID
        connection_uuid: String,
    },
}

#[derive(Debug, Args)]
#[command(group(
    clap::ArgGroup::new("target").required(true).args(["ssid", "bssid"])
))]
pub struct WifiConnectArgs {
    /// Interface to connect
    #[arg(long, short = 'd')]
    pub device: String,

    /// Network name
    #[arg(long, conflicts_with = "bssid")]
    pub ssid: Option<String>,

    /// Access point hardware address
    #[arg(long)]
    pub bssid: Option<String>,

    /// Network password (8-32 characters)
    #[arg(long, env = "PICP_WIFI_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// The network does not broadcast its SSID
    #[arg(long)]
    pub hidden: bool,

    /// WEP key type (0, 1 or 2)
    #[arg(long, value_parser = ["0", "1", "2"])]
    pub wep_key_type: Option<String>,
}

// ── Hardware config ──────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigFileArgs {
    #[command(subcommand)]
    pub command: ConfigFileCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigFileCommand {
    /// Show the current settings
    Get,

    /// Replace the settings with a JSON document
    Set {
        /// JSON file with the new settings ("-" reads stdin)
        #[arg(long, short = 'f')]
        file: PathBuf,
    },
}

// ── Login ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Console user (defaults to the profile's user)
    #[arg(long, short = 'u')]
    pub user: Option<String>,
}

#[derive(Debug, Args)]
pub struct LoginSettingArgs {
    #[command(subcommand)]
    pub command: LoginSettingCommand,
}

#[derive(Debug, Subcommand)]
pub enum LoginSettingCommand {
    /// Show the console user and session lifetime
    Get,

    /// Change the console user and password
    #[command(group(
        clap::ArgGroup::new("who").required(true).args(["user", "disable"])
    ))]
    Set {
        /// New console user
        #[arg(long, short = 'u', conflicts_with = "disable")]
        user: Option<String>,

        /// Session lifetime in seconds (0 keeps the current value)
        #[arg(long, default_value = "0")]
        max_age: i64,

        /// Turn console login off
        #[arg(long)]
        disable: bool,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (secrets masked)
    Show,

    /// Print the config file path
    Path,

    /// Set a value on the selected profile (created if missing)
    Set {
        /// Profile key: appliance, user, ca_cert, insecure, or timeout
        key: String,

        /// Value to set
        value: String,
    },

    /// Set the default profile
    Use {
        /// Profile name to make the default
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
