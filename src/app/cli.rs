//! Command-line argument definitions (clap).

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "check-idrac-sensor")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check iDRAC Sensors", long_about = None)]
pub struct Args {
    // === Connection ===
    /// iDRAC host name or address
    #[arg(short = 'H', long, help_heading = "Connection")]
    pub host: String,

    /// racadm user name
    #[arg(short = 'u', long, help_heading = "Connection")]
    pub username: Option<String>,

    /// racadm password
    #[arg(short = 'p', long, allow_hyphen_values = true, help_heading = "Connection")]
    pub password: Option<String>,

    /// JSON file with {"username", "password"}; takes precedence over -u/-p
    #[arg(short = 'a', long, help_heading = "Connection")]
    pub authfile: Option<PathBuf>,

    /// Path or name of the racadm binary (overrides the config file)
    #[arg(long, help_heading = "Connection")]
    pub racadm: Option<String>,

    /// Seconds to wait for racadm before giving up (overrides the config file)
    #[arg(long, help_heading = "Connection")]
    pub timeout: Option<u64>,

    // === Check ===
    /// racadm command: getsensorinfo or raid
    #[arg(short = 'C', long = "command", default_value = "getsensorinfo", help_heading = "Check")]
    pub command: String,

    /// Sensor type to report: battery, current, intrusion, memory, performance,
    /// processor, redundancy, sd_card, voltage or all
    #[arg(short = 's', long = "sensortype", default_value = "all", help_heading = "Check")]
    pub sensor: String,

    /// Append perfdata to single-sensor output
    #[arg(short = 'f', long, help_heading = "Check")]
    pub perfdata: bool,

    // === Config & Debug ===
    /// Config file (default: config.json next to the binary)
    #[arg(long, help_heading = "Config & Debug")]
    pub config: Option<PathBuf>,

    /// Log the raw report and parsed sensor table to stderr
    #[arg(short = 'd', long, help_heading = "Config & Debug")]
    pub debug: bool,

    /// Set log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(long = "log-level", help_heading = "Config & Debug")]
    pub log_level: Option<String>,
}
