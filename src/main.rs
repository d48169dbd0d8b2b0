//! check-idrac-sensor entry point: CLI parsing, logging, probe run, exit code.

mod app;
mod config;
mod error;
mod probe;
mod report;
mod status;
mod system;

use std::time::Duration;

use clap::Parser;
use tracing::{debug, warn};

use app::cli::Args;
use app::logging::{init_tracing, normalize_log_level, set_log_filter};
use config::persistence::{load_config, resolve_credentials};
use error::{ProbeError, EXIT_OK, EXIT_UNKNOWN};
use probe::{run_probe, ProbeOutcome, ProbeRequest};
use system::source::RacadmSource;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            use clap::error::ErrorKind;
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                print!("{}", err);
                std::process::exit(EXIT_OK);
            }
            // Usage errors are UNKNOWN to the monitoring host
            eprint!("{}", err);
            println!("ERROR: Invalid arguments. Run with --help for usage.");
            std::process::exit(EXIT_UNKNOWN);
        }
    };

    let code = match run(args).await {
        Ok(outcome) => {
            println!("{}", outcome.status_line());
            EXIT_OK
        }
        Err(err) => {
            println!("{}", err.status_line());
            err.exit_code()
        }
    };

    std::process::exit(code);
}

async fn run(args: Args) -> Result<ProbeOutcome, ProbeError> {
    // Priority: 1. --log-level flag, 2. --debug, 3. LOG_LEVEL env, 4. config file, 5. default (warn)
    let requested_level = args
        .log_level
        .clone()
        .or_else(|| args.debug.then(|| "debug".to_string()))
        .or_else(|| std::env::var("LOG_LEVEL").ok());

    let initial_filter = match requested_level.as_deref() {
        Some(level) => normalize_log_level(level).unwrap_or_else(|| {
            eprintln!("Invalid log level '{}'. Using WARN. Valid levels: TRACE, DEBUG, INFO, WARN, ERROR, CRITICAL", level);
            "warn"
        }),
        None => "warn",
    };
    init_tracing(initial_filter);

    let config = load_config(args.config.as_deref()).await?;

    if requested_level.is_none() {
        match normalize_log_level(&config.logging.log_level) {
            Some(filter) if filter != initial_filter => {
                if let Err(e) = set_log_filter(filter) {
                    warn!("{}", e);
                }
            }
            Some(_) => {}
            None => warn!("Ignoring invalid log_level '{}' in config", config.logging.log_level),
        }
    }

    let request = ProbeRequest::validate(
        &args.command,
        &args.sensor,
        args.perfdata || config.output.perfdata,
        args.debug,
    )?;
    debug!("Validated request: {:?}", request);

    let credentials = resolve_credentials(
        args.authfile.as_deref(),
        args.username.as_deref(),
        args.password.as_deref(),
    )
    .await?;

    let binary = args.racadm.unwrap_or(config.racadm.binary);
    let timeout = Duration::from_secs(args.timeout.unwrap_or(config.racadm.timeout_secs));
    let source = RacadmSource::new(binary, args.host, credentials, timeout);

    run_probe(&source, &request).await
}
