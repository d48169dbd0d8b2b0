//! One probe run: check the tool, query the iDRAC, parse, summarize.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::error::ProbeError;
use crate::report::parser::parse;
use crate::status::aggregator::summarize;
use crate::status::selector::SensorType;
use crate::system::command::ReportCommand;
use crate::system::source::ReportSource;

/// A validated probe invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub command: ReportCommand,
    pub sensor: SensorType,
    pub perfdata: bool,
    /// Dump the raw report and the parsed table at debug level.
    pub debug: bool,
}

impl ProbeRequest {
    /// Check `command` and `sensor` against the allowed values before
    /// anything is sent to the iDRAC.
    pub fn validate(command: &str, sensor: &str, perfdata: bool, debug: bool) -> Result<Self, ProbeError> {
        Ok(Self {
            command: command.parse()?,
            sensor: sensor.parse()?,
            perfdata,
            debug,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    pub summary: String,
    pub query_time: Duration,
}

impl ProbeOutcome {
    /// Line printed on stdout for the monitoring host.
    pub fn status_line(&self) -> String {
        format!("Nagios: {}", self.summary)
    }
}

pub async fn run_probe<S>(source: &S, request: &ProbeRequest) -> Result<ProbeOutcome, ProbeError>
where
    S: ReportSource + ?Sized,
{
    source.ensure_available().await?;

    let start = Instant::now();
    let raw = source.fetch(request.command).await?;
    let query_time = start.elapsed();

    if request.debug {
        debug!("Raw {} output:\n{}", request.command, raw);
    }

    if raw.trim().is_empty() {
        return Err(ProbeError::EmptyReport);
    }

    let table = parse(&raw);
    if table.is_empty() {
        warn!("No sensor sections recognised in {} bytes of {} output", raw.len(), request.command);
    }
    if request.debug {
        match serde_json::to_string_pretty(&table) {
            Ok(json) => debug!("Parsed sensor table:\n{}", json),
            Err(e) => warn!("Could not render sensor table: {}", e),
        }
    }

    let summary = summarize(&table, request.sensor.as_str(), request.perfdata)?;
    info!(
        "Checked '{}' across {} sensors in {:.2}s",
        request.sensor,
        table.instance_count(),
        query_time.as_secs_f64()
    );

    Ok(ProbeOutcome { summary, query_time })
}
