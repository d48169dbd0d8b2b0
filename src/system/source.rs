//! ReportSource trait and the racadm-backed implementation.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::config::types::Credentials;
use crate::error::ProbeError;
use crate::system::command::ReportCommand;
use crate::system::executor;

#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Fail with `ToolUnavailable` if the report tool cannot be run.
    async fn ensure_available(&self) -> Result<(), ProbeError>;

    /// Run one report command and return its raw text.
    async fn fetch(&self, command: ReportCommand) -> Result<String, ProbeError>;
}

/// Queries an iDRAC through the racadm CLI.
pub struct RacadmSource {
    binary: String,
    host: String,
    credentials: Credentials,
    timeout: Duration,
}

impl RacadmSource {
    pub fn new(binary: String, host: String, credentials: Credentials, timeout: Duration) -> Self {
        Self {
            binary,
            host,
            credentials,
            timeout,
        }
    }
}

#[async_trait]
impl ReportSource for RacadmSource {
    async fn ensure_available(&self) -> Result<(), ProbeError> {
        match executor::find_binary(&self.binary) {
            Some(path) => {
                info!("Using racadm at {:?}", path);
                Ok(())
            }
            None => Err(ProbeError::ToolUnavailable {
                binary: self.binary.clone(),
            }),
        }
    }

    async fn fetch(&self, command: ReportCommand) -> Result<String, ProbeError> {
        info!("Querying iDRAC {} with '{}'", self.host, command);
        let cmd = executor::build_racadm_command(&self.binary, &self.host, &self.credentials, command);
        executor::run_racadm(cmd, self.timeout).await
    }
}
