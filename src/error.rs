//! Probe error taxonomy and its mapping onto Nagios plugin exit codes.

/// Nagios plugin exit codes.
pub const EXIT_OK: i32 = 0;
pub const EXIT_WARNING: i32 = 1;
pub const EXIT_CRITICAL: i32 = 2;
pub const EXIT_UNKNOWN: i32 = 3;

/// Errors that end a probe run.
///
/// Section-level parse failures are not represented here; the report parser
/// absorbs them and drops the offending section.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("'{binary}' not found. If it's installed, try a symlink to /sbin: ln -s /opt/dell/srvadmin/sbin/racadm /sbin/racadm")]
    ToolUnavailable { binary: String },

    #[error("Invalid command or sensortype: {0}")]
    Validation(String),

    #[error("encountered a problem running racadm command: {0}")]
    QueryFailure(String),

    #[error("racadm did not answer within {0}s")]
    QueryTimeout(u64),

    #[error("No response from iDRAC!")]
    EmptyReport,

    #[error("No status found for selector '{0}'")]
    SelectorLookup(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ProbeError {
    /// Exit status the process should terminate with for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ProbeError::ToolUnavailable { .. } | ProbeError::Validation(_) => EXIT_WARNING,
            ProbeError::QueryFailure(_) | ProbeError::QueryTimeout(_) => EXIT_CRITICAL,
            ProbeError::EmptyReport | ProbeError::SelectorLookup(_) | ProbeError::Config(_) => EXIT_UNKNOWN,
        }
    }

    /// Line printed on stdout for this error.
    /// An empty report keeps its historical bare wording; everything else is
    /// prefixed with `ERROR:` for the monitoring host to pick up.
    pub fn status_line(&self) -> String {
        match self {
            ProbeError::EmptyReport => self.to_string(),
            other => format!("ERROR: {}", other),
        }
    }
}

impl From<anyhow::Error> for ProbeError {
    fn from(err: anyhow::Error) -> Self {
        // {:#} keeps the context chain on one line
        ProbeError::Config(format!("{:#}", err))
    }
}
